use clap::Parser;
use sfl_profit::app::render::render_text;
use sfl_profit::core::ConfigProvider;
use sfl_profit::utils::{logger, validation::Validate};
use sfl_profit::{CliConfig, LocalStorage, ProfitPipeline, RankingEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting sfl-profit");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let quiet = config.quiet;
    let data = LocalStorage::new(config.data_dir().to_string());
    let output = LocalStorage::new(config.output_path().to_string());
    let pipeline = ProfitPipeline::new(data, output, config);
    let engine = RankingEngine::new(pipeline);

    match engine.run().await {
        Ok(run) => {
            if !quiet {
                print!("{}", render_text(&run.rankings));
            }
            println!("📁 Report saved to: {}", run.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Ranking failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
