use clap::Parser;
use sfl_profit::app::render::render_text;
use sfl_profit::core::ConfigProvider;
use sfl_profit::utils::validation::{is_remote_source, Validate};
use sfl_profit::utils::logger;
use sfl_profit::{LocalStorage, ProfitPipeline, RankingEngine, TomlConfig};
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-profit")]
#[command(about = "Profit rankings driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "profit-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the tolerance setting from config
    #[arg(long)]
    tolerance: Option<bool>,

    /// Do not print the rankings to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based profit ranking");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(tolerance) = args.tolerance {
        config.settings.tolerance = Some(tolerance);
        tracing::info!("🔧 Tolerance overridden to: {}", tolerance);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let data = LocalStorage::new(config.data_dir().to_string());
    let output = LocalStorage::new(config.output_path().to_string());
    let pipeline = ProfitPipeline::new(data, output, config);
    let engine = RankingEngine::new(pipeline);

    match engine.run().await {
        Ok(run) => {
            if !args.quiet {
                print!("{}", render_text(&run.rankings));
            }
            println!("✅ Profit report completed successfully!");
            println!("📁 Output saved to: {}", run.output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let settings = config.settings();

    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);
    if let Some(description) = &config.report.description {
        println!("  Description: {}", description);
    }
    println!("  Data dir: {}", config.data_dir());
    println!("  Prices: {}", config.prices_source());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!(
        "  Coin rate: {} · Crop multiplier: {} · Fruit multiplier: {}",
        settings.coin_rate, settings.crop_multiplier, settings.fruit_multiplier
    );
    println!("  Modifiers: {}", settings.modifiers.len());
    println!("  Tolerance: {}", settings.tolerance);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis");
    println!("==================");

    // 輸入檔案檢查
    println!();
    println!("📥 Inputs:");
    let data_dir = Path::new(config.data_dir());
    for file in [config.crops_file(), config.fruits_file()] {
        let path = data_dir.join(file);
        let status = if path.exists() { "✅" } else { "❌ missing" };
        println!("  {} {}", path.display(), status);
    }

    let prices = config.prices_source();
    if is_remote_source(prices) {
        println!("  {} (fetched over HTTP)", prices);
    } else {
        let path = data_dir.join(prices);
        let status = if path.exists() { "✅" } else { "❌ missing" };
        println!("  {} {}", path.display(), status);
    }

    // 修正項目
    let settings = config.settings();
    if !settings.modifiers.is_empty() {
        println!();
        println!("🔄 Modifiers:");
        for modifier in &settings.modifiers {
            println!(
                "  {} -> seed {:?}, yield {:?}, time {:?}",
                modifier.item,
                modifier.seed_override(),
                modifier.yield_override(),
                modifier.time_override()
            );
        }
    }

    // 輸出分析
    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    for format in config.output_formats() {
        println!("  {} -> {}", format, config.output_filename(format));
    }
    if let Some(archive) = config.compression() {
        println!("  Compression: {} (ZIP)", archive);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
