use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FORMAT_ENV: &str = "SFL_PROFIT_LOG_FORMAT";

fn default_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "sfl_profit=debug,info"
    } else {
        "sfl_profit=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Picks the compact or JSON layer depending on `SFL_PROFIT_LOG_FORMAT`.
pub fn init_cli_logger(verbose: bool) {
    match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => init_json_logger(verbose),
        _ => init_compact_logger(verbose),
    }
}

fn init_compact_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}
