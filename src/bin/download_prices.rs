use anyhow::Context;
use clap::Parser;
use sfl_profit::core::price_feed::{download_prices, save_prices, PriceFeed, DEFAULT_PRICES_URL};
use sfl_profit::utils::logger;

#[derive(Parser)]
#[command(name = "download_prices")]
#[command(about = "Fetch the latest market prices and save them as prices.json")]
struct Args {
    /// Price endpoint
    #[arg(long, default_value = DEFAULT_PRICES_URL)]
    url: String,

    /// Where to write the pretty-printed feed
    #[arg(short, long, default_value = "prices.json")]
    output: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    println!("Fetching latest prices...");
    tracing::info!("🌐 Fetching prices from {}", args.url);

    let client = reqwest::Client::new();
    let document = download_prices(&client, &args.url)
        .await
        .with_context(|| format!("failed to download prices from {}", args.url))?;

    let tradable = PriceFeed::from_value(document.clone())
        .map(|feed| feed.market_prices().len())
        .unwrap_or(0);
    tracing::info!("{} tradable items in feed", tradable);

    save_prices(&args.output, &document)
        .await
        .with_context(|| format!("failed to write {}", args.output))?;

    println!("📁 Prices saved to: {}", args.output);
    Ok(())
}
