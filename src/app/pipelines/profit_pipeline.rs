use crate::app::render;
use crate::core::calculator::{apply_tolerance, ProfitCalculator};
use crate::core::price_feed::{fetch_market_prices, PriceFeed};
use crate::core::{ConfigProvider, Dataset, Pipeline, Rankings, Storage};
use crate::domain::model::{Category, MarketPrices, SeedDefinition};
use crate::utils::error::{ProfitError, Result};
use crate::utils::validation::is_remote_source;
use chrono::Utc;
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Reads inputs from `data`, writes rendered reports to `output`.
pub struct ProfitPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) data: S,
    pub(crate) output: S,
    pub(crate) config: C,
    pub(crate) client: Client,
}

impl<S: Storage, C: ConfigProvider> ProfitPipeline<S, C> {
    pub fn new(data: S, output: S, config: C) -> Self {
        Self {
            data,
            output,
            config,
            client: Client::new(),
        }
    }

    async fn load_seeds(&self, path: &str) -> Result<Vec<SeedDefinition>> {
        let bytes = self.data.read_file(path).await?;
        let seeds: Vec<SeedDefinition> =
            serde_json::from_slice(&bytes).map_err(|e| ProfitError::DataError {
                source_name: path.to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!("Loaded {} seed definitions from {}", seeds.len(), path);
        Ok(seeds)
    }

    async fn load_prices(&self) -> Result<MarketPrices> {
        let source = self.config.prices_source();
        if is_remote_source(source) {
            return fetch_market_prices(&self.client, source).await;
        }

        let bytes = self.data.read_file(source).await?;
        Ok(PriceFeed::from_slice(&bytes)?.market_prices())
    }

    fn artifact_path(&self, filename: &str) -> String {
        Path::new(self.config.output_path())
            .join(filename)
            .display()
            .to_string()
    }

    fn report_warnings(&self, calculator: &ProfitCalculator, data: &Dataset) {
        for item in calculator.modifiers().duplicates() {
            tracing::warn!(
                "⚠️ Multiple modifiers for {}, only the first one is applied",
                item
            );
        }

        for item in calculator.modifiers().items() {
            if !data.contains_item(item) {
                tracing::warn!("⚠️ Modifier for unknown item {} has no effect", item);
            }
        }

        for seed in data.crops.iter().chain(&data.fruits) {
            if !(seed.seconds > 0.0) {
                tracing::warn!(
                    "⚠️ {} has a grow time of {}s, its profit per minute is degenerate",
                    seed.name,
                    seed.seconds
                );
            }
        }
    }
}

fn bundle(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file(name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(data)?;
    }
    Ok(zip.finish()?.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ProfitPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        // 三個來源同時載入，任何一個失敗就中止
        let (crops, fruits, prices) = tokio::try_join!(
            self.load_seeds(self.config.crops_file()),
            self.load_seeds(self.config.fruits_file()),
            self.load_prices()
        )?;

        if prices.is_empty() {
            tracing::warn!("No tradable prices found, rankings will be empty");
        }

        Ok(Dataset {
            crops,
            fruits,
            prices,
        })
    }

    async fn transform(&self, data: Dataset) -> Result<Rankings> {
        let settings = self.config.settings();
        let calculator = ProfitCalculator::new(settings.coin_rate, &settings.modifiers);
        self.report_warnings(&calculator, &data);

        let rank = |category: Category| {
            let mut records = calculator.calculate(
                data.seeds(category),
                &data.prices,
                settings.multiplier(category),
            );
            if settings.tolerance {
                apply_tolerance(&mut records);
            }
            tracing::debug!(
                "{}: {} of {} items are tradable",
                category.title(),
                records.len(),
                data.seeds(category).len()
            );
            records
        };

        let crops = rank(Category::Crop);
        let fruits = rank(Category::Fruit);

        Ok(Rankings {
            generated_at: Utc::now(),
            settings,
            crops,
            fruits,
        })
    }

    async fn load(&self, rankings: &Rankings) -> Result<String> {
        let mut files = Vec::with_capacity(self.config.output_formats().len());
        for format in self.config.output_formats() {
            let bytes = render::render(format, rankings)?;
            files.push((self.config.output_filename(format), bytes));
        }

        if let Some(archive) = self.config.compression() {
            tracing::debug!("Creating ZIP file with {} files", files.len());
            let zip_data = bundle(&files)?;
            self.output.write_file(archive, &zip_data).await?;
            return Ok(self.artifact_path(archive));
        }

        for (filename, bytes) in &files {
            self.output.write_file(filename, bytes).await?;
        }

        let primary = files
            .first()
            .map(|(filename, _)| filename.as_str())
            .ok_or_else(|| ProfitError::MissingConfigError {
                field: "output_formats".to_string(),
            })?;
        Ok(self.artifact_path(primary))
    }
}
