pub mod cli;
pub mod toml_config;

use crate::domain::model::CalculatorSettings;
use crate::utils::error::{ProfitError, Result};
use crate::utils::validation;

#[cfg(feature = "cli")]
pub use args::CliConfig;

/// Checks shared by every config source before a run.
pub fn validate_settings(settings: &CalculatorSettings) -> Result<()> {
    validation::validate_range("coin_rate", settings.coin_rate, 0.0, f64::MAX)?;
    validation::validate_range("crop_multiplier", settings.crop_multiplier, 0.0, f64::MAX)?;
    validation::validate_range("fruit_multiplier", settings.fruit_multiplier, 0.0, f64::MAX)?;

    for modifier in &settings.modifiers {
        validation::validate_non_empty_string("modifiers.item", &modifier.item)?;
        for (field, value) in [
            ("modifiers.seed", modifier.seed),
            ("modifiers.yield", modifier.yield_amount),
            ("modifiers.time", modifier.time),
        ] {
            if !value.is_finite() {
                return Err(ProfitError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: format!("Override for {} must be a finite number", modifier.item),
                });
            }
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
mod args {
    use super::validate_settings;
    use crate::core::ConfigProvider;
    use crate::domain::model::{CalculatorSettings, Modifier};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "sfl-profit")]
    #[command(about = "Rank Sunflower Land crops and fruits by profit per minute")]
    pub struct CliConfig {
        #[arg(long, default_value = ".", help = "Directory holding crops.json, fruits.json and prices.json")]
        pub data_dir: String,

        #[arg(long, default_value = "crops.json")]
        pub crops_file: String,

        #[arg(long, default_value = "fruits.json")]
        pub fruits_file: String,

        #[arg(long, default_value = "prices.json", help = "Price feed file (relative to --data-dir) or http(s) URL")]
        pub prices: String,

        #[arg(long, default_value = "0.5", help = "Flowers received per 1000 coins")]
        pub coin_rate: f64,

        #[arg(long, default_value = "1", help = "Crop plot count or yield scaling")]
        pub crop_multiplier: f64,

        #[arg(long, default_value = "1", help = "Fruit plot count or yield scaling")]
        pub fruit_multiplier: f64,

        #[arg(
            long = "modifier",
            value_name = "ITEM:seed=N,yield=N,time=N",
            help = "Per-item override, repeatable"
        )]
        pub modifiers: Vec<Modifier>,

        #[arg(long, help = "Add the tolerance time column")]
        pub tolerance: bool,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "html")]
        pub output_formats: Vec<String>,

        #[arg(long, help = "Bundle the outputs into profit_report.zip")]
        pub compress: bool,

        #[arg(long, short, help = "Do not print the rankings to stdout")]
        pub quiet: bool,

        #[arg(long, short, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn data_dir(&self) -> &str {
            &self.data_dir
        }

        fn crops_file(&self) -> &str {
            &self.crops_file
        }

        fn fruits_file(&self) -> &str {
            &self.fruits_file
        }

        fn prices_source(&self) -> &str {
            &self.prices
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn compression(&self) -> Option<&str> {
            self.compress.then_some("profit_report.zip")
        }

        fn settings(&self) -> CalculatorSettings {
            CalculatorSettings {
                coin_rate: self.coin_rate,
                crop_multiplier: self.crop_multiplier,
                fruit_multiplier: self.fruit_multiplier,
                modifiers: self.modifiers.clone(),
                tolerance: self.tolerance,
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("data_dir", &self.data_dir)?;
            validation::validate_path("crops_file", &self.crops_file)?;
            validation::validate_path("fruits_file", &self.fruits_file)?;
            validation::validate_price_source("prices", &self.prices)?;
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_output_formats("output_formats", &self.output_formats)?;
            validate_settings(&self.settings())
        }
    }

}
