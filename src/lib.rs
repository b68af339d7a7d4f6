pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    calculator::{apply_tolerance, calculate_profit, ProfitCalculator},
    duration::format_dhms,
    engine::{RankingEngine, RunOutput},
    pipeline::ProfitPipeline,
};
pub use crate::domain::model::{
    CalculatorSettings, Category, MarketPrices, Modifier, ProfitRecord, Rankings, SeedDefinition,
};
pub use crate::utils::error::{ProfitError, Result};
