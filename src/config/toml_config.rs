use crate::config::validate_settings;
use crate::core::ConfigProvider;
use crate::domain::model::{CalculatorSettings, Modifier};
use crate::utils::error::{ProfitError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name: "profit-report".to_string(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_crops_file")]
    pub crops_file: String,
    #[serde(default = "default_fruits_file")]
    pub fruits_file: String,
    /// File path or http(s) URL of the price feed.
    #[serde(default = "default_prices")]
    pub prices: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            crops_file: default_crops_file(),
            fruits_file: default_fruits_file(),
            prices: default_prices(),
        }
    }
}

fn default_data_dir() -> String {
    ".".to_string()
}

fn default_crops_file() -> String {
    "crops.json".to_string()
}

fn default_fruits_file() -> String {
    "fruits.json".to_string()
}

fn default_prices() -> String {
    "prices.json".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    pub coin_rate: Option<f64>,
    pub crop_multiplier: Option<f64>,
    pub fruit_multiplier: Option<f64>,
    pub tolerance: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub html: Option<String>,
    pub csv: Option<String>,
    pub json: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProfitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ProfitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRICES_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;
        validation::validate_path("source.data_dir", &self.source.data_dir)?;
        validation::validate_path("source.crops_file", &self.source.crops_file)?;
        validation::validate_path("source.fruits_file", &self.source.fruits_file)?;
        validation::validate_price_source("source.prices", &self.source.prices)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        let filenames: Vec<String> = self
            .load
            .output_formats
            .iter()
            .map(|format| self.output_filename(format))
            .collect();
        for filename in &filenames {
            validation::validate_path("load.filenames", filename)?;
        }
        validation::validate_unique_filenames("load.filenames", &filenames)?;

        if let Some(compression) = self.load.compression.as_ref().filter(|c| c.enabled) {
            validation::validate_path("load.compression.filename", &compression.filename)?;
        }

        validate_settings(&self.settings())
    }

    /// 是否計算容忍時間
    pub fn tolerance_enabled(&self) -> bool {
        self.settings.tolerance.unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.source.data_dir
    }

    fn crops_file(&self) -> &str {
        &self.source.crops_file
    }

    fn fruits_file(&self) -> &str {
        &self.source.fruits_file
    }

    fn prices_source(&self) -> &str {
        &self.source.prices
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn output_filename(&self, format: &str) -> String {
        let configured = self.load.filenames.as_ref().and_then(|f| match format {
            "html" => f.html.clone(),
            "csv" => f.csv.clone(),
            "json" => f.json.clone(),
            _ => None,
        });
        configured.unwrap_or_else(|| format!("profit_report.{}", format))
    }

    fn compression(&self) -> Option<&str> {
        self.load
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn settings(&self) -> CalculatorSettings {
        let defaults = CalculatorSettings::default();
        CalculatorSettings {
            coin_rate: self.settings.coin_rate.unwrap_or(defaults.coin_rate),
            crop_multiplier: self
                .settings
                .crop_multiplier
                .unwrap_or(defaults.crop_multiplier),
            fruit_multiplier: self
                .settings
                .fruit_multiplier
                .unwrap_or(defaults.fruit_multiplier),
            modifiers: self.modifiers.clone(),
            tolerance: self.tolerance_enabled(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
