use crate::utils::error::ProfitError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Static growth data for one crop or fruit, as stored in `crops.json` / `fruits.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDefinition {
    pub name: String,
    /// Seed price in coins.
    pub price: f64,
    #[serde(rename = "yield", default, skip_serializing_if = "Option::is_none")]
    pub base_yield: Option<f64>,
    /// Grow time in seconds.
    pub seconds: f64,
}

impl SeedDefinition {
    pub fn effective_base_yield(&self) -> f64 {
        self.base_yield.unwrap_or(1.0)
    }
}

/// Per-item override. Zero, negative or NaN fields fall back to the base value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub item: String,
    #[serde(default)]
    pub seed: f64,
    #[serde(rename = "yield", default)]
    pub yield_amount: f64,
    #[serde(default)]
    pub time: f64,
}

impl Modifier {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            seed: 0.0,
            yield_amount: 0.0,
            time: 0.0,
        }
    }

    pub fn seed_override(&self) -> Option<f64> {
        positive(self.seed)
    }

    pub fn yield_override(&self) -> Option<f64> {
        positive(self.yield_amount)
    }

    pub fn time_override(&self) -> Option<f64> {
        positive(self.time)
    }
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

/// Parses `ITEM:seed=N,yield=N,time=N`. Every field after the colon is optional.
impl FromStr for Modifier {
    type Err = ProfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item, fields) = match s.split_once(':') {
            Some((item, fields)) => (item.trim(), fields),
            None => (s.trim(), ""),
        };

        if item.is_empty() {
            return Err(ProfitError::InvalidConfigValueError {
                field: "modifier".to_string(),
                value: s.to_string(),
                reason: "Item name cannot be empty".to_string(),
            });
        }

        let mut modifier = Modifier::new(item);
        for pair in fields.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').ok_or_else(|| {
                ProfitError::InvalidConfigValueError {
                    field: "modifier".to_string(),
                    value: s.to_string(),
                    reason: format!("Expected key=value, got '{}'", pair),
                }
            })?;
            let value: f64 =
                raw.trim()
                    .parse()
                    .map_err(|_| ProfitError::InvalidConfigValueError {
                        field: "modifier".to_string(),
                        value: s.to_string(),
                        reason: format!("'{}' is not a number", raw.trim()),
                    })?;
            match key.trim() {
                "seed" => modifier.seed = value,
                "yield" => modifier.yield_amount = value,
                "time" => modifier.time = value,
                other => {
                    return Err(ProfitError::InvalidConfigValueError {
                        field: "modifier".to_string(),
                        value: s.to_string(),
                        reason: format!("Unknown field '{}', expected seed, yield or time", other),
                    })
                }
            }
        }

        Ok(modifier)
    }
}

/// Sell prices keyed by item name. Only tradable items are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketPrices(HashMap<String, f64>);

impl MarketPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero and non-finite prices count as "not tradable".
    pub fn insert(&mut self, name: impl Into<String>, price: f64) {
        if price != 0.0 && price.is_finite() {
            self.0.insert(name.into(), price);
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for MarketPrices {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut prices = MarketPrices::new();
        for (name, price) in iter {
            prices.insert(name, price);
        }
        prices
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Crop,
    Fruit,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Crop, Category::Fruit];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Crop => "Crops",
            Category::Fruit => "Fruits",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Crop => write!(f, "crop"),
            Category::Fruit => write!(f, "fruit"),
        }
    }
}

/// Immutable inputs for one computation, assembled before the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Currency (flowers) per 1000 coins.
    pub coin_rate: f64,
    pub crop_multiplier: f64,
    pub fruit_multiplier: f64,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub tolerance: bool,
}

impl CalculatorSettings {
    pub const DEFAULT_COIN_RATE: f64 = 0.5;

    pub fn multiplier(&self, category: Category) -> f64 {
        match category {
            Category::Crop => self.crop_multiplier,
            Category::Fruit => self.fruit_multiplier,
        }
    }
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            coin_rate: Self::DEFAULT_COIN_RATE,
            crop_multiplier: 1.0,
            fruit_multiplier: 1.0,
            modifiers: Vec::new(),
            tolerance: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitRecord {
    pub name: String,
    pub seed_cost: f64,
    pub sell_price: f64,
    /// Profit per pick.
    pub profit: f64,
    pub profit_per_minute: f64,
    /// Effective grow time rounded to whole seconds.
    pub seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance_seconds: Option<f64>,
}

/// Everything the pipeline extracts before computing.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub crops: Vec<SeedDefinition>,
    pub fruits: Vec<SeedDefinition>,
    pub prices: MarketPrices,
}

impl Dataset {
    pub fn seeds(&self, category: Category) -> &[SeedDefinition] {
        match category {
            Category::Crop => &self.crops,
            Category::Fruit => &self.fruits,
        }
    }

    pub fn contains_item(&self, name: &str) -> bool {
        self.crops.iter().chain(&self.fruits).any(|s| s.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rankings {
    pub generated_at: DateTime<Utc>,
    pub settings: CalculatorSettings,
    pub crops: Vec<ProfitRecord>,
    pub fruits: Vec<ProfitRecord>,
}

impl Rankings {
    pub fn records(&self, category: Category) -> &[ProfitRecord] {
        match category {
            Category::Crop => &self.crops,
            Category::Fruit => &self.fruits,
        }
    }
}
