pub mod html;
pub mod text;

use crate::domain::model::{Category, Rankings};
use crate::utils::error::{ProfitError, Result};

pub use html::render_html;
pub use text::render_text;

/// Renders `rankings` in one of the supported output formats.
pub fn render(format: &str, rankings: &Rankings) -> Result<Vec<u8>> {
    match format {
        "html" => Ok(render_html(rankings).into_bytes()),
        "csv" => render_csv(rankings),
        "json" => Ok(serde_json::to_vec_pretty(rankings)?),
        other => Err(ProfitError::InvalidConfigValueError {
            field: "output_formats".to_string(),
            value: other.to_string(),
            reason: "Unsupported format".to_string(),
        }),
    }
}

pub fn render_csv(rankings: &Rankings) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "category",
        "rank",
        "item",
        "seed_cost",
        "sell_price",
        "profit",
        "seconds",
        "profit_per_minute",
        "tolerance_seconds",
    ])?;

    for category in Category::ALL {
        for (i, record) in rankings.records(category).iter().enumerate() {
            writer.write_record([
                category.to_string(),
                (i + 1).to_string(),
                record.name.clone(),
                record.seed_cost.to_string(),
                record.sell_price.to_string(),
                record.profit.to_string(),
                record.seconds.to_string(),
                record.profit_per_minute.to_string(),
                record
                    .tolerance_seconds
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
            ])?;
        }
    }

    writer.into_inner().map_err(|e| ProfitError::ProcessingError {
        message: format!("Failed to finish CSV output: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CalculatorSettings, ProfitRecord};
    use chrono::Utc;

    fn sample() -> Rankings {
        Rankings {
            generated_at: Utc::now(),
            settings: CalculatorSettings::default(),
            crops: vec![ProfitRecord {
                name: "Cabbage, Red".to_string(),
                seed_cost: 0.5,
                sell_price: 1.5,
                profit: 1.0,
                profit_per_minute: 0.5,
                seconds: 120.0,
                tolerance_seconds: None,
            }],
            fruits: vec![ProfitRecord {
                name: "Apple".to_string(),
                seed_cost: 1.0,
                sell_price: 2.0,
                profit: 5.0,
                profit_per_minute: 0.25,
                seconds: 1200.0,
                tolerance_seconds: None,
            }],
        }
    }

    #[test]
    fn test_render_csv() {
        let csv = String::from_utf8(render_csv(&sample()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("category,rank,item"));
        assert_eq!(lines[1], "crop,1,\"Cabbage, Red\",0.5,1.5,1,120,0.5,");
        assert_eq!(lines[2], "fruit,1,Apple,1,2,5,1200,0.25,");
    }

    #[test]
    fn test_render_json() {
        let bytes = render("json", &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["crops"][0]["name"], "Cabbage, Red");
        assert_eq!(value["fruits"][0]["profit_per_minute"], 0.25);
        assert_eq!(value["settings"]["coin_rate"], 0.5);
    }

    #[test]
    fn test_unknown_format() {
        assert!(render("tsv", &sample()).is_err());
    }
}
