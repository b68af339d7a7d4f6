use crate::domain::model::MarketPrices;
use crate::utils::error::{ProfitError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_PRICES_URL: &str = "https://sfl.world/api/v1/prices";

/// `{ "data": { "p2p": { "<item>": <price>, ... } } }`
///
/// Any level may be missing or of the wrong shape; the feed then simply has
/// no prices. Only a document that is not JSON at all is an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceFeed {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<PriceData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceData {
    #[serde(default, deserialize_with = "lenient")]
    pub p2p: Option<HashMap<String, serde_json::Value>>,
}

/// `None` for anything that does not have the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl PriceFeed {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| ProfitError::DataError {
                source_name: "price feed".to_string(),
                message: e.to_string(),
            })?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            tracing::warn!("Price feed is not a JSON object, every item is untradable");
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| ProfitError::DataError {
            source_name: "price feed".to_string(),
            message: e.to_string(),
        })
    }

    pub fn market_prices(&self) -> MarketPrices {
        let Some(p2p) = self.data.as_ref().and_then(|d| d.p2p.as_ref()) else {
            tracing::warn!("Price feed has no data.p2p section, every item is untradable");
            return MarketPrices::new();
        };

        p2p.iter()
            .filter_map(|(name, value)| match numeric(value) {
                Some(price) => Some((name.as_str(), price)),
                None => {
                    tracing::debug!("Skipping non-numeric price for {}: {}", name, value);
                    None
                }
            })
            .collect()
    }
}

fn numeric(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// GET the raw price document. Non-2xx responses are errors.
pub async fn download_prices(client: &Client, url: &str) -> Result<serde_json::Value> {
    tracing::debug!("Making price request to: {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    tracing::debug!("Price response status: {}", status);
    if !status.is_success() {
        return Err(ProfitError::HttpStatusError {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.json().await?)
}

pub async fn fetch_market_prices(client: &Client, url: &str) -> Result<MarketPrices> {
    let raw = download_prices(client, url).await?;
    Ok(PriceFeed::from_value(raw)?.market_prices())
}

/// Writes the document pretty-printed with two-space indentation.
pub async fn save_prices<P: AsRef<Path>>(path: P, document: &serde_json::Value) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(document)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_p2p_prices() {
        let feed = PriceFeed::from_slice(
            br#"{"data":{"p2p":{"Sunflower":0.00018,"Potato":"0.0012","Egg":null,"Wood":0}},"updatedAt":1}"#,
        )
        .unwrap();
        let prices = feed.market_prices();

        assert_eq!(prices.get("Sunflower"), Some(0.00018));
        assert_eq!(prices.get("Potato"), Some(0.0012));
        assert_eq!(prices.get("Egg"), None);
        assert_eq!(prices.get("Wood"), None);
        assert_eq!(prices.len(), 2);
    }

    #[test]
    fn test_missing_sections_mean_no_prices() {
        let docs: [&[u8]; 3] = [br#"{}"#, br#"{"data":{}}"#, br#"{"data":null}"#];
        for doc in docs {
            let feed = PriceFeed::from_slice(doc).unwrap();
            assert!(feed.market_prices().is_empty());
        }
    }

    #[test]
    fn test_wrongly_shaped_sections_mean_no_prices() {
        let docs: [&[u8]; 5] = [
            br#"{"data":[]}"#,
            br#"{"data":"stale"}"#,
            br#"{"data":{"p2p":[1,2]}}"#,
            br#"{"data":{"p2p":false}}"#,
            br#"[]"#,
        ];
        for doc in docs {
            let feed = PriceFeed::from_slice(doc).unwrap();
            assert!(feed.market_prices().is_empty());
        }
    }

    #[test]
    fn test_malformed_feed_is_data_error() {
        let err = PriceFeed::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, ProfitError::DataError { .. }));
    }

    #[test]
    fn test_save_prices_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prices.json");
        let doc = serde_json::json!({"data": {"p2p": {"Kale": 0.05}}});

        tokio_test::block_on(save_prices(&path, &doc)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"data\": {"));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_save_prices_keeps_feed_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.json");
        let doc: serde_json::Value = serde_json::from_str(
            r#"{"updatedAt":1,"data":{"p2p":{"Wheat":0.002,"Apple":0.02,"Kale":0.05}}}"#,
        )
        .unwrap();

        tokio_test::block_on(save_prices(&path, &doc)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"updatedAt\": 1,\n  \"data\""));
        let wheat = written.find("Wheat").unwrap();
        let apple = written.find("Apple").unwrap();
        let kale = written.find("Kale").unwrap();
        assert!(wheat < apple && apple < kale);
    }
}
