use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, instrument};

use super::util::{get_text, http_client};
use crate::core::currency::CurrencyRateProvider;

/// Exchange rates from the free currency-api rate tables, served as static
/// JSON files of the form `{"date": ..., "<from>": {"<to>": rate, ...}}`.
pub struct CurrencyApiProvider {
    base_url: String,
    client: Client,
}

impl CurrencyApiProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(CurrencyApiProvider {
            base_url: base_url.to_string(),
            client: http_client()?,
        })
    }
}

#[async_trait]
impl CurrencyRateProvider for CurrencyApiProvider {
    #[instrument(name = "CurrencyRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let from = from.to_lowercase();
        let to = to.to_lowercase();
        let pair = format!("{from}{to}");

        let url = format!(
            "{}/v1/currencies/{}.json",
            self.base_url.trim_end_matches('/'),
            from
        );
        let url: Url = url
            .parse()
            .map_err(|e| anyhow!("Invalid URL {}: {}", url, e))?;

        let text = get_text(&self.client, url)
            .await
            .map_err(|e| anyhow!("{} for currency pair: {}", e, pair))?;

        let data: Value = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", pair, e))?;

        let rate = data
            .get(&from)
            .and_then(|rates| rates.get(&to))
            .and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("No rate data found for currency pair: {}", pair))?;

        debug!(rate, "Fetched currency rate");
        Ok(rate)
    }
}
