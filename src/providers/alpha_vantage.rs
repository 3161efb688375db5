use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::util::{endpoint, get_text, http_client};
use crate::core::price::PriceProvider;

const TIME_SERIES_KEY: &str = "Time Series (Daily)";

/// Equity prices from Alpha Vantage: company name to ticker through symbol
/// search, then the latest daily close for that ticker.
pub struct AlphaVantageProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl AlphaVantageProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Ok(AlphaVantageProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            client: http_client()?,
        })
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut params: Vec<(&str, &str)> = params.to_vec();
        params.push(("apikey", self.api_key.as_str()));
        let url = endpoint(&self.base_url, "/query", &params)?;
        get_text(&self.client, url).await
    }

    /// Ticker of the best match for `company_name`.
    #[instrument(skip(self))]
    pub async fn resolve_symbol(&self, company_name: &str) -> Result<String> {
        let body = self
            .query(&[("function", "SYMBOL_SEARCH"), ("keywords", company_name)])
            .await?;

        let root: Value = serde_json::from_str(&body)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", company_name, e))?;

        let symbol = root
            .get("bestMatches")
            .and_then(Value::as_array)
            .and_then(|matches| matches.first())
            .and_then(|best| best.get("1. symbol"))
            .and_then(Value::as_str)
            .filter(|symbol| !symbol.is_empty())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Symbol not found for company: {}", company_name))?;

        debug!(symbol = %symbol, "Resolved company symbol");
        Ok(symbol)
    }

    /// Closing price of the most recent trading day on record for `symbol`.
    #[instrument(skip(self))]
    pub async fn latest_close(&self, symbol: &str) -> Result<f64> {
        let body = self
            .query(&[("function", "TIME_SERIES_DAILY"), ("symbol", symbol)])
            .await?;

        let root: Value = serde_json::from_str(&body)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", symbol, e))?;

        let series = root
            .get(TIME_SERIES_KEY)
            .and_then(Value::as_object)
            .ok_or_else(|| anyhow!("Time Series not found for symbol: {}", symbol))?;

        let (date, close) = latest_entry(series)
            .ok_or_else(|| anyhow!("No data available for symbol: {}", symbol))?;

        let close = parse_close(close)
            .ok_or_else(|| anyhow!("Invalid close price for {} on {}", symbol, date))?;

        debug!(%date, close, "Fetched latest close");
        Ok(close)
    }
}

/// Picks the entry with the greatest date key. Keys that are not
/// `YYYY-MM-DD` dates are ignored.
fn latest_entry(series: &Map<String, Value>) -> Option<(NaiveDate, &Value)> {
    series
        .iter()
        .filter_map(|(key, value)| {
            NaiveDate::parse_from_str(key, "%Y-%m-%d")
                .ok()
                .map(|date| (date, value))
        })
        .max_by_key(|(date, _)| *date)
}

/// Alpha Vantage quotes prices as strings; accept plain numbers too.
fn parse_close(day: &Value) -> Option<f64> {
    match day.get("4. close")? {
        Value::String(s) => s.trim().parse().ok(),
        other => other.as_f64(),
    }
}

#[async_trait]
impl PriceProvider for AlphaVantageProvider {
    async fn fetch_price_usd(&self, company_name: &str) -> Result<f64> {
        let symbol = self.resolve_symbol(company_name).await?;
        self.latest_close(&symbol).await
    }
}
