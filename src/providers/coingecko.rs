use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::util::{endpoint, get_text, http_client};
use crate::core::price::PriceProvider;

/// Crypto spot prices from the CoinGecko simple price API.
pub struct CoinGeckoProvider {
    base_url: String,
    client: Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(CoinGeckoProvider {
            base_url: base_url.to_string(),
            client: http_client()?,
        })
    }
}

/// Reads `{"<coin>": {"usd": <price>}}`. Anything else reads as zero.
fn parse_usd_price(body: &str, coin: &str) -> f64 {
    let price = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|root| root.get(coin)?.get("usd")?.as_f64());

    match price {
        Some(price) => price,
        None => {
            warn!(coin, response = %body, "Unreadable price response, falling back to 0.0");
            0.0
        }
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoPriceFetch", skip(self), fields(coin = %coin))]
    async fn fetch_price_usd(&self, coin: &str) -> Result<f64> {
        let url = endpoint(
            &self.base_url,
            "/api/v3/simple/price",
            &[("ids", coin), ("vs_currencies", "usd")],
        )?;

        let body = get_text(&self.client, url).await?;
        let price = parse_usd_price(&body, coin);
        debug!(price, "Fetched crypto price");
        Ok(price)
    }
}
