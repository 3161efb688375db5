//! Pricing abstractions

use anyhow::Result;
use async_trait::async_trait;

/// A source of live unit prices quoted in US dollars.
///
/// `asset` is whatever the market identifies the instrument by: a coin id
/// such as `bitcoin` for crypto, a company name such as `Apple` for equities.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_price_usd(&self, asset: &str) -> Result<f64>;
}
