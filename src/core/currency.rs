//! Currency conversion abstractions

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Units of `to` that one unit of `from` buys.
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;

    async fn usd_to_inr(&self) -> Result<f64> {
        self.get_rate("usd", "inr").await
    }
}
