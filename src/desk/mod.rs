//! Trading desks: price an order against live market data and build the
//! result handed back to the client. Nothing is stored between orders.

pub mod coin;
pub mod share;

pub use coin::CoinDesk;
pub use share::ShareDesk;

use crate::core::currency::CurrencyRateProvider;
use crate::core::error::{Result, TradeError};
use crate::core::price::PriceProvider;
use tracing::debug;

/// Price of one unit of `asset` in `currency`.
///
/// The market price is fetched before the rate; neither is retried.
async fn unit_price(
    market: &dyn PriceProvider,
    fx: &dyn CurrencyRateProvider,
    currency: &str,
    asset: &str,
) -> Result<f64> {
    let usd = market.fetch_price_usd(asset).await?;
    let rate = fx.get_rate("usd", currency).await?;
    let unit = usd * rate;
    debug!(asset, usd, rate, unit, "Priced unit in {currency}");

    if !unit.is_finite() || unit <= 0.0 {
        return Err(TradeError::PriceUnavailable {
            asset: asset.to_string(),
            price: unit,
        });
    }
    Ok(unit)
}

fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TradeError::InvalidOrder(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Results too large to represent cannot be sent back as numbers.
fn require_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(TradeError::InvalidOrder(format!(
            "{field} is out of range for this order"
        )));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TradeError::InvalidOrder(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod mocks {
    use crate::core::currency::CurrencyRateProvider;
    use crate::core::price::PriceProvider;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct MockPriceProvider {
        prices: HashMap<String, f64>,
        pub call_count: AtomicUsize,
    }

    impl MockPriceProvider {
        pub fn with_price(asset: &str, price: f64) -> Self {
            MockPriceProvider {
                prices: HashMap::from([(asset.to_string(), price)]),
                call_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PriceProvider for MockPriceProvider {
        async fn fetch_price_usd(&self, asset: &str) -> Result<f64> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.prices
                .get(asset)
                .copied()
                .ok_or_else(|| anyhow!("Symbol not found for company: {}", asset))
        }
    }

    pub struct MockCurrencyProvider {
        rate: Option<f64>,
        pub call_count: AtomicUsize,
    }

    impl MockCurrencyProvider {
        pub fn with_rate(rate: f64) -> Self {
            MockCurrencyProvider {
                rate: Some(rate),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            MockCurrencyProvider {
                rate: None,
                call_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CurrencyRateProvider for MockCurrencyProvider {
        async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.rate
                .ok_or_else(|| anyhow!("No rate data found for currency pair: {from}{to}"))
        }
    }
}
