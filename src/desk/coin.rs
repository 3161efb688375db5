use std::sync::Arc;
use tracing::{debug, instrument};

use super::{require_finite, require_name, require_non_negative, unit_price};
use crate::core::currency::CurrencyRateProvider;
use crate::core::error::{Result, TradeError};
use crate::core::price::PriceProvider;
use crate::core::trade::{Coin, new_unit_id};

/// Buys and sells crypto coins at the live market price.
pub struct CoinDesk {
    market: Arc<dyn PriceProvider>,
    fx: Arc<dyn CurrencyRateProvider>,
    currency: String,
    max_coin_ids: usize,
}

impl CoinDesk {
    pub fn new(
        market: Arc<dyn PriceProvider>,
        fx: Arc<dyn CurrencyRateProvider>,
        currency: &str,
        max_coin_ids: usize,
    ) -> Self {
        CoinDesk {
            market,
            fx,
            currency: currency.to_string(),
            max_coin_ids,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Current price of one `coin_name` in the desk currency.
    pub async fn quote(&self, coin_name: &str) -> Result<f64> {
        require_name("coinName", coin_name)?;
        unit_price(&*self.market, &*self.fx, &self.currency, coin_name).await
    }

    /// Spends `order.price` on `order.coin_name`.
    ///
    /// The returned quantity is the exact fraction bought. One identifier is
    /// issued per started unit, so a 0.025 coin buy still gets one id.
    #[instrument(skip(self, order), fields(coin = %order.coin_name, amount = order.price))]
    pub async fn buy(&self, order: &Coin) -> Result<Coin> {
        require_non_negative("price", order.price)?;
        let unit = self.quote(&order.coin_name).await?;

        let quantity = order.price / unit;
        require_finite("quantity", quantity)?;
        let units = quantity.ceil();
        if units > self.max_coin_ids as f64 {
            return Err(TradeError::InvalidOrder(format!(
                "order would issue {units} coin ids, limit is {}",
                self.max_coin_ids
            )));
        }

        let coin_id: Vec<String> = (0..units as usize).map(|_| new_unit_id()).collect();
        debug!(quantity, ids = coin_id.len(), "Coin bought");

        Ok(Coin {
            coin_name: order.coin_name.clone(),
            quantity,
            price: unit,
            coin_id,
        })
    }

    /// Sells `order.quantity` of `order.coin_name`; the result's price is the
    /// total proceeds.
    #[instrument(skip(self, order), fields(coin = %order.coin_name, quantity = order.quantity))]
    pub async fn sell(&self, order: &Coin) -> Result<Coin> {
        require_non_negative("quantity", order.quantity)?;
        let unit = self.quote(&order.coin_name).await?;

        let proceeds = unit * order.quantity;
        require_finite("price", proceeds)?;
        debug!(proceeds, "Coin sold");

        Ok(Coin {
            coin_name: order.coin_name.clone(),
            quantity: order.quantity,
            price: proceeds,
            coin_id: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desk::mocks::{MockCurrencyProvider, MockPriceProvider};
    use std::collections::HashSet;
    use std::sync::atomic::Ordering;

    fn desk(market: MockPriceProvider, fx: MockCurrencyProvider) -> CoinDesk {
        CoinDesk::new(Arc::new(market), Arc::new(fx), "inr", 10_000)
    }

    fn order(coin_name: &str, price: f64, quantity: f64) -> Coin {
        Coin {
            coin_name: coin_name.to_string(),
            price,
            quantity,
            coin_id: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_buy_fraction_of_bitcoin() {
        let desk = desk(
            MockPriceProvider::with_price("bitcoin", 50000.0),
            MockCurrencyProvider::with_rate(80.0),
        );

        let coin = desk.buy(&order("bitcoin", 100000.0, 0.0)).await.unwrap();

        assert_eq!(coin.coin_name, "bitcoin");
        assert_eq!(coin.price, 4_000_000.0);
        assert_eq!(coin.quantity, 0.025);
        assert_eq!(coin.coin_id.len(), 1);
    }

    #[tokio::test]
    async fn test_buy_issues_one_id_per_started_unit() {
        let desk = desk(
            MockPriceProvider::with_price("dogecoin", 0.5),
            MockCurrencyProvider::with_rate(80.0),
        );

        // unit price 40, 410 / 40 = 10.25 coins
        let coin = desk.buy(&order("dogecoin", 410.0, 0.0)).await.unwrap();

        assert_eq!(coin.quantity, 10.25);
        assert_eq!(coin.coin_id.len(), 11);
        let unique: HashSet<_> = coin.coin_id.iter().collect();
        assert_eq!(unique.len(), 11);
    }

    #[tokio::test]
    async fn test_buy_exact_units() {
        let desk = desk(
            MockPriceProvider::with_price("dogecoin", 0.5),
            MockCurrencyProvider::with_rate(80.0),
        );

        let coin = desk.buy(&order("dogecoin", 400.0, 0.0)).await.unwrap();
        assert_eq!(coin.quantity, 10.0);
        assert_eq!(coin.coin_id.len(), 10);
    }

    #[tokio::test]
    async fn test_sell_returns_proceeds() {
        let desk = desk(
            MockPriceProvider::with_price("ethereum", 2000.0),
            MockCurrencyProvider::with_rate(80.0),
        );

        let coin = desk.sell(&order("ethereum", 0.0, 1.5)).await.unwrap();

        assert_eq!(coin.quantity, 1.5);
        assert_eq!(coin.price, 240_000.0);
        assert!(coin.coin_id.is_empty());
    }

    #[tokio::test]
    async fn test_zero_price_is_refused() {
        let desk = desk(
            MockPriceProvider::with_price("bitcoin", 0.0),
            MockCurrencyProvider::with_rate(80.0),
        );

        let result = desk.buy(&order("bitcoin", 100000.0, 0.0)).await;
        assert!(matches!(
            result,
            Err(TradeError::PriceUnavailable { price, .. }) if price == 0.0
        ));
    }

    #[tokio::test]
    async fn test_negative_amount_is_rejected_before_pricing() {
        let market = Arc::new(MockPriceProvider::with_price("bitcoin", 50000.0));
        let desk = CoinDesk::new(
            market.clone(),
            Arc::new(MockCurrencyProvider::with_rate(80.0)),
            "inr",
            10_000,
        );

        let result = desk.buy(&order("bitcoin", -5.0, 0.0)).await;
        assert!(matches!(result, Err(TradeError::InvalidOrder(_))));
        assert_eq!(market.call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_coin_name_is_rejected() {
        let desk = desk(
            MockPriceProvider::with_price("bitcoin", 50000.0),
            MockCurrencyProvider::with_rate(80.0),
        );

        let result = desk.sell(&order("  ", 0.0, 1.0)).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid order: coinName must not be empty"
        );
    }

    #[tokio::test]
    async fn test_id_limit() {
        let desk = CoinDesk::new(
            Arc::new(MockPriceProvider::with_price("shiba-inu", 0.0001)),
            Arc::new(MockCurrencyProvider::with_rate(100.0)),
            "inr",
            5,
        );

        let result = desk.buy(&order("shiba-inu", 1.0, 0.0)).await;
        assert!(matches!(result, Err(TradeError::InvalidOrder(_))));
    }

    #[tokio::test]
    async fn test_sell_overflowing_proceeds_is_rejected() {
        let desk = desk(
            MockPriceProvider::with_price("bitcoin", 50000.0),
            MockCurrencyProvider::with_rate(80.0),
        );

        let result = desk.sell(&order("bitcoin", 0.0, 1e305)).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid order: price is out of range for this order"
        );
    }

    #[tokio::test]
    async fn test_buy_overflowing_quantity_is_rejected() {
        let desk = desk(
            MockPriceProvider::with_price("shiba-inu", 1e-10),
            MockCurrencyProvider::with_rate(80.0),
        );

        let result = desk.buy(&order("shiba-inu", f64::MAX, 0.0)).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid order: quantity is out of range for this order"
        );
    }

    #[tokio::test]
    async fn test_rate_failure_propagates() {
        let desk = desk(
            MockPriceProvider::with_price("bitcoin", 50000.0),
            MockCurrencyProvider::failing(),
        );

        let result = desk.buy(&order("bitcoin", 100.0, 0.0)).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rate data found for currency pair: usdinr"
        );
    }
}
