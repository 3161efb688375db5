use std::sync::Arc;
use tracing::{debug, instrument};

use super::{require_finite, require_name, require_non_negative, unit_price};
use crate::core::currency::CurrencyRateProvider;
use crate::core::error::Result;
use crate::core::price::PriceProvider;
use crate::core::trade::{Share, new_unit_id};

/// Buys and sells company shares at the latest daily close.
pub struct ShareDesk {
    market: Arc<dyn PriceProvider>,
    fx: Arc<dyn CurrencyRateProvider>,
    currency: String,
}

impl ShareDesk {
    pub fn new(
        market: Arc<dyn PriceProvider>,
        fx: Arc<dyn CurrencyRateProvider>,
        currency: &str,
    ) -> Self {
        ShareDesk {
            market,
            fx,
            currency: currency.to_string(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub async fn quote(&self, company_name: &str) -> Result<f64> {
        require_name("companyName", company_name)?;
        unit_price(&*self.market, &*self.fx, &self.currency, company_name).await
    }

    #[instrument(skip(self, order), fields(company = %order.company_name, amount = order.price))]
    pub async fn buy(&self, order: &Share) -> Result<Share> {
        require_non_negative("price", order.price)?;
        let unit = self.quote(&order.company_name).await?;

        let quantity = order.price / unit;
        require_finite("quantity", quantity)?;
        debug!(quantity, "Shares bought");

        Ok(Share {
            company_name: order.company_name.clone(),
            price: unit,
            quantity,
            id: new_unit_id(),
        })
    }

    #[instrument(skip(self, order), fields(company = %order.company_name, quantity = order.quantity))]
    pub async fn sell(&self, order: &Share) -> Result<Share> {
        require_non_negative("quantity", order.quantity)?;
        let unit = self.quote(&order.company_name).await?;

        let proceeds = unit * order.quantity;
        require_finite("price", proceeds)?;
        debug!(proceeds, "Shares sold");

        Ok(Share {
            company_name: order.company_name.clone(),
            price: proceeds,
            quantity: order.quantity,
            id: String::new(),
        })
    }
}
