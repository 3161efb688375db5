use thiserror::Error;

/// Reasons an order cannot be priced.
#[derive(Debug, Error)]
pub enum TradeError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// The market returned a price that cannot be traded at, e.g. the zero
    /// the crypto provider falls back to on an unreadable quote.
    #[error("No usable price for {asset}: {price}")]
    PriceUnavailable { asset: String, price: f64 },

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TradeError>;
