//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod price;
pub mod trade;

// Re-export main types for cleaner imports
pub use currency::CurrencyRateProvider;
pub use error::TradeError;
pub use price::PriceProvider;
pub use trade::{ApiResponse, Coin, Share};
