pub mod alpha_vantage;
pub mod coingecko;
pub mod currency_api;
pub mod util;

pub use alpha_vantage::AlphaVantageProvider;
pub use coingecko::CoinGeckoProvider;
pub use currency_api::CurrencyApiProvider;
