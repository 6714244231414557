//! External market data services.

pub mod coingecko;
pub mod error;
pub mod market_data;

pub use error::ProviderError;
pub use market_data::{MarketDataProvider, StaticMarketDataProvider};
