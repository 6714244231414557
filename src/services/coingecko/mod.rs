//! CoinGecko market data provider

pub mod client;

pub use client::{CoinGeckoClient, DEFAULT_BASE_URL};
