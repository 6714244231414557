//! CoinLens: crypto market dashboard with RSI/MACD indicators and a
//! heuristic Buy/Sell/Hold signal.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod presentation;
pub mod services;
pub mod signals;
