//! RSI/MACD signal categories

use crate::models::signal::TradeSignal;

/// RSI bounds that mark oversold and overbought conditions
pub struct RsiThresholds;

impl RsiThresholds {
    pub const OVERSOLD: f64 = 30.0;
    pub const OVERBOUGHT: f64 = 70.0;
}

/// Classify one row.
///
/// Buy needs RSI below the oversold bound AND MACD above its signal line;
/// Sell needs RSI above the overbought bound AND MACD below its signal.
/// A row without RSI always holds.
pub fn classify(rsi: Option<f64>, macd: f64, macd_signal: f64) -> TradeSignal {
    match rsi {
        Some(rsi) if rsi < RsiThresholds::OVERSOLD && macd > macd_signal => TradeSignal::Buy,
        Some(rsi) if rsi > RsiThresholds::OVERBOUGHT && macd < macd_signal => TradeSignal::Sell,
        _ => TradeSignal::Hold,
    }
}
