//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;

pub const DEFAULT_FAST_PERIOD: u32 = 12;
pub const DEFAULT_SLOW_PERIOD: u32 = 26;
pub const DEFAULT_SIGNAL_PERIOD: u32 = 9;

/// Row-aligned MACD lines
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Calculate MACD for every row
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Both EMAs are seeded by the first price, so every row is defined.
pub fn macd_series(prices: &[f64], fast_period: u32, slow_period: u32, signal_period: u32) -> MacdSeries {
    let fast_ema = math::ema_series(prices, fast_period as usize);
    let slow_ema = math::ema_series(prices, slow_period as usize);

    let macd: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = math::ema_series(&macd, signal_period as usize);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}
