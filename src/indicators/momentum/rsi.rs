//! RSI (Relative Strength Index) indicator

use crate::common::math;

pub const DEFAULT_RSI_PERIOD: u32 = 14;

/// Calculate RSI for every row of a price series
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Gains and losses are averaged over a trailing window of `period` rows.
/// The first row has no predecessor and counts as a zero move, so the first
/// defined value sits at index `period - 1`. Rows whose average loss is zero
/// have no RSI.
pub fn rsi_series(prices: &[f64], period: u32) -> Vec<Option<f64>> {
    let period = period as usize;
    let mut gains = Vec::with_capacity(prices.len());
    let mut losses = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        let change = if i == 0 { 0.0 } else { prices[i] - prices[i - 1] };
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gains = math::rolling_mean(&gains, period);
    let avg_losses = math::rolling_mean(&losses, period);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(avg_gain, avg_loss)| {
            let rs = math::safe_ratio(avg_gain?, avg_loss?)?;
            Some(100.0 - (100.0 / (1.0 + rs)))
        })
        .collect()
}
