//! Volume activity indicators

use crate::common::math;

/// Number of trailing samples treated as "recent" volume
pub const RECENT_VOLUME_WINDOW: usize = 7;

/// Mean of the last `recent` volumes divided by the mean of all volumes.
///
/// Reports 0 instead of NaN/infinity when the overall mean is zero or the
/// series is empty.
pub fn volume_ratio(volumes: &[f64], recent: usize) -> f64 {
    let tail = &volumes[volumes.len().saturating_sub(recent)..];
    match (math::mean(tail), math::mean(volumes)) {
        (Some(recent_mean), Some(overall_mean)) => {
            math::safe_ratio(recent_mean, overall_mean).unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Volume as a percentage of market capitalisation, 0 when the cap is zero
pub fn volume_to_market_cap_pct(volume: f64, market_cap: f64) -> f64 {
    math::safe_ratio(volume, market_cap)
        .map(|ratio| ratio * 100.0)
        .unwrap_or(0.0)
}
