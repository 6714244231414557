//! Windowed and recursive scans over ordered samples

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Trailing rolling mean.
///
/// Rows before the window is full have no mean. A zero window yields no
/// means at all.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for (offset, slice) in values.windows(window).enumerate() {
        out[offset + window - 1] = mean(slice);
    }
    out
}

/// Smoothing factor for a span-parameterised EMA
pub fn ema_alpha(span: usize) -> f64 {
    2.0 / (span.max(1) as f64 + 1.0)
}

/// Adjusted exponential moving average over the whole series.
///
/// y_t = Σ (1-α)^i · x_{t-i} / Σ (1-α)^i, computed recursively. The first
/// output equals the first input, so no warm-up gap is produced.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let decay = 1.0 - ema_alpha(span);
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    values
        .iter()
        .map(|&value| {
            numerator = value + decay * numerator;
            denominator = 1.0 + decay * denominator;
            numerator / denominator
        })
        .collect()
}

/// Division that refuses to produce NaN or infinity
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return None;
    }
    Some(numerator / denominator)
}
