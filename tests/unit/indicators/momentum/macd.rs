//! Unit tests for MACD indicator

use coinlens::common::math::ema_series;
use coinlens::indicators::momentum::macd_series;

#[test]
fn test_macd_defined_from_first_row() {
    let prices: Vec<f64> = (0..5).map(|i| 10.0 + i as f64).collect();
    let macd = macd_series(&prices, 12, 26, 9);
    assert_eq!(macd.len(), 5);
    assert_eq!(macd.macd[0], 0.0);
    assert_eq!(macd.signal[0], 0.0);
}

#[test]
fn test_macd_is_fast_minus_slow() {
    let prices: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).cos() * 4.0).collect();
    let macd = macd_series(&prices, 12, 26, 9);
    let fast = ema_series(&prices, 12);
    let slow = ema_series(&prices, 26);

    for i in 0..prices.len() {
        assert!((macd.macd[i] - (fast[i] - slow[i])).abs() < 1e-12);
    }
}

#[test]
fn test_signal_is_nine_span_ema_of_macd() {
    let prices: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 4.0).collect();
    let macd = macd_series(&prices, 12, 26, 9);
    let expected = ema_series(&macd.macd, 9);

    assert_eq!(macd.signal, expected);
    for i in 0..prices.len() {
        assert!((macd.histogram[i] - (macd.macd[i] - macd.signal[i])).abs() < 1e-12);
    }
}

#[test]
fn test_macd_zero_for_constant_prices() {
    let macd = macd_series(&[250.0; 40], 12, 26, 9);
    assert!(macd.macd.iter().all(|v| v.abs() < 1e-9));
    assert!(macd.signal.iter().all(|v| v.abs() < 1e-9));
}

#[test]
fn test_macd_empty_input() {
    let macd = macd_series(&[], 12, 26, 9);
    assert!(macd.is_empty());
}
