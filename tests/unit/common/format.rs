//! Unit tests for summary formatting

use coinlens::common::format::{format_currency, format_percent, format_ratio, group_thousands};

#[test]
fn test_currency_two_decimals() {
    assert_eq!(format_currency(65432.1, 2), "$65,432.10");
    assert_eq!(format_currency(0.5, 2), "$0.50");
    assert_eq!(format_currency(999.999, 2), "$1,000.00");
}

#[test]
fn test_currency_no_decimals() {
    assert_eq!(format_currency(1_290_000_000_000.0, 0), "$1,290,000,000,000");
    assert_eq!(format_currency(123.4, 0), "$123");
}

#[test]
fn test_group_thousands_negative() {
    assert_eq!(group_thousands(-1234567.891, 2), "-1,234,567.89");
    assert_eq!(group_thousands(-12.0, 0), "-12");
}

#[test]
fn test_non_finite_values_are_not_rendered() {
    assert_eq!(format_currency(f64::NAN, 2), "N/A");
    assert_eq!(format_percent(f64::INFINITY, 2), "N/A");
    assert_eq!(format_ratio(f64::NAN, 2), "N/A");
}

#[test]
fn test_percent_and_ratio() {
    assert_eq!(format_percent(2.4806, 2), "2.48%");
    assert_eq!(format_percent(0.0, 2), "0.00%");
    assert_eq!(format_ratio(1.0449, 2), "1.04");
}
