//! Unit tests for provider payload validation

use coinlens::models::market::{Asset, RawMarketChart, SeriesPayload};
use serde_json::json;

#[test]
fn test_missing_prices_is_absent() {
    let raw: RawMarketChart = serde_json::from_value(json!({
        "total_volumes": [[1_717_200_000_000u64, 10.0]],
        "market_caps": [[1_717_200_000_000u64, 100.0]]
    }))
    .unwrap();
    assert_eq!(raw.validate(), SeriesPayload::Absent);
}

#[test]
fn test_error_body_is_absent() {
    let raw: RawMarketChart = serde_json::from_value(json!({ "error": "coin not found" })).unwrap();
    assert!(raw.validate().is_absent());
}

#[test]
fn test_complete_body_is_present() {
    let raw: RawMarketChart = serde_json::from_value(json!({
        "prices": [[1_717_200_000_000u64, 65_000.5], [1_717_203_600_000u64, 65_100.0]],
        "total_volumes": [[1_717_200_000_000u64, 10.0], [1_717_203_600_000u64, 11.0]],
        "market_caps": [[1_717_200_000_000u64, 100.0], [1_717_203_600_000u64, 101.0]]
    }))
    .unwrap();

    let chart = raw.validate().into_chart().expect("present");
    assert_eq!(chart.prices.len(), 2);
    assert_eq!(chart.prices[1].timestamp_ms(), 1_717_203_600_000);
    assert_eq!(chart.prices[0].value(), 65_000.5);
}

#[test]
fn test_asset_from_market_listing() {
    let asset: Asset = serde_json::from_value(json!({
        "id": "bitcoin",
        "symbol": "btc",
        "name": "Bitcoin",
        "current_price": 65_000.0,
        "market_cap_rank": 1
    }))
    .unwrap();

    assert_eq!(asset.id, "bitcoin");
    assert_eq!(asset.market_cap_rank, Some(1));
    assert_eq!(asset.label(), "Bitcoin (BTC)");
}

#[test]
fn test_asset_with_null_rank() {
    let asset: Asset = serde_json::from_value(json!({
        "id": "some-token",
        "symbol": "tok",
        "name": "Some Token",
        "market_cap_rank": null
    }))
    .unwrap();
    assert_eq!(asset.market_cap_rank, None);
}
