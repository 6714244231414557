//! Integration tests for the CoinGecko client and the full stack against a
//! mocked provider.

use std::sync::Arc;

use coinlens::models::market::SeriesPayload;
use coinlens::services::coingecko::CoinGeckoClient;
use coinlens::services::error::ProviderError;
use coinlens::services::market_data::MarketDataProvider;
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_utils::{
    bitcoin_triples, market_chart_json, mock_market_chart, mock_markets, TestApp, LAST_MARKET_CAP,
};

fn client(server: &MockServer) -> CoinGeckoClient {
    let base_url = Url::parse(&server.uri()).expect("mock server uri");
    CoinGeckoClient::with_client(base_url, reqwest::Client::new())
}

#[tokio::test]
async fn list_assets_sends_listing_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("order", "market_cap_desc"))
        .and(query_param("per_page", "300"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(super::test_utils::markets_json()))
        .expect(1)
        .mount(&server)
        .await;

    let assets = client(&server).list_assets(300).await.expect("assets");
    assert_eq!(assets.len(), 3);
    assert_eq!(assets[0].id, "bitcoin");
    assert_eq!(assets[0].market_cap_rank, Some(1));
}

#[tokio::test]
async fn market_chart_sends_days_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_chart_json(&bitcoin_triples())))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server).market_chart("bitcoin", 7).await.expect("chart");
    let chart = payload.into_chart().expect("present");
    assert_eq!(chart.prices.len(), 30);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = Url::parse(&format!("{}/api/v3", server.uri())).unwrap();
    let client = CoinGeckoClient::with_client(base_url, reqwest::Client::new());
    assert!(client.list_assets(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_price_field_is_absent() {
    let server = MockServer::start().await;
    let mut body = market_chart_json(&bitcoin_triples());
    body.as_object_mut().unwrap().remove("prices");
    mock_market_chart(&server, "bitcoin", body).await;

    let payload = client(&server).market_chart("bitcoin", 30).await.expect("no error");
    assert_eq!(payload, SeriesPayload::Absent);
}

#[tokio::test]
async fn provider_not_found_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/nope/market_chart"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "coin not found" })))
        .mount(&server)
        .await;

    let payload = client(&server).market_chart("nope", 30).await.expect("no error");
    assert!(payload.is_absent());
}

#[tokio::test]
async fn rate_limit_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client(&server).market_chart("bitcoin", 30).await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 429, .. }));
}

#[tokio::test]
async fn garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = client(&server).list_assets(300).await.unwrap_err();
    assert!(matches!(err, ProviderError::Decode { .. }));
}

#[tokio::test]
async fn end_to_end_bitcoin_summary() {
    let server = MockServer::start().await;
    mock_markets(&server).await;
    let triples = bitcoin_triples();
    mock_market_chart(&server, "bitcoin", market_chart_json(&triples)).await;

    let app = TestApp::new(Arc::new(client(&server)));
    let response = app.server.get("/api/analysis/bitcoin").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let last_volume = triples[29].2;
    assert_eq!(body["summary"]["price"], "$65,432.10");
    assert_eq!(body["summary"]["market_cap"], "$1,290,000,000,000");
    assert_eq!(
        body["summary"]["volume_percent"],
        format!("{:.2}%", last_volume / LAST_MARKET_CAP * 100.0)
    );
    assert_eq!(body["summary"]["volume_percent"], "2.55%");
    assert_eq!(body["summary"]["vol_ratio"], "1.04");
    assert_eq!(body["summary"]["signal"], "Hold");
    assert_eq!(body["summary"]["time"].as_str().unwrap().len(), 16);

    let page = app.server.post("/").form(&[("coin", "bitcoin")]).await;
    assert_eq!(page.status_code(), 200);
    let html = page.text();
    assert!(html.contains("$65,432.10"));
    assert!(html.contains("2.55%"));
    assert!(html.contains("<option value=\"tether\">Tether (USDT)</option>"));
}

#[tokio::test]
async fn unreachable_provider_is_bad_gateway() {
    // Nothing listens on the discard port
    let base_url = Url::parse("http://127.0.0.1:9").unwrap();
    let client = CoinGeckoClient::with_client(base_url, reqwest::Client::new());
    let app = TestApp::new(Arc::new(client));

    let response = app.server.get("/").expect_failure().await;
    assert_eq!(response.status_code(), 502);
    assert!(response.text().contains("could not be reached"));
}

#[tokio::test]
async fn rate_limited_chart_keeps_selector_and_degrades_health() {
    let server = MockServer::start().await;
    mock_markets(&server).await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let app = TestApp::new(Arc::new(client(&server)));
    let page = app.server.get("/").expect_failure().await;
    assert_eq!(page.status_code(), 502);
    let html = page.text();
    assert!(html.contains("rejected the request (HTTP 429)"));
    assert!(html.contains("<option value=\"ethereum\">Ethereum (ETH)</option>"));

    let health: Value = app.server.get("/health").await.json();
    assert_eq!(health["status"], "degraded");
    assert!(health["last_provider_error"].as_str().unwrap().contains("429"));
}

#[tokio::test]
async fn health_recovers_once_provider_answers() {
    let server = MockServer::start().await;
    mock_markets(&server).await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mock_market_chart(&server, "ethereum", market_chart_json(&bitcoin_triples())).await;

    let app = TestApp::new(Arc::new(client(&server)));
    let failed = app.server.get("/api/analysis/bitcoin").expect_failure().await;
    assert_eq!(failed.status_code(), 502);
    let body: Value = failed.json();
    assert!(body["error"].as_str().unwrap().contains("HTTP 503"));
    let health: Value = app.server.get("/health").await.json();
    assert_eq!(health["status"], "degraded");

    app.server.get("/api/analysis/ethereum").await.assert_status_ok();
    let health: Value = app.server.get("/health").await.json();
    assert_eq!(health["status"], "healthy");
    assert!(health["last_provider_error"].is_null());
}
