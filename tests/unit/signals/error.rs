//! Unit tests for analysis error mapping

use coinlens::services::error::ProviderError;
use coinlens::signals::error::AnalysisError;

fn provider_error(e: ProviderError) -> AnalysisError {
    AnalysisError::from(e)
}

#[test]
fn test_status_failure_names_http_status() {
    let err = provider_error(ProviderError::Status {
        endpoint: "/coins/bitcoin/market_chart".to_string(),
        status: 429,
    });
    assert_eq!(err.status_code(), 502);
    assert_eq!(
        err.user_message(),
        "Error loading data: the market data provider rejected the request (HTTP 429)"
    );
    assert_eq!(err.outcome(), "provider_error");
}

#[test]
fn test_decode_failure_message() {
    let err = provider_error(ProviderError::Decode {
        endpoint: "/coins/markets".to_string(),
        message: "expected an array".to_string(),
    });
    assert!(err.user_message().ends_with("returned an unreadable response"));
}

#[test]
fn test_misconfigured_base_url_message() {
    let err = provider_error(ProviderError::BaseUrl("mailto:ops@example.com".to_string()));
    assert!(err.user_message().ends_with("is misconfigured"));
}

#[test]
fn test_non_provider_errors_use_display() {
    let err = AnalysisError::InsufficientData {
        asset_id: "tether".to_string(),
        rows: 5,
        required: 14,
    };
    assert_eq!(err.status_code(), 422);
    assert_eq!(
        err.user_message(),
        "Error loading data: not enough market data for 'tether': 5 rows, need 14"
    );
}
