use axum::http::StatusCode;
use thiserror::Error;

use crate::services::error::ProviderError;

/// Why an analysis request produced no result
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no market data available for '{asset_id}'")]
    DataUnavailable { asset_id: String },

    #[error("not enough market data for '{asset_id}': {rows} rows, need {required}")]
    InsufficientData {
        asset_id: String,
        rows: usize,
        required: usize,
    },

    #[error("market data provider failed: {0}")]
    Provider(#[from] ProviderError),
}

impl AnalysisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AnalysisError::DataUnavailable { .. } => StatusCode::NOT_FOUND,
            AnalysisError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AnalysisError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Provider(e) => {
                let reason = match e {
                    ProviderError::Transport(_) => "could not be reached".to_string(),
                    ProviderError::Status { status, .. } => {
                        format!("rejected the request (HTTP {})", status)
                    }
                    ProviderError::Decode { .. } => "returned an unreadable response".to_string(),
                    ProviderError::InvalidUrl(_) | ProviderError::BaseUrl(_) => {
                        "is misconfigured".to_string()
                    }
                };
                format!("Error loading data: the market data provider {}", reason)
            }
            other => format!("Error loading data: {}", other),
        }
    }

    /// Short label used for metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            AnalysisError::InvalidRequest(_) => "invalid",
            AnalysisError::DataUnavailable { .. } => "unavailable",
            AnalysisError::InsufficientData { .. } => "insufficient",
            AnalysisError::Provider(_) => "provider_error",
        }
    }
}
