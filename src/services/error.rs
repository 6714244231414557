use thiserror::Error;

/// Failures talking to the market data provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("could not decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },

    #[error("invalid provider url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("provider base url cannot carry path segments: {0}")]
    BaseUrl(String),
}
