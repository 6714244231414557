//! CoinGecko REST client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::models::market::{Asset, RawMarketChart, SeriesPayload};
use crate::services::error::ProviderError;
use crate::services::market_data::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const USER_AGENT: &str = concat!("coinlens/", env!("CARGO_PKG_VERSION"));

pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: Url,
    vs_currency: String,
}

impl CoinGeckoClient {
    /// Build a client from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self::with_client(config.base_url.clone(), http).with_vs_currency(&config.vs_currency))
    }

    /// Use an existing HTTP client against `base_url`
    pub fn with_client(base_url: Url, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url,
            vs_currency: "usd".to_string(),
        }
    }

    pub fn with_vs_currency(mut self, vs_currency: &str) -> Self {
        self.vs_currency = vs_currency.to_string();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, query: &[(&str, &str)]) -> Result<reqwest::Response, ProviderError> {
        debug!(url = %url, "GET market data");
        Ok(self.http.get(url).query(query).send().await?)
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn list_assets(&self, limit: usize) -> Result<Vec<Asset>, ProviderError> {
        const ENDPOINT: &str = "coins/markets";

        let url = self.endpoint(&["coins", "markets"])?;
        let per_page = limit.to_string();
        let response = self
            .get(
                url,
                &[
                    ("vs_currency", self.vs_currency.as_str()),
                    ("order", "market_cap_desc"),
                    ("per_page", per_page.as_str()),
                    ("page", "1"),
                ],
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = ENDPOINT, status = status.as_u16(), "Asset listing failed");
            return Err(ProviderError::Status {
                endpoint: ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }

        let assets: Vec<Asset> = Self::decode(ENDPOINT, response).await?;
        debug!(count = assets.len(), "Fetched asset listing");
        Ok(assets)
    }

    async fn market_chart(&self, asset_id: &str, days: u32) -> Result<SeriesPayload, ProviderError> {
        const ENDPOINT: &str = "coins/{id}/market_chart";

        let url = self.endpoint(&["coins", asset_id, "market_chart"])?;
        let days = days.to_string();
        let response = self
            .get(
                url,
                &[("vs_currency", self.vs_currency.as_str()), ("days", days.as_str())],
            )
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(asset_id = %asset_id, "Provider has no market chart for asset");
            return Ok(SeriesPayload::Absent);
        }
        if !status.is_success() {
            warn!(
                endpoint = ENDPOINT,
                asset_id = %asset_id,
                status = status.as_u16(),
                "Market chart request failed"
            );
            return Err(ProviderError::Status {
                endpoint: ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }

        let raw: RawMarketChart = Self::decode(ENDPOINT, response).await?;
        let payload = raw.validate();
        if payload.is_absent() {
            warn!(asset_id = %asset_id, "Market chart response is missing expected series");
        }
        Ok(payload)
    }
}
