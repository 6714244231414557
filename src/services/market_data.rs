//! Market data provider interface and an in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::models::market::{Asset, MarketChart, SeriesPayload};
use crate::services::error::ProviderError;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Assets ranked by market capitalisation, largest first
    async fn list_assets(&self, limit: usize) -> Result<Vec<Asset>, ProviderError>;

    /// Price, volume and market-cap series over the trailing `days` days
    async fn market_chart(&self, asset_id: &str, days: u32) -> Result<SeriesPayload, ProviderError>;
}

/// Provider serving fixed data from memory.
///
/// Unknown asset ids yield `SeriesPayload::Absent`.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    assets: Vec<Asset>,
    charts: HashMap<String, MarketChart>,
}

impl StaticMarketDataProvider {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            charts: HashMap::new(),
        }
    }

    pub fn with_chart(mut self, asset_id: impl Into<String>, chart: MarketChart) -> Self {
        self.charts.insert(asset_id.into(), chart);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn list_assets(&self, limit: usize) -> Result<Vec<Asset>, ProviderError> {
        Ok(self.assets.iter().take(limit).cloned().collect())
    }

    async fn market_chart(&self, asset_id: &str, _days: u32) -> Result<SeriesPayload, ProviderError> {
        Ok(match self.charts.get(asset_id) {
            Some(chart) => SeriesPayload::Present(chart.clone()),
            None => SeriesPayload::Absent,
        })
    }
}
