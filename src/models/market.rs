//! Provider-facing market data: assets, raw chart payloads and aligned rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asset as listed by the market data provider, ranked by market cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap_rank: Option<u32>,
}

impl Asset {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            market_cap_rank: None,
        }
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.market_cap_rank = Some(rank);
        self
    }

    /// Label shown in the asset selector, e.g. `Bitcoin (BTC)`
    pub fn label(&self) -> String {
        if self.symbol.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.symbol.to_uppercase())
        }
    }
}

/// One `(timestamp_ms, value)` pair as returned by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint(pub f64, pub f64);

impl SamplePoint {
    pub fn timestamp_ms(&self) -> i64 {
        self.0 as i64
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

/// Market chart body exactly as the provider sent it.
///
/// Every series is optional: rate-limit and not-found bodies share the
/// endpoint but carry none of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMarketChart {
    #[serde(default)]
    pub prices: Option<Vec<SamplePoint>>,
    #[serde(default)]
    pub total_volumes: Option<Vec<SamplePoint>>,
    #[serde(default)]
    pub market_caps: Option<Vec<SamplePoint>>,
}

impl RawMarketChart {
    /// Check that all three series exist
    pub fn validate(self) -> SeriesPayload {
        match (self.prices, self.total_volumes, self.market_caps) {
            (Some(prices), Some(total_volumes), Some(market_caps)) => {
                SeriesPayload::Present(MarketChart {
                    prices,
                    total_volumes,
                    market_caps,
                })
            }
            _ => SeriesPayload::Absent,
        }
    }
}

/// Validated market chart with all three series present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<SamplePoint>,
    pub total_volumes: Vec<SamplePoint>,
    pub market_caps: Vec<SamplePoint>,
}

/// Outcome of asking the provider for a market chart
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesPayload {
    Present(MarketChart),
    Absent,
}

impl SeriesPayload {
    pub fn is_absent(&self) -> bool {
        matches!(self, SeriesPayload::Absent)
    }

    pub fn into_chart(self) -> Option<MarketChart> {
        match self {
            SeriesPayload::Present(chart) => Some(chart),
            SeriesPayload::Absent => None,
        }
    }
}

/// One aligned row: price, volume and market cap at the same instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
    pub market_cap: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64, volume: f64, market_cap: f64) -> Self {
        Self {
            timestamp,
            price,
            volume,
            market_cap,
        }
    }
}
