//! Request-scoped orchestration: fetch from the provider, run the indicator
//! engine, and gather what the dashboard needs.

use chrono::Local;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::MAX_DAYS;
use crate::models::analysis::Analysis;
use crate::models::market::Asset;
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::AnalysisEngine;
use crate::signals::error::AnalysisError;

/// Asset listing plus the analysis of the selected asset
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub assets: Vec<Asset>,
    pub analysis: Analysis,
}

/// A failed dashboard load, carrying the asset listing when that fetch succeeded
#[derive(Debug, Error)]
#[error("{source}")]
pub struct DashboardError {
    pub source: AnalysisError,
    pub assets: Vec<Asset>,
}

impl From<AnalysisError> for DashboardError {
    fn from(source: AnalysisError) -> Self {
        Self {
            source,
            assets: Vec::new(),
        }
    }
}

/// Accept provider ids like `bitcoin`, `usd-coin` or `wrapped-steth`
pub fn validate_asset_id(raw: &str) -> Result<String, AnalysisError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(AnalysisError::InvalidRequest("asset id cannot be empty".to_string()));
    }
    if let Some(ch) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(AnalysisError::InvalidRequest(format!(
            "asset id contains invalid character '{}'",
            ch
        )));
    }
    Ok(id.to_string())
}

/// Parse an optional `days` parameter; blank means `default`
pub fn parse_days(raw: Option<&str>, default: u32) -> Result<u32, AnalysisError> {
    let days = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse::<u32>().map_err(|_| {
            AnalysisError::InvalidRequest(format!("days must be a positive integer, got '{}'", value))
        })?,
        None => default,
    };
    if days == 0 || days > MAX_DAYS {
        return Err(AnalysisError::InvalidRequest(format!(
            "days must be between 1 and {}, got {}",
            MAX_DAYS, days
        )));
    }
    Ok(days)
}

/// Fetch one asset's series and run the indicator pipeline over it
pub async fn analyze_asset(
    provider: &dyn MarketDataProvider,
    asset_id: &str,
    days: u32,
) -> Result<Analysis, AnalysisError> {
    let payload = provider.market_chart(asset_id, days).await?;
    let analysis = AnalysisEngine::analyze(asset_id, payload, Local::now())?;

    info!(
        asset_id = %asset_id,
        days = days,
        rows = analysis.series.len(),
        signal = %analysis.summary.signal,
        "Analysis complete"
    );
    Ok(analysis)
}

/// Fetch the asset listing and the selected asset's analysis concurrently.
///
/// All-or-nothing: any failure fails the whole request, analysis errors first.
/// A failed analysis still hands back the listing so the selector survives.
pub async fn load_dashboard(
    provider: &dyn MarketDataProvider,
    asset_limit: usize,
    asset_id: &str,
    days: u32,
) -> Result<DashboardData, DashboardError> {
    let (assets, analysis) = tokio::join!(
        provider.list_assets(asset_limit),
        analyze_asset(provider, asset_id, days)
    );

    let analysis = match analysis {
        Ok(analysis) => analysis,
        Err(source) => {
            return Err(DashboardError {
                source,
                assets: assets.unwrap_or_default(),
            })
        }
    };
    let assets = assets.map_err(AnalysisError::from)?;
    debug!(assets = assets.len(), "Loaded asset listing");

    Ok(DashboardData { assets, analysis })
}
