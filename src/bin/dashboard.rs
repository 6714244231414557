//! CoinLens Dashboard
//!
//! Serves the crypto indicator dashboard. Every request fetches fresh data
//! from the market data provider; the process keeps no state between
//! requests.

use coinlens::config::{get_environment, DashboardConfig};
use coinlens::core::http::start_server;
use coinlens::logging;
use coinlens::services::coingecko::CoinGeckoClient;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = DashboardConfig::from_env()?;
    let provider = Arc::new(CoinGeckoClient::new(&config.provider)?);

    info!("Starting CoinLens dashboard");
    info!(environment = %get_environment(), "Environment");
    info!(
        provider = %provider.base_url(),
        asset_limit = config.asset_limit,
        default_coin = %config.default_coin,
        default_days = config.default_days,
        timeout_secs = ?config.provider.timeout_secs,
        "Market data provider"
    );

    start_server(config, provider).await?;

    info!("Dashboard stopped");
    Ok(())
}
