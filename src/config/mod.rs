//! Runtime configuration loaded from the environment.
//!
//! Every setting has a default matching the public CoinGecko API and a
//! dashboard listening on all interfaces, port 8080.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::services::coingecko::DEFAULT_BASE_URL;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ASSET_LIMIT: usize = 300;
pub const DEFAULT_COIN: &str = "bitcoin";
pub const DEFAULT_DAYS: u32 = 30;
pub const MAX_DAYS: u32 = 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid url for {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Settings for the outbound market data client
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: Url,
    pub vs_currency: String,
    /// No timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            vs_currency: "usd".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub host: IpAddr,
    pub port: u16,
    pub asset_limit: usize,
    pub default_coin: String,
    pub default_days: u32,
    pub provider: ProviderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            asset_limit: DEFAULT_ASSET_LIMIT,
            default_coin: DEFAULT_COIN.to_string(),
            default_days: DEFAULT_DAYS,
            provider: ProviderConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read settings from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("MARKET_DATA_BASE_URL") {
            Some(raw) => Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
                key: "MARKET_DATA_BASE_URL",
                source,
            })?,
            None => defaults.provider.base_url,
        };

        let default_days = parse_or(&lookup, "DEFAULT_DAYS", defaults.default_days)?;
        if default_days == 0 || default_days > MAX_DAYS {
            return Err(ConfigError::InvalidValue {
                key: "DEFAULT_DAYS",
                value: default_days.to_string(),
            });
        }

        let default_coin = lookup("DEFAULT_COIN")
            .map(|coin| coin.trim().to_string())
            .filter(|coin| !coin.is_empty())
            .unwrap_or(defaults.default_coin);

        Ok(Self {
            host: parse_or(&lookup, "HOST", defaults.host)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            asset_limit: parse_or(&lookup, "ASSET_LIMIT", defaults.asset_limit)?,
            default_coin,
            default_days,
            provider: ProviderConfig {
                base_url,
                vs_currency: defaults.provider.vs_currency,
                timeout_secs: parse_optional(&lookup, "PROVIDER_TIMEOUT_SECS")?,
            },
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}

fn parse_optional<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(None),
    }
}

/// Deployment environment name, `sandbox` unless `ENVIRONMENT` says otherwise
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.trim().to_lowercase())
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}
