//! Indicator pipeline: aligns raw provider series, annotates every row with
//! RSI/MACD and a trading signal, and summarises the latest row.

use std::collections::HashMap;

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::common::format::{format_currency, format_percent, format_ratio};
use crate::indicators::momentum::{
    macd_series, rsi_series, DEFAULT_FAST_PERIOD, DEFAULT_RSI_PERIOD, DEFAULT_SIGNAL_PERIOD,
    DEFAULT_SLOW_PERIOD,
};
use crate::indicators::volume::{volume_ratio, volume_to_market_cap_pct, RECENT_VOLUME_WINDOW};
use crate::models::analysis::{
    Analysis, AnalysisSummary, AnnotatedPoint, AnnotatedSeries, SummaryFigures,
};
use crate::models::indicators::{IndicatorSnapshot, MacdIndicator, RsiIndicator};
use crate::models::market::{MarketChart, PricePoint, SeriesPayload};
use crate::signals::categories::classify;
use crate::signals::error::AnalysisError;

/// Shortest aligned series worth analysing: one full RSI window
pub const MIN_ROWS: usize = DEFAULT_RSI_PERIOD as usize;

pub const SUMMARY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct AnalysisEngine;

impl AnalysisEngine {
    /// Inner-join prices, volumes and market caps on exact timestamp.
    ///
    /// Rows missing from any of the three series are dropped; the result is
    /// ordered by timestamp ascending.
    pub fn align(chart: &MarketChart) -> Vec<PricePoint> {
        let volumes: HashMap<i64, f64> = chart
            .total_volumes
            .iter()
            .map(|s| (s.timestamp_ms(), s.value()))
            .collect();
        let market_caps: HashMap<i64, f64> = chart
            .market_caps
            .iter()
            .map(|s| (s.timestamp_ms(), s.value()))
            .collect();

        let mut points: Vec<PricePoint> = chart
            .prices
            .iter()
            .filter_map(|sample| {
                let ts = sample.timestamp_ms();
                let volume = *volumes.get(&ts)?;
                let market_cap = *market_caps.get(&ts)?;
                let timestamp = DateTime::<Utc>::from_timestamp_millis(ts)?;
                Some(PricePoint::new(timestamp, sample.value(), volume, market_cap))
            })
            .collect();

        points.sort_by_key(|p| p.timestamp);
        points
    }

    /// Derive delta, RSI(14), MACD(12, 26, 9) and the trading signal per row
    pub fn annotate(points: Vec<PricePoint>) -> AnnotatedSeries {
        let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
        let rsi = rsi_series(&prices, DEFAULT_RSI_PERIOD);
        let macd = macd_series(
            &prices,
            DEFAULT_FAST_PERIOD,
            DEFAULT_SLOW_PERIOD,
            DEFAULT_SIGNAL_PERIOD,
        );

        let rows = points
            .into_iter()
            .enumerate()
            .map(|(i, point)| {
                let delta = i.checked_sub(1).map(|prev| prices[i] - prices[prev]);
                AnnotatedPoint {
                    point,
                    delta,
                    rsi: rsi[i],
                    macd: macd.macd[i],
                    macd_signal: macd.signal[i],
                    macd_histogram: macd.histogram[i],
                    signal: classify(rsi[i], macd.macd[i], macd.signal[i]),
                }
            })
            .collect();

        AnnotatedSeries { rows }
    }

    /// Summarise the latest row, `None` for an empty series
    pub fn summarize(
        asset_id: &str,
        series: &AnnotatedSeries,
        generated_at: DateTime<Local>,
    ) -> Option<AnalysisSummary> {
        let latest = series.latest()?;
        let point = &latest.point;

        let vol_ratio = volume_ratio(&series.volumes(), RECENT_VOLUME_WINDOW);
        let volume_pct = volume_to_market_cap_pct(point.volume, point.market_cap);

        Some(AnalysisSummary {
            asset_id: asset_id.to_string(),
            price: format_currency(point.price, 2),
            market_cap: format_currency(point.market_cap, 0),
            volume_percent: format_percent(volume_pct, 2),
            vol_ratio: format_ratio(vol_ratio, 2),
            signal: latest.signal,
            time: generated_at.format(SUMMARY_TIME_FORMAT).to_string(),
            generated_at,
            figures: SummaryFigures {
                price: point.price,
                market_cap: point.market_cap,
                volume: point.volume,
                volume_to_market_cap_pct: volume_pct,
                volume_ratio: vol_ratio,
            },
            indicators: IndicatorSnapshot {
                rsi: latest.rsi.map(|value| RsiIndicator {
                    value,
                    period: Some(DEFAULT_RSI_PERIOD),
                }),
                macd: MacdIndicator {
                    macd: latest.macd,
                    signal: latest.macd_signal,
                    histogram: latest.macd_histogram,
                    period: Some((
                        DEFAULT_FAST_PERIOD,
                        DEFAULT_SLOW_PERIOD,
                        DEFAULT_SIGNAL_PERIOD,
                    )),
                },
            },
        })
    }

    /// Run the whole pipeline over a provider payload
    pub fn analyze(
        asset_id: &str,
        payload: SeriesPayload,
        generated_at: DateTime<Local>,
    ) -> Result<Analysis, AnalysisError> {
        let chart = payload
            .into_chart()
            .ok_or_else(|| AnalysisError::DataUnavailable {
                asset_id: asset_id.to_string(),
            })?;

        let points = Self::align(&chart);
        debug!(
            asset_id = %asset_id,
            raw_prices = chart.prices.len(),
            aligned = points.len(),
            "Aligned market chart series"
        );

        if points.len() < MIN_ROWS {
            return Err(AnalysisError::InsufficientData {
                asset_id: asset_id.to_string(),
                rows: points.len(),
                required: MIN_ROWS,
            });
        }

        let series = Self::annotate(points);
        let summary = Self::summarize(asset_id, &series, generated_at).ok_or_else(|| {
            AnalysisError::DataUnavailable {
                asset_id: asset_id.to_string(),
            }
        })?;

        Ok(Analysis { summary, series })
    }
}
