//! Pipeline outputs: the annotated series and its summary

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::indicators::IndicatorSnapshot;
use super::market::PricePoint;
use super::signal::TradeSignal;

/// A price row with its derived indicator fields.
///
/// `delta` is absent on the first row, `rsi` during warm-up and wherever the
/// average loss is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPoint {
    #[serde(flatten)]
    pub point: PricePoint,
    pub delta: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub signal: TradeSignal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotatedSeries {
    pub rows: Vec<AnnotatedPoint>,
}

impl AnnotatedSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&AnnotatedPoint> {
        self.rows.last()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.point.volume).collect()
    }
}

/// Unformatted figures behind the summary strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFigures {
    pub price: f64,
    pub market_cap: f64,
    pub volume: f64,
    pub volume_to_market_cap_pct: f64,
    pub volume_ratio: f64,
}

/// Display-ready summary of the latest row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub asset_id: String,
    pub price: String,
    pub market_cap: String,
    pub volume_percent: String,
    pub vol_ratio: String,
    pub signal: TradeSignal,
    pub time: String,
    pub generated_at: DateTime<Local>,
    pub figures: SummaryFigures,
    pub indicators: IndicatorSnapshot,
}

/// Complete result of analysing one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: AnalysisSummary,
    pub series: AnnotatedSeries,
}
