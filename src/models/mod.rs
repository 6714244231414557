//! Shared data models spanning the pipeline layers.

pub mod analysis;
pub mod indicators;
pub mod market;
pub mod signal;

pub use analysis::{Analysis, AnalysisSummary, AnnotatedPoint, AnnotatedSeries, SummaryFigures};
pub use indicators::{IndicatorSnapshot, MacdIndicator, RsiIndicator};
pub use market::{Asset, MarketChart, PricePoint, RawMarketChart, SamplePoint, SeriesPayload};
pub use signal::TradeSignal;
