//! Unit tests for the SVG chart

use chrono::Local;
use coinlens::models::analysis::AnnotatedSeries;
use coinlens::models::market::{MarketChart, SamplePoint, SeriesPayload};
use coinlens::presentation::chart::{render_chart_svg, ChartError};
use coinlens::signals::engine::AnalysisEngine;

fn series(count: usize) -> AnnotatedSeries {
    let samples = |f: fn(usize) -> f64| {
        (0..count)
            .map(|i| SamplePoint(1_717_200_000_000.0 + i as f64 * 3_600_000.0, f(i)))
            .collect::<Vec<_>>()
    };
    let chart = MarketChart {
        prices: samples(|i| 100.0 + (i as f64 * 0.4).sin() * 10.0),
        total_volumes: samples(|_| 5_000.0),
        market_caps: samples(|_| 1.0e8),
    };
    AnalysisEngine::analyze("solana", SeriesPayload::Present(chart), Local::now())
        .unwrap()
        .series
}

#[test]
fn test_renders_svg_with_all_panels() {
    let svg = render_chart_svg("solana", &series(48)).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("SOLANA Analysis"));
    assert!(svg.contains("RSI (14)"));
    assert!(svg.contains("MACD Signal"));
}

#[test]
fn test_rejects_single_row() {
    let mut series = series(20);
    series.rows.truncate(1);
    assert!(matches!(
        render_chart_svg("solana", &series),
        Err(ChartError::TooFewRows(1))
    ));
}
