//! Server-side SVG chart of price, RSI and MACD

use std::ops::Range;

use chrono::{DateTime, Duration, Utc};
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::models::analysis::AnnotatedSeries;
use crate::signals::categories::RsiThresholds;

pub const CHART_WIDTH: u32 = 960;
pub const CHART_HEIGHT: u32 = 780;

const BACKGROUND: RGBColor = RGBColor(17, 17, 17);
const GRID: RGBColor = RGBColor(40, 52, 66);
const TEXT: RGBColor = RGBColor(220, 220, 220);
const PRICE: RGBColor = RGBColor(99, 110, 250);
const RSI: RGBColor = RGBColor(239, 85, 59);
const MACD: RGBColor = RGBColor(0, 204, 150);
const MACD_SIGNAL: RGBColor = RGBColor(171, 99, 250);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("need at least 2 rows to draw a chart, got {0}")]
    TooFewRows(usize),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

struct Line<'a> {
    label: &'a str,
    color: RGBColor,
    values: Vec<Option<f64>>,
}

/// Render the annotated series as an inline SVG document
pub fn render_chart_svg(asset_id: &str, series: &AnnotatedSeries) -> Result<String, ChartError> {
    if series.len() < 2 {
        return Err(ChartError::TooFewRows(series.len()));
    }

    let times: Vec<DateTime<Utc>> = series.rows.iter().map(|r| r.point.timestamp).collect();
    let x_range = time_range(&times);

    let price = Line {
        label: "Price",
        color: PRICE,
        values: series.rows.iter().map(|r| Some(r.point.price)).collect(),
    };
    let rsi = Line {
        label: "RSI",
        color: RSI,
        values: series.rows.iter().map(|r| r.rsi).collect(),
    };
    let macd = Line {
        label: "MACD",
        color: MACD,
        values: series.rows.iter().map(|r| Some(r.macd)).collect(),
    };
    let macd_signal = Line {
        label: "MACD Signal",
        color: MACD_SIGNAL,
        values: series.rows.iter().map(|r| Some(r.macd_signal)).collect(),
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(render_err)?;
        let root = root
            .titled(
                &format!("{} Analysis", asset_id.to_uppercase()),
                ("sans-serif", 24).into_font().color(&TEXT),
            )
            .map_err(render_err)?;

        let panels = root.split_evenly((3, 1));
        let price_range = padded_range(&[&price]);
        let macd_range = padded_range(&[&macd, &macd_signal]);

        draw_panel(&panels[0], "Price (USD)", &times, x_range.clone(), price_range, &[price], &[])?;
        draw_panel(
            &panels[1],
            "RSI (14)",
            &times,
            x_range.clone(),
            0.0..100.0,
            &[rsi],
            &[RsiThresholds::OVERSOLD, RsiThresholds::OVERBOUGHT],
        )?;
        draw_panel(
            &panels[2],
            "MACD (12, 26, 9)",
            &times,
            x_range,
            macd_range,
            &[macd, macd_signal],
            &[],
        )?;

        root.present().map_err(render_err)?;
    }

    Ok(svg)
}

fn time_range(times: &[DateTime<Utc>]) -> Range<DateTime<Utc>> {
    let start = times[0];
    let end = times[times.len() - 1];
    if end > start {
        start..end
    } else {
        start..start + Duration::minutes(1)
    }
}

/// Min/max of all defined values, padded by 10%
fn padded_range(lines: &[&Line]) -> Range<f64> {
    let values = lines
        .iter()
        .flat_map(|line| line.values.iter().flatten().copied())
        .filter(|v| v.is_finite());
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    let padding = (max - min).max(1e-8) * 0.1;
    (min - padding)..(max + padding)
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    caption: &str,
    times: &[DateTime<Utc>],
    x_range: Range<DateTime<Utc>>,
    y_range: Range<f64>,
    lines: &[Line],
    guides: &[f64],
) -> Result<(), ChartError> {
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 16).into_font().color(&TEXT))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .bold_line_style(GRID.stroke_width(1))
        .light_line_style(BACKGROUND.stroke_width(1))
        .axis_style(TEXT.stroke_width(1))
        .label_style(("sans-serif", 12).into_font().color(&TEXT))
        .x_labels(6)
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%m-%d %H:%M").to_string())
        .draw()
        .map_err(render_err)?;

    for &level in guides {
        chart
            .draw_series(LineSeries::new(
                vec![(x_range.start, level), (x_range.end, level)],
                TEXT.mix(0.4).stroke_width(1),
            ))
            .map_err(render_err)?;
    }

    for line in lines {
        let color = line.color;
        let mut labelled = false;
        // Undefined values break the line instead of dropping to zero
        for run in defined_runs(times, &line.values) {
            let anno = chart
                .draw_series(LineSeries::new(run, color.stroke_width(2)))
                .map_err(render_err)?;
            if !labelled {
                anno.label(line.label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                });
                labelled = true;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(BACKGROUND.mix(0.8).filled())
        .border_style(GRID.stroke_width(1))
        .label_font(("sans-serif", 12).into_font().color(&TEXT))
        .draw()
        .map_err(render_err)?;

    Ok(())
}

/// Split a series into contiguous runs of defined points
fn defined_runs(times: &[DateTime<Utc>], values: &[Option<f64>]) -> Vec<Vec<(DateTime<Utc>, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (&t, value) in times.iter().zip(values) {
        match value {
            Some(v) if v.is_finite() => current.push((t, *v)),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
