//! Presentation layer: formatting, chart rendering and HTML pages

pub mod chart;
pub mod page;

pub use chart::{render_chart_svg, ChartError};
pub use page::{escape_html, render_dashboard, render_error_page, DashboardView};
