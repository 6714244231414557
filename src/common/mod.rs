//! Shared numeric and formatting helpers used by the indicator pipeline

pub mod format;
pub mod math;
