//! Technical indicators computed as row-aligned series.

pub mod momentum;
pub mod volume;

pub use momentum::*;
pub use volume::*;
