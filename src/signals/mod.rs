//! Signal derivation and the indicator pipeline.

pub mod categories;
pub mod engine;
pub mod error;

pub use categories::*;
pub use engine::*;
pub use error::AnalysisError;
