//! Core application primitives (HTTP server, request pipeline)

pub mod http;
pub mod pipeline;

pub use http::*;
pub use pipeline::*;
