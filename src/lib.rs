//! scientiflow: axis-binding and chart-specification engine.
//!
//! Uploaded tabular data populates a column catalog, columns are bound to one
//! X axis and an ordered list of Y series, and every change re-derives a
//! renderable chart specification that can be previewed or handed to an
//! export collaborator together with a quality/format preset.

pub mod api;
pub mod core;
pub mod error;
pub mod export;
pub mod extensions;
pub mod ingest;
pub mod telemetry;

#[cfg(feature = "http-client")]
pub mod http;

pub use api::{ChartSession, ChartSpecification, SessionConfig};
pub use error::{ChartError, ChartResult};
