//! Vitalflow - daily health metric normalization and analysis engine
//!
//! Vitalflow turns one day of raw provider data (a Google Fit aggregate
//! response or Health Connect style records) into canonical daily records and
//! qualitative assessments through a deterministic pipeline: provider
//! adaptation → windowed aggregation → derived metrics → record assembly →
//! rule-based analysis.
//!
//! Missing data is an expected condition, not an error: every run produces
//! complete, fully-typed records, with absent metrics marked explicitly.

pub mod adapters;
pub mod aggregate;
pub mod analyzers;
pub mod assembler;
pub mod derive;
pub mod error;
pub mod pipeline;
pub mod types;

pub use error::EngineError;
pub use pipeline::{
    google_fit_to_daily, health_records_to_daily, process_payload, DailyEngine, DailyReport,
};
pub use types::{MetricKind, Provider, RawDataPoint, TimeWindow};

/// Engine version embedded in diagnostics
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for diagnostics
pub const ENGINE_NAME: &str = "vitalflow";
