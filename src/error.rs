//! Error types for Vitalflow

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while turning provider payloads into daily records.
///
/// Structural absence (missing buckets, empty datasets, metrics with no data)
/// is never an error: those cases fold into zeroed totals and absent fields.
/// Only genuinely unusable input surfaces here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to parse provider payload: {0}")]
    ParseError(String),

    #[error("invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}
