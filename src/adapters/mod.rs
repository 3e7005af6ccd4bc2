//! Provider payload adapters
//!
//! Adapters parse raw provider JSON into flat [`RawDataPoint`] observations.
//! The rest of the pipeline never sees provider shapes and never branches on
//! where the data came from; a mock record source feeds the same adapter as a
//! live one.

mod google_fit;
mod health_connect;

pub use google_fit::{parse_aggregate_response, GoogleFitAdapter};
pub use health_connect::HealthConnectAdapter;

use crate::error::EngineError;
use crate::types::{Provider, RawDataPoint};

/// Trait for provider payload adapters
pub trait ProviderAdapter {
    /// Which provider this adapter understands
    fn provider(&self) -> Provider;

    /// Parse raw JSON into flat observations.
    ///
    /// Structurally absent data (missing buckets, empty record lists) parses
    /// to an empty vector; only malformed JSON is an error.
    fn parse(&self, raw_json: &str) -> Result<Vec<RawDataPoint>, EngineError>;
}
