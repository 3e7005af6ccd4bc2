//! Health Connect adapter
//!
//! Parses point-based health records as exported by an on-device record store.
//! Each record is one timestamped observation of a single metric; whether the
//! records came from a live device or a generated stand-in is invisible here.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::ProviderAdapter;
use crate::error::EngineError;
use crate::types::{MetricKind, Provider, RawDataPoint};

/// Health Connect record adapter
pub struct HealthConnectAdapter;

impl ProviderAdapter for HealthConnectAdapter {
    fn provider(&self) -> Provider {
        Provider::HealthConnect
    }

    fn parse(&self, raw_json: &str) -> Result<Vec<RawDataPoint>, EngineError> {
        // Accept either a bare record array or a `{"records": [...]}` envelope
        let records: Vec<HealthRecord> = match serde_json::from_str(raw_json) {
            Ok(records) => records,
            Err(_) => serde_json::from_str::<RecordEnvelope>(raw_json)?.records,
        };

        let mut points = Vec::new();
        for record in records {
            let Some(kind) = MetricKind::from_name(&record.record_type) else {
                debug!(record_type = %record.record_type, "ignoring unknown record type");
                continue;
            };

            let value = match kind {
                // Distance records carry meters; canonical unit is km
                MetricKind::Distance => record.value / 1000.0,
                _ => record.value,
            };

            points.push(RawDataPoint {
                kind,
                value,
                start_time: record.start_time,
                end_time: record.end_time.unwrap_or(record.start_time),
            });
        }

        Ok(points)
    }
}

#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    #[serde(default)]
    records: Vec<HealthRecord>,
}

#[derive(Debug, Deserialize)]
struct HealthRecord {
    record_type: String,
    #[serde(default)]
    value: f64,
    start_time: DateTime<Utc>,
    /// Absent for instantaneous readings such as a weigh-in
    end_time: Option<DateTime<Utc>>,
}
