//! Google Fit adapter
//!
//! Parses the aggregate endpoint's bucketed response shape
//! (bucket → dataset → point → typed value list) into flat observations.
//! Missing `bucket`, `dataset`, `point`, or `value` keys at any level read as
//! empty, so a day with no data yields no points rather than an error.

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use super::ProviderAdapter;
use crate::aggregate::AggregateTotals;
use crate::error::EngineError;
use crate::types::{MetricKind, Provider, RawDataPoint, TimeWindow};

/// Closed mapping from Google Fit data-type identifiers to metric kinds.
///
/// Data source ids embed the data type (e.g.
/// `derived:com.google.step_count.delta:com.google.android.gms:estimated_steps`),
/// so resolution checks whether the id contains a known type. Identifiers
/// outside this table are ignored.
const DATA_TYPE_KINDS: &[(&str, MetricKind)] = &[
    ("com.google.step_count.delta", MetricKind::StepCount),
    ("com.google.distance.delta", MetricKind::Distance),
    ("com.google.calories.expended", MetricKind::CaloriesExpended),
    ("com.google.active_minutes", MetricKind::ActiveMinutes),
    ("com.google.weight", MetricKind::Weight),
];

fn kind_for_source(data_source_id: &str) -> Option<MetricKind> {
    DATA_TYPE_KINDS
        .iter()
        .find(|(data_type, _)| data_source_id.contains(data_type))
        .map(|(_, kind)| *kind)
}

/// Google Fit aggregate-response adapter
pub struct GoogleFitAdapter;

impl ProviderAdapter for GoogleFitAdapter {
    fn provider(&self) -> Provider {
        Provider::GoogleFit
    }

    fn parse(&self, raw_json: &str) -> Result<Vec<RawDataPoint>, EngineError> {
        let response: AggregateResponse = serde_json::from_str(raw_json)?;
        let mut points = Vec::new();

        for bucket in &response.bucket {
            for dataset in &bucket.dataset {
                let Some(kind) = kind_for_source(&dataset.data_source_id) else {
                    debug!(
                        data_source_id = %dataset.data_source_id,
                        "ignoring unknown data source"
                    );
                    continue;
                };

                for point in &dataset.point {
                    let Some(start_time) = parse_nanos(&point.start_time_nanos) else {
                        debug!(kind = kind.as_str(), "skipping point with bad start time");
                        continue;
                    };
                    let end_time = parse_nanos(&point.end_time_nanos).unwrap_or(start_time);

                    // First entry of the value list carries the reading;
                    // a missing value reads as zero.
                    let raw_value = point
                        .value
                        .first()
                        .map(TypedValue::as_f64)
                        .unwrap_or(0.0);
                    let value = match kind {
                        // Distance arrives in meters; canonical unit is km
                        MetricKind::Distance => raw_value / 1000.0,
                        _ => raw_value,
                    };

                    points.push(RawDataPoint {
                        kind,
                        value,
                        start_time,
                        end_time,
                    });
                }
            }
        }

        Ok(points)
    }
}

/// Parse an aggregate response and fold it into per-metric totals for
/// `window` in one step.
pub fn parse_aggregate_response(
    raw_json: &str,
    window: &TimeWindow,
) -> Result<AggregateTotals, EngineError> {
    let points = GoogleFitAdapter.parse(raw_json)?;
    Ok(AggregateTotals::from_points(&points, window))
}

fn parse_nanos(nanos: &str) -> Option<DateTime<chrono::Utc>> {
    let nanos: i64 = nanos.parse().ok()?;
    Some(DateTime::from_timestamp_nanos(nanos))
}

// Aggregate endpoint response structures. Every level defaults to empty so
// partially-populated responses still parse.

#[derive(Debug, Default, Deserialize)]
struct AggregateResponse {
    #[serde(default)]
    bucket: Vec<Bucket>,
}

#[derive(Debug, Default, Deserialize)]
struct Bucket {
    #[serde(default)]
    dataset: Vec<Dataset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Dataset {
    #[serde(default)]
    data_source_id: String,
    #[serde(default)]
    point: Vec<Point>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Point {
    #[serde(default)]
    start_time_nanos: String,
    #[serde(default)]
    end_time_nanos: String,
    #[serde(default)]
    value: Vec<TypedValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypedValue {
    int_val: Option<i64>,
    fp_val: Option<f64>,
}

impl TypedValue {
    fn as_f64(&self) -> f64 {
        self.fp_val
            .or(self.int_val.map(|v| v as f64))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn nanos(ts: DateTime<chrono::Utc>) -> String {
        ts.timestamp_nanos_opt().unwrap().to_string()
    }

    fn sample_response() -> String {
        let morning = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 1, 15, 19, 0, 0).unwrap();
        format!(
            r#"{{
                "bucket": [{{
                    "dataset": [
                        {{
                            "dataSourceId": "derived:com.google.step_count.delta:com.google.android.gms:estimated_steps",
                            "point": [
                                {{"startTimeNanos": "{m}", "endTimeNanos": "{m}", "value": [{{"intVal": 4200}}]}},
                                {{"startTimeNanos": "{e}", "endTimeNanos": "{e}", "value": [{{"intVal": 3800}}]}}
                            ]
                        }},
                        {{
                            "dataSourceId": "derived:com.google.distance.delta:com.google.android.gms:merge_distance_delta",
                            "point": [
                                {{"startTimeNanos": "{m}", "endTimeNanos": "{m}", "value": [{{"fpVal": 3250.5}}]}},
                                {{"startTimeNanos": "{e}", "endTimeNanos": "{e}", "value": [{{"fpVal": 2780.0}}]}}
                            ]
                        }},
                        {{
                            "dataSourceId": "derived:com.google.calories.expended:com.google.android.gms:merge_calories_expended",
                            "point": [
                                {{"startTimeNanos": "{m}", "endTimeNanos": "{e}", "value": [{{"fpVal": 1850.7}}]}}
                            ]
                        }},
                        {{
                            "dataSourceId": "derived:com.google.weight:com.google.android.gms:merge_weight",
                            "point": [
                                {{"startTimeNanos": "{m}", "endTimeNanos": "{m}", "value": [{{"fpVal": 70.0}}]}},
                                {{"startTimeNanos": "{e}", "endTimeNanos": "{e}", "value": [{{"fpVal": 72.0}}]}}
                            ]
                        }},
                        {{
                            "dataSourceId": "derived:com.google.heart_minutes:com.google.android.gms:merge_heart_minutes",
                            "point": [
                                {{"startTimeNanos": "{m}", "endTimeNanos": "{m}", "value": [{{"fpVal": 30.0}}]}}
                            ]
                        }}
                    ]
                }}]
            }}"#,
            m = nanos(morning),
            e = nanos(evening),
        )
    }

    #[test]
    fn parses_buckets_into_flat_points() {
        let points = GoogleFitAdapter.parse(&sample_response()).unwrap();

        // Unknown heart_minutes source is ignored
        assert_eq!(points.len(), 7);

        let steps: f64 = points
            .iter()
            .filter(|p| p.kind == MetricKind::StepCount)
            .map(|p| p.value)
            .sum();
        assert_eq!(steps, 8000.0);
    }

    #[test]
    fn aggregates_with_rounding_and_latest_weight() {
        let window = TimeWindow::for_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let totals = parse_aggregate_response(&sample_response(), &window).unwrap();

        assert_eq!(totals.sum(MetricKind::StepCount), 8000.0);
        // (3250.5 + 2780.0) meters = 6.0305 km, rounded to 2 decimals
        assert_eq!(totals.sum(MetricKind::Distance), 6.03);
        // 1850.7 kcal rounded to whole units
        assert_eq!(totals.sum(MetricKind::CaloriesExpended), 1851.0);
        // Latest weight reading wins
        assert_eq!(totals.latest_value(MetricKind::Weight), Some(72.0));
    }

    #[test]
    fn empty_bucket_sequence_yields_zero_totals() {
        let window = TimeWindow::for_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let totals = parse_aggregate_response(r#"{"bucket": []}"#, &window).unwrap();

        assert!(totals.is_empty());
        assert_eq!(totals.sum(MetricKind::StepCount), 0.0);
    }

    #[test]
    fn missing_keys_at_any_level_read_as_empty() {
        for payload in [
            r#"{}"#,
            r#"{"bucket": [{}]}"#,
            r#"{"bucket": [{"dataset": [{}]}]}"#,
            r#"{"bucket": [{"dataset": [{"dataSourceId": "derived:com.google.step_count.delta:x", "point": []}]}]}"#,
        ] {
            let points = GoogleFitAdapter.parse(payload).unwrap();
            assert!(points.is_empty(), "payload: {payload}");
        }
    }

    #[test]
    fn missing_value_list_reads_as_zero() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let payload = format!(
            r#"{{"bucket": [{{"dataset": [{{
                "dataSourceId": "derived:com.google.step_count.delta:x",
                "point": [{{"startTimeNanos": "{0}", "endTimeNanos": "{0}"}}]
            }}]}}]}}"#,
            nanos(ts),
        );
        let points = GoogleFitAdapter.parse(&payload).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 0.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(GoogleFitAdapter.parse("not json").is_err());
    }
}
