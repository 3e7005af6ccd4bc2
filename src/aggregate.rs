//! Windowed aggregation of raw observations
//!
//! Folds a stream of [`RawDataPoint`]s inside a [`TimeWindow`] into per-metric
//! daily totals. Additive metrics accumulate; single-valued metrics keep only
//! the latest valid observation.

use std::collections::BTreeMap;

use crate::derive::round2;
use crate::types::{Aggregation, MetricKind, RawDataPoint, TimeWindow};

/// Pick the authoritative observation for a single-valued metric: the point
/// with the latest `start_time`, ties broken by later position in the input.
/// Non-positive values are treated as absent and never win.
pub fn select_latest<'a, I>(points: I) -> Option<&'a RawDataPoint>
where
    I: IntoIterator<Item = &'a RawDataPoint>,
{
    let mut winner: Option<&RawDataPoint> = None;
    for point in points {
        if supersedes(point, winner) {
            winner = Some(point);
        }
    }
    winner
}

fn supersedes(candidate: &RawDataPoint, incumbent: Option<&RawDataPoint>) -> bool {
    if candidate.value <= 0.0 {
        return false;
    }
    match incumbent {
        Some(current) => candidate.start_time >= current.start_time,
        None => true,
    }
}

/// Per-metric daily totals for one time window.
///
/// Summed metrics default to zero when no observation contributed; latest-value
/// metrics retain the whole winning point so callers can also read its
/// timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTotals {
    sums: BTreeMap<MetricKind, f64>,
    latest: BTreeMap<MetricKind, RawDataPoint>,
}

impl AggregateTotals {
    /// Fold every point whose `start_time` falls inside `window`.
    pub fn from_points(points: &[RawDataPoint], window: &TimeWindow) -> Self {
        let mut totals = Self::default();
        for point in points {
            if !window.contains(point.start_time) {
                continue;
            }
            totals.add(point);
        }
        totals.round_outputs();
        totals
    }

    fn add(&mut self, point: &RawDataPoint) {
        match point.kind.aggregation() {
            Aggregation::Sum => {
                *self.sums.entry(point.kind).or_insert(0.0) += point.value;
            }
            Aggregation::Latest => {
                if supersedes(point, self.latest.get(&point.kind)) {
                    self.latest.insert(point.kind, point.clone());
                }
            }
        }
    }

    // Distance is reported to two decimals and expended calories as whole
    // units; everything else keeps full precision until record assembly.
    fn round_outputs(&mut self) {
        if let Some(distance) = self.sums.get_mut(&MetricKind::Distance) {
            *distance = round2(*distance);
        }
        if let Some(calories) = self.sums.get_mut(&MetricKind::CaloriesExpended) {
            *calories = calories.round();
        }
    }

    /// Running sum for an additive metric; zero when nothing contributed.
    pub fn sum(&self, kind: MetricKind) -> f64 {
        self.sums.get(&kind).copied().unwrap_or(0.0)
    }

    /// Value of the winning observation for a single-valued metric.
    pub fn latest_value(&self, kind: MetricKind) -> Option<f64> {
        self.latest.get(&kind).map(|p| p.value)
    }

    /// The winning observation itself, timestamps included.
    pub fn latest_point(&self, kind: MetricKind) -> Option<&RawDataPoint> {
        self.latest.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty() && self.latest.is_empty()
    }
}
