//! Core types for the Vitalflow pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: raw observations, the daily time window, aggregated totals, and
//! the canonical per-domain daily records.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EngineError;

/// Data provider identifier for provenance tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    GoogleFit,
    HealthConnect,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::GoogleFit => "google_fit",
            Provider::HealthConnect => "health_connect",
        }
    }
}

/// How observations of a metric fold into a daily total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Observations accumulate additively (steps, calories, nutrients)
    Sum,
    /// Only the latest valid observation counts (weight, sleep stages)
    Latest,
}

/// Closed enumeration of every metric the supported providers emit.
///
/// Unknown provider identifiers are ignored at the adapter boundary rather
/// than mapped here. Canonical units: distance in kilometers, sleep durations
/// in minutes, weight in kilograms, water in milliliters, sodium in
/// milligrams, other nutrients in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    StepCount,
    Distance,
    CaloriesExpended,
    ActiveMinutes,
    Weight,
    BodyFat,
    MuscleMass,
    TotalSleep,
    DeepSleep,
    LightSleep,
    RemSleep,
    SleepEfficiency,
    CaloriesConsumed,
    Protein,
    Fat,
    Carbs,
    Fiber,
    Sugar,
    Sodium,
    Water,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::StepCount => "step_count",
            MetricKind::Distance => "distance",
            MetricKind::CaloriesExpended => "calories_expended",
            MetricKind::ActiveMinutes => "active_minutes",
            MetricKind::Weight => "weight",
            MetricKind::BodyFat => "body_fat",
            MetricKind::MuscleMass => "muscle_mass",
            MetricKind::TotalSleep => "total_sleep",
            MetricKind::DeepSleep => "deep_sleep",
            MetricKind::LightSleep => "light_sleep",
            MetricKind::RemSleep => "rem_sleep",
            MetricKind::SleepEfficiency => "sleep_efficiency",
            MetricKind::CaloriesConsumed => "calories_consumed",
            MetricKind::Protein => "protein",
            MetricKind::Fat => "fat",
            MetricKind::Carbs => "carbs",
            MetricKind::Fiber => "fiber",
            MetricKind::Sugar => "sugar",
            MetricKind::Sodium => "sodium",
            MetricKind::Water => "water",
        }
    }

    /// Resolve a record-type name to a known metric kind.
    ///
    /// Returns `None` for identifiers outside the closed mapping; callers
    /// skip those records explicitly instead of failing.
    pub fn from_name(name: &str) -> Option<MetricKind> {
        const NAMES: &[(&str, MetricKind)] = &[
            ("step_count", MetricKind::StepCount),
            ("steps", MetricKind::StepCount),
            ("distance", MetricKind::Distance),
            ("calories_expended", MetricKind::CaloriesExpended),
            ("active_minutes", MetricKind::ActiveMinutes),
            ("weight", MetricKind::Weight),
            ("body_fat", MetricKind::BodyFat),
            ("muscle_mass", MetricKind::MuscleMass),
            ("total_sleep", MetricKind::TotalSleep),
            ("deep_sleep", MetricKind::DeepSleep),
            ("light_sleep", MetricKind::LightSleep),
            ("rem_sleep", MetricKind::RemSleep),
            ("sleep_efficiency", MetricKind::SleepEfficiency),
            ("calories_consumed", MetricKind::CaloriesConsumed),
            ("protein", MetricKind::Protein),
            ("fat", MetricKind::Fat),
            ("carbs", MetricKind::Carbs),
            ("fiber", MetricKind::Fiber),
            ("sugar", MetricKind::Sugar),
            ("sodium", MetricKind::Sodium),
            ("water", MetricKind::Water),
        ];
        NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
    }

    pub fn aggregation(&self) -> Aggregation {
        match self {
            MetricKind::StepCount
            | MetricKind::Distance
            | MetricKind::CaloriesExpended
            | MetricKind::ActiveMinutes
            | MetricKind::CaloriesConsumed
            | MetricKind::Protein
            | MetricKind::Fat
            | MetricKind::Carbs
            | MetricKind::Fiber
            | MetricKind::Sugar
            | MetricKind::Sodium
            | MetricKind::Water => Aggregation::Sum,
            MetricKind::Weight
            | MetricKind::BodyFat
            | MetricKind::MuscleMass
            | MetricKind::TotalSleep
            | MetricKind::DeepSleep
            | MetricKind::LightSleep
            | MetricKind::RemSleep
            | MetricKind::SleepEfficiency => Aggregation::Latest,
        }
    }
}

/// One observation as emitted by a provider adapter.
///
/// Immutable once constructed; the pipeline only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataPoint {
    pub kind: MetricKind,
    pub value: f64,
    /// Observation start (UTC)
    pub start_time: DateTime<Utc>,
    /// Observation end (UTC); equals `start_time` for instantaneous readings
    pub end_time: DateTime<Utc>,
}

/// Half-open UTC interval covering one business day's capture range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window, enforcing `start <= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        if start > end {
            return Err(EngineError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The full calendar day `[00:00, 00:00 next day)` for `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// The calendar-day window for the day before `now`.
    pub fn yesterday(now: DateTime<Utc>) -> Self {
        Self::for_date(now.date_naive() - Duration::days(1))
    }

    /// The capture range for sleep attributed to `date`: from 18:00 that
    /// evening through 12:00 the following day, so a night that crosses
    /// midnight is not split.
    pub fn sleep_capture(date: NaiveDate) -> Self {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        Self {
            start: midnight + Duration::hours(18),
            end: midnight + Duration::hours(36),
        }
    }

    /// The business date this window belongs to.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

/// Canonical daily activity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDaily {
    pub date: NaiveDate,
    pub steps: u64,
    pub distance_km: f64,
    pub active_calories: f64,
    pub total_calories: f64,
    pub active_minutes: f64,
    pub created_at: DateTime<Utc>,
    pub data_source: Provider,
}

/// Canonical daily body-composition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightDaily {
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub body_fat_percentage: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub data_source: Provider,
}

/// Canonical daily sleep record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepDaily {
    pub date: NaiveDate,
    pub total_sleep_minutes: f64,
    pub deep_sleep_minutes: Option<f64>,
    pub light_sleep_minutes: Option<f64>,
    pub rem_sleep_minutes: Option<f64>,
    /// Fraction of time in bed spent asleep, in [0, 1]
    pub sleep_efficiency: Option<f64>,
    /// Local clock time the winning sleep session began (`%H:%M:%S`)
    pub bedtime: Option<String>,
    /// Local clock time the winning sleep session ended (`%H:%M:%S`)
    pub wake_time: Option<String>,
    pub sleep_quality_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub data_source: Provider,
}

/// Canonical daily nutrition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionDaily {
    pub date: NaiveDate,
    pub calories_consumed: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
    pub sodium_mg: f64,
    pub water_ml: f64,
    pub created_at: DateTime<Utc>,
    pub data_source: Provider,
}

/// Provider-agnostic analysis output: categorical labels, advisory strings,
/// and the derived ratios they were computed from. Produced fresh each run
/// and returned alongside the record it describes, never persisted alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category_labels: BTreeMap<String, String>,
    pub recommendations: Vec<String>,
    pub derived_ratios: BTreeMap<String, f64>,
}
