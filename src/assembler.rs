//! Daily record assembly
//!
//! Composes aggregated totals and derived metrics into the canonical
//! per-domain daily records. Every field of a record is always present:
//! additive metrics default to zero and single-valued or derived metrics to
//! `None`, so downstream consumers never see a partial shape.

use chrono::{NaiveDate, Utc};

use crate::aggregate::AggregateTotals;
use crate::derive::{
    active_calories_from_steps, bmi, distance_from_steps, round2, sleep_quality_score,
    total_calories_from_steps, DEFAULT_HEIGHT_METERS,
};
use crate::types::{
    ActivityDaily, MetricKind, NutritionDaily, Provider, SleepDaily, WeightDaily,
};

/// Assembles canonical daily records from aggregated totals.
///
/// Carries the height used for BMI; defaults to a fixed constant rather than
/// a per-user setting.
#[derive(Debug, Clone)]
pub struct DailyRecordAssembler {
    height_m: f64,
}

impl Default for DailyRecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyRecordAssembler {
    pub fn new() -> Self {
        Self {
            height_m: DEFAULT_HEIGHT_METERS,
        }
    }

    /// Use a specific height (meters) for BMI computation
    pub fn with_height(height_m: f64) -> Self {
        Self { height_m }
    }

    /// Assemble the activity record. Distance and calories fall back to
    /// step-based estimates when the provider supplied no measurement.
    pub fn activity(
        &self,
        totals: &AggregateTotals,
        date: NaiveDate,
        source: Provider,
    ) -> ActivityDaily {
        let steps = totals.sum(MetricKind::StepCount).round() as u64;

        let measured_km = totals.sum(MetricKind::Distance);
        let distance_km = if measured_km > 0.0 {
            measured_km
        } else {
            round2(distance_from_steps(steps) / 1000.0)
        };

        let measured_calories = totals.sum(MetricKind::CaloriesExpended);
        let total_calories = if measured_calories > 0.0 {
            measured_calories
        } else {
            total_calories_from_steps(steps)
        };

        ActivityDaily {
            date,
            steps,
            distance_km,
            active_calories: active_calories_from_steps(steps),
            total_calories,
            active_minutes: totals.sum(MetricKind::ActiveMinutes),
            created_at: Utc::now(),
            data_source: source,
        }
    }

    /// Assemble the body-composition record from latest-value selections.
    pub fn weight(
        &self,
        totals: &AggregateTotals,
        date: NaiveDate,
        source: Provider,
    ) -> WeightDaily {
        let weight_kg = totals.latest_value(MetricKind::Weight);
        WeightDaily {
            date,
            weight_kg,
            body_fat_percentage: totals.latest_value(MetricKind::BodyFat),
            muscle_mass_kg: totals.latest_value(MetricKind::MuscleMass),
            bmi: weight_kg.and_then(|w| bmi(w, self.height_m)),
            created_at: Utc::now(),
            data_source: source,
        }
    }

    /// Assemble the sleep record. Bedtime and wake time come from the winning
    /// sleep session's own timestamps.
    pub fn sleep(&self, totals: &AggregateTotals, date: NaiveDate, source: Provider) -> SleepDaily {
        let session = totals.latest_point(MetricKind::TotalSleep);
        let total_sleep_minutes = session.map(|p| p.value).unwrap_or(0.0);
        let rem_sleep_minutes = totals.latest_value(MetricKind::RemSleep);
        let sleep_efficiency = totals.latest_value(MetricKind::SleepEfficiency);

        SleepDaily {
            date,
            total_sleep_minutes,
            deep_sleep_minutes: totals.latest_value(MetricKind::DeepSleep),
            light_sleep_minutes: totals.latest_value(MetricKind::LightSleep),
            rem_sleep_minutes,
            sleep_efficiency,
            bedtime: session.map(|p| p.start_time.format("%H:%M:%S").to_string()),
            wake_time: session.map(|p| p.end_time.format("%H:%M:%S").to_string()),
            sleep_quality_score: sleep_quality_score(
                sleep_efficiency,
                rem_sleep_minutes,
                total_sleep_minutes,
            ),
            created_at: Utc::now(),
            data_source: source,
        }
    }

    /// Assemble the nutrition record from additive totals.
    pub fn nutrition(
        &self,
        totals: &AggregateTotals,
        date: NaiveDate,
        source: Provider,
    ) -> NutritionDaily {
        NutritionDaily {
            date,
            calories_consumed: totals.sum(MetricKind::CaloriesConsumed),
            protein_g: totals.sum(MetricKind::Protein),
            carbs_g: totals.sum(MetricKind::Carbs),
            fat_g: totals.sum(MetricKind::Fat),
            fiber_g: totals.sum(MetricKind::Fiber),
            sugar_g: totals.sum(MetricKind::Sugar),
            sodium_mg: totals.sum(MetricKind::Sodium),
            water_ml: totals.sum(MetricKind::Water),
            created_at: Utc::now(),
            data_source: source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawDataPoint, TimeWindow};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn point(kind: MetricKind, value: f64, hour: u32) -> RawDataPoint {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap();
        RawDataPoint {
            kind,
            value,
            start_time: start,
            end_time: start + Duration::minutes(30),
        }
    }

    fn totals(points: &[RawDataPoint]) -> AggregateTotals {
        AggregateTotals::from_points(points, &TimeWindow::for_date(date()))
    }

    #[test]
    fn activity_prefers_measured_values() {
        let totals = totals(&[
            point(MetricKind::StepCount, 10_000.0, 8),
            point(MetricKind::Distance, 7.5, 8),
            point(MetricKind::CaloriesExpended, 2100.0, 8),
            point(MetricKind::ActiveMinutes, 45.0, 8),
        ]);
        let record = DailyRecordAssembler::new().activity(&totals, date(), Provider::GoogleFit);

        assert_eq!(record.steps, 10_000);
        assert_eq!(record.distance_km, 7.5);
        assert_eq!(record.total_calories, 2100.0);
        assert_eq!(record.active_calories, 400.0);
        assert_eq!(record.active_minutes, 45.0);
    }

    #[test]
    fn activity_estimates_from_steps_when_unmeasured() {
        let totals = totals(&[point(MetricKind::StepCount, 10_000.0, 8)]);
        let record =
            DailyRecordAssembler::new().activity(&totals, date(), Provider::HealthConnect);

        // 10000 * 0.7 m = 7 km; 10000 * 0.04 kcal * 5
        assert_eq!(record.distance_km, 7.0);
        assert_eq!(record.active_calories, 400.0);
        assert_eq!(record.total_calories, 2000.0);
    }

    #[test]
    fn activity_with_no_data_is_all_zero() {
        let record =
            DailyRecordAssembler::new().activity(&totals(&[]), date(), Provider::GoogleFit);

        assert_eq!(record.steps, 0);
        assert_eq!(record.distance_km, 0.0);
        assert_eq!(record.active_calories, 0.0);
        assert_eq!(record.total_calories, 0.0);
        assert_eq!(record.active_minutes, 0.0);
    }

    #[test]
    fn weight_record_with_bmi() {
        let totals = totals(&[
            point(MetricKind::Weight, 70.0, 7),
            point(MetricKind::BodyFat, 18.5, 7),
        ]);
        let record = DailyRecordAssembler::new().weight(&totals, date(), Provider::HealthConnect);

        assert_eq!(record.weight_kg, Some(70.0));
        assert_eq!(record.body_fat_percentage, Some(18.5));
        assert_eq!(record.muscle_mass_kg, None);
        // 70 / 1.70^2 with the default height
        assert_eq!(record.bmi, Some(24.2));
    }

    #[test]
    fn weight_record_without_data_keeps_fields_absent() {
        let record =
            DailyRecordAssembler::new().weight(&totals(&[]), date(), Provider::HealthConnect);

        assert_eq!(record.weight_kg, None);
        assert_eq!(record.bmi, None);
    }

    #[test]
    fn custom_height_changes_bmi() {
        let totals = totals(&[point(MetricKind::Weight, 70.0, 7)]);
        let record = DailyRecordAssembler::with_height(1.80).weight(
            &totals,
            date(),
            Provider::HealthConnect,
        );

        assert_eq!(record.bmi, Some(21.6));
    }

    #[test]
    fn sleep_record_carries_session_times_and_score() {
        let session_start = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
        let session = RawDataPoint {
            kind: MetricKind::TotalSleep,
            value: 450.0,
            start_time: session_start,
            end_time: session_start + Duration::minutes(480),
        };
        let window = TimeWindow::sleep_capture(date());
        let totals = AggregateTotals::from_points(
            &[
                session,
                point(MetricKind::RemSleep, 90.0, 23),
                point(MetricKind::SleepEfficiency, 0.85, 23),
            ],
            &window,
        );
        let record = DailyRecordAssembler::new().sleep(&totals, date(), Provider::HealthConnect);

        assert_eq!(record.total_sleep_minutes, 450.0);
        assert_eq!(record.bedtime.as_deref(), Some("23:30:00"));
        assert_eq!(record.wake_time.as_deref(), Some("07:30:00"));
        assert_eq!(record.sleep_quality_score, Some(65.5));
    }

    #[test]
    fn sleep_record_without_data_defaults() {
        let record =
            DailyRecordAssembler::new().sleep(&totals(&[]), date(), Provider::HealthConnect);

        assert_eq!(record.total_sleep_minutes, 0.0);
        assert_eq!(record.sleep_efficiency, None);
        assert_eq!(record.bedtime, None);
        assert_eq!(record.sleep_quality_score, None);
    }

    #[test]
    fn assembly_is_idempotent_except_created_at() {
        let totals = totals(&[
            point(MetricKind::CaloriesConsumed, 2000.0, 12),
            point(MetricKind::Protein, 80.0, 12),
        ]);
        let assembler = DailyRecordAssembler::new();

        let mut a = assembler.nutrition(&totals, date(), Provider::HealthConnect);
        let b = assembler.nutrition(&totals, date(), Provider::HealthConnect);
        a.created_at = b.created_at;
        assert_eq!(a, b);
    }
}
