//! Sleep pattern analyzer
//!
//! Classifies a night's sleep by duration and efficiency and flags a low REM
//! share. Advisories accumulate in duration → efficiency → REM order.

use serde::{Deserialize, Serialize};

use crate::derive::REM_RATIO_FLOOR;
use crate::types::SleepDaily;

/// Sleep duration considered optimal, in hours, inclusive on both ends
pub const OPTIMAL_SLEEP_HOURS: (f64, f64) = (7.0, 9.0);
/// Below this many hours sleep is insufficient rather than merely short
pub const SHORT_SLEEP_FLOOR_HOURS: f64 = 6.0;
/// Efficiency at or above this is excellent
pub const EFFICIENCY_EXCELLENT: f64 = 0.85;
/// Efficiency at or above this (but below excellent) is good
pub const EFFICIENCY_GOOD: f64 = 0.75;

const REC_SLEEP_SHORT: &str = "Consider getting a little more sleep.";
const REC_SLEEP_LONG: &str = "You may be sleeping longer than you need.";
const REC_SLEEP_INSUFFICIENT: &str = "You are not getting enough sleep.";
const REC_QUALITY: &str = "Consider improving your sleep quality.";
const REC_LOW_REM: &str = "REM sleep looks low.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepDurationCategory {
    Optimal,
    Short,
    Long,
    Insufficient,
}

impl SleepDurationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepDurationCategory::Optimal => "optimal",
            SleepDurationCategory::Short => "short",
            SleepDurationCategory::Long => "long",
            SleepDurationCategory::Insufficient => "insufficient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQualityCategory {
    Excellent,
    Good,
    NeedsImprovement,
    Unknown,
}

impl SleepQualityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQualityCategory::Excellent => "excellent",
            SleepQualityCategory::Good => "good",
            SleepQualityCategory::NeedsImprovement => "needs_improvement",
            SleepQualityCategory::Unknown => "unknown",
        }
    }
}

/// Outcome of analyzing one day's sleep record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepAnalysis {
    pub duration_category: SleepDurationCategory,
    pub quality_category: SleepQualityCategory,
    pub recommendations: Vec<String>,
}

/// State-free classifier over one [`SleepDaily`] record
pub struct SleepAnalyzer;

impl SleepAnalyzer {
    pub fn analyze(record: &SleepDaily) -> SleepAnalysis {
        let mut recommendations = Vec::new();
        let hours = record.total_sleep_minutes / 60.0;

        let duration_category = if hours >= OPTIMAL_SLEEP_HOURS.0 && hours <= OPTIMAL_SLEEP_HOURS.1
        {
            SleepDurationCategory::Optimal
        } else if hours >= SHORT_SLEEP_FLOOR_HOURS && hours < OPTIMAL_SLEEP_HOURS.0 {
            recommendations.push(REC_SLEEP_SHORT.to_string());
            SleepDurationCategory::Short
        } else if hours > OPTIMAL_SLEEP_HOURS.1 {
            recommendations.push(REC_SLEEP_LONG.to_string());
            SleepDurationCategory::Long
        } else {
            recommendations.push(REC_SLEEP_INSUFFICIENT.to_string());
            SleepDurationCategory::Insufficient
        };

        let quality_category = match record.sleep_efficiency {
            Some(eff) if eff >= EFFICIENCY_EXCELLENT => SleepQualityCategory::Excellent,
            Some(eff) if eff >= EFFICIENCY_GOOD => SleepQualityCategory::Good,
            Some(_) => {
                recommendations.push(REC_QUALITY.to_string());
                SleepQualityCategory::NeedsImprovement
            }
            None => SleepQualityCategory::Unknown,
        };

        if let Some(rem) = record.rem_sleep_minutes {
            if record.total_sleep_minutes > 0.0
                && rem / record.total_sleep_minutes < REM_RATIO_FLOOR
            {
                recommendations.push(REC_LOW_REM.to_string());
            }
        }

        SleepAnalysis {
            duration_category,
            quality_category,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::types::Provider;

    fn record(total_minutes: f64, efficiency: Option<f64>, rem: Option<f64>) -> SleepDaily {
        SleepDaily {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            total_sleep_minutes: total_minutes,
            deep_sleep_minutes: None,
            light_sleep_minutes: None,
            rem_sleep_minutes: rem,
            sleep_efficiency: efficiency,
            bedtime: None,
            wake_time: None,
            sleep_quality_score: None,
            created_at: Utc::now(),
            data_source: Provider::HealthConnect,
        }
    }

    #[test]
    fn duration_categories() {
        let cases = [
            (420.0, SleepDurationCategory::Optimal), // 7h
            (540.0, SleepDurationCategory::Optimal), // 9h
            (360.0, SleepDurationCategory::Short),   // 6h
            (419.0, SleepDurationCategory::Short),
            (541.0, SleepDurationCategory::Long),
            (359.0, SleepDurationCategory::Insufficient),
            (0.0, SleepDurationCategory::Insufficient),
        ];
        for (minutes, expected) in cases {
            let analysis = SleepAnalyzer::analyze(&record(minutes, None, None));
            assert_eq!(analysis.duration_category, expected, "{minutes} minutes");
        }
    }

    #[test]
    fn quality_categories() {
        assert_eq!(
            SleepAnalyzer::analyze(&record(420.0, Some(0.85), None)).quality_category,
            SleepQualityCategory::Excellent
        );
        assert_eq!(
            SleepAnalyzer::analyze(&record(420.0, Some(0.75), None)).quality_category,
            SleepQualityCategory::Good
        );
        assert_eq!(
            SleepAnalyzer::analyze(&record(420.0, Some(0.70), None)).quality_category,
            SleepQualityCategory::NeedsImprovement
        );
        assert_eq!(
            SleepAnalyzer::analyze(&record(420.0, None, None)).quality_category,
            SleepQualityCategory::Unknown
        );
    }

    #[test]
    fn low_rem_triggers_advisory() {
        // 50 / 420 ≈ 0.12 REM share
        let analysis = SleepAnalyzer::analyze(&record(420.0, Some(0.9), Some(50.0)));
        assert_eq!(analysis.recommendations, vec![REC_LOW_REM.to_string()]);

        // 90 / 420 ≈ 0.21 is fine
        let analysis = SleepAnalyzer::analyze(&record(420.0, Some(0.9), Some(90.0)));
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn advisories_accumulate_in_category_order() {
        // 5.5h, poor efficiency, low REM
        let analysis = SleepAnalyzer::analyze(&record(330.0, Some(0.6), Some(30.0)));

        assert_eq!(
            analysis.duration_category,
            SleepDurationCategory::Insufficient
        );
        assert_eq!(
            analysis.quality_category,
            SleepQualityCategory::NeedsImprovement
        );
        assert_eq!(
            analysis.recommendations,
            vec![
                REC_SLEEP_INSUFFICIENT.to_string(),
                REC_QUALITY.to_string(),
                REC_LOW_REM.to_string(),
            ]
        );
    }
}
