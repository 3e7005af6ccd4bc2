//! Pipeline orchestration
//!
//! This module provides the public API for Vitalflow. It runs the full
//! pipeline for one business day: provider adaptation → windowed aggregation
//! → derived metrics → record assembly → rule-based analysis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::adapters::{GoogleFitAdapter, HealthConnectAdapter, ProviderAdapter};
use crate::aggregate::AggregateTotals;
use crate::analyzers::{NutritionAnalysis, NutritionAnalyzer, SleepAnalysis, SleepAnalyzer};
use crate::assembler::DailyRecordAssembler;
use crate::error::EngineError;
use crate::types::{
    ActivityDaily, NutritionDaily, Provider, RawDataPoint, SleepDaily, TimeWindow, WeightDaily,
};

/// Everything one invocation produces for one business day: the four domain
/// records plus the analyses computed from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReport {
    pub report_id: Uuid,
    pub date: NaiveDate,
    pub activity: ActivityDaily,
    pub weight: WeightDaily,
    pub sleep: SleepDaily,
    pub nutrition: NutritionDaily,
    pub nutrition_analysis: NutritionAnalysis,
    pub sleep_analysis: SleepAnalysis,
}

/// Convert a Google Fit aggregate response into the daily report for `date`.
pub fn google_fit_to_daily(raw_json: &str, date: NaiveDate) -> Result<DailyReport, EngineError> {
    let points = GoogleFitAdapter.parse(raw_json)?;
    Ok(DailyEngine::new().process(Provider::GoogleFit, &points, date))
}

/// Convert Health Connect records into the daily report for `date`.
pub fn health_records_to_daily(
    raw_json: &str,
    date: NaiveDate,
) -> Result<DailyReport, EngineError> {
    let points = HealthConnectAdapter.parse(raw_json)?;
    Ok(DailyEngine::new().process(Provider::HealthConnect, &points, date))
}

/// Parse a payload with any adapter and run the daily pipeline on it.
pub fn process_payload(
    adapter: &dyn ProviderAdapter,
    raw_json: &str,
    date: NaiveDate,
) -> Result<DailyReport, EngineError> {
    let points = adapter.parse(raw_json)?;
    Ok(DailyEngine::new().process(adapter.provider(), &points, date))
}

/// The daily computation engine.
///
/// Stateless across invocations: every run builds its records fresh from the
/// points it is handed and shares nothing with other runs.
#[derive(Debug, Clone, Default)]
pub struct DailyEngine {
    assembler: DailyRecordAssembler,
}

impl DailyEngine {
    pub fn new() -> Self {
        Self {
            assembler: DailyRecordAssembler::new(),
        }
    }

    /// Use a specific height (meters) for BMI computation
    pub fn with_height(height_m: f64) -> Self {
        Self {
            assembler: DailyRecordAssembler::with_height(height_m),
        }
    }

    /// Run the full pipeline over `points` for the business day `date`.
    ///
    /// Activity, weight, and nutrition fold over the calendar day; sleep folds
    /// over the overnight capture range. Domains with no in-window points
    /// produce complete records with zeroed or absent fields, never an error.
    pub fn process(
        &self,
        provider: Provider,
        points: &[RawDataPoint],
        date: NaiveDate,
    ) -> DailyReport {
        debug!(
            provider = provider.as_str(),
            %date,
            point_count = points.len(),
            "processing daily metrics"
        );

        let day = TimeWindow::for_date(date);
        let night = TimeWindow::sleep_capture(date);

        let totals = AggregateTotals::from_points(points, &day);
        let sleep_totals = AggregateTotals::from_points(points, &night);

        let activity = self.assembler.activity(&totals, date, provider);
        let weight = self.assembler.weight(&totals, date, provider);
        let sleep = self.assembler.sleep(&sleep_totals, date, provider);
        let nutrition = self.assembler.nutrition(&totals, date, provider);

        let nutrition_analysis = NutritionAnalyzer::analyze(&nutrition);
        let sleep_analysis = SleepAnalyzer::analyze(&sleep);

        info!(
            provider = provider.as_str(),
            %date,
            steps = activity.steps,
            calorie_balance = nutrition_analysis.calorie_balance.as_str(),
            sleep_duration = sleep_analysis.duration_category.as_str(),
            "daily report assembled"
        );

        DailyReport {
            report_id: Uuid::new_v4(),
            date,
            activity,
            weight,
            sleep,
            nutrition,
            nutrition_analysis,
            sleep_analysis,
        }
    }
}
