//! Rule-based category analyzers
//!
//! These apply fixed threshold rules to raw and derived metrics, producing a
//! categorical label per dimension plus an ordered list of advisory strings.

mod nutrition;
mod sleep;

pub use nutrition::{
    CalorieBalance, MacronutrientBalance, NutritionAnalysis, NutritionAnalyzer,
};
pub use sleep::{SleepAnalysis, SleepAnalyzer, SleepDurationCategory, SleepQualityCategory};

use crate::types::AnalysisResult;

impl From<&NutritionAnalysis> for AnalysisResult {
    fn from(analysis: &NutritionAnalysis) -> Self {
        let mut result = AnalysisResult {
            recommendations: analysis.recommendations.clone(),
            ..Default::default()
        };
        result.category_labels.insert(
            "calorie_balance".to_string(),
            analysis.calorie_balance.as_str().to_string(),
        );
        result.category_labels.insert(
            "macronutrient_balance".to_string(),
            analysis.macronutrient_balance.as_str().to_string(),
        );
        result
            .derived_ratios
            .insert("protein_pct".to_string(), analysis.pfc_ratio.protein);
        result
            .derived_ratios
            .insert("fat_pct".to_string(), analysis.pfc_ratio.fat);
        result
            .derived_ratios
            .insert("carbs_pct".to_string(), analysis.pfc_ratio.carbs);
        result
    }
}

impl From<&SleepAnalysis> for AnalysisResult {
    fn from(analysis: &SleepAnalysis) -> Self {
        let mut result = AnalysisResult {
            recommendations: analysis.recommendations.clone(),
            ..Default::default()
        };
        result.category_labels.insert(
            "sleep_duration_category".to_string(),
            analysis.duration_category.as_str().to_string(),
        );
        result.category_labels.insert(
            "sleep_quality_category".to_string(),
            analysis.quality_category.as_str().to_string(),
        );
        result
    }
}
