//! Nutrition balance analyzer
//!
//! Classifies a day's intake against calorie and macronutrient targets and
//! accumulates one advisory per triggered rule, in fixed rule order.

use serde::{Deserialize, Serialize};

use crate::derive::{pfc_ratios, PfcRatio};
use crate::types::NutritionDaily;

/// Daily calorie intake considered appropriate, inclusive on both ends (kcal)
pub const CALORIE_TARGET_RANGE: (f64, f64) = (1800.0, 2500.0);
/// Target protein share of total calories (percent)
pub const PROTEIN_TARGET_RANGE: (f64, f64) = (15.0, 20.0);
/// Target fat share of total calories (percent)
pub const FAT_TARGET_RANGE: (f64, f64) = (20.0, 30.0);
/// Target carbohydrate share of total calories (percent)
pub const CARBS_TARGET_RANGE: (f64, f64) = (50.0, 65.0);
/// Daily fiber floor (grams)
pub const FIBER_FLOOR_G: f64 = 20.0;
/// Daily water floor (milliliters)
pub const WATER_FLOOR_ML: f64 = 1500.0;

const REC_CALORIES_LOW: &str = "Calorie intake looks low; consider eating a bit more.";
const REC_CALORIES_HIGH: &str = "Calorie intake looks high; consider lighter meals.";
const REC_PROTEIN_LOW: &str = "Consider adding more protein to your meals.";
const REC_PROTEIN_HIGH: &str = "Protein intake may be higher than you need.";
const REC_FAT_HIGH: &str = "Consider cutting back on fat.";
const REC_FAT_LOW: &str = "Consider adding more healthy fats.";
const REC_FIBER_LOW: &str = "Consider eating more fiber.";
const REC_WATER_LOW: &str = "Consider drinking more water.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieBalance {
    Appropriate,
    Low,
    High,
    Unknown,
}

impl CalorieBalance {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalorieBalance::Appropriate => "appropriate",
            CalorieBalance::Low => "low",
            CalorieBalance::High => "high",
            CalorieBalance::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacronutrientBalance {
    Excellent,
    NeedsAdjustment,
    Unknown,
}

impl MacronutrientBalance {
    pub fn as_str(&self) -> &'static str {
        match self {
            MacronutrientBalance::Excellent => "excellent",
            MacronutrientBalance::NeedsAdjustment => "needs_adjustment",
            MacronutrientBalance::Unknown => "unknown",
        }
    }
}

/// Outcome of analyzing one day's nutrition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionAnalysis {
    pub calorie_balance: CalorieBalance,
    pub macronutrient_balance: MacronutrientBalance,
    pub pfc_ratio: PfcRatio,
    pub recommendations: Vec<String>,
}

/// State-free classifier over one [`NutritionDaily`] record
pub struct NutritionAnalyzer;

impl NutritionAnalyzer {
    pub fn analyze(record: &NutritionDaily) -> NutritionAnalysis {
        let total = record.calories_consumed;
        let mut recommendations = Vec::new();

        let calorie_balance = if total <= 0.0 {
            CalorieBalance::Unknown
        } else if total < CALORIE_TARGET_RANGE.0 {
            CalorieBalance::Low
        } else if total <= CALORIE_TARGET_RANGE.1 {
            CalorieBalance::Appropriate
        } else {
            CalorieBalance::High
        };
        match calorie_balance {
            CalorieBalance::Low => recommendations.push(REC_CALORIES_LOW.to_string()),
            CalorieBalance::High => recommendations.push(REC_CALORIES_HIGH.to_string()),
            _ => {}
        }

        let pfc_ratio = pfc_ratios(record.protein_g, record.fat_g, record.carbs_g, total);

        let macronutrient_balance = if total <= 0.0 {
            MacronutrientBalance::Unknown
        } else if within(pfc_ratio.protein, PROTEIN_TARGET_RANGE)
            && within(pfc_ratio.fat, FAT_TARGET_RANGE)
            && within(pfc_ratio.carbs, CARBS_TARGET_RANGE)
        {
            MacronutrientBalance::Excellent
        } else {
            MacronutrientBalance::NeedsAdjustment
        };

        if total > 0.0 {
            if pfc_ratio.protein < PROTEIN_TARGET_RANGE.0 {
                recommendations.push(REC_PROTEIN_LOW.to_string());
            } else if pfc_ratio.protein > PROTEIN_TARGET_RANGE.1 {
                recommendations.push(REC_PROTEIN_HIGH.to_string());
            }

            if pfc_ratio.fat > FAT_TARGET_RANGE.1 {
                recommendations.push(REC_FAT_HIGH.to_string());
            } else if pfc_ratio.fat < FAT_TARGET_RANGE.0 {
                recommendations.push(REC_FAT_LOW.to_string());
            }
        }

        if record.fiber_g < FIBER_FLOOR_G {
            recommendations.push(REC_FIBER_LOW.to_string());
        }
        if record.water_ml < WATER_FLOOR_ML {
            recommendations.push(REC_WATER_LOW.to_string());
        }

        NutritionAnalysis {
            calorie_balance,
            macronutrient_balance,
            pfc_ratio,
            recommendations,
        }
    }
}

fn within(value: f64, range: (f64, f64)) -> bool {
    value >= range.0 && value <= range.1
}
