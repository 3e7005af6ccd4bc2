//! Derived metric calculators
//!
//! Pure, stateless functions that estimate metrics the providers do not
//! supply directly: distance and calorie burn from step counts, BMI, a
//! composite sleep-quality score, and macronutrient calorie ratios. Each
//! returns a neutral value (`None` or zero) when its inputs are insufficient.

use serde::{Deserialize, Serialize};

/// Average stride length used to estimate distance from steps (meters)
pub const STRIDE_LENGTH_METERS: f64 = 0.7;

/// Estimated active energy burn per step (kcal)
pub const KCAL_PER_STEP: f64 = 0.04;

/// Multiplier from active burn to total daily burn, approximating the
/// resting component
pub const TOTAL_BURN_FACTOR: f64 = 5.0;

/// Height used for BMI when no per-user height is configured (meters).
/// A single fixed constant for every user is a known limitation.
pub const DEFAULT_HEIGHT_METERS: f64 = 1.70;

/// Minimum share of sleep spent in REM before the analyzer flags it
pub const REM_RATIO_FLOOR: f64 = 0.15;

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimated distance covered by `steps`, in meters, rounded to one decimal.
/// Zero steps estimates zero distance.
pub fn distance_from_steps(steps: u64) -> f64 {
    if steps == 0 {
        return 0.0;
    }
    round1(steps as f64 * STRIDE_LENGTH_METERS)
}

/// Estimated active calorie burn for `steps`, in kcal, rounded to one decimal.
pub fn active_calories_from_steps(steps: u64) -> f64 {
    if steps == 0 {
        return 0.0;
    }
    round1(steps as f64 * KCAL_PER_STEP)
}

/// Estimated total daily burn for `steps`: the active estimate scaled by
/// [`TOTAL_BURN_FACTOR`].
pub fn total_calories_from_steps(steps: u64) -> f64 {
    round1(active_calories_from_steps(steps) * TOTAL_BURN_FACTOR)
}

/// Body mass index, rounded to one decimal. `None` unless both weight and
/// height are positive.
pub fn bmi(weight_kg: f64, height_m: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_m <= 0.0 {
        return None;
    }
    Some(round1(weight_kg / (height_m * height_m)))
}

/// Composite sleep-quality score on a 0-100 scale, weighting efficiency at
/// 70% and the REM share of total sleep at 30%, rounded to one decimal.
///
/// Requires efficiency, REM minutes, and a positive total; otherwise `None`.
pub fn sleep_quality_score(
    efficiency: Option<f64>,
    rem_minutes: Option<f64>,
    total_minutes: f64,
) -> Option<f64> {
    match (efficiency, rem_minutes) {
        (Some(eff), Some(rem)) if total_minutes > 0.0 => {
            let rem_ratio = rem / total_minutes;
            Some(round1((eff * 0.7 + rem_ratio * 0.3) * 100.0))
        }
        _ => None,
    }
}

/// Share of caloric intake attributable to protein, fat, and carbohydrates,
/// as percentages rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PfcRatio {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Macronutrient calorie ratios: protein and carbs at 4 kcal/g, fat at
/// 9 kcal/g. All zero when `total_calories` is not positive.
pub fn pfc_ratios(protein_g: f64, fat_g: f64, carbs_g: f64, total_calories: f64) -> PfcRatio {
    if total_calories <= 0.0 {
        return PfcRatio::default();
    }
    PfcRatio {
        protein: round1(protein_g * 4.0 / total_calories * 100.0),
        fat: round1(fat_g * 9.0 / total_calories * 100.0),
        carbs: round1(carbs_g * 4.0 / total_calories * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distance_estimate_uses_stride_length() {
        assert_eq!(distance_from_steps(0), 0.0);
        assert_eq!(distance_from_steps(10_000), 7000.0);
        // Rounded to one decimal
        assert_eq!(distance_from_steps(8_543), round1(8_543.0 * 0.7));
    }

    #[test]
    fn calorie_estimate_scales_with_steps() {
        assert_eq!(active_calories_from_steps(0), 0.0);
        assert_eq!(total_calories_from_steps(0), 0.0);

        assert_eq!(active_calories_from_steps(10_000), 400.0);
        assert_eq!(total_calories_from_steps(10_000), 2000.0);
    }

    #[test]
    fn total_burn_is_five_times_active() {
        for steps in [1u64, 137, 5_000, 12_345] {
            let active = active_calories_from_steps(steps);
            assert_eq!(total_calories_from_steps(steps), round1(active * 5.0));
        }
    }

    #[test]
    fn bmi_reference_value() {
        assert_eq!(bmi(70.0, 1.70), Some(24.2));
    }

    #[test]
    fn bmi_requires_positive_inputs() {
        assert_eq!(bmi(0.0, 1.70), None);
        assert_eq!(bmi(-5.0, 1.70), None);
        assert_eq!(bmi(70.0, 0.0), None);
    }

    #[test]
    fn sleep_quality_reference_value() {
        // 0.85 * 0.7 + (90 / 450) * 0.3 = 0.655
        assert_eq!(sleep_quality_score(Some(0.85), Some(90.0), 450.0), Some(65.5));
    }

    #[test]
    fn sleep_quality_requires_all_inputs() {
        assert_eq!(sleep_quality_score(None, Some(90.0), 450.0), None);
        assert_eq!(sleep_quality_score(Some(0.85), None, 450.0), None);
        assert_eq!(sleep_quality_score(Some(0.85), Some(90.0), 0.0), None);
    }

    #[test]
    fn pfc_ratios_reference_values() {
        let ratio = pfc_ratios(80.0, 60.0, 250.0, 2000.0);
        assert_eq!(ratio.protein, 16.0);
        assert_eq!(ratio.fat, 27.0);
        assert_eq!(ratio.carbs, 50.0);
    }

    #[test]
    fn pfc_ratios_zero_without_calories() {
        assert_eq!(pfc_ratios(80.0, 60.0, 250.0, 0.0), PfcRatio::default());
    }
}
