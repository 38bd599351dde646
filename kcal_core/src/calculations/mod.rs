//! # Calorie Calculation
//!
//! The engine proper. The pattern follows the rest of the crate:
//!
//! - [`UserInput`] - validated input snapshot (JSON-serializable)
//! - [`CalorieResult`] - every derived number (JSON-serializable)
//! - `calculate(input) -> Result<CalorieResult, CalcError>` - pure function
//!
//! A result is never updated in place. Changing any input means calling
//! `calculate` again and replacing the old value.
//!
//! ## Submodules
//!
//! - [`energy`] - BMR, TEE and target calories
//! - [`macros`] - protein/fat/carbohydrate split
//! - [`bmi`] - body mass index and category
//! - [`advisory`] - notes attached to a result
//!
//! ## Example
//!
//! ```rust
//! use kcal_core::calculations::calculate_raw;
//! use kcal_core::input::RawInput;
//!
//! let raw = RawInput::new()
//!     .with_sex("mann")
//!     .with_age("30")
//!     .with_height("180")
//!     .with_weight("80")
//!     .with_activity_level("2")
//!     .with_goal("0");
//!
//! let result = calculate_raw(&raw).unwrap();
//! assert_eq!(result.bmr_kcal, 1780);
//! assert_eq!(result.tee_kcal, 2759);
//! assert_eq!(result.target_kcal, 2259);
//! assert_eq!(result.macros.carb_g, 288);
//! assert_eq!(result.bmi, 24.7);
//! ```

pub mod advisory;
pub mod bmi;
pub mod energy;
pub mod macros;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{EngineConfig, DEFAULT_CONFIG};
use crate::errors::CalcResult;
use crate::input::{RawInput, UserInput};
use crate::tables::{ActivityLevel, Goal};

pub use advisory::Advisory;
pub use bmi::BmiCategory;
pub use macros::MacroSplit;

/// Results of a calorie calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bmr_kcal": 1780,
///   "tee_kcal": 2759,
///   "target_kcal": 2259,
///   "goal_delta_kcal": -500,
///   "pal": 1.55,
///   "activity_level": "ModeratelyActive",
///   "activity_label": "Mäßig aktiv (3–5× Sport/Woche)",
///   "goal": "WeightLoss",
///   "goal_label": "Abnehmen (−500 kcal/Tag)",
///   "macros": { "protein_g": 136, "protein_kcal": 544, "fat_g": 63, "fat_kcal": 565, "carb_g": 288, "carb_kcal": 1150 },
///   "bmi": 24.7,
///   "bmi_category": "Normal",
///   "notes": [{ "kind": "WeeklyWeightChange", "kg_per_week": -0.45 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieResult {
    /// Basal metabolic rate (Grundumsatz), kcal/day
    pub bmr_kcal: i32,
    /// Total daily energy expenditure (Gesamtumsatz), kcal/day
    pub tee_kcal: i32,
    /// Recommended daily intake for the goal, kcal/day
    pub target_kcal: i32,
    /// Delta applied to TEE for the goal
    pub goal_delta_kcal: i32,
    /// PAL multiplier used
    pub pal: f64,
    pub activity_level: ActivityLevel,
    pub activity_label: String,
    pub goal: Goal,
    pub goal_label: String,
    pub macros: MacroSplit,
    /// BMI with one decimal
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub notes: Vec<Advisory>,
}

impl CalorieResult {
    /// Short text under the target calories
    pub fn goal_hint(&self) -> String {
        match self.goal_delta_kcal {
            d if d < 0 => format!("{} kcal Defizit", d.unsigned_abs()),
            d if d > 0 => format!("+{} kcal Überschuss", d),
            _ => "Erhaltungsbedarf".to_string(),
        }
    }

    /// True if any note is a warning
    pub fn has_warnings(&self) -> bool {
        self.notes.iter().any(Advisory::is_warning)
    }
}

/// Round to the nearest integer, halves toward +∞ (−2.5 → −2, 2.5 → 3).
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Calculate with the default configuration.
pub fn calculate(input: &UserInput) -> CalcResult<CalorieResult> {
    calculate_with(input, &DEFAULT_CONFIG)
}

/// Parse a raw form snapshot and calculate with the default configuration.
pub fn calculate_raw(raw: &RawInput) -> CalcResult<CalorieResult> {
    calculate_raw_with(raw, &DEFAULT_CONFIG)
}

/// Parse a raw form snapshot and calculate with an explicit configuration.
pub fn calculate_raw_with(raw: &RawInput, config: &EngineConfig) -> CalcResult<CalorieResult> {
    let input = raw.parse(config)?;
    calculate_with(&input, config)
}

/// Calculate with an explicit configuration.
///
/// # Errors
///
/// Only input validation: the snapshot is range-checked against
/// `config.limits` first. Once that passes the arithmetic cannot fail.
pub fn calculate_with(input: &UserInput, config: &EngineConfig) -> CalcResult<CalorieResult> {
    input.validate(&config.limits)?;

    let bmr_kcal = energy::basal_metabolic_rate(input, &config.bmr);
    let pal = config.activity_factors.factor(input.activity_level);
    let tee_kcal = energy::total_energy_expenditure(bmr_kcal, pal);
    let goal_delta_kcal = config.goal_deltas.delta(input.goal);
    let target_kcal = energy::target_calories(tee_kcal, goal_delta_kcal);
    trace!(bmr_kcal, pal, tee_kcal, goal_delta_kcal, target_kcal, "energy");

    let macros = macros::split(target_kcal, input.weight, input.goal, &config.macros);
    trace!(?macros, "macro split");

    let bmi = bmi::round_to_tenth(bmi::body_mass_index(input.weight, input.height));
    let bmi_category = BmiCategory::from_bmi(bmi);

    let notes = advisory::assess(input, target_kcal, goal_delta_kcal, &macros, &config.advisory);

    debug!(
        bmr_kcal,
        tee_kcal,
        target_kcal,
        bmi,
        notes = notes.len(),
        "calorie calculation complete"
    );

    Ok(CalorieResult {
        bmr_kcal,
        tee_kcal,
        target_kcal,
        goal_delta_kcal,
        pal,
        activity_level: input.activity_level,
        activity_label: input.activity_level.label().to_string(),
        goal: input.goal,
        goal_label: input.goal.label().to_string(),
        macros,
        bmi,
        bmi_category,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::input::Sex;
    use crate::units::{Centimeters, Kilograms, Years};

    fn input(sex: Sex, age: u32, height: f64, weight: f64, activity: usize, goal: usize) -> UserInput {
        UserInput {
            sex,
            age: Years(age),
            height: Centimeters(height),
            weight: Kilograms(weight),
            activity_level: ActivityLevel::from_index(activity).unwrap(),
            goal: Goal::from_index(goal).unwrap(),
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
        assert_eq!(round_half_up(1370.25), 1370.0);
        assert_eq!(round_half_up(0.0), 0.0);
    }

    #[test]
    fn test_reference_scenario() {
        let result = calculate(&input(Sex::Male, 30, 180.0, 80.0, 2, 0)).unwrap();
        assert_eq!(result.bmr_kcal, 1780);
        assert_eq!(result.tee_kcal, 2759);
        assert_eq!(result.target_kcal, 2259);
        assert_eq!(result.goal_delta_kcal, -500);
        assert_eq!(result.pal, 1.55);
        assert_eq!(result.macros.protein_g, 136);
        assert_eq!(result.macros.protein_kcal, 544);
        assert_eq!(result.macros.fat_kcal, 565);
        assert_eq!(result.macros.fat_g, 63);
        assert_eq!(result.macros.carb_kcal, 1150);
        assert_eq!(result.macros.carb_g, 288);
        assert_eq!(result.bmi, 24.7);
        assert_eq!(result.bmi_category, BmiCategory::Normal);
        assert_eq!(result.bmi_category.label(), "Normalgewicht");
        assert_eq!(result.activity_label, "Mäßig aktiv (3–5× Sport/Woche)");
        assert_eq!(result.goal_hint(), "500 kcal Defizit");
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_worked_example_female() {
        let result = calculate(&input(Sex::Female, 30, 165.0, 65.0, 1, 1)).unwrap();
        assert_eq!(result.bmr_kcal, 1370);
        assert_eq!(result.goal_hint(), "Erhaltungsbedarf");
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_goal_deltas_applied() {
        for (goal, delta) in [(0, -500), (1, 0), (2, 300)] {
            let result = calculate(&input(Sex::Female, 45, 170.0, 70.0, 3, goal)).unwrap();
            assert_eq!(result.target_kcal, result.tee_kcal + delta);
            assert_eq!(result.macros.total_kcal(), result.target_kcal);
        }
        let gain = calculate(&input(Sex::Female, 45, 170.0, 70.0, 3, 2)).unwrap();
        assert_eq!(gain.goal_hint(), "+300 kcal Überschuss");
        assert_eq!(gain.macros.protein_g, 140);
    }

    #[test]
    fn test_tee_monotonic_across_levels() {
        let tees: Vec<i32> = (0..5)
            .map(|level| calculate(&input(Sex::Male, 52, 176.0, 91.0, level, 1)).unwrap().tee_kcal)
            .collect();
        assert!(tees.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_boundaries_produce_results() {
        for sex in [Sex::Male, Sex::Female] {
            for goal in 0..3 {
                assert!(calculate(&input(sex, 10, 100.0, 30.0, 0, goal)).is_ok());
                assert!(calculate(&input(sex, 120, 250.0, 300.0, 4, goal)).is_ok());
            }
        }
    }

    #[test]
    fn test_extreme_low_target_keeps_negative_carbs() {
        // female, 120 y, 100 cm, 30 kg, sedentary, weight loss
        // BMR = 300 + 625 - 600 - 161 = 164; TEE = 197; target = -303
        let result = calculate(&input(Sex::Female, 120, 100.0, 30.0, 0, 0)).unwrap();
        assert_eq!(result.bmr_kcal, 164);
        assert_eq!(result.tee_kcal, 197);
        assert_eq!(result.target_kcal, -303);
        assert!(result.macros.carb_kcal < 0);
        assert!(result.notes.contains(&Advisory::NegativeCarbohydrates {
            carb_kcal: result.macros.carb_kcal
        }));
        assert!(result.has_warnings());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = calculate(&input(Sex::Male, 9, 180.0, 80.0, 2, 0)).unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "age"));
    }

    #[test]
    fn test_raw_entry_point() {
        let raw = RawInput::new().with_sex("frau").with_age("30").with_height("165").with_weight("65");
        let result = calculate_raw(&raw).unwrap();
        assert_eq!(result.bmr_kcal, 1370);

        let err = calculate_raw(&raw.clone().with_age("9")).unwrap_err();
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn test_custom_config() {
        let mut config = EngineConfig::default();
        config.goal_deltas.weight_loss = -300;
        let result = calculate_with(&input(Sex::Male, 30, 180.0, 80.0, 2, 0), &config).unwrap();
        assert_eq!(result.target_kcal, 2459);
        assert_eq!(result.goal_hint(), "300 kcal Defizit");
    }

    #[test]
    fn test_extreme_valid_config_does_not_overflow() {
        use crate::config::{
            FieldRange, MAX_AGE_YEARS, MAX_BMR_COEFFICIENT, MAX_BMR_CONSTANT, MAX_GOAL_DELTA_KCAL,
            MAX_HEIGHT_CM, MAX_PAL, MAX_PROTEIN_G_PER_KG, MAX_WEIGHT_KG,
        };

        let mut config = EngineConfig::default();
        config.bmr.weight_coef = MAX_BMR_COEFFICIENT;
        config.bmr.height_coef = MAX_BMR_COEFFICIENT;
        config.bmr.age_coef = MAX_BMR_COEFFICIENT;
        config.bmr.male_constant = MAX_BMR_CONSTANT;
        config.activity_factors.extra_active = MAX_PAL;
        config.goal_deltas.muscle_gain = MAX_GOAL_DELTA_KCAL as i32;
        config.macros.protein_g_per_kg_muscle_gain = MAX_PROTEIN_G_PER_KG;
        config.limits.age = FieldRange::new(10.0, MAX_AGE_YEARS);
        config.limits.height = FieldRange::new(100.0, MAX_HEIGHT_CM);
        config.limits.weight = FieldRange::new(30.0, MAX_WEIGHT_KG);
        config.validate().unwrap();

        let high = input(Sex::Male, 150, MAX_HEIGHT_CM, MAX_WEIGHT_KG, 4, 2);
        let result = calculate_with(&high, &config).unwrap();
        assert_eq!(result.bmr_kcal, 150_000);
        assert_eq!(result.tee_kcal, 750_000);
        assert_eq!(result.target_kcal, 755_000);
        assert_eq!(result.macros.protein_g, 10_000);
        assert_eq!(result.macros.total_kcal(), result.target_kcal);

        config.bmr.weight_coef = -MAX_BMR_COEFFICIENT;
        config.bmr.height_coef = -MAX_BMR_COEFFICIENT;
        config.bmr.male_constant = -MAX_BMR_CONSTANT;
        config.goal_deltas.weight_loss = -(MAX_GOAL_DELTA_KCAL as i32);
        config.validate().unwrap();
        let low = input(Sex::Male, 150, MAX_HEIGHT_CM, MAX_WEIGHT_KG, 4, 0);
        let result = calculate_with(&low, &config).unwrap();
        assert!(result.target_kcal < 0);
        assert_eq!(result.macros.total_kcal(), result.target_kcal);
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&input(Sex::Male, 30, 180.0, 80.0, 2, 0)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["bmr_kcal"], 1780);
        assert_eq!(json["bmi_category"], "Normal");
        assert_eq!(json["notes"][0]["kind"], "WeeklyWeightChange");

        let roundtrip: CalorieResult = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, result);
    }
}
