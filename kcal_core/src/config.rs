//! # Engine Configuration
//!
//! Every constant the engine uses, gathered in one serde value. The
//! [`Default`] implementation is the calculator as published; a JSON file can
//! override any subset of keys (missing keys keep their defaults).
//!
//! ## References
//!
//! - BMR: Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. American Journal of Clinical Nutrition, 51(2), 241-247.
//! - Body fat energy content: ~7700 kcal per kg
//!
//! ## Example
//!
//! ```rust
//! use kcal_core::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "goal_deltas": { "weight_loss": -400 } }"#).unwrap();
//! assert_eq!(config.goal_deltas.weight_loss, -400);
//! assert_eq!(config.goal_deltas.muscle_gain, 300);
//! ```

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::format::trimmed_decimal;
use crate::input::Sex;
use crate::tables::{ActivityLevel, Goal};

/// Process-wide default configuration used by [`crate::calculate`].
pub static DEFAULT_CONFIG: Lazy<EngineConfig> = Lazy::new(EngineConfig::default);

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Mifflin-St. Jeor coefficients
    pub bmr: BmrCoefficients,
    /// PAL multipliers per activity level
    pub activity_factors: ActivityFactors,
    /// Daily calorie delta per goal
    pub goal_deltas: GoalDeltas,
    /// Macro-nutrient split
    pub macros: MacroConfig,
    /// Accepted input ranges
    pub limits: InputLimits,
    /// Thresholds for advisory notes
    pub advisory: AdvisoryConfig,
}

/// Mifflin-St. Jeor formula coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmrCoefficients {
    /// kcal per kg body weight (10.0)
    pub weight_coef: f64,
    /// kcal per cm height (6.25)
    pub height_coef: f64,
    /// kcal per year of age (-5.0)
    pub age_coef: f64,
    /// Constant for men (+5)
    pub male_constant: f64,
    /// Constant for women (-161)
    pub female_constant: f64,
}

impl Default for BmrCoefficients {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
        }
    }
}

impl BmrCoefficients {
    /// Sex-specific constant term
    pub fn constant_for(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.male_constant,
            Sex::Female => self.female_constant,
        }
    }
}

/// PAL multipliers, one per [`ActivityLevel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFactors {
    pub sedentary: f64,
    pub lightly_active: f64,
    pub moderately_active: f64,
    pub very_active: f64,
    pub extra_active: f64,
}

impl Default for ActivityFactors {
    fn default() -> Self {
        Self {
            sedentary: ActivityLevel::Sedentary.pal(),
            lightly_active: ActivityLevel::LightlyActive.pal(),
            moderately_active: ActivityLevel::ModeratelyActive.pal(),
            very_active: ActivityLevel::VeryActive.pal(),
            extra_active: ActivityLevel::ExtraActive.pal(),
        }
    }
}

impl ActivityFactors {
    /// PAL multiplier for a level
    pub fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtraActive => self.extra_active,
        }
    }

    fn in_order(&self) -> [f64; 5] {
        ActivityLevel::ALL.map(|level| self.factor(level))
    }
}

/// Daily calorie delta per [`Goal`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalDeltas {
    pub weight_loss: i32,
    pub maintenance: i32,
    pub muscle_gain: i32,
}

impl Default for GoalDeltas {
    fn default() -> Self {
        Self {
            weight_loss: Goal::WeightLoss.delta_kcal(),
            maintenance: Goal::Maintenance.delta_kcal(),
            muscle_gain: Goal::MuscleGain.delta_kcal(),
        }
    }
}

impl GoalDeltas {
    /// Calorie delta for a goal
    pub fn delta(&self, goal: Goal) -> i32 {
        match goal {
            Goal::WeightLoss => self.weight_loss,
            Goal::Maintenance => self.maintenance,
            Goal::MuscleGain => self.muscle_gain,
        }
    }
}

/// Macro-nutrient split settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroConfig {
    /// Protein g per kg body weight for weight loss and maintenance
    pub protein_g_per_kg: f64,
    /// Protein g per kg body weight when building muscle
    pub protein_g_per_kg_muscle_gain: f64,
    /// Share of target calories taken from fat
    pub fat_share: f64,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            protein_g_per_kg: 1.7,
            protein_g_per_kg_muscle_gain: 2.0,
            fat_share: 0.25,
        }
    }
}

impl MacroConfig {
    /// Protein rate for a goal
    pub fn protein_rate(&self, goal: Goal) -> f64 {
        match goal {
            Goal::MuscleGain => self.protein_g_per_kg_muscle_gain,
            Goal::WeightLoss | Goal::Maintenance => self.protein_g_per_kg,
        }
    }
}

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies inside the interval (both ends included)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// "10–120"
    pub fn display(&self) -> String {
        format!("{}–{}", trimmed_decimal(self.min), trimmed_decimal(self.max))
    }
}

/// Accepted input ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Years
    pub age: FieldRange,
    /// Centimeters
    pub height: FieldRange,
    /// Kilograms
    pub weight: FieldRange,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            age: FieldRange::new(10.0, 120.0),
            height: FieldRange::new(100.0, 250.0),
            weight: FieldRange::new(30.0, 300.0),
        }
    }
}

impl InputLimits {
    /// The message shown above the form when validation fails.
    pub fn user_message(&self) -> String {
        format!(
            "Bitte gültige Werte eingeben (Alter: {}, Größe: {} cm, Gewicht: {} kg).",
            self.age.display(),
            self.height.display(),
            self.weight.display()
        )
    }
}

/// Thresholds behind the advisory notes attached to a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Lowest sustainable daily intake for women
    pub min_intake_female_kcal: i32,
    /// Lowest sustainable daily intake for men
    pub min_intake_male_kcal: i32,
    /// Youngest age the formula set is meant for
    pub min_recommended_age: u32,
    /// Energy stored in one kg of body fat
    pub kcal_per_kg_body_fat: f64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            min_intake_female_kcal: 1200,
            min_intake_male_kcal: 1500,
            min_recommended_age: 15,
            kcal_per_kg_body_fat: 7700.0,
        }
    }
}

impl AdvisoryConfig {
    /// Minimum daily intake for a sex
    pub fn min_intake_for(&self, sex: Sex) -> i32 {
        match sex {
            Sex::Male => self.min_intake_male_kcal,
            Sex::Female => self.min_intake_female_kcal,
        }
    }
}

/// Largest accepted |coefficient| in the BMR formula
pub const MAX_BMR_COEFFICIENT: f64 = 100.0;
/// Largest accepted |constant| in the BMR formula
pub const MAX_BMR_CONSTANT: f64 = 5000.0;
pub const MAX_PAL: f64 = 5.0;
pub const MAX_GOAL_DELTA_KCAL: u32 = 5000;
pub const MAX_PROTEIN_G_PER_KG: f64 = 10.0;
/// Ceilings for `limits.*.max`
pub const MAX_AGE_YEARS: f64 = 150.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MAX_WEIGHT_KG: f64 = 1000.0;

fn check_bounded(field: &str, value: f64, max_abs: f64) -> CalcResult<()> {
    if value.is_finite() && value.abs() <= max_abs {
        Ok(())
    } else {
        Err(CalcError::invalid_config(
            field,
            format!("{} is not a finite value within ±{}", value, max_abs),
        ))
    }
}

impl EngineConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    ///
    /// PAL factors must be positive and strictly increasing so that total
    /// expenditure grows with activity. Ranges need `0 < min < max`, which
    /// also keeps the BMI denominator away from zero. Every value is bounded
    /// so that the whole-kcal arithmetic in `calculate_with` stays far inside
    /// `i32` for any input the limits admit.
    pub fn validate(&self) -> CalcResult<()> {
        let bmr = &self.bmr;
        for (name, value, max_abs) in [
            ("bmr.weight_coef", bmr.weight_coef, MAX_BMR_COEFFICIENT),
            ("bmr.height_coef", bmr.height_coef, MAX_BMR_COEFFICIENT),
            ("bmr.age_coef", bmr.age_coef, MAX_BMR_COEFFICIENT),
            ("bmr.male_constant", bmr.male_constant, MAX_BMR_CONSTANT),
            ("bmr.female_constant", bmr.female_constant, MAX_BMR_CONSTANT),
        ] {
            check_bounded(name, value, max_abs)?;
        }

        let factors = self.activity_factors.in_order();
        if factors.iter().any(|f| !f.is_finite() || *f <= 0.0 || *f > MAX_PAL) {
            return Err(CalcError::invalid_config(
                "activity_factors",
                format!("PAL factors must lie in (0, {}]", MAX_PAL),
            ));
        }
        if !factors.windows(2).all(|w| w[0] < w[1]) {
            return Err(CalcError::invalid_config(
                "activity_factors",
                "PAL factors must increase from sedentary to extra active",
            ));
        }

        for (name, delta) in [
            ("goal_deltas.weight_loss", self.goal_deltas.weight_loss),
            ("goal_deltas.maintenance", self.goal_deltas.maintenance),
            ("goal_deltas.muscle_gain", self.goal_deltas.muscle_gain),
        ] {
            if delta.unsigned_abs() > MAX_GOAL_DELTA_KCAL {
                return Err(CalcError::invalid_config(
                    name,
                    format!("goal delta must lie within ±{} kcal", MAX_GOAL_DELTA_KCAL),
                ));
            }
        }

        for (name, range, ceiling) in [
            ("limits.age", &self.limits.age, MAX_AGE_YEARS),
            ("limits.height", &self.limits.height, MAX_HEIGHT_CM),
            ("limits.weight", &self.limits.weight, MAX_WEIGHT_KG),
        ] {
            if !(range.min > 0.0 && range.min < range.max && range.max <= ceiling) {
                return Err(CalcError::invalid_config(
                    name,
                    format!(
                        "range {}..{} must satisfy 0 < min < max <= {}",
                        range.min, range.max, ceiling
                    ),
                ));
            }
        }

        for (name, rate) in [
            ("macros.protein_g_per_kg", self.macros.protein_g_per_kg),
            (
                "macros.protein_g_per_kg_muscle_gain",
                self.macros.protein_g_per_kg_muscle_gain,
            ),
        ] {
            if !(rate > 0.0 && rate <= MAX_PROTEIN_G_PER_KG) {
                return Err(CalcError::invalid_config(
                    name,
                    format!("protein rate must lie in (0, {}] g/kg", MAX_PROTEIN_G_PER_KG),
                ));
            }
        }
        if !(self.macros.fat_share > 0.0 && self.macros.fat_share < 1.0) {
            return Err(CalcError::invalid_config(
                "macros.fat_share",
                "fat share must lie strictly between 0 and 1",
            ));
        }
        if !(self.advisory.kcal_per_kg_body_fat > 0.0 && self.advisory.kcal_per_kg_body_fat.is_finite()) {
            return Err(CalcError::invalid_config(
                "advisory.kcal_per_kg_body_fat",
                "must be positive",
            ));
        }
        Ok(())
    }
}
