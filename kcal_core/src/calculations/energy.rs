//! # Energy Expenditure
//!
//! Basal metabolic rate (Grundumsatz), total daily energy expenditure
//! (Gesamtumsatz) and the goal-adjusted target.
//!
//! ## Formulas
//!
//! Mifflin-St. Jeor (1990):
//!
//! ```text
//! BMR (men)   = 10·kg + 6.25·cm − 5·years + 5
//! BMR (women) = 10·kg + 6.25·cm − 5·years − 161
//! TEE         = round(BMR · PAL)
//! target      = TEE + goal delta
//! ```
//!
//! BMR is rounded before it is multiplied by PAL, so TEE is computed from
//! the whole-kcal value the page shows.

use crate::config::BmrCoefficients;
use crate::input::UserInput;

use super::round_half_up;

/// Unrounded Mifflin-St. Jeor BMR in kcal/day
pub fn mifflin_st_jeor(input: &UserInput, coef: &BmrCoefficients) -> f64 {
    coef.weight_coef * input.weight.0 + coef.height_coef * input.height.0 + coef.age_coef * input.age.as_f64()
        + coef.constant_for(input.sex)
}

/// BMR rounded to whole kcal/day
pub fn basal_metabolic_rate(input: &UserInput, coef: &BmrCoefficients) -> i32 {
    round_half_up(mifflin_st_jeor(input, coef)) as i32
}

/// TEE = round(BMR × PAL)
pub fn total_energy_expenditure(bmr_kcal: i32, pal: f64) -> i32 {
    round_half_up(f64::from(bmr_kcal) * pal) as i32
}

/// TEE plus the goal delta (negative, zero or positive)
pub fn target_calories(tee_kcal: i32, delta_kcal: i32) -> i32 {
    tee_kcal + delta_kcal
}
