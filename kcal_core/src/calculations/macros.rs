//! # Macro-Nutrient Split
//!
//! Allocates the target calories across protein, fat and carbohydrates.
//!
//! ```text
//! protein_g   = round(rate · kg)            rate = 2.0 g/kg muscle gain, else 1.7
//! protein_kcal = protein_g · 4
//! fat_kcal    = round(target · 0.25)
//! fat_g       = round(fat_kcal / 9)
//! carb_kcal   = target − protein_kcal − fat_kcal
//! carb_g      = round(carb_kcal / 4)
//! ```
//!
//! Carbohydrates take whatever protein and fat leave over, so the three kcal
//! components always sum to the target exactly. With a very low target the
//! remainder can be negative; it is kept as computed (see
//! [`Advisory::NegativeCarbohydrates`](super::advisory::Advisory::NegativeCarbohydrates)).

use serde::{Deserialize, Serialize};

use crate::config::MacroConfig;
use crate::tables::Goal;
use crate::units::Kilograms;

use super::round_half_up;

/// Energy density of protein (kcal/g)
pub const KCAL_PER_G_PROTEIN: i32 = 4;
/// Energy density of fat (kcal/g)
pub const KCAL_PER_G_FAT: i32 = 9;
/// Energy density of carbohydrates (kcal/g)
pub const KCAL_PER_G_CARBS: i32 = 4;

/// Daily macro-nutrient targets
///
/// ## JSON Example
///
/// ```json
/// {
///   "protein_g": 136, "protein_kcal": 544,
///   "fat_g": 63, "fat_kcal": 565,
///   "carb_g": 288, "carb_kcal": 1150
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_g: i32,
    pub protein_kcal: i32,
    pub fat_g: i32,
    pub fat_kcal: i32,
    pub carb_g: i32,
    /// May be negative for very low targets
    pub carb_kcal: i32,
}

impl MacroSplit {
    /// Sum of the three kcal components (equals the target)
    pub fn total_kcal(&self) -> i32 {
        self.protein_kcal + self.fat_kcal + self.carb_kcal
    }

    /// kcal recomputed from the rounded gram amounts, as shown per macro card
    pub fn kcal_from_grams(&self) -> i32 {
        self.protein_g * KCAL_PER_G_PROTEIN + self.fat_g * KCAL_PER_G_FAT + self.carb_g * KCAL_PER_G_CARBS
    }

    /// Percent of the target per macro (protein, fat, carbs), one decimal.
    ///
    /// Returns `None` when the target is not positive.
    pub fn percentages(&self) -> Option<(f64, f64, f64)> {
        let total = self.total_kcal();
        if total <= 0 {
            return None;
        }
        let pct = |kcal: i32| (f64::from(kcal) * 1000.0 / f64::from(total)).round() / 10.0;
        Some((pct(self.protein_kcal), pct(self.fat_kcal), pct(self.carb_kcal)))
    }
}

/// Split `target_kcal` for a person of `weight` pursuing `goal`.
pub fn split(target_kcal: i32, weight: Kilograms, goal: Goal, config: &MacroConfig) -> MacroSplit {
    let protein_g = round_half_up(config.protein_rate(goal) * weight.0) as i32;
    let protein_kcal = protein_g * KCAL_PER_G_PROTEIN;

    let fat_kcal = round_half_up(f64::from(target_kcal) * config.fat_share) as i32;
    let fat_g = round_half_up(f64::from(fat_kcal) / f64::from(KCAL_PER_G_FAT)) as i32;

    let carb_kcal = target_kcal - protein_kcal - fat_kcal;
    let carb_g = round_half_up(f64::from(carb_kcal) / f64::from(KCAL_PER_G_CARBS)) as i32;

    MacroSplit {
        protein_g,
        protein_kcal,
        fat_g,
        fat_kcal,
        carb_g,
        carb_kcal,
    }
}
