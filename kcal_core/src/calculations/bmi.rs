//! # Body Mass Index
//!
//! `BMI = kg / m²`, reported with one decimal. The category is taken from
//! the one-decimal value, so 24.96 shows as 25.0 and is classed overweight.

use serde::{Deserialize, Serialize};

use crate::units::{Centimeters, Kilograms, Meters};

/// WHO adult weight classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI < 18.5
    Underweight,
    /// 18.5 ≤ BMI < 25
    Normal,
    /// 25 ≤ BMI < 30
    Overweight,
    /// BMI ≥ 30
    Obese,
}

impl BmiCategory {
    pub const UNDERWEIGHT_BELOW: f64 = 18.5;
    pub const OVERWEIGHT_FROM: f64 = 25.0;
    pub const OBESE_FROM: f64 = 30.0;

    /// Classify a BMI value. Total over all finite numbers.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < Self::UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < Self::OVERWEIGHT_FROM {
            BmiCategory::Normal
        } else if bmi < Self::OBESE_FROM {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// German label
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Untergewicht",
            BmiCategory::Normal => "Normalgewicht",
            BmiCategory::Overweight => "Übergewicht",
            BmiCategory::Obese => "Adipositas",
        }
    }
}

/// Unrounded BMI
pub fn body_mass_index(weight: Kilograms, height: Centimeters) -> f64 {
    let height_m: Meters = height.into();
    weight.0 / (height_m.0 * height_m.0)
}

/// Round to one decimal place, ties upward.
///
/// Values that are not exact ties use the correctly rounded decimal
/// formatting; only exact binary ties (`x.x25`, `x.x75` style quarters)
/// need the explicit upward step.
pub fn round_to_tenth(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        return (value * 10.0 + 0.5).floor() / 10.0;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}
