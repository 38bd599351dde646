//! # Unit Types
//!
//! Type-safe wrappers for body-metric units. These provide compile-time
//! safety against mixing up height and weight (both arrive as plain numbers
//! from form fields) while remaining lightweight (just f64 wrappers).
//!
//! ## Metric Units
//!
//! The calculator works in the units the formulas are defined in:
//! - Mass: kilograms (kg)
//! - Length: centimeters (cm) for input, meters (m) for BMI
//! - Age: years
//!
//! ## Example
//!
//! ```rust
//! use kcal_core::units::{Centimeters, Meters};
//!
//! let height = Centimeters(180.0);
//! let height_m: Meters = height.into();
//! assert_eq!(height_m.0, 1.8);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Body mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

// ============================================================================
// Time Units
// ============================================================================

/// Age in whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Years(pub u32);

impl Years {
    /// Age as f64 for use in formulas
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}
