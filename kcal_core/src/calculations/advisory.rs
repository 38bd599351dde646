//! # Advisory Notes
//!
//! Hints attached to a result. They never change a number and never fail
//! the calculation; they point out when a value needs caution.

use serde::{Deserialize, Serialize};

use crate::config::AdvisoryConfig;
use crate::format::{decimal_comma, group_thousands};
use crate::input::UserInput;

use super::macros::MacroSplit;

/// A note about a calculated result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Advisory {
    /// Target is below the lowest sustainable daily intake
    BelowMinimumIntake { target_kcal: i32, minimum_kcal: i32 },
    /// Protein and fat already exceed the target; carbohydrates went negative
    NegativeCarbohydrates { carb_kcal: i32 },
    /// The formula set is meant for teenagers and adults
    BelowRecommendedAge { age: u32, minimum_age: u32 },
    /// Expected body weight change per week from the goal delta
    WeeklyWeightChange { kg_per_week: f64 },
}

impl Advisory {
    /// German text for the result panel
    pub fn message(&self) -> String {
        match self {
            Advisory::BelowMinimumIntake { target_kcal, minimum_kcal } => format!(
                "Ihre Zielkalorien ({} kcal) liegen unter {} kcal. Unterschreiten Sie diesen Wert nicht dauerhaft, sonst droht Mangelernährung.",
                group_thousands(i64::from(*target_kcal)),
                group_thousands(i64::from(*minimum_kcal))
            ),
            Advisory::NegativeCarbohydrates { carb_kcal } => format!(
                "Protein und Fett übersteigen bereits Ihre Zielkalorien; für Kohlenhydrate bleiben rechnerisch {} kcal.",
                group_thousands(i64::from(*carb_kcal))
            ),
            Advisory::BelowRecommendedAge { minimum_age, .. } => format!(
                "Der Kalorienrechner ist für Personen ab {} Jahren ausgelegt. Für Kinder empfehlen sich die Tabellen der DGE.",
                minimum_age
            ),
            Advisory::WeeklyWeightChange { kg_per_week } => {
                let change = if *kg_per_week < 0.0 {
                    "einem Gewichtsverlust"
                } else {
                    "einer Gewichtszunahme"
                };
                format!(
                    "Das entspricht {} von ca. {} kg pro Woche.",
                    change,
                    decimal_comma(kg_per_week.abs(), 2)
                )
            }
        }
    }

    /// True for notes that warn rather than inform
    pub fn is_warning(&self) -> bool {
        !matches!(self, Advisory::WeeklyWeightChange { .. })
    }
}

/// Collect the notes that apply to a result.
pub fn assess(
    input: &UserInput,
    target_kcal: i32,
    goal_delta_kcal: i32,
    macros: &MacroSplit,
    config: &AdvisoryConfig,
) -> Vec<Advisory> {
    let mut notes = Vec::new();

    let minimum_kcal = config.min_intake_for(input.sex);
    if target_kcal < minimum_kcal {
        notes.push(Advisory::BelowMinimumIntake {
            target_kcal,
            minimum_kcal,
        });
    }

    if macros.carb_kcal < 0 {
        notes.push(Advisory::NegativeCarbohydrates {
            carb_kcal: macros.carb_kcal,
        });
    }

    if input.age.0 < config.min_recommended_age {
        notes.push(Advisory::BelowRecommendedAge {
            age: input.age.0,
            minimum_age: config.min_recommended_age,
        });
    }

    if goal_delta_kcal != 0 {
        let kg_per_week = f64::from(goal_delta_kcal) * 7.0 / config.kcal_per_kg_body_fat;
        notes.push(Advisory::WeeklyWeightChange {
            kg_per_week: (kg_per_week * 100.0).round() / 100.0,
        });
    }

    notes
}
