//! # Lookup Tables
//!
//! The two fixed selector sets of the calculator form: activity level (PAL
//! factor) and goal (daily calorie delta). Both are addressed by the index
//! the form submits, ordered as on the page.
//!
//! The numbers here are the defaults; [`EngineConfig`](crate::config::EngineConfig)
//! is what the engine actually reads, so a config file can override them.
//!
//! ## Example
//!
//! ```rust
//! use kcal_core::tables::{ActivityLevel, Goal};
//!
//! let level = ActivityLevel::from_index(2).unwrap();
//! assert_eq!(level, ActivityLevel::ModeratelyActive);
//! assert_eq!(level.pal(), 1.55);
//!
//! assert_eq!(Goal::from_index(0), Some(Goal::WeightLoss));
//! assert_eq!(Goal::WeightLoss.delta_kcal(), -500);
//! ```

use serde::{Deserialize, Serialize};

/// Habitual activity, from sedentary to extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityLevel {
    /// Office job, mostly sitting
    Sedentary,
    /// 1-2 workouts per week
    LightlyActive,
    /// 3-5 workouts per week
    ModeratelyActive,
    /// 6-7 intense workouts per week
    VeryActive,
    /// Physical labour plus daily training
    ExtraActive,
}

impl ActivityLevel {
    /// All levels in form order
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Preselected level of the form
    pub const DEFAULT_INDEX: usize = 1;

    /// Look up a level by its form index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in the form
    pub fn index(self) -> usize {
        self as usize
    }

    /// Default PAL multiplier
    pub fn pal(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// German label shown next to the radio button
    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Kaum Bewegung (Bürojob, fast nur sitzen)",
            ActivityLevel::LightlyActive => "Leicht aktiv (1–2× Sport/Woche)",
            ActivityLevel::ModeratelyActive => "Mäßig aktiv (3–5× Sport/Woche)",
            ActivityLevel::VeryActive => "Sehr aktiv (6–7× intensiver Sport)",
            ActivityLevel::ExtraActive => "Extrem aktiv (körperl. Arbeit + tägliches Training)",
        }
    }
}

impl Default for ActivityLevel {
    fn default() -> Self {
        Self::ALL[Self::DEFAULT_INDEX]
    }
}

/// What the person wants to achieve with their intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Goal {
    /// Lose weight (calorie deficit)
    WeightLoss,
    /// Hold weight (maintenance)
    Maintenance,
    /// Gain weight / build muscle (calorie surplus)
    MuscleGain,
}

impl Goal {
    /// All goals in form order
    pub const ALL: [Goal; 3] = [Goal::WeightLoss, Goal::Maintenance, Goal::MuscleGain];

    /// Preselected goal of the form
    pub const DEFAULT_INDEX: usize = 1;

    /// Look up a goal by its form index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in the form
    pub fn index(self) -> usize {
        self as usize
    }

    /// Default daily calorie delta applied to the total expenditure
    pub fn delta_kcal(self) -> i32 {
        match self {
            Goal::WeightLoss => -500,
            Goal::Maintenance => 0,
            Goal::MuscleGain => 300,
        }
    }

    /// German label shown on the goal button
    pub fn label(self) -> &'static str {
        match self {
            Goal::WeightLoss => "Abnehmen (−500 kcal/Tag)",
            Goal::Maintenance => "Gewicht halten (Erhaltungsbedarf)",
            Goal::MuscleGain => "Zunehmen / Muskelaufbau (+300 kcal/Tag)",
        }
    }
}

impl Default for Goal {
    fn default() -> Self {
        Self::ALL[Self::DEFAULT_INDEX]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_index_roundtrip() {
        for (i, level) in ActivityLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
            assert_eq!(ActivityLevel::from_index(i), Some(*level));
        }
        assert_eq!(ActivityLevel::from_index(5), None);
    }

    #[test]
    fn test_pal_strictly_increasing() {
        let pals: Vec<f64> = ActivityLevel::ALL.iter().map(|l| l.pal()).collect();
        assert_eq!(pals, vec![1.2, 1.375, 1.55, 1.725, 1.9]);
        assert!(pals.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_goal_deltas() {
        let deltas: Vec<i32> = Goal::ALL.iter().map(|g| g.delta_kcal()).collect();
        assert_eq!(deltas, vec![-500, 0, 300]);
        assert_eq!(Goal::from_index(3), None);
    }

    #[test]
    fn test_form_defaults() {
        assert_eq!(ActivityLevel::default(), ActivityLevel::LightlyActive);
        assert_eq!(Goal::default(), Goal::Maintenance);
    }
}
