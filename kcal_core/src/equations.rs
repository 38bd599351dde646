//! # Equation Registry and Derivation
//!
//! Every formula the engine applies, with metadata for display, plus
//! [`derive`], which replays a finished calculation with the actual numbers
//! substituted. The output reads like the worked example on the calculator
//! page:
//!
//! ```text
//! (10 × 65) + (6,25 × 165) − (5 × 30) − 161 = 650 + 1031,25 − 150 − 161 = 1.370 kcal/Tag
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kcal_core::equations::{derive, Equation};
//! use kcal_core::calculations::calculate_raw;
//! use kcal_core::config::EngineConfig;
//! use kcal_core::input::RawInput;
//!
//! let raw = RawInput::new().with_sex("frau").with_age("30").with_height("165").with_weight("65");
//! let config = EngineConfig::default();
//! let input = raw.parse(&config).unwrap();
//! let result = calculate_raw(&raw).unwrap();
//!
//! let steps = derive(&input, &result, &config);
//! assert_eq!(steps[0].equation, Equation::MifflinStJeor);
//! assert!(steps[0].substitution.ends_with("= 1.370 kcal/Tag"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::macros::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT};
use crate::calculations::CalorieResult;
use crate::config::EngineConfig;
use crate::format::{decimal_comma, group_thousands, trimmed_decimal};
use crate::input::UserInput;
use crate::units::Meters;

/// Static description of an equation
#[derive(Debug, Clone, PartialEq)]
pub struct EquationMetadata {
    /// German name (e.g., "Grundumsatz")
    pub name: &'static str,
    /// Formula in plain text
    pub formula_plain: &'static str,
    /// Source of the formula
    pub reference: &'static str,
}

/// All equations the engine applies, in calculation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// BMR = 10·kg + 6.25·cm − 5·years + s
    MifflinStJeor,
    /// TEE = BMR · PAL
    TotalExpenditure,
    /// target = TEE + delta
    TargetCalories,
    /// protein_g = rate · kg
    ProteinTarget,
    /// fat_kcal = share · target
    FatShare,
    /// carb_kcal = target − protein_kcal − fat_kcal
    CarbohydrateRemainder,
    /// BMI = kg / m²
    BodyMassIndex,
}

impl Equation {
    pub const ALL: [Equation; 7] = [
        Equation::MifflinStJeor,
        Equation::TotalExpenditure,
        Equation::TargetCalories,
        Equation::ProteinTarget,
        Equation::FatShare,
        Equation::CarbohydrateRemainder,
        Equation::BodyMassIndex,
    ];

    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::MifflinStJeor => EquationMetadata {
                name: "Grundumsatz",
                formula_plain: "(10 × Gewicht in kg) + (6,25 × Größe in cm) − (5 × Alter in Jahren) + 5 (Männer) bzw. − 161 (Frauen)",
                reference: "Mifflin et al. (1990), Am J Clin Nutr 51(2):241-247",
            },
            Equation::TotalExpenditure => EquationMetadata {
                name: "Gesamtumsatz",
                formula_plain: "Grundumsatz × PAL-Faktor",
                reference: "PAL-Stufen 1,2 / 1,375 / 1,55 / 1,725 / 1,9",
            },
            Equation::TargetCalories => EquationMetadata {
                name: "Zielkalorien",
                formula_plain: "Gesamtumsatz + Zielanpassung (−500 / 0 / +300 kcal)",
                reference: "Moderates Defizit bzw. Überschuss",
            },
            Equation::ProteinTarget => EquationMetadata {
                name: "Protein",
                formula_plain: "g/kg × Körpergewicht (2,0 bei Muskelaufbau, sonst 1,7); 4 kcal/g",
                reference: "Empfehlung 1,6–2,2 g/kg für Muskelaufbau",
            },
            Equation::FatShare => EquationMetadata {
                name: "Fett",
                formula_plain: "25 % der Zielkalorien; 9 kcal/g",
                reference: "Fettanteil 25 %",
            },
            Equation::CarbohydrateRemainder => EquationMetadata {
                name: "Kohlenhydrate",
                formula_plain: "Zielkalorien − Protein-kcal − Fett-kcal; 4 kcal/g",
                reference: "Restkalorien",
            },
            Equation::BodyMassIndex => EquationMetadata {
                name: "BMI",
                formula_plain: "Gewicht in kg ÷ (Größe in m)²",
                reference: "WHO: < 18,5 / 18,5–25 / 25–30 / ≥ 30",
            },
        }
    }
}

/// One line of a derivation: which equation, with the numbers filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationStep {
    pub equation: Equation,
    pub substitution: String,
}

impl fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.equation.metadata().name, self.substitution)
    }
}

/// "+ 5" / "− 161"
fn signed_term(value: f64) -> String {
    if value < 0.0 {
        format!("− {}", trimmed_decimal(-value))
    } else {
        format!("+ {}", trimmed_decimal(value))
    }
}

fn kcal(value: i32) -> String {
    group_thousands(i64::from(value))
}

/// Replay a result step by step.
///
/// `result` must come from `input` and `config`; the substitutions are
/// rebuilt from the inputs and the displayed totals are taken from `result`.
pub fn derive(input: &UserInput, result: &CalorieResult, config: &EngineConfig) -> Vec<DerivationStep> {
    let coef = &config.bmr;
    let weight = input.weight.0;
    let height = input.height.0;
    let age = input.age.as_f64();
    let constant = coef.constant_for(input.sex);

    let weight_term = coef.weight_coef * weight;
    let height_term = coef.height_coef * height;
    let age_term = coef.age_coef * age;

    let bmr = format!(
        "({} × {}) + ({} × {}) {}{} × {}) {} = {} + {} {} {} = {} kcal/Tag",
        trimmed_decimal(coef.weight_coef),
        trimmed_decimal(weight),
        trimmed_decimal(coef.height_coef),
        trimmed_decimal(height),
        if coef.age_coef < 0.0 { "− (" } else { "+ (" },
        trimmed_decimal(coef.age_coef.abs()),
        trimmed_decimal(age),
        signed_term(constant),
        trimmed_decimal(weight_term),
        trimmed_decimal(height_term),
        signed_term(age_term),
        signed_term(constant),
        kcal(result.bmr_kcal),
    );

    let tee = format!(
        "{} × {} = {} kcal/Tag",
        kcal(result.bmr_kcal),
        trimmed_decimal(result.pal),
        kcal(result.tee_kcal)
    );

    let target = format!(
        "{} {} = {} kcal/Tag",
        kcal(result.tee_kcal),
        signed_term(f64::from(result.goal_delta_kcal)),
        kcal(result.target_kcal)
    );

    let m = &result.macros;
    let protein = format!(
        "{} g/kg × {} kg = {} g ({} kcal)",
        trimmed_decimal(config.macros.protein_rate(input.goal)),
        trimmed_decimal(weight),
        m.protein_g,
        kcal(m.protein_kcal)
    );

    let fat = format!(
        "{} % × {} kcal = {} kcal ÷ {} = {} g",
        trimmed_decimal(config.macros.fat_share * 100.0),
        kcal(result.target_kcal),
        kcal(m.fat_kcal),
        KCAL_PER_G_FAT,
        m.fat_g
    );

    let carbs = format!(
        "{} − {} − {} = {} kcal ÷ {} = {} g",
        kcal(result.target_kcal),
        kcal(m.protein_kcal),
        kcal(m.fat_kcal),
        kcal(m.carb_kcal),
        KCAL_PER_G_CARBS,
        m.carb_g
    );

    let height_m: Meters = input.height.into();
    let bmi = format!(
        "{} ÷ {}² = {} ({})",
        trimmed_decimal(weight),
        trimmed_decimal(height_m.0),
        decimal_comma(result.bmi, 1),
        result.bmi_category.label()
    );

    vec![
        DerivationStep { equation: Equation::MifflinStJeor, substitution: bmr },
        DerivationStep { equation: Equation::TotalExpenditure, substitution: tee },
        DerivationStep { equation: Equation::TargetCalories, substitution: target },
        DerivationStep { equation: Equation::ProteinTarget, substitution: protein },
        DerivationStep { equation: Equation::FatShare, substitution: fat },
        DerivationStep { equation: Equation::CarbohydrateRemainder, substitution: carbs },
        DerivationStep { equation: Equation::BodyMassIndex, substitution: bmi },
    ]
}

/// Markdown listing of every equation with its reference
pub fn equations_markdown() -> String {
    let mut out = String::from("| Größe | Formel | Quelle |\n|---|---|---|\n");
    for equation in Equation::ALL {
        let meta = equation.metadata();
        out.push_str(&format!("| {} | {} | {} |\n", meta.name, meta.formula_plain, meta.reference));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate_with;
    use crate::input::RawInput;

    fn steps_for(raw: RawInput) -> Vec<DerivationStep> {
        let config = EngineConfig::default();
        let input = raw.parse(&config).unwrap();
        let result = calculate_with(&input, &config).unwrap();
        derive(&input, &result, &config)
    }

    #[test]
    fn test_worked_example_text() {
        let steps = steps_for(RawInput::new().with_sex("frau").with_age("30").with_height("165").with_weight("65"));
        assert_eq!(
            steps[0].substitution,
            "(10 × 65) + (6,25 × 165) − (5 × 30) − 161 = 650 + 1031,25 − 150 − 161 = 1.370 kcal/Tag"
        );
    }

    #[test]
    fn test_reference_scenario_steps() {
        let steps = steps_for(
            RawInput::new()
                .with_sex("mann")
                .with_age("30")
                .with_height("180")
                .with_weight("80")
                .with_activity_level("2")
                .with_goal("0"),
        );
        let text: Vec<String> = steps.iter().map(|s| s.substitution.clone()).collect();
        assert_eq!(
            text,
            vec![
                "(10 × 80) + (6,25 × 180) − (5 × 30) + 5 = 800 + 1125 − 150 + 5 = 1.780 kcal/Tag",
                "1.780 × 1,55 = 2.759 kcal/Tag",
                "2.759 − 500 = 2.259 kcal/Tag",
                "1,7 g/kg × 80 kg = 136 g (544 kcal)",
                "25 % × 2.259 kcal = 565 kcal ÷ 9 = 63 g",
                "2.259 − 544 − 565 = 1.150 kcal ÷ 4 = 288 g",
                "80 ÷ 1,8² = 24,7 (Normalgewicht)",
            ]
        );
        assert_eq!(steps[1].to_string(), "Gesamtumsatz: 1.780 × 1,55 = 2.759 kcal/Tag");
    }

    #[test]
    fn test_maintenance_target_step() {
        let steps = steps_for(RawInput::new().with_age("40").with_height("170").with_weight("70"));
        assert!(steps[2].substitution.contains("+ 0 ="));
    }

    #[test]
    fn test_one_step_per_equation() {
        let steps = steps_for(RawInput::new().with_age("40").with_height("170").with_weight("70"));
        let equations: Vec<Equation> = steps.iter().map(|s| s.equation).collect();
        assert_eq!(equations, Equation::ALL.to_vec());
    }

    #[test]
    fn test_markdown_lists_all() {
        let md = equations_markdown();
        for equation in Equation::ALL {
            assert!(md.contains(equation.metadata().name));
        }
        assert!(md.contains("Mifflin"));
    }
}
