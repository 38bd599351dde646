//! # Text Report
//!
//! Plain-text rendering of a [`CalorieResult`] in the layout of the result
//! panel: the three energy figures, the macro cards, BMI and any notes,
//! closed by the disclaimer.

use crate::calculations::macros::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use crate::calculations::CalorieResult;
use crate::format::{decimal_comma, group_thousands, trimmed_decimal};
use crate::input::UserInput;

const RULE: &str = "═══════════════════════════════════════════════";

pub const DISCLAIMER: &str = "Diese Werte sind Richtwerte basierend auf der Mifflin-St. Jeor-Formel. \
Individuelle Abweichungen von ±10 % sind möglich. Bei Vorerkrankungen oder besonderen \
Ernährungszielen wenden Sie sich an einen Arzt oder eine Ernährungsfachkraft.";

fn kcal(value: i32) -> String {
    format!("{} kcal/Tag", group_thousands(i64::from(value)))
}

fn macro_line(name: &str, grams: i32, kcal_per_g: i32, percent: Option<f64>) -> String {
    let mut line = format!(
        "  {:<15} {:>5} g  ({} kcal)",
        name,
        grams,
        group_thousands(i64::from(grams * kcal_per_g))
    );
    if let Some(percent) = percent {
        line.push_str(&format!("  {} %", decimal_comma(percent, 1)));
    }
    line
}

/// Render the full report for one calculation.
pub fn render_text(input: &UserInput, result: &CalorieResult) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "  IHR KALORIENBEDARF".to_string(),
        RULE.to_string(),
        String::new(),
        "Eingaben:".to_string(),
        format!("  Geschlecht:     {}", input.sex.label()),
        format!("  Alter:          {} Jahre", input.age.0),
        format!("  Größe:          {} cm", trimmed_decimal(input.height.0)),
        format!("  Gewicht:        {} kg", trimmed_decimal(input.weight.0)),
        format!("  Aktivität:      {} (PAL {})", result.activity_label, trimmed_decimal(result.pal)),
        format!("  Ziel:           {}", result.goal_label),
        String::new(),
        "Energiebedarf:".to_string(),
        format!("  Grundumsatz:    {}", kcal(result.bmr_kcal)),
        format!("  Gesamtumsatz:   {}", kcal(result.tee_kcal)),
        format!("  Zielkalorien:   {}  ({})", kcal(result.target_kcal), result.goal_hint()),
        String::new(),
        "Makronährstoffe:".to_string(),
    ];

    let m = &result.macros;
    let pct = m.percentages();
    lines.push(macro_line("Protein", m.protein_g, KCAL_PER_G_PROTEIN, pct.map(|p| p.0)));
    lines.push(macro_line("Fett", m.fat_g, KCAL_PER_G_FAT, pct.map(|p| p.1)));
    lines.push(macro_line("Kohlenhydrate", m.carb_g, KCAL_PER_G_CARBS, pct.map(|p| p.2)));

    lines.push(String::new());
    lines.push(format!(
        "BMI:              {} ({})",
        decimal_comma(result.bmi, 1),
        result.bmi_category.label()
    ));

    if !result.notes.is_empty() {
        lines.push(String::new());
        lines.push("Hinweise:".to_string());
        for note in &result.notes {
            let marker = if note.is_warning() { "[!]" } else { "[i]" };
            lines.push(format!("  {} {}", marker, note.message()));
        }
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push(DISCLAIMER.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
