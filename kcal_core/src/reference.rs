//! # Reference Table
//!
//! Average daily calorie needs by age group and sex at moderate activity
//! (PAL 1.55) and average body size, as printed below the calculator. These
//! are orientation values; the engine never reads them.

use serde::{Deserialize, Serialize};

use crate::format::group_thousands;
use crate::input::Sex;

/// Inclusive kcal range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KcalRange {
    pub low: i32,
    pub high: i32,
}

impl KcalRange {
    const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// "2.600–2.800 kcal"
    pub fn display(&self) -> String {
        format!(
            "{}–{} kcal",
            group_thousands(i64::from(self.low)),
            group_thousands(i64::from(self.high))
        )
    }
}

/// One age group of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceRow {
    /// "18–25 Jahre"
    pub label: &'static str,
    pub min_age: u32,
    /// `None` for the open-ended last group
    pub max_age: Option<u32>,
    pub men: KcalRange,
    pub women: KcalRange,
    pub women_weight_loss: KcalRange,
    pub men_weight_loss: KcalRange,
}

impl ReferenceRow {
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min_age && self.max_age.map_or(true, |max| age <= max)
    }

    /// Maintenance range for a sex
    pub fn maintenance(&self, sex: Sex) -> KcalRange {
        match sex {
            Sex::Male => self.men,
            Sex::Female => self.women,
        }
    }

    /// Weight-loss range for a sex
    pub fn weight_loss(&self, sex: Sex) -> KcalRange {
        match sex {
            Sex::Male => self.men_weight_loss,
            Sex::Female => self.women_weight_loss,
        }
    }
}

/// PAL the table assumes
pub const REFERENCE_PAL: f64 = 1.55;

pub const REFERENCE_TABLE: [ReferenceRow; 6] = [
    ReferenceRow {
        label: "18–25 Jahre",
        min_age: 18,
        max_age: Some(25),
        men: KcalRange::new(2600, 2800),
        women: KcalRange::new(2000, 2200),
        women_weight_loss: KcalRange::new(1500, 1700),
        men_weight_loss: KcalRange::new(2100, 2300),
    },
    ReferenceRow {
        label: "26–35 Jahre",
        min_age: 26,
        max_age: Some(35),
        men: KcalRange::new(2400, 2700),
        women: KcalRange::new(1900, 2100),
        women_weight_loss: KcalRange::new(1400, 1600),
        men_weight_loss: KcalRange::new(1900, 2200),
    },
    ReferenceRow {
        label: "36–45 Jahre",
        min_age: 36,
        max_age: Some(45),
        men: KcalRange::new(2300, 2600),
        women: KcalRange::new(1800, 2000),
        women_weight_loss: KcalRange::new(1300, 1500),
        men_weight_loss: KcalRange::new(1800, 2100),
    },
    ReferenceRow {
        label: "46–55 Jahre",
        min_age: 46,
        max_age: Some(55),
        men: KcalRange::new(2200, 2500),
        women: KcalRange::new(1700, 1900),
        women_weight_loss: KcalRange::new(1200, 1400),
        men_weight_loss: KcalRange::new(1700, 2000),
    },
    ReferenceRow {
        label: "56–65 Jahre",
        min_age: 56,
        max_age: Some(65),
        men: KcalRange::new(2100, 2400),
        women: KcalRange::new(1600, 1800),
        women_weight_loss: KcalRange::new(1100, 1300),
        men_weight_loss: KcalRange::new(1600, 1900),
    },
    ReferenceRow {
        label: "65+ Jahre",
        min_age: 66,
        max_age: None,
        men: KcalRange::new(1900, 2200),
        women: KcalRange::new(1500, 1700),
        women_weight_loss: KcalRange::new(1000, 1200),
        men_weight_loss: KcalRange::new(1400, 1700),
    },
];

/// Row for an age; `None` below 18.
pub fn row_for_age(age: u32) -> Option<&'static ReferenceRow> {
    REFERENCE_TABLE.iter().find(|row| row.contains(age))
}

/// Plain-text rendering of the table (or a single row)
pub fn render_table(rows: &[ReferenceRow]) -> String {
    let mut out = format!(
        "{:<12} {:>17} {:>17} {:>17} {:>17}\n",
        "Altersgruppe", "Männer", "Frauen", "Abnehmen (Frau)", "Abnehmen (Mann)"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:>17} {:>17} {:>17} {:>17}\n",
            row.label,
            row.men.display(),
            row.women.display(),
            row.women_weight_loss.display(),
            row.men_weight_loss.display()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_are_contiguous() {
        for pair in REFERENCE_TABLE.windows(2) {
            assert_eq!(pair[0].max_age.map(|m| m + 1), Some(pair[1].min_age));
        }
        assert_eq!(REFERENCE_TABLE.last().unwrap().max_age, None);
    }

    #[test]
    fn test_row_lookup() {
        assert_eq!(row_for_age(17), None);
        assert_eq!(row_for_age(18).unwrap().label, "18–25 Jahre");
        assert_eq!(row_for_age(30).unwrap().label, "26–35 Jahre");
        assert_eq!(row_for_age(65).unwrap().label, "56–65 Jahre");
        assert_eq!(row_for_age(66).unwrap().label, "65+ Jahre");
        assert_eq!(row_for_age(120).unwrap().label, "65+ Jahre");
    }

    #[test]
    fn test_ranges_by_sex() {
        let row = row_for_age(40).unwrap();
        assert_eq!(row.maintenance(Sex::Male).display(), "2.300–2.600 kcal");
        assert_eq!(row.weight_loss(Sex::Female).display(), "1.300–1.500 kcal");
        for row in REFERENCE_TABLE.iter() {
            for sex in [Sex::Male, Sex::Female] {
                assert!(row.weight_loss(sex).high <= row.maintenance(sex).high);
            }
        }
    }

    #[test]
    fn test_render() {
        let text = render_table(&REFERENCE_TABLE);
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("1.000–1.200 kcal"));
    }
}
