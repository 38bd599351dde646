//! # Calculator Input
//!
//! Two representations of the form:
//!
//! - [`RawInput`] - the untyped snapshot exactly as the fields deliver it
//!   (strings, possibly empty, possibly numbers when sent as JSON)
//! - [`UserInput`] - the typed, range-checked snapshot the engine computes on
//!
//! [`RawInput::parse`] is the only way from one to the other: it parses
//! every field and checks it against the configured limits, returning a
//! validation error instead of coercing a bad value.
//!
//! ## Example
//!
//! ```rust
//! use kcal_core::config::EngineConfig;
//! use kcal_core::input::{RawInput, Sex};
//! use kcal_core::tables::{ActivityLevel, Goal};
//!
//! let raw = RawInput::new()
//!     .with_sex("frau")
//!     .with_age("30")
//!     .with_height("165")
//!     .with_weight("65,5");
//!
//! let input = raw.parse(&EngineConfig::default()).unwrap();
//! assert_eq!(input.sex, Sex::Female);
//! assert_eq!(input.weight.0, 65.5);
//! assert_eq!(input.activity_level, ActivityLevel::LightlyActive);
//! assert_eq!(input.goal, Goal::Maintenance);
//!
//! let err = RawInput::new().with_age("9").with_height("180").with_weight("80")
//!     .parse(&EngineConfig::default())
//!     .unwrap_err();
//! assert!(err.is_validation());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::config::{EngineConfig, FieldRange, InputLimits};
use crate::errors::{CalcError, CalcResult};
use crate::tables::{ActivityLevel, Goal};
use crate::units::{Centimeters, Kilograms, Years};

/// Biological sex, selects the Mifflin-St. Jeor constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Parse the values a form or command line may send
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mann" | "m" | "male" | "männlich" | "maennlich" => Some(Sex::Male),
            "frau" | "w" | "f" | "female" | "weiblich" => Some(Sex::Female),
            _ => None,
        }
    }

    /// German label
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Mann",
            Sex::Female => "Frau",
        }
    }
}

/// Untyped form snapshot.
///
/// Every field is optional; JSON callers may send numbers or strings.
///
/// ## JSON Example
///
/// ```json
/// { "sex": "mann", "age": "30", "height": 180, "weight": "80", "activity_level": 2, "goal": 0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weight: Option<String>,
    /// Index into [`ActivityLevel::ALL`]
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_level: Option<String>,
    /// Index into [`Goal::ALL`]
    #[serde(default, deserialize_with = "lenient_string")]
    pub goal: Option<String>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sex(mut self, value: impl Into<String>) -> Self {
        self.sex = Some(value.into());
        self
    }

    pub fn with_age(mut self, value: impl Into<String>) -> Self {
        self.age = Some(value.into());
        self
    }

    pub fn with_height(mut self, value: impl Into<String>) -> Self {
        self.height = Some(value.into());
        self
    }

    pub fn with_weight(mut self, value: impl Into<String>) -> Self {
        self.weight = Some(value.into());
        self
    }

    pub fn with_activity_level(mut self, value: impl Into<String>) -> Self {
        self.activity_level = Some(value.into());
        self
    }

    pub fn with_goal(mut self, value: impl Into<String>) -> Self {
        self.goal = Some(value.into());
        self
    }

    /// Parse and range-check every field.
    ///
    /// Absent selectors fall back to the form defaults (male, activity
    /// index 1, goal index 1). Absent numeric fields are a validation error.
    pub fn parse(&self, config: &EngineConfig) -> CalcResult<UserInput> {
        let limits = &config.limits;

        let sex = match non_empty(self.sex.as_deref()) {
            None => Sex::default(),
            Some(value) => Sex::parse(value).ok_or_else(|| {
                CalcError::invalid_input(
                    "sex",
                    value,
                    "expected mann/frau",
                    "Bitte Geschlecht wählen (Mann oder Frau).",
                )
            })?,
        };

        let age = parse_measure("age", self.age.as_deref(), &limits.age, limits)?;
        if age.fract() != 0.0 {
            return Err(CalcError::invalid_input(
                "age",
                self.age.clone().unwrap_or_default(),
                "age must be a whole number of years",
                limits.user_message(),
            ));
        }
        let height = parse_measure("height", self.height.as_deref(), &limits.height, limits)?;
        let weight = parse_measure("weight", self.weight.as_deref(), &limits.weight, limits)?;

        let activity_level = parse_index(
            "activity_level",
            self.activity_level.as_deref(),
            ActivityLevel::DEFAULT_INDEX,
            ActivityLevel::from_index,
            ActivityLevel::ALL.len(),
            "eine gültige Aktivitätsstufe",
        )?;
        let goal = parse_index(
            "goal",
            self.goal.as_deref(),
            Goal::DEFAULT_INDEX,
            Goal::from_index,
            Goal::ALL.len(),
            "ein gültiges Ziel",
        )?;

        let input = UserInput {
            sex,
            age: Years(age as u32),
            height: Centimeters(height),
            weight: Kilograms(weight),
            activity_level,
            goal,
        };
        debug!(?input, "parsed calculator input");
        Ok(input)
    }
}

/// Typed, validated form snapshot.
///
/// ## JSON Example
///
/// ```json
/// {
///   "sex": "Male",
///   "age": 30,
///   "height": 180.0,
///   "weight": 80.0,
///   "activity_level": "ModeratelyActive",
///   "goal": "WeightLoss"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub sex: Sex,
    pub age: Years,
    pub height: Centimeters,
    pub weight: Kilograms,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl UserInput {
    /// Range-check a snapshot that was built directly rather than parsed.
    pub fn validate(&self, limits: &InputLimits) -> CalcResult<()> {
        let checks = [
            ("age", self.age.as_f64(), &limits.age),
            ("height", self.height.0, &limits.height),
            ("weight", self.weight.0, &limits.weight),
        ];
        for (field, value, range) in checks {
            check_range(field, value, &value.to_string(), range, limits)?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_measure(
    field: &str,
    raw: Option<&str>,
    range: &FieldRange,
    limits: &InputLimits,
) -> CalcResult<f64> {
    let text = non_empty(raw).ok_or_else(|| CalcError::missing_field(field, limits.user_message()))?;

    let value: f64 = text.replace(',', ".").parse().map_err(|_| {
        CalcError::invalid_input(field, text, "not a number", limits.user_message())
    })?;

    check_range(field, value, text, range, limits)?;
    Ok(value)
}

fn check_range(
    field: &str,
    value: f64,
    text: &str,
    range: &FieldRange,
    limits: &InputLimits,
) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            text,
            "must be a positive number",
            limits.user_message(),
        ));
    }
    if !range.contains(value) {
        return Err(CalcError::invalid_input(
            field,
            text,
            format!("must be between {} and {}", range.min, range.max),
            limits.user_message(),
        ));
    }
    Ok(())
}

fn parse_index<T>(
    field: &str,
    raw: Option<&str>,
    default_index: usize,
    lookup: fn(usize) -> Option<T>,
    len: usize,
    what: &str,
) -> CalcResult<T> {
    let message = || format!("Bitte {} wählen (0–{}).", what, len - 1);
    let index = match non_empty(raw) {
        None => default_index,
        Some(text) => text.parse::<usize>().map_err(|_| {
            CalcError::invalid_input(field, text, "not an index", message())
        })?,
    };
    lookup(index).ok_or_else(|| {
        CalcError::invalid_input(
            field,
            index.to_string(),
            format!("index must be below {}", len),
            message(),
        )
    })
}

/// Accept a JSON string or number (or null) as an optional string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("expected string or number, got {}", other))),
    }
}
