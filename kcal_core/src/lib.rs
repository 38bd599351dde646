//! # kcal_core - Calorie Needs Calculation Engine
//!
//! `kcal_core` computes daily calorie needs from a handful of body measures:
//! basal metabolic rate (Mifflin-St. Jeor), total expenditure via a PAL
//! factor, a goal-adjusted target, a protein/fat/carbohydrate split and the
//! BMI with its WHO category. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions from an input snapshot to a result
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types carrying the form message
//! - **Configurable**: every constant lives in [`EngineConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use kcal_core::{calculate_raw, RawInput};
//!
//! let raw = RawInput::new()
//!     .with_sex("frau")
//!     .with_age("30")
//!     .with_height("165")
//!     .with_weight("65");
//!
//! let result = calculate_raw(&raw).unwrap();
//! assert_eq!(result.bmr_kcal, 1370);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"bmr_kcal\": 1370"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - the engine: energy, macros, BMI, advisory notes
//! - [`input`] - raw form values and the validated [`UserInput`]
//! - [`tables`] - activity levels and goals
//! - [`config`] - engine constants and input limits
//! - [`equations`] - formula registry and step-by-step derivation
//! - [`reference`] - average needs by age group
//! - [`report`] - German text report
//! - [`format`] - German number formatting
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod format;
pub mod input;
pub mod reference;
pub mod report;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_raw, calculate_raw_with, calculate_with, CalorieResult};
pub use config::EngineConfig;
pub use errors::{CalcError, CalcResult};
pub use input::{RawInput, Sex, UserInput};
pub use tables::{ActivityLevel, Goal};
