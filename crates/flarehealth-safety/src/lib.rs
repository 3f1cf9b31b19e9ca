//! # flarehealth-safety
//!
//! Rule-based medication safety checking.
//!
//! ## Overview
//!
//! This crate provides [`TomlSafetyChecker`], which implements the
//! [`SafetyChecker`](flarehealth_core::traits::SafetyChecker) trait. Each
//! rule pairs vitals predicates with medication-name keywords. All rules are
//! evaluated on every call and every rule that matches contributes one
//! warning, so several advisories can surface together.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use flarehealth_safety::TomlSafetyChecker;
//!
//! let checker = TomlSafetyChecker::with_default_rules()?;
//! // Pass `checker` to `flarehealth_core::ClinicalWorkspace::new(...)`.
//! ```

pub mod engine;
pub mod rule;

pub use engine::{check_safety, TomlSafetyChecker, DEFAULT_RULES};
pub use rule::{Comparison, SafetyConfig, SafetyRule, VitalCondition, VitalMetric};

// ── Tests ─────────────────────────────────────────────────────────────────────
