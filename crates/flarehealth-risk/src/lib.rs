//! # flarehealth-risk
//!
//! Threshold-based clinical sub-risk scoring.
//!
//! ## Overview
//!
//! [`assess_risks`] maps a `VitalsSnapshot` to five independent
//! `RiskAssessment`s (cardiac, diabetes, hypertension, obesity, mental
//! stress). This is a rule table, not a predictive model: the boundaries and
//! point values are the contract and are reproduced exactly.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use flarehealth_risk::assess_risks;
//!
//! let risks = assess_risks(&record.vitals);
//! for (dimension, assessment) in risks.iter() {
//!     println!("{}: {} ({})", dimension.label(), assessment.score, assessment.level);
//! }
//! ```

pub mod dimension;
pub mod engine;

pub use engine::{
    assess_risks, cardiac_risk, diabetes_risk, hypertension_risk, mental_stress_risk,
    obesity_risk,
};

use flarehealth_contracts::{error::FlareHealthResult, risk::SubRisks, vitals::VitalsSnapshot};

/// Validate `vitals` and then score them.
///
/// Use this at trust boundaries where the snapshot came from outside the
/// process; [`assess_risks`] itself never fails.
pub fn try_assess_risks(vitals: &VitalsSnapshot) -> FlareHealthResult<SubRisks> {
    vitals.validate()?;
    Ok(assess_risks(vitals))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
