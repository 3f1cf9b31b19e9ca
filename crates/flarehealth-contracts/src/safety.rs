//! Medication safety warning types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How strongly a safety advisory should be surfaced.
///
/// `Warning` is the stronger of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Caution,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Caution => f.write_str("caution"),
        }
    }
}

/// An advisory produced when a medication/vitals combination matches a rule.
///
/// A fresh list is computed for every evaluation; warnings are never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationSafetyWarning {
    /// Identifier of the rule that fired, e.g. `"nsaid-hypertension"`.
    pub rule_id: String,
    pub severity: Severity,
    /// Advisory text shown to the clinician.
    pub message: String,
}
