//! TOML-driven medication safety checker.
//!
//! `TomlSafetyChecker` loads a `SafetyConfig` from a TOML string or file and
//! implements the `SafetyChecker` trait from flarehealth-core.
//!
//! Evaluation algorithm:
//!
//! 1. Iterate rules in declaration order. Never short-circuit.
//! 2. A rule fires when every vitals condition holds AND at least one active
//!    medication contains one of its keywords (case-insensitive).
//! 3. Each firing rule appends exactly one warning.
//!
//! Because every rule needs a medication match, an empty medication list
//! always yields an empty warning list.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use flarehealth_contracts::{
    error::{FlareHealthError, FlareHealthResult},
    safety::MedicationSafetyWarning,
    vitals::VitalsSnapshot,
};
use flarehealth_core::traits::SafetyChecker;

use crate::rule::SafetyConfig;

/// The built-in rule table (NSAID, steroid, metformin, SSRI).
pub const DEFAULT_RULES: &str = include_str!("../rules/medication_safety.toml");

/// A `SafetyChecker` backed by a TOML rule table.
///
/// ```rust,ignore
/// use flarehealth_safety::TomlSafetyChecker;
///
/// let checker = TomlSafetyChecker::from_file(Path::new("rules/medication_safety.toml"))?;
/// let warnings = checker.check(&record.vitals, &record.medications);
/// ```
#[derive(Debug, Clone)]
pub struct TomlSafetyChecker {
    config: SafetyConfig,
}

impl TomlSafetyChecker {
    /// The checker with the embedded default rule table.
    pub fn with_default_rules() -> FlareHealthResult<Self> {
        Self::from_toml_str(DEFAULT_RULES)
    }

    /// Parse `s` as a TOML rule table.
    ///
    /// Returns `FlareHealthError::ConfigError` if the TOML is malformed, a
    /// rule has no usable medication keyword, or two rules share an id.
    pub fn from_toml_str(s: &str) -> FlareHealthResult<Self> {
        let mut config: SafetyConfig = toml::from_str(s).map_err(|e| FlareHealthError::ConfigError {
            reason: format!("failed to parse safety rule TOML: {}", e),
        })?;
        config.normalize();

        let mut seen = HashSet::new();
        for rule in &config.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(FlareHealthError::ConfigError {
                    reason: format!("duplicate safety rule id '{}'", rule.id),
                });
            }
            if rule.medication_keywords.is_empty() {
                return Err(FlareHealthError::ConfigError {
                    reason: format!("safety rule '{}' has no medication keywords", rule.id),
                });
            }
            if rule.conditions.iter().any(|c| !c.threshold.is_finite()) {
                return Err(FlareHealthError::ConfigError {
                    reason: format!("safety rule '{}' has a non-finite threshold", rule.id),
                });
            }
        }

        debug!(rules = config.rules.len(), "safety rule table loaded");
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as a TOML rule table.
    pub fn from_file(path: &Path) -> FlareHealthResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FlareHealthError::ConfigError {
            reason: format!("failed to read safety rule file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn config(&self) -> &SafetyConfig {
        &self.config
    }
}

impl SafetyChecker for TomlSafetyChecker {
    /// Evaluate every rule against `vitals` and `medications`.
    ///
    /// Warnings come back in rule-table order, not medication order.
    fn check(&self, vitals: &VitalsSnapshot, medications: &[String]) -> Vec<MedicationSafetyWarning> {
        let mut warnings = Vec::new();

        for rule in &self.config.rules {
            if !(rule.matches_vitals(vitals) && rule.matches_medication(medications)) {
                continue;
            }

            debug!(rule_id = %rule.id, severity = %rule.severity, "safety rule fired");

            warnings.push(MedicationSafetyWarning {
                rule_id: rule.id.clone(),
                severity: rule.severity,
                message: rule.message.clone(),
            });
        }

        warnings
    }
}

/// Check `medications` against `vitals` with the default rule table.
///
/// Convenience for callers that do not load a custom table. The table is
/// parsed once, on first use.
pub fn check_safety(vitals: &VitalsSnapshot, medications: &[String]) -> Vec<MedicationSafetyWarning> {
    default_checker().check(vitals, medications)
}

fn default_checker() -> &'static TomlSafetyChecker {
    static DEFAULT: OnceLock<TomlSafetyChecker> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        TomlSafetyChecker::with_default_rules().expect("built-in safety rule table must be valid")
    })
}
