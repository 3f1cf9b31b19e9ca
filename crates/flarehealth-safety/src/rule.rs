//! Safety rule types and configuration schema.
//!
//! A `SafetyConfig` is deserialized from TOML and holds an ordered list of
//! `SafetyRule`s. Unlike a first-match policy table, every rule is evaluated
//! on every check and each may contribute one warning.

use serde::{Deserialize, Serialize};

use flarehealth_contracts::{safety::Severity, vitals::VitalsSnapshot};

/// A vital sign a rule condition can test.
///
/// Expressed in TOML as snake_case:
/// ```toml
/// metric = "systolic"
/// metric = "stress_level"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalMetric {
    HeartRate,
    Systolic,
    Diastolic,
    Glucose,
    Bmi,
    StressLevel,
}

impl VitalMetric {
    /// Read this metric from `vitals` as a float for comparison.
    pub fn read(&self, vitals: &VitalsSnapshot) -> f64 {
        match self {
            VitalMetric::HeartRate => f64::from(vitals.heart_rate),
            VitalMetric::Systolic => f64::from(vitals.systolic()),
            VitalMetric::Diastolic => f64::from(vitals.diastolic()),
            VitalMetric::Glucose => f64::from(vitals.glucose),
            VitalMetric::Bmi => vitals.bmi,
            VitalMetric::StressLevel => f64::from(vitals.stress_level),
        }
    }
}

/// Comparison operator for a condition. `gt` and `gte` are distinct: the
/// NSAID rule fires at systolic 140 while the steroid rule needs glucose 141.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Gt => value > threshold,
            Comparison::Gte => value >= threshold,
            Comparison::Lt => value < threshold,
            Comparison::Lte => value <= threshold,
        }
    }
}

/// One vitals predicate, e.g. `systolic >= 140`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalCondition {
    pub metric: VitalMetric,
    pub op: Comparison,
    pub threshold: f64,
}

impl VitalCondition {
    pub fn holds(&self, vitals: &VitalsSnapshot) -> bool {
        self.op.holds(self.metric.read(vitals), self.threshold)
    }
}

/// A single medication safety rule loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyRule {
    /// Stable identifier copied into every warning this rule produces.
    pub id: String,

    /// Human-readable explanation of what this rule guards against.
    pub description: String,

    pub severity: Severity,

    /// Advisory text shown to the clinician when the rule fires.
    pub message: String,

    /// Substrings matched case-insensitively against each active medication.
    /// Must be non-empty; normalized to lowercase on load.
    pub medication_keywords: Vec<String>,

    /// All conditions must hold for the rule to fire. An empty list means
    /// the rule fires on the medication match alone.
    #[serde(default)]
    pub conditions: Vec<VitalCondition>,
}

impl SafetyRule {
    /// Return true if any medication contains any of this rule's keywords.
    ///
    /// Keywords are expected to be lowercase already (see
    /// `SafetyConfig::normalize`).
    pub fn matches_medication(&self, medications: &[String]) -> bool {
        medications.iter().any(|med| {
            let med = med.to_lowercase();
            self.medication_keywords.iter().any(|kw| med.contains(kw.as_str()))
        })
    }

    /// Return true if every vitals condition holds.
    pub fn matches_vitals(&self, vitals: &VitalsSnapshot) -> bool {
        self.conditions.iter().all(|c| c.holds(vitals))
    }
}

/// The top-level structure deserialized from a TOML rule file.
///
/// Example:
/// ```toml
/// [[rules]]
/// id = "nsaid-hypertension"
/// description = "NSAIDs raise blood pressure"
/// severity = "warning"
/// message = "Caution: NSAIDs can elevate blood pressure."
/// medication_keywords = ["nsaid"]
///
/// [[rules.conditions]]
/// metric = "systolic"
/// op = "gte"
/// threshold = 140
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Ordered list of rules. Warnings are reported in this order.
    pub rules: Vec<SafetyRule>,
}

impl SafetyConfig {
    /// Lowercase and trim every keyword, dropping empty ones.
    pub fn normalize(&mut self) {
        for rule in &mut self.rules {
            rule.medication_keywords = rule
                .medication_keywords
                .iter()
                .map(|kw| kw.trim().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect();
        }
    }
}
