//! Risk assessment output types.
//!
//! The scoring engine produces one `RiskAssessment` per `RiskDimension`,
//! bundled as `SubRisks`. Scores are plain integers accumulated from point
//! rules; levels are derived from per-dimension thresholds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical risk level derived from a dimension's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket `score` into a level: below `medium_from` is low, below
    /// `high_from` is medium, everything else is high.
    pub fn from_score(score: i32, medium_from: i32, high_from: i32) -> Self {
        if score < medium_from {
            RiskLevel::Low
        } else if score < high_from {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five independently scored health-risk categories.
///
/// Presentation layers map these to their own visual identifiers; the data
/// model never carries icons or colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDimension {
    Cardiac,
    Diabetes,
    Hypertension,
    Obesity,
    MentalStress,
}

impl RiskDimension {
    /// Every dimension, in the order assessments are reported.
    pub const ALL: [RiskDimension; 5] = [
        RiskDimension::Cardiac,
        RiskDimension::Diabetes,
        RiskDimension::Hypertension,
        RiskDimension::Obesity,
        RiskDimension::MentalStress,
    ];

    /// Stable snake_case key, e.g. `"mental_stress"`.
    pub fn key(&self) -> &'static str {
        match self {
            RiskDimension::Cardiac => "cardiac",
            RiskDimension::Diabetes => "diabetes",
            RiskDimension::Hypertension => "hypertension",
            RiskDimension::Obesity => "obesity",
            RiskDimension::MentalStress => "mental_stress",
        }
    }

    /// Human-readable label, e.g. `"Mental Stress"`.
    pub fn label(&self) -> &'static str {
        match self {
            RiskDimension::Cardiac => "Cardiac",
            RiskDimension::Diabetes => "Diabetes",
            RiskDimension::Hypertension => "Hypertension",
            RiskDimension::Obesity => "Obesity",
            RiskDimension::MentalStress => "Mental Stress",
        }
    }
}

impl fmt::Display for RiskDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The result of scoring one risk dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Sum of the dimension's point rules. 0–100 for physiological inputs;
    /// not clamped for out-of-range ones.
    pub score: i32,
    /// Level derived from `score` using the dimension's thresholds.
    pub level: RiskLevel,
    /// Canned advisory text selected by `level`.
    pub explanation: String,
}

/// One `RiskAssessment` per dimension for a single vitals snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRisks {
    pub cardiac: RiskAssessment,
    pub diabetes: RiskAssessment,
    pub hypertension: RiskAssessment,
    pub obesity: RiskAssessment,
    pub mental_stress: RiskAssessment,
}

impl SubRisks {
    /// Look up the assessment for `dimension`.
    pub fn get(&self, dimension: RiskDimension) -> &RiskAssessment {
        match dimension {
            RiskDimension::Cardiac => &self.cardiac,
            RiskDimension::Diabetes => &self.diabetes,
            RiskDimension::Hypertension => &self.hypertension,
            RiskDimension::Obesity => &self.obesity,
            RiskDimension::MentalStress => &self.mental_stress,
        }
    }

    /// Iterate `(dimension, assessment)` pairs in `RiskDimension::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (RiskDimension, &RiskAssessment)> + '_ {
        RiskDimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Dimensions currently assessed as `High`, in report order.
    pub fn high_dimensions(&self) -> Vec<RiskDimension> {
        self.iter()
            .filter(|(_, a)| a.level == RiskLevel::High)
            .map(|(d, _)| d)
            .collect()
    }
}
