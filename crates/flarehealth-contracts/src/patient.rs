//! Patient identity and record types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::vitals::VitalsSnapshot;

/// Stable patient identifier, e.g. `PatientId("FLR-2024-9834")`.
///
/// Used as the store key and in every consent record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A patient as held by the record store.
///
/// `risk_score` is an independently authored aggregate used for list
/// ordering. It is not computed from the five sub-risk dimensions and the two
/// are never reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: PatientId,
    pub patient_name: String,
    /// Precomputed aggregate score, 0–100.
    pub risk_score: u8,
    pub vitals: VitalsSnapshot,
    /// Active medications as free text, e.g. `"Metformin 500mg"`.
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub last_visit: Option<NaiveDate>,
}

/// Triage band derived from the aggregate `risk_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Routine,
    Elevated,
    Critical,
}

impl Urgency {
    /// `>= 70` critical, `>= 50` elevated, else routine.
    pub fn from_risk_score(risk_score: u8) -> Self {
        if risk_score >= 70 {
            Urgency::Critical
        } else if risk_score >= 50 {
            Urgency::Elevated
        } else {
            Urgency::Routine
        }
    }

    /// Recommended interval until the next visit.
    pub fn follow_up_interval(&self) -> &'static str {
        match self {
            Urgency::Critical => "4-6 weeks",
            Urgency::Elevated => "2-3 months",
            Urgency::Routine => "6 months",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Routine => f.write_str("routine"),
            Urgency::Elevated => f.write_str("elevated"),
            Urgency::Critical => f.write_str("critical"),
        }
    }
}

impl PatientRecord {
    pub fn urgency(&self) -> Urgency {
        Urgency::from_risk_score(self.risk_score)
    }
}
