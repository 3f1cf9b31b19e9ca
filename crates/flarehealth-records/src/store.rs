//! In-memory implementation of `PatientStore`.
//!
//! Roster documents are loaded in two phases:
//!
//! 1. **Structural**: the JSON document is validated against the embedded
//!    roster schema with the `jsonschema` crate. Every violation is collected
//!    into one `SchemaValidation` error.
//! 2. **Semantic**: each entry is converted into a `PatientRecord`. Blood
//!    pressure strings are parsed here (`InvalidVitals` when malformed), and
//!    duplicate patient ids are rejected.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use flarehealth_contracts::{
    error::{FlareHealthError, FlareHealthResult},
    patient::{PatientId, PatientRecord},
    vitals::{BloodPressure, VitalsSnapshot},
};
use flarehealth_core::traits::PatientStore;

use crate::mock_data::mock_roster;

/// JSON Schema every imported roster document must satisfy.
pub const ROSTER_SCHEMA: &str = include_str!("../schemas/patient_roster.schema.json");

// ── Wire format ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawVitals {
    heart_rate: i32,
    blood_pressure: String,
    glucose: i32,
    bmi: f64,
    stress_level: i32,
}

#[derive(Debug, Deserialize)]
struct RawPatientRecord {
    patient_id: String,
    patient_name: String,
    risk_score: u8,
    vitals: RawVitals,
    #[serde(default)]
    medications: Vec<String>,
    #[serde(default)]
    allergies: Vec<String>,
    #[serde(default)]
    last_visit: Option<NaiveDate>,
}

impl TryFrom<RawPatientRecord> for PatientRecord {
    type Error = FlareHealthError;

    fn try_from(raw: RawPatientRecord) -> FlareHealthResult<Self> {
        let blood_pressure: BloodPressure = raw.vitals.blood_pressure.parse().map_err(|e| match e {
            FlareHealthError::InvalidVitals { reason } => FlareHealthError::InvalidVitals {
                reason: format!("patient {}: {}", raw.patient_id, reason),
            },
            other => other,
        })?;

        let vitals = VitalsSnapshot {
            heart_rate: raw.vitals.heart_rate,
            blood_pressure,
            glucose: raw.vitals.glucose,
            bmi: raw.vitals.bmi,
            stress_level: raw.vitals.stress_level,
        };
        vitals.validate()?;

        Ok(PatientRecord {
            patient_id: PatientId::new(raw.patient_id),
            patient_name: raw.patient_name,
            risk_score: raw.risk_score,
            vitals,
            medications: raw.medications,
            allergies: raw.allergies,
            last_visit: raw.last_visit,
        })
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// A read-only patient store held entirely in memory.
///
/// Records keep the order they were loaded in; `list()` returns them in that
/// order and lookup by id is an exact, case-sensitive match.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPatientStore {
    records: Vec<PatientRecord>,
}

impl InMemoryPatientStore {
    /// Build a store from already-constructed records.
    ///
    /// Returns `ConfigError` if two records share a patient id.
    pub fn new(records: Vec<PatientRecord>) -> FlareHealthResult<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.patient_id.as_str()) {
                return Err(FlareHealthError::ConfigError {
                    reason: format!("duplicate patient id '{}' in roster", record.patient_id),
                });
            }
        }
        Ok(Self { records })
    }

    /// The five built-in demo patients.
    pub fn with_mock_roster() -> Self {
        Self { records: mock_roster() }
    }

    /// Validate and load a JSON roster document.
    pub fn from_json_str(s: &str) -> FlareHealthResult<Self> {
        let document: serde_json::Value =
            serde_json::from_str(s).map_err(|e| FlareHealthError::ConfigError {
                reason: format!("failed to parse roster JSON: {}", e),
            })?;

        validate_roster(&document)?;

        let raw: Vec<RawPatientRecord> =
            serde_json::from_value(document).map_err(|e| FlareHealthError::SchemaValidation {
                reason: format!("roster entry could not be decoded: {}", e),
            })?;

        let records = raw
            .into_iter()
            .map(PatientRecord::try_from)
            .collect::<FlareHealthResult<Vec<_>>>()?;

        debug!(patients = records.len(), "patient roster loaded");
        Self::new(records)
    }

    /// Read the file at `path` and load it as a JSON roster document.
    pub fn from_file(path: &Path) -> FlareHealthResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FlareHealthError::ConfigError {
            reason: format!("failed to read roster file '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PatientStore for InMemoryPatientStore {
    fn get(&self, patient_id: &PatientId) -> FlareHealthResult<PatientRecord> {
        self.records
            .iter()
            .find(|r| &r.patient_id == patient_id)
            .cloned()
            .ok_or_else(|| FlareHealthError::PatientNotFound {
                patient_id: patient_id.to_string(),
            })
    }

    fn list(&self) -> FlareHealthResult<Vec<PatientRecord>> {
        Ok(self.records.clone())
    }
}

// ── Schema validation ─────────────────────────────────────────────────────────

/// Validate `document` against [`ROSTER_SCHEMA`].
///
/// All violations are reported together, one per line.
pub fn validate_roster(document: &serde_json::Value) -> FlareHealthResult<()> {
    let schema: serde_json::Value =
        serde_json::from_str(ROSTER_SCHEMA).map_err(|e| FlareHealthError::SchemaValidation {
            reason: format!("embedded roster schema is not valid JSON: {e}"),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| FlareHealthError::SchemaValidation {
        reason: format!("invalid JSON Schema document: {e}"),
    })?;

    let violations: Vec<String> = validator
        .iter_errors(document)
        .map(|error| format!("JSON Schema violation at {}: {}", error.instance_path, error))
        .collect();

    if violations.is_empty() {
        return Ok(());
    }

    warn!(violations = violations.len(), "roster failed schema validation");
    Err(FlareHealthError::SchemaValidation {
        reason: violations.join("\n"),
    })
}
