//! Trait definitions at the seams of the clinical workspace.
//!
//! - `PatientStore`: where patient records come from
//! - `SafetyChecker`: medication/vitals cross-referencing
//! - `AuditWriter`: append-only consent timeline sink
//! - `SettingsStore`: persistence port for user preferences
//!
//! `ClinicalWorkspace` holds one of each behind a `Box<dyn _>` so a real
//! deployment can swap the in-memory implementations for a database or a
//! ledger without touching the scoring logic.

use std::sync::Arc;

use flarehealth_contracts::{
    consent::ConsentRecord,
    error::FlareHealthResult,
    patient::{PatientId, PatientRecord},
    safety::MedicationSafetyWarning,
    settings::Settings,
    vitals::VitalsSnapshot,
};

/// Read access to patient records.
pub trait PatientStore: Send + Sync {
    /// Return the record for `patient_id`.
    ///
    /// Matching is exact. Returns `FlareHealthError::PatientNotFound` when no
    /// such patient exists.
    fn get(&self, patient_id: &PatientId) -> FlareHealthResult<PatientRecord>;

    /// Return every record in the store, in storage order.
    fn list(&self) -> FlareHealthResult<Vec<PatientRecord>>;
}

/// Cross-references a vitals snapshot with an active medication list.
///
/// Implementations must be pure: the same inputs always produce the same
/// warnings, in the same order, and an empty medication list produces none.
pub trait SafetyChecker: Send + Sync {
    fn check(&self, vitals: &VitalsSnapshot, medications: &[String]) -> Vec<MedicationSafetyWarning>;
}

/// The consent timeline sink.
///
/// Every access grant, note hash, and revocation produces exactly one
/// `ConsentRecord`. A failed write aborts the operation that triggered it.
pub trait AuditWriter: Send + Sync {
    /// Append one consent record. Records are never modified or deleted.
    ///
    /// Returns the hash or transaction reference under which the record was
    /// stored, so callers can link to it.
    fn write(&self, record: &ConsentRecord) -> FlareHealthResult<String>;

    /// Mark the session as complete. Implementations may flush or seal here.
    fn finalize(&self, session_id: &str) -> FlareHealthResult<()>;
}

impl<T: AuditWriter + ?Sized> AuditWriter for Arc<T> {
    fn write(&self, record: &ConsentRecord) -> FlareHealthResult<String> {
        (**self).write(record)
    }

    fn finalize(&self, session_id: &str) -> FlareHealthResult<()> {
        (**self).finalize(session_id)
    }
}

/// Key-value persistence port for user preferences.
pub trait SettingsStore: Send + Sync {
    /// Load the stored settings, or defaults when nothing has been saved yet.
    fn load(&self) -> FlareHealthResult<Settings>;

    /// Persist `settings`, replacing whatever was stored before.
    fn save(&self, settings: &Settings) -> FlareHealthResult<()>;
}
