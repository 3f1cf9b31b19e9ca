//! Consent timeline records.
//!
//! Every time a clinician gains access to a patient, hashes a visit note, or
//! gives access back, the workspace writes one `ConsentRecord` to the audit
//! writer. The writer chains them into a tamper-evident timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patient::PatientId;

/// Unique identifier for one clinician session.
///
/// Every consent record written during the session belongs to the chain
/// identified by this UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened in a consent timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ConsentEvent {
    /// A clinician opened the patient's record.
    AccessGranted,
    /// A visit note was hashed. `digest` is the SHA-256 hex of the note.
    NoteHashed { digest: String },
    /// The clinician's access was withdrawn.
    AccessRevoked,
}

impl ConsentEvent {
    /// Display label used in timelines, e.g. `"Clinical Note Hashed"`.
    pub fn label(&self) -> &'static str {
        match self {
            ConsentEvent::AccessGranted => "Access Granted",
            ConsentEvent::NoteHashed { .. } => "Clinical Note Hashed",
            ConsentEvent::AccessRevoked => "Access Revoked",
        }
    }
}

/// One entry in a patient's consent timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub patient_id: PatientId,
    pub event: ConsentEvent,
    /// Wall-clock time (UTC) the event occurred.
    pub timestamp: DateTime<Utc>,
}

impl ConsentRecord {
    pub fn new(patient_id: PatientId, event: ConsentEvent, timestamp: DateTime<Utc>) -> Self {
        Self { patient_id, event, timestamp }
    }
}
