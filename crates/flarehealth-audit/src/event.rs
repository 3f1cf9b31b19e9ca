//! Consent timeline entry and sealed log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flarehealth_contracts::{consent::ConsentRecord, patient::PatientId};

/// One link in the consent hash chain.
///
/// Changing any field, including those of the embedded `record`, invalidates
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The clinician session this entry belongs to.
    pub session_id: String,

    pub record: ConsentRecord,

    /// `this_hash` of the previous entry, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// SHA-256 (hex) over (session_id, sequence, prev_hash, record JSON).
    pub this_hash: String,
}

impl ConsentEntry {
    /// The `prev_hash` of the first entry in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";

    pub fn patient_id(&self) -> &PatientId {
        &self.record.patient_id
    }
}

/// A sealed snapshot of one session's consent timeline.
///
/// `terminal_hash` is the last entry's `this_hash` and commits to the whole
/// log. It is empty when nothing was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentLog {
    pub session_id: String,
    pub entries: Vec<ConsentEntry>,
    pub finalized_at: DateTime<Utc>,
    pub terminal_hash: String,
}
