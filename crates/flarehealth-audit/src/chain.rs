//! Hashing and chain verification for the consent timeline.
//!
//! Hash input layout (bytes, in order):
//!   1. session_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the consent record

use sha2::{Digest, Sha256};

use flarehealth_contracts::{
    consent::ConsentRecord,
    error::{FlareHealthError, FlareHealthResult},
};

use crate::event::ConsentEntry;

/// Compute the SHA-256 hash of one timeline entry.
///
/// Returns a lowercase 64-character hex string, or `AuditWriteFailed` if the
/// record cannot be serialized.
pub fn hash_entry(
    session_id: &str,
    sequence: u64,
    record: &ConsentRecord,
    prev_hash: &str,
) -> FlareHealthResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| FlareHealthError::AuditWriteFailed {
        reason: format!("consent record is not serializable: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(session_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify a chain of timeline entries.
///
/// Valid when every entry's `prev_hash` equals the previous entry's
/// `this_hash` (`GENESIS_HASH` for the first), every `sequence` equals its
/// position, and every `this_hash` matches the recomputed hash. An empty
/// chain is valid.
pub fn verify_chain(entries: &[ConsentEntry]) -> bool {
    let mut expected_prev = ConsentEntry::GENESIS_HASH.to_string();

    for (position, entry) in entries.iter().enumerate() {
        if entry.sequence != position as u64 || entry.prev_hash != expected_prev {
            return false;
        }

        match hash_entry(&entry.session_id, entry.sequence, &entry.record, &entry.prev_hash) {
            Ok(recomputed) if recomputed == entry.this_hash => {}
            _ => return false,
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}
