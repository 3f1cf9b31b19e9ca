//! In-memory implementation of `AuditWriter`.
//!
//! `InMemoryConsentLedger` keeps every entry in a `Vec` behind a `Mutex`.
//! Wrap it in an `Arc` to hand one clone to the `ClinicalWorkspace` and keep
//! another for exporting or verifying the timeline.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info};

use flarehealth_contracts::{
    consent::{ConsentRecord, SessionId},
    error::{FlareHealthError, FlareHealthResult},
    patient::PatientId,
};
use flarehealth_core::traits::AuditWriter;

use crate::{
    chain::{hash_entry, verify_chain},
    event::{ConsentEntry, ConsentLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct LedgerState {
    pub(crate) entries: Vec<ConsentEntry>,
    /// `this_hash` of the last entry, or `GENESIS_HASH` before the first write.
    pub(crate) last_hash: String,
    pub(crate) finalized: bool,
}

// ── Public ledger ─────────────────────────────────────────────────────────────

/// An append-only consent timeline backed by a SHA-256 hash chain.
pub struct InMemoryConsentLedger {
    session_id: String,
    pub(crate) state: Mutex<LedgerState>,
}

impl InMemoryConsentLedger {
    pub fn new(session_id: &SessionId) -> Self {
        Self {
            session_id: session_id.0.to_string(),
            state: Mutex::new(LedgerState {
                entries: Vec::new(),
                last_hash: ConsentEntry::GENESIS_HASH.to_string(),
                finalized: false,
            }),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn lock(&self) -> FlareHealthResult<MutexGuard<'_, LedgerState>> {
        self.state.lock().map_err(|e| FlareHealthError::AuditWriteFailed {
            reason: format!("consent ledger lock poisoned: {}", e),
        })
    }

    /// Snapshot every entry written so far as a sealed `ConsentLog`.
    pub fn export_log(&self) -> FlareHealthResult<ConsentLog> {
        let state = self.lock()?;
        let terminal_hash = state
            .entries
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Ok(ConsentLog {
            session_id: self.session_id.clone(),
            entries: state.entries.clone(),
            finalized_at: Utc::now(),
            terminal_hash,
        })
    }

    /// Check linkage and recomputed hashes of the stored chain.
    ///
    /// A poisoned lock counts as a failed verification.
    pub fn verify_integrity(&self) -> bool {
        match self.lock() {
            Ok(state) => verify_chain(&state.entries),
            Err(_) => false,
        }
    }

    /// The entries concerning `patient_id`, oldest first.
    pub fn timeline(&self, patient_id: &PatientId) -> FlareHealthResult<Vec<ConsentEntry>> {
        let state = self.lock()?;
        Ok(state
            .entries
            .iter()
            .filter(|e| e.patient_id() == patient_id)
            .cloned()
            .collect())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_finalized(&self) -> bool {
        self.lock().map(|s| s.finalized).unwrap_or(false)
    }
}

// ── AuditWriter impl ──────────────────────────────────────────────────────────

impl AuditWriter for InMemoryConsentLedger {
    /// Append `record` to the chain and return its `this_hash`.
    ///
    /// Fails with `AuditWriteFailed` once the ledger has been finalized.
    fn write(&self, record: &ConsentRecord) -> FlareHealthResult<String> {
        let mut state = self.lock()?;

        if state.finalized {
            return Err(FlareHealthError::AuditWriteFailed {
                reason: format!("consent ledger for session {} is finalized", self.session_id),
            });
        }

        let sequence = state.entries.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_entry(&self.session_id, sequence, record, &prev_hash)?;

        debug!(
            session_id = %self.session_id,
            sequence,
            patient_id = %record.patient_id,
            event = record.event.label(),
            "consent entry appended"
        );

        state.entries.push(ConsentEntry {
            sequence,
            session_id: self.session_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash.clone();

        Ok(this_hash)
    }

    fn finalize(&self, session_id: &str) -> FlareHealthResult<()> {
        let mut state = self.lock()?;
        state.finalized = true;

        info!(
            session_id = %session_id,
            entry_count = state.entries.len(),
            terminal_hash = %state.last_hash,
            "consent ledger finalized"
        );

        Ok(())
    }
}
