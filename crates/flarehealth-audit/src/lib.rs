//! # flarehealth-audit
//!
//! Append-only, SHA-256 hash-chained consent timeline.
//!
//! ## Overview
//!
//! Every `ConsentRecord` the clinical workspace writes is wrapped in a
//! `ConsentEntry` that links to the previous entry by hash. Changing any
//! stored byte breaks the chain, which `verify_chain` detects. The hash
//! returned by `write` doubles as the reference shown in the consent
//! timeline and the explorer link.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use flarehealth_audit::InMemoryConsentLedger;
//!
//! let session = SessionId::new();
//! let ledger = Arc::new(InMemoryConsentLedger::new(&session));
//! let workspace = ClinicalWorkspace::new(store, safety, Box::new(Arc::clone(&ledger)), session);
//! workspace.open_patient(&PatientId::new("FLR-2024-9834"))?;
//!
//! assert!(ledger.verify_integrity());
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use event::{ConsentEntry, ConsentLog};
pub use memory::InMemoryConsentLedger;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use flarehealth_contracts::{
        consent::{ConsentEvent, ConsentRecord, SessionId},
        error::FlareHealthError,
        patient::PatientId,
    };
    use flarehealth_core::traits::AuditWriter;

    use super::{verify_chain, ConsentEntry, InMemoryConsentLedger};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn record(patient: &str, event: ConsentEvent, minute: i64) -> ConsentRecord {
        let t0 = Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap();
        ConsentRecord::new(PatientId::new(patient), event, t0 + Duration::minutes(minute))
    }

    fn ledger_with_three() -> InMemoryConsentLedger {
        let ledger = InMemoryConsentLedger::new(&SessionId::new());
        ledger
            .write(&record("FLR-2024-9834", ConsentEvent::AccessGranted, 0))
            .unwrap();
        ledger
            .write(&record(
                "FLR-2024-9834",
                ConsentEvent::NoteHashed { digest: "ab".repeat(32) },
                5,
            ))
            .unwrap();
        ledger
            .write(&record("FLR-2024-7821", ConsentEvent::AccessGranted, 7))
            .unwrap();
        ledger
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    #[test]
    fn chain_is_valid_after_sequential_writes() {
        let ledger = ledger_with_three();
        assert_eq!(ledger.len(), 3);
        assert!(ledger.verify_integrity());
    }

    #[test]
    fn first_entry_links_to_genesis() {
        let ledger = ledger_with_three();
        let log = ledger.export_log().unwrap();
        assert_eq!(log.entries[0].prev_hash, ConsentEntry::GENESIS_HASH);
        assert_eq!(log.entries[1].prev_hash, log.entries[0].this_hash);
        for (idx, entry) in log.entries.iter().enumerate() {
            assert_eq!(entry.sequence, idx as u64);
            assert_eq!(entry.session_id, ledger.session_id());
        }
    }

    #[test]
    fn write_returns_the_entry_hash() {
        let ledger = InMemoryConsentLedger::new(&SessionId::new());
        let hash = ledger
            .write(&record("FLR-2024-1289", ConsentEvent::AccessRevoked, 0))
            .unwrap();
        let log = ledger.export_log().unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(log.entries[0].this_hash, hash);
        assert_eq!(log.terminal_hash, hash);
    }

    #[test]
    fn tampering_with_a_record_is_detected() {
        let ledger = ledger_with_three();
        {
            let mut state = ledger.state.lock().unwrap();
            state.entries[1].record.event = ConsentEvent::NoteHashed { digest: "cd".repeat(32) };
        }
        assert!(!ledger.verify_integrity());
    }

    #[test]
    fn reordering_entries_is_detected() {
        let mut entries = ledger_with_three().export_log().unwrap().entries;
        entries.swap(1, 2);
        assert!(!verify_chain(&entries));

        let mut truncated = ledger_with_three().export_log().unwrap().entries;
        truncated.remove(0);
        assert!(!verify_chain(&truncated));
    }

    #[test]
    fn empty_chain_is_valid() {
        let ledger = InMemoryConsentLedger::new(&SessionId::new());
        assert!(ledger.is_empty());
        assert!(ledger.verify_integrity());
        assert!(verify_chain(&[]));
        assert_eq!(ledger.export_log().unwrap().terminal_hash, "");
    }

    #[test]
    fn timeline_filters_by_patient() {
        let ledger = ledger_with_three();
        let timeline = ledger.timeline(&PatientId::new("FLR-2024-9834")).unwrap();
        let labels: Vec<&str> = timeline.iter().map(|e| e.record.event.label()).collect();
        assert_eq!(labels, vec!["Access Granted", "Clinical Note Hashed"]);

        assert!(ledger.timeline(&PatientId::new("FLR-2024-0000")).unwrap().is_empty());
    }

    #[test]
    fn finalized_ledger_rejects_writes() {
        let ledger = ledger_with_three();
        ledger.finalize(ledger.session_id()).unwrap();
        assert!(ledger.is_finalized());

        let err = ledger
            .write(&record("FLR-2024-9834", ConsentEvent::AccessRevoked, 9))
            .unwrap_err();
        assert!(matches!(err, FlareHealthError::AuditWriteFailed { .. }));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn same_record_in_different_sessions_hashes_differently() {
        let r = record("FLR-2024-9834", ConsentEvent::AccessGranted, 0);
        let a = InMemoryConsentLedger::new(&SessionId::new()).write(&r).unwrap();
        let b = InMemoryConsentLedger::new(&SessionId::new()).write(&r).unwrap();
        assert_ne!(a, b);
    }

    // ── Through the clinical workspace ────────────────────────────────────────

    #[test]
    fn workspace_session_produces_a_verifiable_timeline() {
        use std::sync::Arc;

        use flarehealth_core::ClinicalWorkspace;
        use flarehealth_records::InMemoryPatientStore;
        use flarehealth_safety::TomlSafetyChecker;

        let session = SessionId::new();
        let ledger = Arc::new(InMemoryConsentLedger::new(&session));
        let workspace = ClinicalWorkspace::new(
            Box::new(InMemoryPatientStore::with_mock_roster()),
            Box::new(TomlSafetyChecker::with_default_rules().unwrap()),
            Box::new(Arc::clone(&ledger)),
            session,
        )
        .with_explorer_base_url("https://explorer.test/tx/");

        let john = PatientId::new("FLR-2024-9834");
        let insights = workspace.open_patient(&john).unwrap();
        let receipt = workspace.hash_note(&john, "Follow up on HbA1c in 3 months.").unwrap();
        workspace.open_patient(&PatientId::new("FLR-2024-1289")).unwrap();
        workspace.revoke_access(&john).unwrap();
        workspace.close().unwrap();

        assert!(ledger.verify_integrity());
        assert!(ledger.is_finalized());
        assert_eq!(ledger.len(), 4);

        let timeline = ledger.timeline(&john).unwrap();
        let labels: Vec<&str> = timeline.iter().map(|e| e.record.event.label()).collect();
        assert_eq!(labels, vec!["Access Granted", "Clinical Note Hashed", "Access Revoked"]);

        assert_eq!(timeline[0].this_hash, insights.consent_ref);
        assert_eq!(timeline[1].this_hash, receipt.ledger_ref);
        assert_eq!(
            timeline[1].record.event,
            ConsentEvent::NoteHashed { digest: receipt.digest.clone() }
        );
        assert_eq!(receipt.explorer_url, format!("https://explorer.test/tx/{}", receipt.ledger_ref));

        // Unknown patients and blank notes leave no trace.
        assert!(workspace.open_patient(&PatientId::new("FLR-0000")).is_err());
        assert!(workspace.hash_note(&john, "   ").is_err());
        assert_eq!(ledger.len(), 4);
    }
}
