//! The clinician's workspace: the service every front-end drives.
//!
//! `ClinicalWorkspace` owns the collaborators behind the core traits and
//! runs each doctor-portal operation in a fixed order:
//!
//!   Lookup → Consent record → Score → Safety check
//!
//! Scoring and safety checks are pure. The only side effect is the consent
//! record, and an operation whose consent record cannot be written fails as
//! a whole rather than returning data that was never audited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use flarehealth_contracts::{
    consent::{ConsentEvent, ConsentRecord, SessionId},
    error::FlareHealthResult,
    patient::{PatientId, PatientRecord, Urgency},
    risk::{RiskDimension, SubRisks},
    safety::MedicationSafetyWarning,
};
use flarehealth_risk::assess_risks;

use crate::{
    config::DEFAULT_EXPLORER_BASE_URL,
    note::{digest_note, explorer_url},
    traits::{AuditWriter, PatientStore, SafetyChecker},
};

/// One row of the priority queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub risk_score: u8,
    pub urgency: Urgency,
    /// Sub-risk dimensions currently assessed as high.
    pub high_risks: Vec<RiskDimension>,
}

/// Everything the portal shows once a patient record is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInsights {
    pub record: PatientRecord,
    pub risks: SubRisks,
    /// Warnings for the patient's own active medications.
    pub warnings: Vec<MedicationSafetyWarning>,
    /// Reference of the `access-granted` consent record.
    pub consent_ref: String,
}

/// Proof that a visit note was hashed into the consent timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteReceipt {
    pub patient_id: PatientId,
    /// SHA-256 hex of the note text.
    pub digest: String,
    pub timestamp: DateTime<Utc>,
    /// Reference of the `note-hashed` consent record.
    pub ledger_ref: String,
    pub explorer_url: String,
}

/// The clinician-facing service.
///
/// Construct one workspace per clinician session. All consent records it
/// writes belong to `session_id()`.
pub struct ClinicalWorkspace {
    store: Box<dyn PatientStore>,
    safety: Box<dyn SafetyChecker>,
    audit: Box<dyn AuditWriter>,
    session_id: SessionId,
    explorer_base_url: String,
}

impl ClinicalWorkspace {
    pub fn new(
        store: Box<dyn PatientStore>,
        safety: Box<dyn SafetyChecker>,
        audit: Box<dyn AuditWriter>,
        session_id: SessionId,
    ) -> Self {
        Self {
            store,
            safety,
            audit,
            session_id,
            explorer_base_url: DEFAULT_EXPLORER_BASE_URL.to_string(),
        }
    }

    /// Override the block-explorer prefix used in receipts.
    pub fn with_explorer_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.explorer_base_url = base_url.into();
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Every patient ordered by aggregate risk score, highest first.
    ///
    /// Ties keep storage order. The aggregate score is the stored one; the
    /// sub-risks only contribute the `high_risks` annotation.
    pub fn priority_queue(&self) -> FlareHealthResult<Vec<QueueEntry>> {
        let mut patients = self.store.list()?;
        patients.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));

        let queue: Vec<QueueEntry> = patients
            .into_iter()
            .map(|record| {
                let high_risks = assess_risks(&record.vitals).high_dimensions();
                QueueEntry {
                    urgency: record.urgency(),
                    patient_id: record.patient_id,
                    patient_name: record.patient_name,
                    risk_score: record.risk_score,
                    high_risks,
                }
            })
            .collect();

        debug!(session_id = %self.session_id.0, entries = queue.len(), "priority queue built");
        Ok(queue)
    }

    /// Score a patient without recording access.
    pub fn assess(&self, patient_id: &PatientId) -> FlareHealthResult<SubRisks> {
        let record = self.store.get(patient_id)?;
        Ok(assess_risks(&record.vitals))
    }

    /// Open a patient's record.
    ///
    /// Writes an `access-granted` consent record before any data is
    /// returned, then scores the vitals and checks the patient's own
    /// medications.
    pub fn open_patient(&self, patient_id: &PatientId) -> FlareHealthResult<PatientInsights> {
        let record = self.store.get(patient_id).inspect_err(|e| {
            warn!(session_id = %self.session_id.0, patient_id = %patient_id, error = %e, "patient lookup failed");
        })?;

        let consent_ref = self.record_consent(&record.patient_id, ConsentEvent::AccessGranted, Utc::now())?;

        let risks = assess_risks(&record.vitals);
        let warnings = self.safety.check(&record.vitals, &record.medications);

        info!(
            session_id = %self.session_id.0,
            patient_id = %record.patient_id,
            high_risks = risks.high_dimensions().len(),
            warnings = warnings.len(),
            "patient record opened"
        );

        Ok(PatientInsights {
            record,
            risks,
            warnings,
            consent_ref,
        })
    }

    /// Check an arbitrary medication selection against a patient's vitals.
    ///
    /// Used when the clinician toggles medications before prescribing; the
    /// patient's stored medication list is not consulted.
    pub fn check_medications(
        &self,
        patient_id: &PatientId,
        medications: &[String],
    ) -> FlareHealthResult<Vec<MedicationSafetyWarning>> {
        let record = self.store.get(patient_id)?;
        Ok(self.safety.check(&record.vitals, medications))
    }

    /// Hash a visit note into the patient's consent timeline.
    ///
    /// Blank notes are rejected with `InvalidNote` before anything is written.
    pub fn hash_note(&self, patient_id: &PatientId, text: &str) -> FlareHealthResult<NoteReceipt> {
        let record = self.store.get(patient_id)?;
        let digest = digest_note(text)?;
        let timestamp = Utc::now();

        let ledger_ref = self.record_consent(
            &record.patient_id,
            ConsentEvent::NoteHashed { digest: digest.clone() },
            timestamp,
        )?;

        info!(
            session_id = %self.session_id.0,
            patient_id = %record.patient_id,
            digest = %digest,
            "clinical note hashed"
        );

        Ok(NoteReceipt {
            patient_id: record.patient_id,
            explorer_url: explorer_url(&self.explorer_base_url, &ledger_ref),
            digest,
            timestamp,
            ledger_ref,
        })
    }

    /// Record that the clinician no longer has access to the patient.
    pub fn revoke_access(&self, patient_id: &PatientId) -> FlareHealthResult<String> {
        let record = self.store.get(patient_id)?;
        self.record_consent(&record.patient_id, ConsentEvent::AccessRevoked, Utc::now())
    }

    /// End the session and seal the consent timeline.
    pub fn close(&self) -> FlareHealthResult<()> {
        self.audit.finalize(&self.session_id.0.to_string())
    }

    fn record_consent(
        &self,
        patient_id: &PatientId,
        event: ConsentEvent,
        timestamp: DateTime<Utc>,
    ) -> FlareHealthResult<String> {
        let record = ConsentRecord::new(patient_id.clone(), event, timestamp);
        let reference = self.audit.write(&record)?;

        debug!(
            session_id = %self.session_id.0,
            patient_id = %patient_id,
            event = record.event.label(),
            reference = %reference,
            "consent recorded"
        );

        Ok(reference)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
