//! # flarehealth-records
//!
//! Patient records for the FlareHealth doctor portal.
//!
//! - [`InMemoryPatientStore`] implements the
//!   [`PatientStore`](flarehealth_core::traits::PatientStore) trait, either
//!   over the built-in five-patient roster or over a JSON roster document
//!   validated against [`ROSTER_SCHEMA`].
//! - [`MEDICATION_OPTIONS`] is the catalogue a clinician picks from when
//!   running an ad-hoc safety check.

pub mod mock_data;
pub mod store;

pub use mock_data::{find_medication, mock_roster, MEDICATION_OPTIONS};
pub use store::{validate_roster, InMemoryPatientStore, ROSTER_SCHEMA};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use flarehealth_contracts::{error::FlareHealthError, patient::PatientId};
    use flarehealth_core::traits::PatientStore;

    use super::{find_medication, InMemoryPatientStore};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn entry(id: &str, blood_pressure: &str) -> serde_json::Value {
        json!({
            "patient_id": id,
            "patient_name": "Test Patient",
            "risk_score": 55,
            "vitals": {
                "heart_rate": 80,
                "blood_pressure": blood_pressure,
                "glucose": 120,
                "bmi": 27.5,
                "stress_level": 5
            },
            "medications": ["Lisinopril"],
            "last_visit": "2024-10-02"
        })
    }

    fn load(doc: serde_json::Value) -> Result<InMemoryPatientStore, FlareHealthError> {
        InMemoryPatientStore::from_json_str(&doc.to_string())
    }

    // ── Mock roster ───────────────────────────────────────────────────────────

    #[test]
    fn mock_roster_has_five_patients_in_order() {
        let store = InMemoryPatientStore::with_mock_roster();
        let ids: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.patient_id.to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["FLR-2024-9834", "FLR-2024-7821", "FLR-2024-5612", "FLR-2024-3401", "FLR-2024-1289"]
        );
    }

    #[test]
    fn john_anderson_record_matches_roster() {
        let store = InMemoryPatientStore::with_mock_roster();
        let john = store.get(&PatientId::new("FLR-2024-9834")).unwrap();

        assert_eq!(john.patient_name, "John Anderson");
        assert_eq!(john.risk_score, 82);
        assert_eq!(john.vitals.heart_rate, 88);
        assert_eq!(john.vitals.blood_pressure.to_string(), "145/95");
        assert_eq!(john.vitals.glucose, 185);
        assert_eq!(john.vitals.bmi, 31.2);
        assert_eq!(john.vitals.stress_level, 8);
        assert_eq!(john.medications, vec!["Metformin 500mg", "Amlodipine 5mg"]);
        assert_eq!(john.allergies, vec!["Penicillin", "NSAIDs"]);
        assert_eq!(john.last_visit, NaiveDate::from_ymd_opt(2024, 12, 1));
    }

    #[test]
    fn lookup_is_exact() {
        let store = InMemoryPatientStore::with_mock_roster();
        for id in ["flr-2024-9834", "FLR-2024-983", " FLR-2024-9834", "FLR-2024-0000"] {
            match store.get(&PatientId::new(id)) {
                Err(FlareHealthError::PatientNotFound { patient_id }) => assert_eq!(patient_id, id),
                other => panic!("expected PatientNotFound for {id:?}, got {other:?}"),
            }
        }
    }

    // ── JSON roster import ────────────────────────────────────────────────────

    #[test]
    fn valid_document_loads() {
        let store = load(json!([entry("P-1", "132/84"), entry("P-2", " 118 / 76 ")])).unwrap();
        assert_eq!(store.len(), 2);

        let p2 = store.get(&PatientId::new("P-2")).unwrap();
        assert_eq!(p2.vitals.systolic(), 118);
        assert_eq!(p2.vitals.diastolic(), 76);
        assert_eq!(p2.last_visit, NaiveDate::from_ymd_opt(2024, 10, 2));
        assert!(p2.allergies.is_empty());
    }

    #[test]
    fn malformed_blood_pressure_is_invalid_vitals() {
        for bp in ["145-95", "145/", "/95", "high", "145/95/60"] {
            let err = load(json!([entry("P-1", bp)])).unwrap_err();
            assert!(
                matches!(err, FlareHealthError::InvalidVitals { .. }),
                "expected InvalidVitals for {bp:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn schema_violations_are_reported() {
        let mut missing_vitals = entry("P-1", "120/80");
        missing_vitals.as_object_mut().unwrap().remove("vitals");

        let mut out_of_range = entry("P-2", "120/80");
        out_of_range["risk_score"] = json!(150);

        let mut wrong_type = entry("P-3", "120/80");
        wrong_type["vitals"]["glucose"] = json!("high");

        for doc in [json!([missing_vitals]), json!([out_of_range]), json!([wrong_type]), json!({})] {
            let err = load(doc).unwrap_err();
            match err {
                FlareHealthError::SchemaValidation { reason } => {
                    assert!(reason.contains("JSON Schema violation"), "{reason}");
                }
                other => panic!("expected SchemaValidation, got {other:?}"),
            }
        }
    }

    #[test]
    fn duplicate_patient_ids_are_rejected() {
        let err = load(json!([entry("P-1", "120/80"), entry("P-1", "130/85")])).unwrap_err();
        assert!(err.to_string().contains("duplicate patient id 'P-1'"));
    }

    #[test]
    fn unparseable_json_is_config_error() {
        let err = InMemoryPatientStore::from_json_str("[{").unwrap_err();
        assert!(matches!(err, FlareHealthError::ConfigError { .. }));
    }

    #[test]
    fn missing_roster_file_is_config_error() {
        let path = std::env::temp_dir().join("flarehealth-no-such-roster.json");
        let err = InMemoryPatientStore::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read roster file"));
    }

    // ── Medication catalogue ──────────────────────────────────────────────────

    #[test]
    fn catalogue_lookup_is_case_insensitive() {
        assert_eq!(find_medication("nsaids"), Some("NSAIDs"));
        assert_eq!(find_medication(" metformin 850MG "), Some("Metformin 850mg"));
        assert_eq!(find_medication("Aspirin"), None);
    }
}
