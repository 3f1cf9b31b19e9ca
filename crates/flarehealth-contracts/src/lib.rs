//! # flarehealth-contracts
//!
//! Shared types and error contracts for the FlareHealth clinical rule engine.
//!
//! Every crate in the workspace imports from here. No business logic lives
//! in this crate, only data definitions and the error type.

pub mod consent;
pub mod error;
pub mod passport;
pub mod patient;
pub mod risk;
pub mod safety;
pub mod settings;
pub mod vitals;

#[cfg(test)]
mod tests {
    use super::*;
    use consent::{ConsentEvent, ConsentRecord, SessionId};
    use error::FlareHealthError;
    use passport::{PermissionSet, SharePermission};
    use patient::{PatientId, PatientRecord};
    use risk::{RiskAssessment, RiskDimension, RiskLevel, SubRisks};
    use settings::{Language, Settings, Theme};
    use vitals::{BloodPressure, VitalsSnapshot};

    fn assessment(score: i32, level: RiskLevel) -> RiskAssessment {
        RiskAssessment {
            score,
            level,
            explanation: String::new(),
        }
    }

    // ── BloodPressure ────────────────────────────────────────────────────────

    #[test]
    fn blood_pressure_parses_sys_dia() {
        let bp: BloodPressure = "145/95".parse().unwrap();
        assert_eq!(bp, BloodPressure::new(145, 95));
        assert_eq!(bp.to_string(), "145/95");
    }

    #[test]
    fn blood_pressure_tolerates_surrounding_whitespace() {
        let bp: BloodPressure = " 118 / 76 ".parse().unwrap();
        assert_eq!(bp, BloodPressure::new(118, 76));
    }

    #[test]
    fn blood_pressure_rejects_malformed_strings() {
        for input in ["", "145", "145-95", "145/", "/95", "abc/def", "145/95/60", "14.5/9"] {
            let err = input.parse::<BloodPressure>().unwrap_err();
            assert!(
                matches!(err, FlareHealthError::InvalidVitals { .. }),
                "expected InvalidVitals for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn vitals_deserialize_from_json() {
        let json = r#"{
            "heart_rate": 88,
            "blood_pressure": "145/95",
            "glucose": 185,
            "bmi": 31.2,
            "stress_level": 8
        }"#;
        let vitals: VitalsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(vitals.systolic(), 145);
        assert_eq!(vitals.diastolic(), 95);
        assert_eq!(vitals.glucose, 185);
    }

    #[test]
    fn vitals_with_bad_blood_pressure_fail_to_deserialize() {
        let json = r#"{
            "heart_rate": 88,
            "blood_pressure": "high",
            "glucose": 185,
            "bmi": 31.2,
            "stress_level": 8
        }"#;
        let err = serde_json::from_str::<VitalsSnapshot>(json).unwrap_err();
        assert!(err.to_string().contains("SYS/DIA"));
    }

    #[test]
    fn validate_rejects_non_finite_bmi() {
        let vitals = VitalsSnapshot {
            heart_rate: 70,
            blood_pressure: BloodPressure::new(120, 80),
            glucose: 90,
            bmi: f64::NAN,
            stress_level: 3,
        };
        assert!(matches!(
            vitals.validate(),
            Err(FlareHealthError::InvalidVitals { .. })
        ));
    }

    #[test]
    fn validate_accepts_out_of_range_values() {
        let vitals = VitalsSnapshot {
            heart_rate: 250,
            blood_pressure: BloodPressure::new(300, 200),
            glucose: 900,
            bmi: 200.0,
            stress_level: 15,
        };
        assert!(vitals.validate().is_ok());
    }

    // ── Risk types ───────────────────────────────────────────────────────────

    #[test]
    fn risk_level_from_score_uses_half_open_buckets() {
        assert_eq!(RiskLevel::from_score(39, 40, 70), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40, 40, 70), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69, 40, 70), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70, 40, 70), RiskLevel::High);
    }

    #[test]
    fn sub_risks_iterate_in_report_order_and_list_high() {
        let risks = SubRisks {
            cardiac: assessment(100, RiskLevel::High),
            diabetes: assessment(20, RiskLevel::Low),
            hypertension: assessment(60, RiskLevel::High),
            obesity: assessment(65, RiskLevel::Medium),
            mental_stress: assessment(30, RiskLevel::Low),
        };

        let order: Vec<RiskDimension> = risks.iter().map(|(d, _)| d).collect();
        assert_eq!(order, RiskDimension::ALL.to_vec());
        assert_eq!(
            risks.high_dimensions(),
            vec![RiskDimension::Cardiac, RiskDimension::Hypertension]
        );
    }

    #[test]
    fn risk_level_serializes_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        assert_eq!(RiskDimension::MentalStress.key(), "mental_stress");
    }

    // ── Patient record ───────────────────────────────────────────────────────

    #[test]
    fn patient_record_defaults_optional_lists() {
        let json = r#"{
            "patient_id": "FLR-TEST-0001",
            "patient_name": "Test Patient",
            "risk_score": 10,
            "vitals": {
                "heart_rate": 70,
                "blood_pressure": "120/80",
                "glucose": 90,
                "bmi": 22.0,
                "stress_level": 2
            }
        }"#;
        let record: PatientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.patient_id, PatientId::new("FLR-TEST-0001"));
        assert!(record.medications.is_empty());
        assert!(record.allergies.is_empty());
        assert!(record.last_visit.is_none());
    }

    // ── Consent ──────────────────────────────────────────────────────────────

    #[test]
    fn consent_event_is_tagged_by_kind() {
        let record = ConsentRecord::new(
            PatientId::new("FLR-2024-9834"),
            ConsentEvent::NoteHashed { digest: "ab".repeat(32) },
            chrono::Utc::now(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["event"]["kind"], "note-hashed");
        assert_eq!(record.event.label(), "Clinical Note Hashed");
    }

    #[test]
    fn session_id_new_produces_unique_values() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| SessionId::new().0.to_string()).collect();
        assert_eq!(ids.len(), 100);
    }

    // ── Passport permissions ─────────────────────────────────────────────────

    #[test]
    fn permission_set_grant_is_idempotent() {
        let mut perms = PermissionSet::default();
        assert!(perms.is_empty());
        perms.grant(SharePermission::Allergies);
        perms.grant(SharePermission::Allergies);
        assert!(perms.has(SharePermission::Allergies));
        assert!(!perms.has(SharePermission::Insurance));
        assert_eq!(perms.all().count(), 1);
    }

    // ── Settings ─────────────────────────────────────────────────────────────

    #[test]
    fn settings_default_matches_first_launch() {
        let settings = Settings::default();
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.theme, Theme::Dark);
        assert!(!settings.voice_input_enabled);
        assert!(!settings.voice_output_enabled);
        assert_eq!(Language::Hi.speech_code(), "hi-IN");
    }

    // ── Error display messages ───────────────────────────────────────────────

    #[test]
    fn error_patient_not_found_display() {
        let err = FlareHealthError::PatientNotFound {
            patient_id: "FLR-0000".to_string(),
        };
        assert_eq!(err.to_string(), "patient 'FLR-0000' not found");
    }

    #[test]
    fn error_invalid_vitals_display() {
        let err = FlareHealthError::InvalidVitals {
            reason: "bmi must be a finite number".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid vitals"));
        assert!(msg.contains("bmi"));
    }

    #[test]
    fn error_token_expired_display() {
        let err = FlareHealthError::TokenExpired {
            token_id: "tok-1".to_string(),
        };
        assert!(err.to_string().contains("tok-1"));
    }
}
