//! # flarehealth-assist
//!
//! Deterministic, template-driven assistant text.
//!
//! - [`copilot_report`]: clinician co-pilot (case summary, lifestyle plan,
//!   follow-up schedule) keyed on sub-risk levels.
//! - [`analyze_health`] and [`reply`]: the patient-facing assistant.
//! - [`speech_request`]: what would be handed to a text-to-speech engine,
//!   honouring the user's voice-output setting and language.

pub mod assistant;
pub mod copilot;
pub mod speech;

pub use assistant::{analyze_health, reply, should_auto_analyze, HealthAnalysis};
pub use copilot::{copilot_report, CopilotRequest, COPILOT_DISCLAIMER};
pub use speech::{speech_request, speech_text, SpeechRequest};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use flarehealth_contracts::{
        error::FlareHealthError,
        patient::{PatientId, PatientRecord},
        settings::{Language, Settings},
        vitals::{BloodPressure, VitalsSnapshot},
    };
    use flarehealth_risk::assess_risks;

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn vitals(hr: i32, sys: i32, dia: i32, glucose: i32, bmi: f64, stress: i32) -> VitalsSnapshot {
        VitalsSnapshot {
            heart_rate: hr,
            blood_pressure: BloodPressure::new(sys, dia),
            glucose,
            bmi,
            stress_level: stress,
        }
    }

    fn john() -> PatientRecord {
        PatientRecord {
            patient_id: PatientId::new("FLR-2024-9834"),
            patient_name: "John Anderson".to_string(),
            risk_score: 82,
            vitals: vitals(88, 145, 95, 185, 31.2, 8),
            medications: vec!["Metformin 500mg".to_string(), "Amlodipine 5mg".to_string()],
            allergies: vec!["Penicillin".to_string(), "NSAIDs".to_string()],
            last_visit: None,
        }
    }

    fn david() -> PatientRecord {
        PatientRecord {
            patient_id: PatientId::new("FLR-2024-1289"),
            patient_name: "David Kim".to_string(),
            risk_score: 38,
            vitals: vitals(68, 118, 76, 92, 22.8, 3),
            medications: vec![],
            allergies: vec!["None reported".to_string()],
            last_visit: None,
        }
    }

    fn report(request: CopilotRequest, record: &PatientRecord) -> String {
        copilot_report(&request, record, &assess_risks(&record.vitals))
    }

    // ── Co-pilot ──────────────────────────────────────────────────────────────

    #[test]
    fn summary_lists_findings_medications_and_allergies() {
        let text = report(CopilotRequest::Summarize, &john());

        assert!(text.starts_with("**Case Summary for John Anderson**"));
        assert!(text.contains("**Overall Risk Score:** 82/100"));
        assert!(text.contains("• Cardiac Risk: HIGH (100%)"));
        assert!(text.contains("• Diabetes Risk: HIGH (85%)"));
        assert!(text.contains("• Hypertension: HIGH (60%)"));
        assert!(text.contains("• Mental Stress: HIGH (80%)"));
        assert!(text.contains("**Current Medications:** Metformin 500mg, Amlodipine 5mg"));
        assert!(text.contains("**Allergies:** Penicillin, NSAIDs"));
        assert!(text.ends_with(COPILOT_DISCLAIMER));
    }

    #[test]
    fn summary_with_no_medications_says_none() {
        let text = report(CopilotRequest::Summarize, &david());
        assert!(text.contains("**Current Medications:** None\n"));
        assert!(text.contains("• Cardiac Risk: LOW (0%)"));
    }

    #[test]
    fn lifestyle_sections_follow_non_low_levels() {
        let high = report(CopilotRequest::Lifestyle, &john());
        assert!(high.contains("**Diet (Diabetes Management):**"));
        assert!(high.contains("**Cardiovascular Health:**"));
        assert!(high.contains("DASH diet (low sodium <2300mg/day)"));
        assert!(high.contains("**Mental Wellness:**"));
        assert!(high.contains("**General Advice:**"));

        let low = report(CopilotRequest::Lifestyle, &david());
        assert!(!low.contains("**Diet (Diabetes Management):**"));
        assert!(!low.contains("**Cardiovascular Health:**"));
        assert!(!low.contains("**Mental Wellness:**"));
        assert!(low.contains("**General Advice:**"));
        assert!(low.contains("Stay hydrated (8 glasses water/day)"));
    }

    #[test]
    fn follow_up_timeline_tracks_aggregate_score() {
        let mut record = john();
        for (score, interval) in [(82, "4-6 weeks"), (70, "4-6 weeks"), (69, "2-3 months"), (50, "2-3 months"), (49, "6 months")] {
            record.risk_score = score;
            let text = report(CopilotRequest::FollowUp, &record);
            assert!(
                text.contains(&format!("**Suggested Timeline:** {}", interval)),
                "score {score} should map to {interval}"
            );
        }
    }

    #[test]
    fn follow_up_monitoring_follows_non_low_levels() {
        let high = report(CopilotRequest::FollowUp, &john());
        assert!(high.contains("• HbA1c: Every 3 months"));
        assert!(high.contains("• In-office check: Every 4 weeks"));
        assert!(high.contains("• ECG: Within 3 months"));
        assert!(high.contains("**Next Visit Agenda:**"));

        let low = report(CopilotRequest::FollowUp, &david());
        assert!(!low.contains("HbA1c"));
        assert!(!low.contains("In-office check"));
        assert!(!low.contains("ECG"));
        assert!(low.contains("**Suggested Timeline:** 6 months"));
    }

    #[test]
    fn custom_request_is_echoed_with_disclaimer() {
        let text = report(CopilotRequest::Custom("Any contraindications?".to_string()), &john());
        assert!(text.starts_with("Any contraindications?\n\n---\n"));
        assert!(text.ends_with(COPILOT_DISCLAIMER));
    }

    #[test]
    fn copilot_request_parsing() {
        assert_eq!("Summarize".parse::<CopilotRequest>().unwrap(), CopilotRequest::Summarize);
        assert_eq!("follow-up".parse::<CopilotRequest>().unwrap(), CopilotRequest::FollowUp);
        assert_eq!(" lifestyle ".parse::<CopilotRequest>().unwrap(), CopilotRequest::Lifestyle);
        assert!(matches!(
            "diagnose".parse::<CopilotRequest>(),
            Err(FlareHealthError::ConfigError { .. })
        ));
        assert_eq!(CopilotRequest::FollowUp.prompt(), "Followup this case");
    }

    // ── Patient assistant ─────────────────────────────────────────────────────

    #[test]
    fn analysis_for_stressed_hypertensive_diabetic() {
        let analysis = analyze_health(&john().vitals, Some(5.0));

        assert!(analysis.text.starts_with("I notice your stress level is quite high (8/10)."));
        assert!(analysis.text.contains("Combined with only 5 hours of sleep"));
        assert!(analysis.text.contains("High Blood Pressure Detected (145/95 mmHg)"));
        assert!(analysis.text.contains("Elevated Blood Glucose (185 mg/dL)"));
        assert!(analysis.text.contains("Medical Disclaimer"));
        assert_eq!(analysis.suggested_medications, vec!["Amlodipine 5mg", "Metformin 500mg"]);
    }

    #[test]
    fn analysis_thresholds_are_inclusive() {
        let at = analyze_health(&vitals(70, 140, 80, 180, 22.0, 7), None);
        assert_eq!(at.suggested_medications, vec!["Amlodipine 5mg", "Metformin 500mg"]);
        assert!(at.text.contains("stress level is quite high (7/10)"));
        assert!(!at.text.contains("hours of sleep"));

        let below = analyze_health(&vitals(70, 139, 80, 179, 22.0, 6), Some(4.0));
        assert!(below.suggested_medications.is_empty());
        assert!(!below.text.contains("stress level"));
        assert!(below.text.contains("Medical Disclaimer"));
    }

    #[test]
    fn adequate_sleep_is_not_mentioned() {
        let analysis = analyze_health(&vitals(70, 120, 80, 90, 22.0, 9), Some(7.5));
        assert!(!analysis.text.contains("hours of sleep"));
    }

    #[test]
    fn auto_analysis_opens_at_high_stress() {
        assert!(should_auto_analyze(&vitals(70, 120, 80, 90, 22.0, 7)));
        assert!(!should_auto_analyze(&vitals(70, 120, 80, 90, 22.0, 6)));
    }

    #[test]
    fn reply_matches_topics_in_priority_order() {
        let v = john().vitals;

        assert!(reply("I have so much ANXIETY", Some(&v)).contains("4-7-8 Breathing"));
        // Stress wins over sleep.
        assert!(reply("stress is ruining my sleep", Some(&v)).contains("Grounding Technique"));
        assert!(reply("Tips for better sleep?", None).contains("Avoid caffeine after 2 PM"));
        assert!(reply("hello", None).contains("What would you like to know more about?"));
    }

    #[test]
    fn medication_reply_uses_vitals() {
        let text = reply("which medicine should I take", Some(&john().vitals));
        assert!(text.contains("For blood pressure: Amlodipine 5mg"));
        assert!(text.contains("For glucose: Metformin 500mg"));
        assert!(text.contains("You MUST consult your doctor"));

        // Glucose must exceed 180 for the chat suggestion.
        let borderline = reply("medication?", Some(&vitals(70, 120, 80, 180, 22.0, 2)));
        assert!(!borderline.contains("Metformin"));
        assert!(!borderline.contains("Amlodipine"));

        let no_vitals = reply("medication?", None);
        assert!(!no_vitals.contains("may be recommended"));
    }

    // ── Speech ────────────────────────────────────────────────────────────────

    #[test]
    fn speech_text_strips_markdown_and_truncates() {
        assert_eq!(speech_text("**Hi**\n# there_"), "  Hi     there ");
        assert_eq!(speech_text(&"a".repeat(800)).chars().count(), 500);
    }

    #[test]
    fn speech_request_respects_settings() {
        let mut settings = Settings::default();
        assert!(speech_request("hello", &settings).is_none());

        settings.voice_output_enabled = true;
        settings.language = Language::Hi;
        let request = speech_request("**hello**", &settings).unwrap();
        assert_eq!(request.text, "  hello  ");
        assert_eq!(request.lang, "hi-IN");
    }
}
