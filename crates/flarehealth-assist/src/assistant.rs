//! Patient-facing health assistant.
//!
//! `analyze_health` turns a vitals snapshot into a short Markdown analysis
//! with suggested medications. `reply` answers free-text chat messages by
//! keyword. Neither calls a model; both are deterministic templates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use flarehealth_contracts::vitals::VitalsSnapshot;

/// Stress level (0–10) at or above which the assistant raises stress advice
/// and opens itself automatically.
pub const HIGH_STRESS_LEVEL: i32 = 7;
/// Systolic pressure at or above which a blood pressure section is added.
pub const HIGH_SYSTOLIC: i32 = 140;
/// Glucose (mg/dL) at or above which a glucose section is added.
pub const HIGH_GLUCOSE: i32 = 180;
/// Sleep below this many hours is called out next to high stress.
pub const SHORT_SLEEP_HOURS: f64 = 6.0;

pub const BLOOD_PRESSURE_MEDICATION: &str = "Amlodipine 5mg";
pub const GLUCOSE_MEDICATION: &str = "Metformin 500mg";

pub const MEDICAL_DISCLAIMER: &str = "⚠️ **Medical Disclaimer:** This is AI-generated advice for demonstration purposes only. \
The medication suggestions come from rule-based analysis of your health data. \
**Please consult a licensed healthcare professional before taking any medication or making health decisions.**";

/// Result of [`analyze_health`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAnalysis {
    /// Markdown text shown to the patient.
    pub text: String,
    /// Medications named in the text, in the order they were suggested.
    pub suggested_medications: Vec<String>,
}

/// Whether the assistant should open with an analysis without being asked.
pub fn should_auto_analyze(vitals: &VitalsSnapshot) -> bool {
    vitals.stress_level >= HIGH_STRESS_LEVEL
}

/// Analyse `vitals` (and optionally last night's sleep) for the patient.
///
/// Sections are added for high stress, high systolic pressure, and high
/// glucose, in that order. The medical disclaimer is always appended.
pub fn analyze_health(vitals: &VitalsSnapshot, sleep_hours: Option<f64>) -> HealthAnalysis {
    let mut text = String::new();
    let mut suggested_medications = Vec::new();

    if vitals.stress_level >= HIGH_STRESS_LEVEL {
        text.push_str(&format!(
            "I notice your stress level is quite high ({}/10). ",
            vitals.stress_level
        ));
        if let Some(hours) = sleep_hours.filter(|h| *h < SHORT_SLEEP_HOURS) {
            text.push_str(&format!(
                "Combined with only {} hours of sleep, this could impact your mental and physical health. ",
                hours
            ));
        }
        text.push_str("\n\n**Recommendations:**\n");
        text.push_str("• Practice deep breathing exercises (4-7-8 technique)\n");
        text.push_str("• Consider meditation or mindfulness apps\n");
        text.push_str("• Maintain consistent sleep schedule\n");
        text.push_str("• Regular physical activity\n\n");
        text.push_str("If symptoms persist, please consult a mental health professional.");
    }

    if vitals.systolic() >= HIGH_SYSTOLIC {
        text.push_str(&format!(
            "\n\n⚠️ **High Blood Pressure Detected ({} mmHg)**\n\n",
            vitals.blood_pressure
        ));
        text.push_str("Your blood pressure is elevated. Based on rule-based analysis:\n\n");
        text.push_str(&format!(
            "• **Suggested Medication:** {} (Calcium channel blocker)\n",
            BLOOD_PRESSURE_MEDICATION
        ));
        text.push_str("• Reduce sodium intake\n");
        text.push_str("• Regular exercise\n");
        text.push_str("• Monitor daily\n\n");
        suggested_medications.push(BLOOD_PRESSURE_MEDICATION.to_string());
    }

    if vitals.glucose >= HIGH_GLUCOSE {
        text.push_str(&format!(
            "\n\n⚠️ **Elevated Blood Glucose ({} mg/dL)**\n\n",
            vitals.glucose
        ));
        text.push_str("Your glucose levels are high. Based on rule-based analysis:\n\n");
        text.push_str(&format!("• **Suggested Medication:** {}\n", GLUCOSE_MEDICATION));
        text.push_str("• Follow diabetic diet plan\n");
        text.push_str("• Check glucose regularly\n");
        text.push_str("• Stay hydrated\n\n");
        suggested_medications.push(GLUCOSE_MEDICATION.to_string());
    }

    text.push_str("\n\n---\n");
    text.push_str(MEDICAL_DISCLAIMER);

    debug!(suggestions = suggested_medications.len(), "health analysis built");

    HealthAnalysis { text, suggested_medications }
}

/// Answer a chat message.
///
/// Topics are matched case-insensitively in this order: stress or anxiety,
/// medication or medicine, sleep. Anything else gets the help menu.
/// Medication suggestions need `vitals`; without them only the consult
/// warning is returned.
pub fn reply(message: &str, vitals: Option<&VitalsSnapshot>) -> String {
    let lower = message.to_lowercase();

    if lower.contains("stress") || lower.contains("anxiety") {
        let mut out = String::from("I understand you're feeling stressed. Here are some immediate techniques:\n\n");
        out.push_str("• **4-7-8 Breathing:** Inhale for 4 seconds, hold for 7, exhale for 8\n");
        out.push_str("• **Progressive Muscle Relaxation:** Tense and release muscle groups\n");
        out.push_str("• **Grounding Technique:** Name 5 things you see, 4 you hear, 3 you feel\n\n");
        out.push_str("If stress is severe or persistent, please reach out to a mental health professional.");
        return out;
    }

    if lower.contains("medication") || lower.contains("medicine") {
        let mut out = String::from("Based on your health data analysis:\n\n");
        if let Some(v) = vitals {
            if v.systolic() >= HIGH_SYSTOLIC {
                out.push_str(&format!(
                    "• For blood pressure: {} may be recommended\n",
                    BLOOD_PRESSURE_MEDICATION
                ));
            }
            if v.glucose > HIGH_GLUCOSE {
                out.push_str(&format!("• For glucose: {} may be recommended\n", GLUCOSE_MEDICATION));
            }
        }
        out.push_str(
            "\n⚠️ **These are rule-suggested medications. You MUST consult your doctor before taking any medication.**",
        );
        return out;
    }

    if lower.contains("sleep") {
        let mut out = String::from("Good sleep hygiene tips:\n\n");
        out.push_str("• Maintain consistent sleep schedule\n");
        out.push_str("• Avoid screens 1 hour before bed\n");
        out.push_str("• Keep bedroom cool and dark\n");
        out.push_str("• Avoid caffeine after 2 PM\n");
        out.push_str("• Try relaxation techniques before bed");
        return out;
    }

    let mut out = String::from("I'm here to help with health guidance. I can provide information about:\n\n");
    out.push_str("• Stress management techniques\n");
    out.push_str("• Medication information (with disclaimers)\n");
    out.push_str("• Sleep improvement tips\n");
    out.push_str("• General wellness advice\n\n");
    out.push_str("What would you like to know more about?");
    out
}
