//! Clinician co-pilot reports.
//!
//! Every report is assembled from fixed templates keyed on the patient's
//! sub-risk levels and aggregate risk score, then closed with the
//! decision-support disclaimer. Output is Markdown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use flarehealth_contracts::{
    error::{FlareHealthError, FlareHealthResult},
    patient::PatientRecord,
    risk::{RiskAssessment, RiskLevel, SubRisks},
};

/// Appended to every co-pilot report.
pub const COPILOT_DISCLAIMER: &str =
    "⚠️ **Disclaimer:** This AI Co-Pilot is for decision support only and not a replacement for clinical judgment.";

/// What the clinician asked the co-pilot for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopilotRequest {
    Summarize,
    Lifestyle,
    FollowUp,
    /// Free-text question. Echoed back with the disclaimer.
    Custom(String),
}

impl CopilotRequest {
    /// The chat line shown for the clinician's side of the exchange.
    pub fn prompt(&self) -> String {
        match self {
            CopilotRequest::Summarize => "Summarize this case".to_string(),
            CopilotRequest::Lifestyle => "Lifestyle this case".to_string(),
            CopilotRequest::FollowUp => "Followup this case".to_string(),
            CopilotRequest::Custom(text) => text.clone(),
        }
    }
}

impl FromStr for CopilotRequest {
    type Err = FlareHealthError;

    /// Parse one of the three canned requests.
    fn from_str(s: &str) -> FlareHealthResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "summarize" | "summary" => Ok(CopilotRequest::Summarize),
            "lifestyle" => Ok(CopilotRequest::Lifestyle),
            "followup" | "follow-up" => Ok(CopilotRequest::FollowUp),
            other => Err(FlareHealthError::ConfigError {
                reason: format!(
                    "unknown co-pilot request '{}' (expected summarize, lifestyle, or followup)",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for CopilotRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopilotRequest::Summarize => f.write_str("summarize"),
            CopilotRequest::Lifestyle => f.write_str("lifestyle"),
            CopilotRequest::FollowUp => f.write_str("followup"),
            CopilotRequest::Custom(_) => f.write_str("custom"),
        }
    }
}

// ── Report assembly ───────────────────────────────────────────────────────────

/// Build the co-pilot response for `request` about `record`.
///
/// `risks` must be the sub-risks computed from `record.vitals`.
pub fn copilot_report(request: &CopilotRequest, record: &PatientRecord, risks: &SubRisks) -> String {
    debug!(patient_id = %record.patient_id, request = %request, "building co-pilot report");

    let mut report = match request {
        CopilotRequest::Summarize => summarize(record, risks),
        CopilotRequest::Lifestyle => lifestyle(record, risks),
        CopilotRequest::FollowUp => follow_up(record, risks),
        CopilotRequest::Custom(text) => text.clone(),
    };

    report.push_str("\n\n---\n");
    report.push_str(COPILOT_DISCLAIMER);
    report
}

fn finding(label: &str, risk: &RiskAssessment) -> String {
    format!("• {}: {} ({}%)\n", label, risk.level.as_str().to_uppercase(), risk.score)
}

fn joined_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn bullets(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("• {}\n", l)).collect()
}

fn summarize(record: &PatientRecord, risks: &SubRisks) -> String {
    let mut out = format!("**Case Summary for {}**\n\n", record.patient_name);
    out.push_str(&format!("**Overall Risk Score:** {}/100\n\n", record.risk_score));
    out.push_str("**Key Findings:**\n");
    out.push_str(&finding("Cardiac Risk", &risks.cardiac));
    out.push_str(&finding("Diabetes Risk", &risks.diabetes));
    out.push_str(&finding("Hypertension", &risks.hypertension));
    out.push_str(&finding("Mental Stress", &risks.mental_stress));
    out.push('\n');
    out.push_str(&format!(
        "**Current Medications:** {}\n",
        joined_or(&record.medications, "None")
    ));
    out.push_str(&format!("**Allergies:** {}", joined_or(&record.allergies, "None reported")));
    out
}

fn lifestyle(record: &PatientRecord, risks: &SubRisks) -> String {
    let mut out = format!("**Lifestyle Recommendations for {}**\n\n", record.patient_name);

    if risks.diabetes.level != RiskLevel::Low {
        out.push_str("**Diet (Diabetes Management):**\n");
        out.push_str(&bullets(&[
            "Follow low-glycemic index diet",
            "Limit refined carbohydrates",
            "Increase fiber intake (whole grains, vegetables)",
            "Monitor portion sizes",
        ]));
        out.push('\n');
    }

    if risks.hypertension.level != RiskLevel::Low || risks.cardiac.level != RiskLevel::Low {
        out.push_str("**Cardiovascular Health:**\n");
        out.push_str(&bullets(&[
            "DASH diet (low sodium <2300mg/day)",
            "150 minutes moderate aerobic exercise per week",
            "Stress management (meditation, yoga)",
            "Limit alcohol consumption",
        ]));
        out.push('\n');
    }

    if risks.mental_stress.level != RiskLevel::Low {
        out.push_str("**Mental Wellness:**\n");
        out.push_str(&bullets(&[
            "Practice mindfulness daily (10-15 min)",
            "Ensure 7-9 hours quality sleep",
            "Consider cognitive behavioral therapy",
            "Regular physical activity for mood regulation",
        ]));
        out.push('\n');
    }

    out.push_str("**General Advice:**\n");
    out.push_str(&bullets(&[
        "Quit smoking if applicable",
        "Stay hydrated (8 glasses water/day)",
        "Regular health screenings",
    ]));
    out
}

fn follow_up(record: &PatientRecord, risks: &SubRisks) -> String {
    let mut out = String::from("**Follow-up Recommendations**\n\n");
    out.push_str(&format!(
        "**Suggested Timeline:** {}\n\n",
        record.urgency().follow_up_interval()
    ));
    out.push_str("**Monitoring Required:**\n");

    if risks.diabetes.level != RiskLevel::Low {
        out.push_str(&bullets(&[
            "Blood glucose: Weekly self-monitoring",
            "HbA1c: Every 3 months",
        ]));
    }
    if risks.hypertension.level != RiskLevel::Low {
        out.push_str(&bullets(&[
            "Blood pressure: Daily home monitoring",
            "In-office check: Every 4 weeks",
        ]));
    }
    if risks.cardiac.level != RiskLevel::Low {
        out.push_str(&bullets(&["ECG: Within 3 months", "Lipid panel: Every 6 months"]));
    }

    out.push_str("\n**Next Visit Agenda:**\n");
    out.push_str(&bullets(&[
        "Review medication adherence",
        "Assess lifestyle modifications",
        "Update treatment plan as needed",
    ]));
    out
}
