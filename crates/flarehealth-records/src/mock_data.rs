//! Built-in patient roster.
//!
//! All data in this module is hardcoded and fictional. It stands in for a
//! clinical database so the doctor portal has something to triage.

use chrono::NaiveDate;

use flarehealth_contracts::{
    patient::{PatientId, PatientRecord},
    vitals::{BloodPressure, VitalsSnapshot},
};

// ── Roster ────────────────────────────────────────────────────────────────────

struct MockPatient {
    id: &'static str,
    name: &'static str,
    risk_score: u8,
    heart_rate: i32,
    blood_pressure: (i32, i32),
    glucose: i32,
    bmi: f64,
    stress_level: i32,
    medications: &'static [&'static str],
    allergies: &'static [&'static str],
    last_visit: (i32, u32, u32),
}

const ROSTER: [MockPatient; 5] = [
    MockPatient {
        id: "FLR-2024-9834",
        name: "John Anderson",
        risk_score: 82,
        heart_rate: 88,
        blood_pressure: (145, 95),
        glucose: 185,
        bmi: 31.2,
        stress_level: 8,
        medications: &["Metformin 500mg", "Amlodipine 5mg"],
        allergies: &["Penicillin", "NSAIDs"],
        last_visit: (2024, 12, 1),
    },
    MockPatient {
        id: "FLR-2024-7821",
        name: "Sarah Chen",
        risk_score: 75,
        heart_rate: 92,
        blood_pressure: (150, 98),
        glucose: 95,
        bmi: 26.8,
        stress_level: 9,
        medications: &["Atorvastatin 20mg", "SSRIs"],
        allergies: &["Sulfa drugs"],
        last_visit: (2024, 11, 28),
    },
    MockPatient {
        id: "FLR-2024-5612",
        name: "Michael Rodriguez",
        risk_score: 68,
        heart_rate: 78,
        blood_pressure: (138, 88),
        glucose: 165,
        bmi: 29.5,
        stress_level: 6,
        medications: &["Metformin 850mg"],
        allergies: &["None reported"],
        last_visit: (2024, 12, 3),
    },
    MockPatient {
        id: "FLR-2024-3401",
        name: "Emily Watson",
        risk_score: 45,
        heart_rate: 72,
        blood_pressure: (125, 82),
        glucose: 98,
        bmi: 24.1,
        stress_level: 4,
        medications: &[],
        allergies: &["Latex"],
        last_visit: (2024, 11, 25),
    },
    MockPatient {
        id: "FLR-2024-1289",
        name: "David Kim",
        risk_score: 38,
        heart_rate: 68,
        blood_pressure: (118, 76),
        glucose: 92,
        bmi: 22.8,
        stress_level: 3,
        medications: &[],
        allergies: &["None reported"],
        last_visit: (2024, 12, 5),
    },
];

fn to_record(p: &MockPatient) -> PatientRecord {
    let (systolic, diastolic) = p.blood_pressure;
    let (year, month, day) = p.last_visit;

    PatientRecord {
        patient_id: PatientId::new(p.id),
        patient_name: p.name.to_string(),
        risk_score: p.risk_score,
        vitals: VitalsSnapshot {
            heart_rate: p.heart_rate,
            blood_pressure: BloodPressure::new(systolic, diastolic),
            glucose: p.glucose,
            bmi: p.bmi,
            stress_level: p.stress_level,
        },
        medications: p.medications.iter().map(|m| m.to_string()).collect(),
        allergies: p.allergies.iter().map(|a| a.to_string()).collect(),
        last_visit: NaiveDate::from_ymd_opt(year, month, day),
    }
}

/// The five demo patients, in roster order.
pub fn mock_roster() -> Vec<PatientRecord> {
    ROSTER.iter().map(to_record).collect()
}

// ── Medication catalogue ──────────────────────────────────────────────────────

/// Medications the doctor portal offers for a safety check.
pub const MEDICATION_OPTIONS: [&str; 10] = [
    "Metformin 500mg",
    "Metformin 850mg",
    "Amlodipine 5mg",
    "Amlodipine 10mg",
    "Atorvastatin 20mg",
    "NSAIDs",
    "SSRIs",
    "Prednisone",
    "Lisinopril",
    "Losartan",
];

/// Case-insensitive lookup of a catalogue entry.
///
/// Returns the canonical spelling, e.g. `"nsaids"` → `"NSAIDs"`.
pub fn find_medication(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    MEDICATION_OPTIONS
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(needle))
}
