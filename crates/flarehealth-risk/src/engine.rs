//! Sub-risk scoring rules.
//!
//! Every dimension is an independent additive point table over the vitals
//! snapshot. Rules are summed unconditionally except where a dimension's
//! tiers are explicitly mutually exclusive (glucose, blood pressure, BMI
//! buckets). No rule looks at another dimension's result.
//!
//! | Dimension     | Points                                                            |
//! |---------------|-------------------------------------------------------------------|
//! | cardiac       | hr>85 +25, sys>140 +35, bmi>30 +20, stress>7 +20                  |
//! | diabetes      | glucose >180 +60 / >140 +40 / >100 +20, bmi>30 +25                |
//! | hypertension  | sys≥140∨dia≥90 +60 / sys≥130∨dia≥85 +40 / sys≥120 +20             |
//! | obesity       | bmi ≥35 → 85 / ≥30 → 65 / ≥25 → 40 / else 20                      |
//! | mental stress | stress × 10                                                       |

use tracing::debug;

use flarehealth_contracts::{
    risk::{RiskAssessment, SubRisks},
    vitals::VitalsSnapshot,
};

use crate::dimension::{CARDIAC, DIABETES, HYPERTENSION, MENTAL_STRESS, OBESITY};

/// Score all five dimensions for `vitals`.
///
/// Pure and deterministic: identical snapshots always produce identical
/// output. Out-of-range inputs are scored by the same rules with no special
/// cases.
pub fn assess_risks(vitals: &VitalsSnapshot) -> SubRisks {
    let risks = SubRisks {
        cardiac: cardiac_risk(vitals),
        diabetes: diabetes_risk(vitals),
        hypertension: hypertension_risk(vitals),
        obesity: obesity_risk(vitals),
        mental_stress: mental_stress_risk(vitals),
    };

    debug!(
        cardiac = risks.cardiac.score,
        diabetes = risks.diabetes.score,
        hypertension = risks.hypertension.score,
        obesity = risks.obesity.score,
        mental_stress = risks.mental_stress.score,
        "sub-risks assessed"
    );

    risks
}

pub fn cardiac_risk(vitals: &VitalsSnapshot) -> RiskAssessment {
    let mut score = 0;

    if vitals.heart_rate > 85 {
        score += 25;
    }
    if vitals.systolic() > 140 {
        score += 35;
    }
    if vitals.bmi > 30.0 {
        score += 20;
    }
    if vitals.stress_level > 7 {
        score += 20;
    }

    CARDIAC.assess(score)
}

pub fn diabetes_risk(vitals: &VitalsSnapshot) -> RiskAssessment {
    let mut score = if vitals.glucose > 180 {
        60
    } else if vitals.glucose > 140 {
        40
    } else if vitals.glucose > 100 {
        20
    } else {
        0
    };

    if vitals.bmi > 30.0 {
        score += 25;
    }

    DIABETES.assess(score)
}

pub fn hypertension_risk(vitals: &VitalsSnapshot) -> RiskAssessment {
    let (systolic, diastolic) = (vitals.systolic(), vitals.diastolic());

    let score = if systolic >= 140 || diastolic >= 90 {
        60
    } else if systolic >= 130 || diastolic >= 85 {
        40
    } else if systolic >= 120 {
        20
    } else {
        0
    };

    HYPERTENSION.assess(score)
}

/// The score is the BMI bucket value itself, not a sum.
pub fn obesity_risk(vitals: &VitalsSnapshot) -> RiskAssessment {
    let score = if vitals.bmi >= 35.0 {
        85
    } else if vitals.bmi >= 30.0 {
        65
    } else if vitals.bmi >= 25.0 {
        40
    } else {
        20
    };

    OBESITY.assess(score)
}

pub fn mental_stress_risk(vitals: &VitalsSnapshot) -> RiskAssessment {
    MENTAL_STRESS.assess(vitals.stress_level.saturating_mul(10))
}
