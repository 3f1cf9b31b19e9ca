//! Per-dimension level thresholds and advisory texts.
//!
//! Each dimension buckets its score with its own pair of thresholds and
//! picks one of three fixed explanations by the resulting level.

use flarehealth_contracts::risk::{RiskAssessment, RiskDimension, RiskLevel};

/// Level boundaries for one dimension.
///
/// `score < medium_from` is low, `score < high_from` is medium, else high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub medium_from: i32,
    pub high_from: i32,
}

/// Static scoring metadata for a dimension.
#[derive(Debug, Clone, Copy)]
pub struct DimensionRules {
    pub dimension: RiskDimension,
    pub thresholds: Thresholds,
    pub low: &'static str,
    pub medium: &'static str,
    pub high: &'static str,
}

impl DimensionRules {
    /// Wrap a raw score into a `RiskAssessment` for this dimension.
    pub fn assess(&self, score: i32) -> RiskAssessment {
        let level = RiskLevel::from_score(
            score,
            self.thresholds.medium_from,
            self.thresholds.high_from,
        );
        let explanation = match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        };

        RiskAssessment {
            score,
            level,
            explanation: explanation.to_string(),
        }
    }
}

pub const CARDIAC: DimensionRules = DimensionRules {
    dimension: RiskDimension::Cardiac,
    thresholds: Thresholds { medium_from: 40, high_from: 70 },
    low: "Cardiac health appears stable. Continue regular monitoring.",
    medium: "Moderate cardiac indicators. Monitor blood pressure and maintain healthy lifestyle.",
    high: "Elevated heart rate and blood pressure indicate increased cardiovascular risk. \
           Lifestyle changes and medication review recommended.",
};

pub const DIABETES: DimensionRules = DimensionRules {
    dimension: RiskDimension::Diabetes,
    thresholds: Thresholds { medium_from: 30, high_from: 60 },
    low: "Blood glucose within normal range. Maintain healthy diet and exercise.",
    medium: "Pre-diabetic range detected. Dietary modifications and regular glucose monitoring advised.",
    high: "Glucose levels significantly elevated. Immediate diabetes management and medication \
           adjustment needed.",
};

pub const HYPERTENSION: DimensionRules = DimensionRules {
    dimension: RiskDimension::Hypertension,
    thresholds: Thresholds { medium_from: 30, high_from: 50 },
    low: "Blood pressure within healthy range. Continue preventive measures.",
    medium: "Elevated blood pressure. Reduce sodium intake and increase physical activity.",
    high: "Stage 2 hypertension detected. Antihypertensive medication and lifestyle intervention \
           required.",
};

pub const OBESITY: DimensionRules = DimensionRules {
    dimension: RiskDimension::Obesity,
    thresholds: Thresholds { medium_from: 40, high_from: 70 },
    low: "Healthy weight range. Maintain balanced diet and regular activity.",
    medium: "Overweight or obese range. Dietary counseling and exercise program recommended.",
    high: "BMI indicates class II obesity. Comprehensive weight management program needed.",
};

pub const MENTAL_STRESS: DimensionRules = DimensionRules {
    dimension: RiskDimension::MentalStress,
    thresholds: Thresholds { medium_from: 50, high_from: 70 },
    low: "Stress levels within manageable range. Continue self-care practices.",
    medium: "Moderate stress indicators. Consider relaxation techniques and workload management.",
    high: "Severe stress levels detected. Mental health evaluation and stress management therapy \
           recommended.",
};

/// Thresholds and explanations for `dimension`.
pub fn rules_for(dimension: RiskDimension) -> &'static DimensionRules {
    match dimension {
        RiskDimension::Cardiac => &CARDIAC,
        RiskDimension::Diabetes => &DIABETES,
        RiskDimension::Hypertension => &HYPERTENSION,
        RiskDimension::Obesity => &OBESITY,
        RiskDimension::MentalStress => &MENTAL_STRESS,
    }
}
