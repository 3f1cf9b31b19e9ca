//! Vital-sign snapshot types.
//!
//! A `VitalsSnapshot` is one observation of a patient's measured state. It is
//! immutable once constructed and is the only input the risk engine and the
//! medication safety checker read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlareHealthError, FlareHealthResult};

/// A blood pressure reading in mmHg.
///
/// Serialized as the conventional `"SYS/DIA"` string, e.g. `"145/95"`.
/// Parsing rejects anything that is not exactly two integers separated by a
/// single `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BloodPressure {
    /// The higher number.
    pub systolic: i32,
    /// The lower number.
    pub diastolic: i32,
}

impl BloodPressure {
    pub fn new(systolic: i32, diastolic: i32) -> Self {
        Self { systolic, diastolic }
    }
}

impl FromStr for BloodPressure {
    type Err = FlareHealthError;

    fn from_str(s: &str) -> FlareHealthResult<Self> {
        let invalid = || FlareHealthError::InvalidVitals {
            reason: format!("blood pressure '{}' is not of the form SYS/DIA", s),
        };

        let (sys, dia) = s.trim().split_once('/').ok_or_else(invalid)?;
        let systolic = sys.trim().parse::<i32>().map_err(|_| invalid())?;
        let diastolic = dia.trim().parse::<i32>().map_err(|_| invalid())?;

        Ok(Self { systolic, diastolic })
    }
}

impl TryFrom<String> for BloodPressure {
    type Error = FlareHealthError;

    fn try_from(value: String) -> FlareHealthResult<Self> {
        value.parse()
    }
}

impl From<BloodPressure> for String {
    fn from(bp: BloodPressure) -> Self {
        bp.to_string()
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// One set of measured physiological values for a patient at a point in time.
///
/// Out-of-range values are accepted: the scoring rules treat them like any
/// other number. Only structurally malformed input is rejected, see
/// [`VitalsSnapshot::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// Beats per minute.
    pub heart_rate: i32,
    /// Systolic / diastolic pair.
    pub blood_pressure: BloodPressure,
    /// Fasting glucose, mg/dL.
    pub glucose: i32,
    /// Body-mass index.
    pub bmi: f64,
    /// Self-reported stress, 0–10.
    pub stress_level: i32,
}

impl VitalsSnapshot {
    /// Shorthand for `blood_pressure.systolic`.
    pub fn systolic(&self) -> i32 {
        self.blood_pressure.systolic
    }

    /// Shorthand for `blood_pressure.diastolic`.
    pub fn diastolic(&self) -> i32 {
        self.blood_pressure.diastolic
    }

    /// Reject snapshots the scoring rules cannot evaluate meaningfully.
    ///
    /// A NaN or infinite BMI compares false against every threshold and would
    /// silently score as the lowest bucket, so it is an `InvalidVitals` error.
    pub fn validate(&self) -> FlareHealthResult<()> {
        if !self.bmi.is_finite() {
            return Err(FlareHealthError::InvalidVitals {
                reason: format!("bmi must be a finite number, got {}", self.bmi),
            });
        }
        Ok(())
    }
}
