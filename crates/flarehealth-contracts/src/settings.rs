//! User preference types.
//!
//! Settings are loaded once at startup from a `SettingsStore`, mutated on
//! user action, and written back on every change.

use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ta,
    Hi,
}

impl Language {
    /// BCP-47 tag handed to speech engines, e.g. `"ta-IN"`.
    pub fn speech_code(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Ta => "ta-IN",
            Language::Hi => "hi-IN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Per-user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub voice_input_enabled: bool,
    pub voice_output_enabled: bool,
    pub theme: Theme,
}
