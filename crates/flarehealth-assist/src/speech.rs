//! Text-to-speech hand-off.
//!
//! Nothing here produces audio. It prepares what a speech engine would be
//! given: Markdown stripped to plain text, truncated, tagged with the BCP-47
//! code of the user's language.

use serde::{Deserialize, Serialize};

use flarehealth_contracts::settings::Settings;

/// Longest utterance handed to the speech engine, in characters.
pub const MAX_SPEECH_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    /// e.g. `"en-US"`, `"ta-IN"`.
    pub lang: String,
}

/// Replace Markdown emphasis, heading markers, and newlines with spaces and
/// keep at most [`MAX_SPEECH_CHARS`] characters.
pub fn speech_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '*' | '_' | '#' | '\n' => ' ',
            other => other,
        })
        .take(MAX_SPEECH_CHARS)
        .collect()
}

/// The speech request for `text`, or `None` when voice output is disabled.
pub fn speech_request(text: &str, settings: &Settings) -> Option<SpeechRequest> {
    if !settings.voice_output_enabled {
        return None;
    }
    Some(SpeechRequest {
        text: speech_text(text),
        lang: settings.language.speech_code().to_string(),
    })
}
