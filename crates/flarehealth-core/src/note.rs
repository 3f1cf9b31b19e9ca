//! Tamper-evident digests for clinical visit notes.

use sha2::{Digest, Sha256};

use flarehealth_contracts::error::{FlareHealthError, FlareHealthResult};

/// SHA-256 of the note's UTF-8 bytes as a lowercase 64-character hex string.
///
/// Blank notes (empty or whitespace only) are rejected with `InvalidNote`.
/// The text is hashed exactly as given, surrounding whitespace included, so
/// the digest matches what a verifier recomputes from the stored note.
pub fn digest_note(text: &str) -> FlareHealthResult<String> {
    if text.trim().is_empty() {
        return Err(FlareHealthError::InvalidNote {
            reason: "visit note is empty".to_string(),
        });
    }

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Build a block-explorer link for `hash`.
pub fn explorer_url(base_url: &str, hash: &str) -> String {
    format!("{}{}", base_url, hash)
}
