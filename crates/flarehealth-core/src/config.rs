//! Application configuration loaded from TOML.
//!
//! Every section is optional; a missing file section falls back to the
//! built-in defaults (mock roster, embedded safety rules, five-minute
//! passport tokens, in-memory settings).
//!
//! ```toml
//! [records]
//! path = "data/patients.json"
//!
//! [safety]
//! rules_path = "rules/medication_safety.toml"
//!
//! [passport]
//! token_ttl_secs = 300
//!
//! [ledger]
//! explorer_base_url = "https://coston2-explorer.flare.network/tx/"
//!
//! [settings]
//! path = "flarehealth-settings.toml"
//! ```

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use flarehealth_contracts::error::{FlareHealthError, FlareHealthResult};

/// Default lifetime of a passport access token.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 300;

/// Upper bound on a passport token lifetime (one day).
pub const MAX_TOKEN_TTL_SECS: u64 = 86_400;

/// Default block-explorer prefix for consent and note hashes.
pub const DEFAULT_EXPLORER_BASE_URL: &str = "https://coston2-explorer.flare.network/tx/";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsSection {
    /// JSON roster to load instead of the built-in mock patients.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetySection {
    /// TOML rule table to load instead of the embedded default.
    pub rules_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassportSection {
    pub token_ttl_secs: u64,
}

impl Default for PassportSection {
    fn default() -> Self {
        Self {
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSection {
    pub explorer_base_url: String,
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            explorer_base_url: DEFAULT_EXPLORER_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSection {
    /// Where user preferences are persisted. `None` keeps them in memory.
    pub path: Option<PathBuf>,
}

/// The top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlareHealthConfig {
    pub records: RecordsSection,
    pub safety: SafetySection,
    pub passport: PassportSection,
    pub ledger: LedgerSection,
    pub settings: SettingsSection,
}

impl FlareHealthConfig {
    /// Parse `s` as TOML configuration.
    ///
    /// Returns `FlareHealthError::ConfigError` if the TOML is malformed, does
    /// not match the schema, or sets a token lifetime outside 1 s – 1 day.
    pub fn from_toml_str(s: &str) -> FlareHealthResult<Self> {
        let config: FlareHealthConfig = toml::from_str(s).map_err(|e| FlareHealthError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;

        let ttl = config.passport.token_ttl_secs;
        if ttl == 0 || ttl > MAX_TOKEN_TTL_SECS {
            return Err(FlareHealthError::ConfigError {
                reason: format!(
                    "passport.token_ttl_secs must be between 1 and {}, got {}",
                    MAX_TOKEN_TTL_SECS, ttl
                ),
            });
        }

        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> FlareHealthResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FlareHealthError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Passport token lifetime as a `chrono::Duration`.
    pub fn token_ttl(&self) -> Duration {
        let secs = self.passport.token_ttl_secs.min(MAX_TOKEN_TTL_SECS);
        Duration::seconds(secs as i64)
    }
}
