//! Error types shared by every FlareHealth crate.
//!
//! All fallible operations return `FlareHealthResult<T>`. Variants carry a
//! human-readable `reason` so the CLI and the consent timeline can report
//! exactly what went wrong.

use thiserror::Error;

/// The unified error type for the FlareHealth workspace.
#[derive(Debug, Error)]
pub enum FlareHealthError {
    /// A vitals snapshot is malformed (e.g. a blood pressure string that is
    /// not `SYS/DIA`, or a non-finite BMI).
    #[error("invalid vitals: {reason}")]
    InvalidVitals { reason: String },

    /// No patient with this identifier exists in the store.
    #[error("patient '{patient_id}' not found")]
    PatientNotFound { patient_id: String },

    /// A clinical note was rejected before hashing.
    #[error("invalid clinical note: {reason}")]
    InvalidNote { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An imported document failed JSON Schema validation.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// The consent timeline could not record an event.
    ///
    /// Treated as fatal for the operation that triggered it.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// A health-passport token could not be issued or redeemed.
    #[error("passport error: {reason}")]
    PassportError { reason: String },

    /// A health-passport token was used after its lifetime ended.
    #[error("access token '{token_id}' expired")]
    TokenExpired { token_id: String },

    /// User settings could not be loaded or persisted.
    #[error("settings error: {reason}")]
    SettingsError { reason: String },
}

/// Convenience alias used throughout the FlareHealth crates.
pub type FlareHealthResult<T> = Result<T, FlareHealthError>;
