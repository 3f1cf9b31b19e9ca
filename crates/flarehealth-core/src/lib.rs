//! # flarehealth-core
//!
//! The clinician workspace for the FlareHealth rule engine.
//!
//! This crate provides:
//! - The traits at the seams (`PatientStore`, `SafetyChecker`, `AuditWriter`,
//!   `SettingsStore`)
//! - `ClinicalWorkspace`, which wires them together for doctor-portal
//!   operations (priority queue, record access, note hashing)
//! - One-time health-passport access tokens
//! - TOML application configuration and settings stores
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flarehealth_core::{ClinicalWorkspace, traits::{PatientStore, SafetyChecker, AuditWriter}};
//! ```

pub mod config;
pub mod note;
pub mod passport;
pub mod settings;
pub mod traits;
pub mod workspace;

pub use config::FlareHealthConfig;
pub use passport::{AccessToken, TokenStatus};
pub use workspace::{ClinicalWorkspace, NoteReceipt, PatientInsights, QueueEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────
