//! FlareHealth Clinical Rule Engine: demo CLI
//!
//! Drives the doctor portal and patient assistant from the command line
//! against the built-in five-patient roster (or a roster named in the config
//! file).
//!
//! Usage:
//!   cargo run -p demo -- queue
//!   cargo run -p demo -- assess FLR-2024-9834
//!   cargo run -p demo -- safety FLR-2024-9834 --med NSAIDs --med SSRIs
//!   cargo run -p demo -- copilot FLR-2024-7821 followup
//!   cargo run -p demo -- hash-note FLR-2024-9834 "BP recheck in 2 weeks"
//!   cargo run -p demo -- passport --share allergies --share insurance
//!   cargo run -p demo -- chat "how can I sleep better?" --patient FLR-2024-9834
//!   cargo run -p demo -- settings set --language ta --voice-output true

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use flarehealth_contracts::{
    passport::SharePermission,
    settings::{Language, Theme},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// FlareHealth: rule-based clinical decision support demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "FlareHealth clinical rule engine demo",
    long_about = "Triage, sub-risk scoring, medication safety checks, consent-chained\n\
                  note hashing, health-passport tokens, and the rule-based assistants."
)]
struct Cli {
    /// Application config (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every patient, highest aggregate risk first.
    Queue,
    /// Open a patient record: sub-risks, safety warnings, consent entry.
    Assess { patient_id: String },
    /// Check a medication selection against a patient's vitals.
    Safety {
        patient_id: String,
        /// Medication to check (repeatable). Defaults to the patient's own list.
        #[arg(long = "med")]
        medications: Vec<String>,
    },
    /// Ask the clinician co-pilot about a patient.
    Copilot {
        patient_id: String,
        /// summarize, lifestyle, or followup
        kind: String,
    },
    /// Hash a visit note into the patient's consent timeline.
    HashNote { patient_id: String, text: String },
    /// Issue a one-time health-passport access token.
    Passport {
        /// Data to share (repeatable).
        #[arg(long = "share", value_enum, required = true)]
        share: Vec<ShareArg>,
    },
    /// Patient assistant health analysis from a patient's vitals.
    Analyze {
        patient_id: String,
        /// Hours slept last night.
        #[arg(long)]
        sleep_hours: Option<f64>,
    },
    /// Send a message to the patient assistant.
    Chat {
        message: String,
        /// Use this patient's vitals for medication suggestions.
        #[arg(long = "patient")]
        patient_id: Option<String>,
    },
    /// Show or change user settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    Set {
        #[arg(long, value_enum)]
        language: Option<LanguageArg>,
        #[arg(long)]
        voice_input: Option<bool>,
        #[arg(long)]
        voice_output: Option<bool>,
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShareArg {
    Allergies,
    MedicalHistory,
    Insurance,
}

impl From<ShareArg> for SharePermission {
    fn from(arg: ShareArg) -> Self {
        match arg {
            ShareArg::Allergies => SharePermission::Allergies,
            ShareArg::MedicalHistory => SharePermission::MedicalHistory,
            ShareArg::Insurance => SharePermission::Insurance,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    En,
    Ta,
    Hi,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::En,
            LanguageArg::Ta => Language::Ta,
            LanguageArg::Hi => Language::Hi,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = commands::App::load(cli.config.as_deref()).and_then(|app| match cli.command {
        Command::Queue => app.queue(),
        Command::Assess { patient_id } => app.assess(&patient_id),
        Command::Safety { patient_id, medications } => app.safety(&patient_id, &medications),
        Command::Copilot { patient_id, kind } => app.copilot(&patient_id, &kind),
        Command::HashNote { patient_id, text } => app.hash_note(&patient_id, &text),
        Command::Passport { share } => {
            app.passport(share.into_iter().map(SharePermission::from).collect())
        }
        Command::Analyze { patient_id, sleep_hours } => app.analyze(&patient_id, sleep_hours),
        Command::Chat { message, patient_id } => app.chat(&message, patient_id.as_deref()),
        Command::Settings { action: SettingsAction::Show } => app.settings_show(),
        Command::Settings {
            action: SettingsAction::Set { language, voice_input, voice_output, theme },
        } => app.settings_set(commands::SettingsUpdate {
            language: language.map(Language::from),
            voice_input,
            voice_output,
            theme: theme.map(Theme::from),
        }),
    });

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}
