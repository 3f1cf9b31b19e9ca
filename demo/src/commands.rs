//! Subcommand implementations.
//!
//! `App` wires the real components together the way a deployment would:
//! roster store, TOML safety checker, hash-chained consent ledger, and a
//! settings store, all chosen from the application config.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use flarehealth_assist::{analyze_health, copilot_report, reply, speech_request, CopilotRequest};
use flarehealth_audit::InMemoryConsentLedger;
use flarehealth_contracts::{
    consent::SessionId,
    error::{FlareHealthError, FlareHealthResult},
    passport::PermissionSet,
    patient::PatientId,
    risk::SubRisks,
    safety::MedicationSafetyWarning,
    settings::{Language, Settings, Theme},
};
use flarehealth_core::{
    settings::{InMemorySettingsStore, TomlFileSettingsStore},
    traits::{PatientStore, SettingsStore},
    AccessToken, ClinicalWorkspace, FlareHealthConfig,
};
use flarehealth_records::{find_medication, InMemoryPatientStore};
use flarehealth_safety::TomlSafetyChecker;

/// Changes requested by `settings set`. `None` leaves a field as it is.
pub struct SettingsUpdate {
    pub language: Option<Language>,
    pub voice_input: Option<bool>,
    pub voice_output: Option<bool>,
    pub theme: Option<Theme>,
}

pub struct App {
    config: FlareHealthConfig,
    store: InMemoryPatientStore,
    ledger: Arc<InMemoryConsentLedger>,
    workspace: ClinicalWorkspace,
    settings: Box<dyn SettingsStore>,
}

impl App {
    pub fn load(config_path: Option<&Path>) -> FlareHealthResult<Self> {
        let config = match config_path {
            Some(path) => FlareHealthConfig::from_file(path)?,
            None => FlareHealthConfig::default(),
        };

        let store = match &config.records.path {
            Some(path) => InMemoryPatientStore::from_file(path)?,
            None => InMemoryPatientStore::with_mock_roster(),
        };

        let safety = match &config.safety.rules_path {
            Some(path) => TomlSafetyChecker::from_file(path)?,
            None => TomlSafetyChecker::with_default_rules()?,
        };

        let settings: Box<dyn SettingsStore> = match &config.settings.path {
            Some(path) => Box::new(TomlFileSettingsStore::new(path)),
            None => Box::new(InMemorySettingsStore::default()),
        };

        let session_id = SessionId::new();
        let ledger = Arc::new(InMemoryConsentLedger::new(&session_id));
        let workspace = ClinicalWorkspace::new(
            Box::new(store.clone()),
            Box::new(safety),
            Box::new(Arc::clone(&ledger)),
            session_id,
        )
        .with_explorer_base_url(config.ledger.explorer_base_url.clone());

        info!(patients = store.len(), "demo session started");

        Ok(Self { config, store, ledger, workspace, settings })
    }

    // ── Doctor portal ─────────────────────────────────────────────────────────

    pub fn queue(&self) -> FlareHealthResult<()> {
        println!("=== Priority Queue ===");
        println!();
        for entry in self.workspace.priority_queue()? {
            let high: Vec<&str> = entry.high_risks.iter().map(|d| d.label()).collect();
            println!(
                "  {:<14} {:<20} {:>3}/100  {:<9} {}",
                entry.patient_id,
                entry.patient_name,
                entry.risk_score,
                entry.urgency.to_string(),
                if high.is_empty() { "-".to_string() } else { high.join(", ") }
            );
        }
        println!();
        Ok(())
    }

    pub fn assess(&self, patient_id: &str) -> FlareHealthResult<()> {
        let insights = self.workspace.open_patient(&PatientId::new(patient_id))?;
        let record = &insights.record;

        println!("=== {} ({}) ===", record.patient_name, record.patient_id);
        println!();
        println!("  Aggregate risk:   {}/100 ({})", record.risk_score, record.urgency());
        println!(
            "  Vitals:           HR {} bpm, BP {} mmHg, glucose {} mg/dL, BMI {:.1}, stress {}/10",
            record.vitals.heart_rate,
            record.vitals.blood_pressure,
            record.vitals.glucose,
            record.vitals.bmi,
            record.vitals.stress_level
        );
        println!("  Medications:      {}", list_or(&record.medications, "None"));
        println!("  Allergies:        {}", list_or(&record.allergies, "None reported"));
        if let Some(date) = record.last_visit {
            println!("  Last visit:       {}", date);
        }
        println!();
        print_risks(&insights.risks);
        print_warnings(&insights.warnings);
        println!("  Access recorded:  {}", insights.consent_ref);
        println!();

        self.workspace.close()
    }

    pub fn safety(&self, patient_id: &str, medications: &[String]) -> FlareHealthResult<()> {
        let id = PatientId::new(patient_id);
        let selection: Vec<String> = if medications.is_empty() {
            self.store.get(&id)?.medications
        } else {
            medications
                .iter()
                .map(|m| find_medication(m).map(str::to_string).unwrap_or_else(|| m.clone()))
                .collect()
        };

        let warnings = self.workspace.check_medications(&id, &selection)?;

        println!("=== Medication Safety: {} ===", id);
        println!();
        println!("  Selection: {}", list_or(&selection, "None"));
        println!();
        print_warnings(&warnings);
        Ok(())
    }

    pub fn copilot(&self, patient_id: &str, kind: &str) -> FlareHealthResult<()> {
        let request: CopilotRequest = kind.parse()?;
        let id = PatientId::new(patient_id);
        let record = self.store.get(&id)?;
        let risks = self.workspace.assess(&id)?;

        let report = copilot_report(&request, &record, &risks);
        println!("> {}", request.prompt());
        println!();
        println!("{}", report);
        self.speak(&report)
    }

    pub fn hash_note(&self, patient_id: &str, text: &str) -> FlareHealthResult<()> {
        let id = PatientId::new(patient_id);
        self.workspace.open_patient(&id)?;
        let receipt = self.workspace.hash_note(&id, text)?;

        println!("=== Clinical Note Hashed ===");
        println!();
        println!("  Patient:      {}", receipt.patient_id);
        println!("  SHA-256:      {}", receipt.digest);
        println!("  Recorded at:  {}", receipt.timestamp.to_rfc3339());
        println!("  Ledger ref:   {}", receipt.ledger_ref);
        println!("  Explorer:     {}", receipt.explorer_url);
        println!();

        println!("  Consent timeline:");
        for entry in self.ledger.timeline(&id)? {
            println!(
                "    #{} {:<22} {}  {}",
                entry.sequence,
                entry.record.event.label(),
                entry.record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.this_hash
            );
        }
        println!();
        println!(
            "  Chain integrity: {}",
            if self.ledger.verify_integrity() { "VALID" } else { "BROKEN" }
        );
        println!();

        self.workspace.close()
    }

    // ── Health passport ───────────────────────────────────────────────────────

    pub fn passport(&self, permissions: PermissionSet) -> FlareHealthResult<()> {
        let now = Utc::now();
        let token = AccessToken::issue(permissions, self.config.token_ttl(), now)?;

        let shared: Vec<String> = token.permissions().all().map(|p| p.to_string()).collect();
        let payload = serde_json::to_string_pretty(&token.payload()).map_err(|e| FlareHealthError::PassportError {
            reason: format!("token payload is not serializable: {}", e),
        })?;

        println!("=== Health Passport Access Token ===");
        println!();
        println!("  Token:      {}", token.token_id());
        println!("  Shares:     {}", shared.join(", "));
        println!("  Expires in: {}", token.format_remaining(now));
        println!();
        println!("{}", payload);
        Ok(())
    }

    // ── Patient assistant ─────────────────────────────────────────────────────

    pub fn analyze(&self, patient_id: &str, sleep_hours: Option<f64>) -> FlareHealthResult<()> {
        let record = self.store.get(&PatientId::new(patient_id))?;
        let analysis = analyze_health(&record.vitals, sleep_hours);

        println!("{}", analysis.text);
        if !analysis.suggested_medications.is_empty() {
            println!();
            println!("Suggested: {}", analysis.suggested_medications.join(", "));
        }
        self.speak(&analysis.text)
    }

    pub fn chat(&self, message: &str, patient_id: Option<&str>) -> FlareHealthResult<()> {
        let record = match patient_id {
            Some(id) => Some(self.store.get(&PatientId::new(id))?),
            None => None,
        };
        let response = reply(message, record.as_ref().map(|r| &r.vitals));
        println!("{}", response);
        self.speak(&response)
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    pub fn settings_show(&self) -> FlareHealthResult<()> {
        print_settings(&self.settings.load()?);
        Ok(())
    }

    pub fn settings_set(&self, update: SettingsUpdate) -> FlareHealthResult<()> {
        let mut settings = self.settings.load()?;
        if let Some(language) = update.language {
            settings.language = language;
        }
        if let Some(enabled) = update.voice_input {
            settings.voice_input_enabled = enabled;
        }
        if let Some(enabled) = update.voice_output {
            settings.voice_output_enabled = enabled;
        }
        if let Some(theme) = update.theme {
            settings.theme = theme;
        }
        self.settings.save(&settings)?;

        if self.config.settings.path.is_none() {
            println!("(no [settings] path configured; changes last for this run only)");
        }
        print_settings(&settings);
        Ok(())
    }

    fn speak(&self, text: &str) -> FlareHealthResult<()> {
        if let Some(request) = speech_request(text, &self.settings.load()?) {
            println!();
            println!("[speech {}] {}", request.lang, request.text);
        }
        Ok(())
    }
}

// ── Rendering helpers ─────────────────────────────────────────────────────────

fn list_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn print_risks(risks: &SubRisks) {
    println!("  Sub-risks:");
    for (dimension, assessment) in risks.iter() {
        println!(
            "    {:<14} {:>3}  {:<6}  {}",
            dimension.label(),
            assessment.score,
            assessment.level.as_str(),
            assessment.explanation
        );
    }
    println!();
}

fn print_warnings(warnings: &[MedicationSafetyWarning]) {
    if warnings.is_empty() {
        println!("  Safety: no warnings");
    } else {
        println!("  Safety warnings:");
        for warning in warnings {
            println!("    [{}] {}: {}", warning.severity, warning.rule_id, warning.message);
        }
    }
    println!();
}

fn print_settings(settings: &Settings) {
    println!("  language:      {:?} ({})", settings.language, settings.language.speech_code());
    println!("  voice input:   {}", settings.voice_input_enabled);
    println!("  voice output:  {}", settings.voice_output_enabled);
    println!("  theme:         {:?}", settings.theme);
}
