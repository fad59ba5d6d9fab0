//! AI Doctor: the diagnosis request builder behind the predictor screen.
//!
//! A `DoctorSession` owns one screen's state: the selected disease, the
//! symptom checklist, the patient form and the request lifecycle. Every user
//! input is a `DoctorAction` applied through `apply`; submitting is split in
//! `begin_submit` / `finish_submit` so callers never hold the session across
//! the network round-trip.
//!
//! Lifecycle: Idle → Submitting → (Succeeded | Failed). A finished phase
//! falls back to Idle on the next disease change, symptom toggle or submit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::models::diagnosis::{DiagnosisResult, ResultLine};
use crate::models::enums::{Disease, Gender, Region};
use crate::models::patient::{flag, int_or_zero, PatientDetails};
use crate::prediction::{PredictionClient, PredictionError, PredictionRequest, PredictionResponse};

pub const SUBMIT_LABEL: &str = "Predict Treatment";
pub const SUBMITTING_LABEL: &str = "Diagnosing...";

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

/// Where the screen is in the request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DoctorError {
    #[error("Select a disease, at least one symptom, and a valid age and weight")]
    NotSubmittable,
    #[error("A diagnosis request is already in progress")]
    AlreadySubmitting,
}

/// One user input on the predictor screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DoctorAction {
    SelectDisease { disease: Disease },
    ToggleSymptom { label: String },
    SetAge { value: String },
    SetWeight { value: String },
    SetRegion { region: Region },
    SetGender { gender: Gender },
    SetPregnant { value: bool },
    SetG6pdDeficiency { value: bool },
    SetPreviousMedications { value: bool },
}

/// A checklist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomItem {
    pub label: String,
    pub key: String,
    pub checked: bool,
}

/// Snapshot of the screen, serialised to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorView {
    pub selected_disease: Option<Disease>,
    pub symptoms: Vec<SymptomItem>,
    pub patient: PatientDetails,
    pub phase: SubmitPhase,
    pub loading: bool,
    pub can_submit: bool,
    pub submit_label: &'static str,
    pub diagnosis: Option<DiagnosisResult>,
    pub result_lines: Vec<ResultLine>,
    pub error: Option<String>,
}

fn cleared_symptoms() -> BTreeMap<String, bool> {
    catalog::ALL_SYMPTOM_KEYS
        .iter()
        .map(|key| (key.to_string(), false))
        .collect()
}

// ═══════════════════════════════════════════
// DoctorSession
// ═══════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct DoctorSession {
    selected_disease: Option<Disease>,
    /// Every known symptom key, not only the current disease's.
    symptoms: BTreeMap<String, bool>,
    patient: PatientDetails,
    phase: SubmitPhase,
    diagnosis: Option<DiagnosisResult>,
    error: Option<String>,
}

impl Default for DoctorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorSession {
    pub fn new() -> Self {
        Self {
            selected_disease: None,
            symptoms: cleared_symptoms(),
            patient: PatientDetails::default(),
            phase: SubmitPhase::Idle,
            diagnosis: None,
            error: None,
        }
    }

    // ── Input ───────────────────────────────────────────────

    /// Apply one user input.
    pub fn apply(&mut self, action: DoctorAction) {
        match action {
            DoctorAction::SelectDisease { disease } => self.select_disease(disease),
            DoctorAction::ToggleSymptom { label } => self.toggle_symptom(&label),
            DoctorAction::SetAge { value } => self.patient.age = value,
            DoctorAction::SetWeight { value } => self.patient.weight = value,
            DoctorAction::SetRegion { region } => self.patient.region = region,
            DoctorAction::SetGender { gender } => self.patient.gender = gender,
            DoctorAction::SetPregnant { value } => self.patient.pregnant = value,
            DoctorAction::SetG6pdDeficiency { value } => self.patient.g6pd_deficiency = value,
            DoctorAction::SetPreviousMedications { value } => {
                self.patient.previous_medications = value
            }
        }
    }

    /// Switch disease. Every symptom flag is reset, including keys the old
    /// and new checklists share.
    pub fn select_disease(&mut self, disease: Disease) {
        tracing::debug!(%disease, "Disease selected");
        self.selected_disease = Some(disease);
        self.symptoms = cleared_symptoms();
        self.settle();
    }

    /// Flip the symptom a checklist label stands for.
    pub fn toggle_symptom(&mut self, label: &str) {
        let key = catalog::symptom_key(label);
        let checked = self.symptoms.entry(key).or_insert(false);
        *checked = !*checked;
        self.settle();
    }

    // ── Queries ─────────────────────────────────────────────

    pub fn selected_disease(&self) -> Option<Disease> {
        self.selected_disease
    }

    pub fn symptoms(&self) -> &BTreeMap<String, bool> {
        &self.symptoms
    }

    pub fn patient(&self) -> &PatientDetails {
        &self.patient
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn diagnosis(&self) -> Option<&DiagnosisResult> {
        self.diagnosis.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// Checklist for the selected disease, in catalog order. Empty until a
    /// disease is chosen.
    pub fn checklist(&self) -> Vec<SymptomItem> {
        let Some(disease) = self.selected_disease else {
            return Vec::new();
        };
        catalog::symptoms_for(disease)
            .iter()
            .map(|key| SymptomItem {
                label: catalog::symptom_label(key),
                key: key.to_string(),
                checked: self.symptoms.get(*key).copied().unwrap_or(false),
            })
            .collect()
    }

    /// Whether the form is complete enough to send.
    pub fn is_submittable(&self) -> bool {
        self.selected_disease.is_some()
            && self.symptoms.values().any(|checked| *checked)
            && self.patient.age_is_valid()
            && self.patient.weight_is_valid()
    }

    /// Build the request body from the current state, without validation.
    ///
    /// Unparseable age or weight become 0 and a missing disease an empty
    /// string; only `begin_submit` guards against sending such a body.
    pub fn build_request(&self) -> PredictionRequest {
        let symptoms = self
            .symptoms
            .iter()
            .map(|(key, checked)| (key.clone(), flag(*checked)))
            .collect();

        PredictionRequest {
            disease: self
                .selected_disease
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            symptoms: PredictionRequest::without_reserved(symptoms),
            age: int_or_zero(&self.patient.age),
            weight: int_or_zero(&self.patient.weight),
            region: self.patient.region,
            gender: self.patient.gender,
            pregnant: flag(self.patient.pregnant),
            g6pd_deficiency: flag(self.patient.g6pd_deficiency),
            previous_medications: flag(self.patient.previous_medications),
        }
    }

    // ── Submission ──────────────────────────────────────────

    /// Enter Submitting and hand back the request to send.
    ///
    /// Clears the previous result and error. Rejected while a request is in
    /// flight or while the form is incomplete.
    pub fn begin_submit(&mut self) -> Result<PredictionRequest, DoctorError> {
        if self.is_loading() {
            return Err(DoctorError::AlreadySubmitting);
        }
        self.settle();
        if !self.is_submittable() {
            return Err(DoctorError::NotSubmittable);
        }

        self.phase = SubmitPhase::Submitting;
        self.diagnosis = None;
        self.error = None;

        let request = self.build_request();
        tracing::info!(disease = %request.disease, "Diagnosis request started");
        Ok(request)
    }

    /// Record the outcome of the request started by `begin_submit`.
    ///
    /// Returns `false` (and changes nothing) when no request was in flight.
    pub fn finish_submit(
        &mut self,
        outcome: Result<PredictionResponse, PredictionError>,
    ) -> bool {
        if !self.is_loading() {
            tracing::warn!("Diagnosis outcome arrived with no request in flight; discarded");
            return false;
        }

        match outcome.and_then(PredictionResponse::interpret) {
            Ok(result) => {
                tracing::info!(disease = %result.selected_disease, "Diagnosis received");
                self.diagnosis = Some(result);
                self.phase = SubmitPhase::Succeeded;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Diagnosis request failed");
                self.error = Some(e.user_message());
                self.phase = SubmitPhase::Failed;
            }
        }
        true
    }

    /// Run a full submission against `client`.
    pub async fn submit(&mut self, client: &dyn PredictionClient) -> Result<(), DoctorError> {
        let request = self.begin_submit()?;
        let outcome = client.predict(&request).await;
        self.finish_submit(outcome);
        Ok(())
    }

    pub fn view(&self) -> DoctorView {
        let loading = self.is_loading();
        DoctorView {
            selected_disease: self.selected_disease,
            symptoms: self.checklist(),
            patient: self.patient.clone(),
            phase: self.phase,
            loading,
            can_submit: !loading && self.is_submittable(),
            submit_label: if loading { SUBMITTING_LABEL } else { SUBMIT_LABEL },
            diagnosis: self.diagnosis.clone(),
            result_lines: self
                .diagnosis
                .as_ref()
                .map(DiagnosisResult::display_lines)
                .unwrap_or_default(),
            error: self.error.clone(),
        }
    }

    // ── Internal ────────────────────────────────────────────

    /// A finished request stops being the current phase once the user acts.
    fn settle(&mut self) {
        if matches!(self.phase, SubmitPhase::Succeeded | SubmitPhase::Failed) {
            self.phase = SubmitPhase::Idle;
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
