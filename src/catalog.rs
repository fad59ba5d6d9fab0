//! Disease symptom catalog: which symptoms the predictor asks about for
//! each disease, plus key/label conversion for the checklist.
//!
//! Symptom keys are the snake_case names the prediction service expects
//! (`body_aches`); labels are what the checklist shows (`Body Aches`).

use serde::Serialize;

use crate::models::enums::Disease;

// ═══════════════════════════════════════════
// Constants: symptom keys per disease
// ═══════════════════════════════════════════

const MALARIA_SYMPTOMS: &[&str] = &[
    "fever",
    "chills",
    "sweats",
    "headache",
    "nausea",
    "vomiting",
    "body_aches",
    "impaired_consciousness",
    "prostration",
    "convulsions",
    "deep_breathing",
    "respiratory_distress",
    "abnormal_bleeding",
    "jaundice",
    "severe_anemia",
];

const DENGUE_SYMPTOMS: &[&str] = &[
    "fever",
    "headache",
    "body_aches",
    "rash",
    "nausea",
    "vomiting",
    "abnormal_bleeding",
];

const TYPHOID_SYMPTOMS: &[&str] = &[
    "fever",
    "weakness",
    "abdominal_pain",
    "headache",
    "diarrhea",
    "rash",
];

/// Every symptom key known to the predictor, across all diseases.
pub const ALL_SYMPTOM_KEYS: &[&str] = &[
    "fever",
    "chills",
    "sweats",
    "headache",
    "nausea",
    "vomiting",
    "body_aches",
    "impaired_consciousness",
    "prostration",
    "convulsions",
    "deep_breathing",
    "respiratory_distress",
    "abnormal_bleeding",
    "jaundice",
    "severe_anemia",
    "rash",
    "abdominal_pain",
    "weakness",
    "diarrhea",
];

/// Ordered symptom keys relevant to a disease.
pub fn symptoms_for(disease: Disease) -> &'static [&'static str] {
    match disease {
        Disease::Malaria => MALARIA_SYMPTOMS,
        Disease::Dengue => DENGUE_SYMPTOMS,
        Disease::Typhoid => TYPHOID_SYMPTOMS,
    }
}

/// Checklist label for a symptom key: `body_aches` → `Body Aches`.
pub fn symptom_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Lookup key for a checklist label.
///
/// Lower-cases the label and turns its first space into an underscore.
/// Lossy for labels with punctuation or more than one space; every label the
/// catalog produces has at most one.
pub fn symptom_key(label: &str) -> String {
    label.to_lowercase().replacen(' ', "_", 1)
}

// ═══════════════════════════════════════════
// View types: serialised to frontend
// ═══════════════════════════════════════════

/// One disease and its checklist labels, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub disease: Disease,
    pub symptoms: Vec<String>,
}

/// The whole catalog, diseases in select-box order.
pub fn catalog_entries() -> Vec<CatalogEntry> {
    Disease::ALL
        .iter()
        .map(|&disease| CatalogEntry {
            disease,
            symptoms: symptoms_for(disease)
                .iter()
                .map(|key| symptom_label(key))
                .collect(),
        })
        .collect()
}
