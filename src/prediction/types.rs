use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PredictionError;
use crate::models::diagnosis::{DiagnosisResult, DEFAULT_TIP, NOT_SPECIFIED, UNKNOWN_DISEASE};
use crate::models::enums::{Gender, Region};

/// Top-level request fields. A symptom key with one of these names would
/// collide with the patient data, so it is left out of the symptom block.
pub const RESERVED_FIELDS: &[&str] = &[
    "disease",
    "age",
    "weight",
    "region",
    "gender",
    "pregnant",
    "g6pd_deficiency",
    "previous_medications",
];

/// Request body for `POST /predict`.
///
/// Symptoms are flattened next to the patient fields, one 0/1 entry per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub disease: String,
    #[serde(flatten)]
    pub symptoms: BTreeMap<String, u8>,
    pub age: i64,
    pub weight: i64,
    pub region: Region,
    pub gender: Gender,
    pub pregnant: u8,
    pub g6pd_deficiency: u8,
    pub previous_medications: u8,
}

impl PredictionRequest {
    /// Drop symptom entries whose key shadows a patient field.
    pub(crate) fn without_reserved(mut symptoms: BTreeMap<String, u8>) -> BTreeMap<String, u8> {
        symptoms.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));
        symptoms
    }
}

/// Response body from `POST /predict`. Every field is optional.
///
/// Fields are read leniently: a wrongly typed value (`"tabletsPerDay":"2"`,
/// `"dosage":500`) is coerced where it can be and dropped otherwise, so one
/// odd field never discards the rest of the answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(
        rename = "selectedDisease",
        default,
        deserialize_with = "deserialize_flexible_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_disease: Option<String>,
    #[serde(
        rename = "recommendedDrug",
        default,
        deserialize_with = "deserialize_flexible_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended_drug: Option<String>,
    #[serde(
        rename = "tabletsPerDay",
        default,
        deserialize_with = "deserialize_flexible_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub tablets_per_day: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_flexible_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dosage: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_flexible_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tip: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_flexible_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub adjustment_message: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_flexible_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

/// Strings as-is, numbers as their JSON text; anything else is absent.
fn deserialize_flexible_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers as-is, numeric strings parsed; anything else is absent.
fn deserialize_flexible_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

impl PredictionResponse {
    /// Error message reported by the service, if any. Empty counts as none.
    pub fn service_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// Turn a response into a displayable result.
    ///
    /// A non-empty `error` makes the whole response a failure. Otherwise
    /// missing or empty fields take their display defaults.
    pub fn interpret(self) -> Result<DiagnosisResult, PredictionError> {
        if let Some(message) = self.service_error() {
            return Err(PredictionError::Service(message.to_string()));
        }

        Ok(DiagnosisResult {
            selected_disease: present(self.selected_disease)
                .unwrap_or_else(|| UNKNOWN_DISEASE.to_string()),
            recommended_drug: present(self.recommended_drug)
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            tablets_per_day: self.tablets_per_day.unwrap_or(0.0),
            dosage: present(self.dosage).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            tip: present(self.tip).unwrap_or_else(|| DEFAULT_TIP.to_string()),
            adjustment_message: present(self.adjustment_message),
        })
    }
}
