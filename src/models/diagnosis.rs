use serde::{Deserialize, Serialize};

pub const UNKNOWN_DISEASE: &str = "Unknown";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const DEFAULT_TIP: &str = "Consult a healthcare provider for a proper diagnosis.";

/// Treatment suggestion returned by the prediction service.
///
/// Every text is opaque and shown as-is. Missing fields are filled with fixed
/// display defaults before a value of this type exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub selected_disease: String,
    pub recommended_drug: String,
    pub tablets_per_day: f64,
    pub dosage: String,
    pub tip: String,
    pub adjustment_message: Option<String>,
}

/// One labelled line of the result card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLine {
    pub label: &'static str,
    pub value: String,
}

impl DiagnosisResult {
    /// Lines shown on the result card, in display order. The adjustment
    /// line only appears when the service sent one.
    pub fn display_lines(&self) -> Vec<ResultLine> {
        let mut lines = vec![
            ResultLine {
                label: "Selected Disease",
                value: self.selected_disease.clone(),
            },
            ResultLine {
                label: "Recommended Drug",
                value: self.recommended_drug.clone(),
            },
            ResultLine {
                label: "Dosage",
                value: self.dosage.clone(),
            },
            ResultLine {
                label: "Tip",
                value: self.tip.clone(),
            },
        ];
        if let Some(ref adjustment) = self.adjustment_message {
            lines.push(ResultLine {
                label: "Adjustment",
                value: adjustment.clone(),
            });
        }
        lines
    }
}
