//! Outbound protocol to the treatment prediction service.
//!
//! The service is an opaque collaborator: one `POST` with the patient's
//! form, one JSON answer back. `PredictionClient` is the seam; the HTTP
//! implementation talks to the real service and `MockPredictionClient`
//! stands in for it in tests.

pub mod client;
pub mod mock;
pub mod types;

pub use client::*;
pub use mock::*;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Message shown for every failure the service did not explain itself.
pub const GENERIC_FAILURE: &str = "Failed to fetch diagnosis";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Prediction service is not reachable at {0}")]
    Connection(String),

    #[error("Prediction service returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    /// The service answered with an `error` field.
    #[error("{0}")]
    Service(String),
}

impl PredictionError {
    /// The single string the predictor screen shows for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service(message) => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Anything that can answer a prediction request.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError>;
}
