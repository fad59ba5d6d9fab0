use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::types::{PredictionRequest, PredictionResponse};
use super::{PredictionClient, PredictionError};

/// Mock prediction client: returns a configured outcome and records every
/// request it receives.
pub struct MockPredictionClient {
    outcome: Result<PredictionResponse, PredictionError>,
    requests: Mutex<Vec<PredictionRequest>>,
    gate: Option<Arc<Notify>>,
}

impl MockPredictionClient {
    pub fn new(response: PredictionResponse) -> Self {
        Self {
            outcome: Ok(response),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn failing(error: PredictionError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Hold every answer until `gate` is notified once per request.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PredictionClient for MockPredictionClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(ref gate) = self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }
}
