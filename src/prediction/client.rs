use async_trait::async_trait;

use super::types::{PredictionRequest, PredictionResponse};
use super::{PredictionClient, PredictionError};
use crate::config;

/// HTTP client for the prediction service.
///
/// No request timeout is set: a pending prediction resolves or fails on the
/// network stack's and the service's own limits.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    url: String,
    client: reqwest::Client,
}

impl HttpPredictionClient {
    /// Create a client posting to `url`.
    pub fn new(url: &str) -> Result<Self, PredictionError> {
        // The service runs next to the app; never route it through a proxy.
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| PredictionError::HttpClient(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// The service the predictor screen talks to.
    pub fn default_local() -> Result<Self, PredictionError> {
        Self::new(config::PREDICT_URL)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        tracing::debug!(url = %self.url, disease = %request.disease, "Sending prediction request");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    PredictionError::Connection(self.url.clone())
                } else {
                    PredictionError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PredictionError::HttpClient(e.to_string()))?;

        if !status.is_success() {
            // An explained failure is reported as such, whatever the status.
            if let Ok(parsed) = serde_json::from_str::<PredictionResponse>(&body) {
                if let Some(message) = parsed.service_error() {
                    return Err(PredictionError::Service(message.to_string()));
                }
            }
            return Err(PredictionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| PredictionError::ResponseParsing(e.to_string()))
    }
}
