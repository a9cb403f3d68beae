//! Transport gateway to the Edge Foundry agent.
//!
//! One method per agent endpoint. The gateway serializes whatever it is
//! given, decodes successful responses into the typed entities of
//! [`types`], and normalizes every failure into a [`GatewayError`]. It
//! performs no retries and holds no cache.

mod error;
mod types;

pub use error::*;
pub use types::*;

use crate::config::AgentConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// HTTP boundary to a single agent.
pub struct AgentGateway {
    /// Base URL, no trailing slash (e.g. "http://localhost:8000")
    base_url: String,
    /// Per-call deadline in seconds
    timeout_seconds: u64,
    /// HTTP client with connection pooling
    client: reqwest::Client,
}

impl AgentGateway {
    /// Create a gateway with its own HTTP client.
    pub fn new(config: &AgentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_seconds: config.timeout_seconds,
            client,
        }
    }

    /// Create a gateway with a custom HTTP client (for testing).
    pub fn with_client(config: &AgentConfig, client: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_seconds: config.timeout_seconds,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /` - agent banner.
    pub async fn get_root(&self) -> Result<serde_json::Value, GatewayError> {
        self.get_json("/").await
    }

    /// `GET /health` - liveness, model-loaded flag and config echo.
    pub async fn get_health(&self) -> Result<HealthInfo, GatewayError> {
        self.get_json("/health").await
    }

    /// `GET /model-info` - description of the loaded model.
    pub async fn get_model_info(&self) -> Result<ModelInfo, GatewayError> {
        self.get_json("/model-info").await
    }

    /// `GET /metrics` - server-side aggregates plus recent telemetry rows.
    pub async fn get_metrics(&self) -> Result<MetricsBundle, GatewayError> {
        self.get_json("/metrics").await
    }

    /// `POST /inference` - run one generation on the loaded model.
    ///
    /// Input constraints (prompt, token and temperature ranges) are the
    /// caller's responsibility; the gateway serializes the request as given.
    pub async fn run_inference(
        &self,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, GatewayError> {
        self.post_json("/inference", request).await
    }

    /// `GET /demo-models` - available demo models, passed through opaque.
    pub async fn get_demo_models(&self) -> Result<serde_json::Value, GatewayError> {
        self.get_json("/demo-models").await
    }

    /// `GET /demo-models/{id}/sample-prompts` - canned prompts for a model.
    pub async fn get_sample_prompts(
        &self,
        model_id: &str,
    ) -> Result<serde_json::Value, GatewayError> {
        self.get_json(&format!("/demo-models/{}/sample-prompts", model_id))
            .await
    }

    /// `POST /demo-models/switch` - load a different demo model.
    pub async fn switch_demo_model(
        &self,
        model_id: &str,
    ) -> Result<serde_json::Value, GatewayError> {
        self.post_json(
            "/demo-models/switch",
            &serde_json::json!({ "model_id": model_id }),
        )
        .await
    }

    /// `GET /demo-models/current` - the model currently loaded.
    pub async fn get_current_demo_model(&self) -> Result<serde_json::Value, GatewayError> {
        self.get_json("/demo-models/current").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = "GET", url = %url, "agent request");

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| classify_transport(e, self.timeout_seconds, &self.base_url))?;

        self.decode(path, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = "POST", url = %url, "agent request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_transport(e, self.timeout_seconds, &self.base_url))?;

        self.decode(path, response).await
    }

    /// Decode a response body, never letting a malformed success leak
    /// through as a panic or an untyped value. A misconfigured backend
    /// returning an HTML page with status 200 classifies as Protocol.
    async fn decode<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "agent request failed");
            return Err(classify_status(status.as_u16(), path, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Protocol(format!("failed reading body from {}: {}", path, e)))?;

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::Protocol(format!("invalid JSON from {}: {}", path, e)))
    }
}
