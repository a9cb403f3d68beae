//! Inference orchestrator: the lifecycle of one user-initiated call.
//!
//! At most one inference is in flight at a time. A submission while one
//! is running is dropped, not queued. Success stores the result and
//! kicks off a metrics refresh in the background; failure records the
//! classified error and leaves the previous result in place.

use crate::gateway::{AgentGateway, ErrorInfo, GatewayError, InferenceRequest, InferenceResponse};
use crate::store::{Store, Transition};
use crate::sync::SyncEngine;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 1..=512;
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.1..=2.0;

/// Why a submission was not carried out, or how it failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("max_tokens must be in [1, 512], got {0}")]
    MaxTokensOutOfRange(u32),

    #[error("temperature must be in [0.1, 2.0], got {0}")]
    TemperatureOutOfRange(f32),

    /// Another inference is still running; this submission was dropped.
    #[error("an inference is already running - wait for it to finish")]
    Busy,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Receives terminal-state notifications (the toast/banner seam).
pub trait InferenceObserver: Send + Sync {
    fn on_success(&self, result: &InferenceResponse);
    fn on_failure(&self, error: &GatewayError);
}

/// Validate submission inputs without touching any state.
pub fn validate_request(
    prompt: &str,
    max_tokens: u32,
    temperature: f32,
) -> Result<(), SubmitError> {
    if prompt.trim().is_empty() {
        return Err(SubmitError::EmptyPrompt);
    }
    if !MAX_TOKENS_RANGE.contains(&max_tokens) {
        return Err(SubmitError::MaxTokensOutOfRange(max_tokens));
    }
    if !TEMPERATURE_RANGE.contains(&temperature) {
        return Err(SubmitError::TemperatureOutOfRange(temperature));
    }
    Ok(())
}

pub struct InferenceOrchestrator {
    store: Arc<Store>,
    gateway: Arc<AgentGateway>,
    sync: Arc<SyncEngine>,
    observer: Arc<dyn InferenceObserver>,
    /// Single-flight guard; the store flag mirrors it for readers
    in_flight: AtomicBool,
}

impl InferenceOrchestrator {
    pub fn new(
        store: Arc<Store>,
        gateway: Arc<AgentGateway>,
        sync: Arc<SyncEngine>,
        observer: Arc<dyn InferenceObserver>,
    ) -> Self {
        Self {
            store,
            gateway,
            sync,
            observer,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit one inference call.
    ///
    /// Invalid input and a busy orchestrator are rejected before any
    /// state changes or network traffic. The returned future resolves
    /// at the terminal state; the post-success metrics refresh runs in
    /// the background and is not awaited here.
    pub async fn submit(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
        model_id: Option<String>,
    ) -> Result<InferenceResponse, SubmitError> {
        validate_request(prompt, max_tokens, temperature)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("submission dropped, inference already running");
            return Err(SubmitError::Busy);
        }

        self.store.dispatch(Transition::SetInferenceRunning(true));

        let request = InferenceRequest {
            prompt: prompt.trim().to_string(),
            max_tokens,
            temperature,
            model_id,
        };
        tracing::info!(
            prompt_chars = request.prompt.len(),
            max_tokens,
            temperature,
            "submitting inference"
        );

        match self.gateway.run_inference(&request).await {
            Ok(result) => {
                tracing::info!(
                    processing_time = result.processing_time,
                    "inference completed"
                );
                self.store
                    .dispatch(Transition::SetLastInference(result.clone()));
                self.finish();
                self.observer.on_success(&result);

                // metrics should reflect the call that just completed;
                // the caller does not wait for this
                let sync = Arc::clone(&self.sync);
                tokio::spawn(async move {
                    sync.fetch_all().await;
                });

                Ok(result)
            }
            Err(error) => {
                tracing::warn!(error = %error, "inference failed");
                self.store
                    .dispatch(Transition::SetError(ErrorInfo::from(&error)));
                self.finish();
                self.observer.on_failure(&error);
                Err(SubmitError::Gateway(error))
            }
        }
    }

    fn finish(&self) {
        self.store.dispatch(Transition::SetInferenceRunning(false));
        self.in_flight.store(false, Ordering::SeqCst);
    }
}
