//! Wire types for the agent API.
//!
//! These mirror the JSON bodies the agent produces. Decoding happens at
//! the gateway boundary; nothing downstream sees raw JSON except the
//! free-form config echoes, which stay as `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Agent liveness report from `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInfo {
    /// Agent-reported status string (e.g. "healthy")
    pub status: String,
    /// Whether a model is currently loaded
    #[serde(default)]
    pub model_loaded: bool,
    /// Echo of the agent's configuration
    #[serde(default)]
    pub config: Value,
}

/// Description of the currently loaded model from `GET /model-info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_path: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub device: String,
    /// Remaining model configuration, shape varies per runtime
    #[serde(flatten)]
    pub config: serde_json::Map<String, Value>,
}

/// Server-side aggregates from `GET /metrics`.
///
/// Averages are computed by the agent; the console only formats them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateStats {
    pub total_inferences: u64,
    pub avg_latency_ms: f64,
    pub avg_tokens_per_second: f64,
    pub avg_memory_mb: f64,
    pub last_inference: Option<String>,
    pub first_inference: Option<String>,
}

/// One telemetry row, serialized by the agent as a positional array:
/// timestamp, prompt length, latency ms, tokens generated, tokens/sec,
/// memory MB, model path, temperature, max tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRecord(
    pub String,
    pub u64,
    pub f64,
    pub u64,
    pub f64,
    pub f64,
    pub Option<String>,
    pub Option<f64>,
    pub Option<u64>,
);

impl InferenceRecord {
    pub fn timestamp(&self) -> &str {
        &self.0
    }

    pub fn prompt_length(&self) -> u64 {
        self.1
    }

    pub fn latency_ms(&self) -> f64 {
        self.2
    }

    pub fn tokens_generated(&self) -> u64 {
        self.3
    }

    pub fn tokens_per_second(&self) -> f64 {
        self.4
    }

    pub fn memory_mb(&self) -> f64 {
        self.5
    }

    pub fn model_path(&self) -> Option<&str> {
        self.6.as_deref()
    }

    pub fn temperature(&self) -> Option<f64> {
        self.7
    }

    pub fn max_tokens(&self) -> Option<u64> {
        self.8
    }
}

/// Full `GET /metrics` body: aggregates plus the most recent telemetry
/// rows, newest first as returned by the agent. The row order is
/// preserved end to end; views sort copies only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsBundle {
    pub summary: AggregateStats,
    pub recent_records: Vec<InferenceRecord>,
}

/// Body for `POST /inference`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

/// One completed inference from `POST /inference`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Generated text
    pub response: String,
    /// Wall-clock processing time in seconds
    pub processing_time: f64,
    /// Model/runtime/device echo for the call
    #[serde(default)]
    pub model_info: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_record_decodes_positional_array() {
        let json = r#"["2024-05-01T12:00:00", 42, 153.2, 64, 18.5, 812.4, "models/phi-2.gguf", 0.7, 64]"#;
        let record: InferenceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.timestamp(), "2024-05-01T12:00:00");
        assert_eq!(record.prompt_length(), 42);
        assert_eq!(record.latency_ms(), 153.2);
        assert_eq!(record.tokens_generated(), 64);
        assert_eq!(record.model_path(), Some("models/phi-2.gguf"));
        assert_eq!(record.temperature(), Some(0.7));
        assert_eq!(record.max_tokens(), Some(64));
    }

    #[test]
    fn inference_record_tolerates_null_tail() {
        let json = r#"["2024-05-01T12:00:00", 10, 90.0, 8, 88.9, 500.0, null, null, null]"#;
        let record: InferenceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.model_path(), None);
        assert_eq!(record.temperature(), None);
    }

    #[test]
    fn metrics_bundle_defaults_on_missing_fields() {
        let bundle: MetricsBundle = serde_json::from_str("{}").unwrap();
        assert_eq!(bundle.summary.total_inferences, 0);
        assert!(bundle.recent_records.is_empty());
    }

    #[test]
    fn model_info_keeps_extra_fields() {
        let json = r#"{"model_path":"m.gguf","runtime":"llama.cpp","device":"cpu","n_ctx":2048}"#;
        let info: ModelInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.runtime, "llama.cpp");
        assert_eq!(info.config.get("n_ctx").and_then(Value::as_u64), Some(2048));
    }

    #[test]
    fn inference_request_omits_absent_model_id() {
        let request = InferenceRequest {
            prompt: "hello".to_string(),
            max_tokens: 64,
            temperature: 0.7,
            model_id: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("model_id"));
    }
}
