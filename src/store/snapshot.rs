//! The single shared snapshot of agent-facing client state.

use crate::gateway::{ErrorInfo, HealthInfo, InferenceRecord, InferenceResponse, MetricsBundle, ModelInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operator preferences. `dark_mode` and `auto_refresh` persist across
/// sessions; the interval comes from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPrefs {
    pub dark_mode: bool,
    pub auto_refresh: bool,
    pub refresh_interval_ms: u64,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            dark_mode: false,
            auto_refresh: true,
            refresh_interval_ms: 30_000,
        }
    }
}

/// Lifecycle of the one permitted in-flight inference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceState {
    pub running: bool,
    /// Most recent completed result; survives later failed attempts
    pub last: Option<InferenceResponse>,
}

/// Everything the views read. Exactly one logical snapshot exists per
/// client instance; mutations replace it atomically through the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Whether the last refresh cycle reached the agent cleanly
    pub connected: bool,
    /// True while a refresh cycle is in flight
    pub loading: bool,
    /// Most recent classified failure, cleared by a clean cycle
    pub error: Option<ErrorInfo>,
    pub health: Option<HealthInfo>,
    pub model_info: Option<ModelInfo>,
    pub metrics: Option<MetricsBundle>,
    /// Telemetry rows in agent order, newest first
    pub recent_inferences: Vec<InferenceRecord>,
    pub ui_prefs: UiPrefs,
    pub inference: InferenceState,
    /// When agent data last landed in this snapshot
    pub last_updated: Option<DateTime<Utc>>,
}

impl SystemSnapshot {
    /// Fresh snapshot carrying rehydrated preferences.
    pub fn with_prefs(ui_prefs: UiPrefs) -> Self {
        Self {
            ui_prefs,
            ..Self::default()
        }
    }
}
