//! Agent endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where the agent lives and how long to wait for it.
///
/// The base URL is resolved once at startup; changing it requires a
/// restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Agent base URL
    pub base_url: String,
    /// Per-request deadline
    pub timeout_seconds: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 30,
        }
    }
}
