//! Background refresh configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the recurring data refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Whether auto-refresh starts enabled (persisted prefs override this)
    pub enabled: bool,
    /// Milliseconds between refresh cycles
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 30_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_refresh_every_30s() {
        let config = RefreshConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval_ms, 30_000);
    }
}
