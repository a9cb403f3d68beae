//! Persistence for operator preferences.
//!
//! Only dark mode and auto-refresh survive a restart; everything else
//! in the snapshot is session-transient. A missing or unreadable file
//! falls back to defaults so a fresh install starts clean.

use crate::store::UiPrefs;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk shape: just the two persisted preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedPrefs {
    dark_mode: bool,
    auto_refresh: bool,
}

/// Rehydrate preferences, layering the persisted flags over the
/// configured refresh interval and defaults.
pub fn load(path: &Path, interval_ms: u64, refresh_default: bool) -> UiPrefs {
    let persisted = match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<PersistedPrefs>(&content) {
            Ok(prefs) => Some(prefs),
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "ignoring malformed prefs file");
                None
            }
        },
        Err(_) => None,
    };

    match persisted {
        Some(p) => UiPrefs {
            dark_mode: p.dark_mode,
            auto_refresh: p.auto_refresh,
            refresh_interval_ms: interval_ms,
        },
        None => UiPrefs {
            dark_mode: false,
            auto_refresh: refresh_default,
            refresh_interval_ms: interval_ms,
        },
    }
}

/// Persist the two durable preferences.
pub fn save(path: &Path, prefs: &UiPrefs) -> std::io::Result<()> {
    let persisted = PersistedPrefs {
        dark_mode: prefs.dark_mode,
        auto_refresh: prefs.auto_refresh,
    };
    let content = serde_json::to_string_pretty(&persisted)?;
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load(&dir.path().join("nope.json"), 30_000, true);

        assert!(!prefs.dark_mode);
        assert!(prefs.auto_refresh);
        assert_eq!(prefs.refresh_interval_ms, 30_000);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{not json").unwrap();

        let prefs = load(file.path(), 30_000, false);
        assert!(!prefs.auto_refresh);
    }

    #[test]
    fn round_trip_preserves_flags() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let prefs = UiPrefs {
            dark_mode: true,
            auto_refresh: false,
            refresh_interval_ms: 5_000,
        };

        save(file.path(), &prefs).unwrap();
        let loaded = load(file.path(), 30_000, true);

        assert!(loaded.dark_mode);
        assert!(!loaded.auto_refresh);
        // interval comes from config, not the prefs file
        assert_eq!(loaded.refresh_interval_ms, 30_000);
    }

    #[test]
    fn only_two_fields_persist() {
        let file = tempfile::NamedTempFile::new().unwrap();
        save(file.path(), &UiPrefs::default()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();

        assert_eq!(keys.len(), 2);
        assert!(value.get("refresh_interval_ms").is_none());
    }
}
