//! State store: one snapshot, a closed set of transitions.
//!
//! All client state lives in a single [`SystemSnapshot`] owned by the
//! [`Store`]. Components never mutate fields directly; they dispatch a
//! [`Transition`], which is applied under the write lock and published
//! whole to observers. Readers therefore never see a half-applied
//! update, and transitions land in dispatch order.

mod snapshot;

pub use snapshot::*;

use crate::gateway::{ErrorInfo, HealthInfo, InferenceRecord, InferenceResponse, MetricsBundle, ModelInfo};
use std::sync::RwLock;
use tokio::sync::watch;

/// One preference field update.
#[derive(Debug, Clone, PartialEq)]
pub enum UiPref {
    DarkMode(bool),
    AutoRefresh(bool),
    RefreshIntervalMs(u64),
}

/// The full set of permitted snapshot mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SetLoading(bool),
    SetError(ErrorInfo),
    ClearError,
    SetConnected(bool),
    SetHealth(HealthInfo),
    SetModelInfo(ModelInfo),
    SetMetrics(MetricsBundle),
    SetRecentInferences(Vec<InferenceRecord>),
    SetUiPref(UiPref),
    SetInferenceRunning(bool),
    SetLastInference(InferenceResponse),
}

/// Container for the shared snapshot. Construct one per client instance
/// and inject it into the sync engine, the orchestrator and the views.
pub struct Store {
    snapshot: RwLock<SystemSnapshot>,
    publisher: watch::Sender<SystemSnapshot>,
}

impl Store {
    pub fn new(ui_prefs: UiPrefs) -> Self {
        let snapshot = SystemSnapshot::with_prefs(ui_prefs);
        let (publisher, _) = watch::channel(snapshot.clone());

        Self {
            snapshot: RwLock::new(snapshot),
            publisher,
        }
    }

    /// Apply one transition and publish the resulting snapshot.
    pub fn dispatch(&self, transition: Transition) {
        let mut snapshot = self.snapshot.write().unwrap();
        apply(&mut snapshot, transition);
        let _ = self.publisher.send(snapshot.clone());
    }

    /// Current snapshot, cloned.
    pub fn snapshot(&self) -> SystemSnapshot {
        self.snapshot.read().unwrap().clone()
    }

    /// Read-only subscription for views; yields whole snapshots.
    pub fn subscribe(&self) -> watch::Receiver<SystemSnapshot> {
        self.publisher.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(UiPrefs::default())
    }
}

fn apply(snapshot: &mut SystemSnapshot, transition: Transition) {
    match transition {
        Transition::SetLoading(loading) => {
            snapshot.loading = loading;
        }
        Transition::SetError(error) => {
            snapshot.error = Some(error);
            snapshot.loading = false;
        }
        Transition::ClearError => {
            snapshot.error = None;
        }
        Transition::SetConnected(connected) => {
            snapshot.connected = connected;
        }
        Transition::SetHealth(health) => {
            // a health report in hand means the agent is reachable
            snapshot.health = Some(health);
            snapshot.connected = true;
            snapshot.last_updated = Some(chrono::Utc::now());
        }
        Transition::SetModelInfo(model_info) => {
            snapshot.model_info = Some(model_info);
            snapshot.last_updated = Some(chrono::Utc::now());
        }
        Transition::SetMetrics(metrics) => {
            snapshot.metrics = Some(metrics);
            snapshot.last_updated = Some(chrono::Utc::now());
        }
        Transition::SetRecentInferences(records) => {
            snapshot.recent_inferences = records;
        }
        Transition::SetUiPref(pref) => match pref {
            UiPref::DarkMode(on) => snapshot.ui_prefs.dark_mode = on,
            UiPref::AutoRefresh(on) => snapshot.ui_prefs.auto_refresh = on,
            UiPref::RefreshIntervalMs(ms) => snapshot.ui_prefs.refresh_interval_ms = ms,
        },
        Transition::SetInferenceRunning(running) => {
            snapshot.inference.running = running;
        }
        Transition::SetLastInference(result) => {
            snapshot.inference.last = Some(result);
        }
    }
}
