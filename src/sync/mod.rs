//! Sync engine: keeps health, model info and metrics fresh.
//!
//! One refresh cycle fetches the three read endpoints concurrently and
//! writes each result into the store independently: a failed sub-fetch
//! reports an error without blanking data another cycle already cached.
//! The recurring loop is a cancellable task in the shape of a scheduled
//! poller; cancelling it suppresses every future cycle but never aborts
//! a cycle already in flight.

use crate::gateway::{AgentGateway, ErrorInfo, GatewayError};
use crate::store::{Store, Transition};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct SyncEngine {
    store: Arc<Store>,
    gateway: Arc<AgentGateway>,
}

impl SyncEngine {
    pub fn new(store: Arc<Store>, gateway: Arc<AgentGateway>) -> Self {
        Self { store, gateway }
    }

    /// Run one refresh cycle: health, model info and metrics fetched
    /// concurrently, `loading` held true for the duration.
    ///
    /// Results are dispatched successes first, then the failure (if
    /// any), so the store's error field reflects a failed sub-fetch no
    /// matter which order the network resolved them in. `connected`
    /// ends true only when the whole cycle was clean.
    pub async fn fetch_all(&self) {
        self.store.dispatch(Transition::SetLoading(true));

        let (health, model_info, metrics) = futures::future::join3(
            self.gateway.get_health(),
            self.gateway.get_model_info(),
            self.gateway.get_metrics(),
        )
        .await;

        let mut first_failure: Option<GatewayError> = None;
        let mut remember = |error: GatewayError| {
            tracing::warn!(error = %error, "sub-fetch failed");
            first_failure.get_or_insert(error);
        };

        match health {
            Ok(health) => self.store.dispatch(Transition::SetHealth(health)),
            Err(error) => remember(error),
        }

        match model_info {
            Ok(model_info) => self.store.dispatch(Transition::SetModelInfo(model_info)),
            Err(error) => remember(error),
        }

        match metrics {
            Ok(metrics) => {
                self.store
                    .dispatch(Transition::SetRecentInferences(metrics.recent_records.clone()));
                self.store.dispatch(Transition::SetMetrics(metrics));
            }
            Err(error) => remember(error),
        }

        match first_failure {
            Some(error) => {
                self.store.dispatch(Transition::SetConnected(false));
                self.store
                    .dispatch(Transition::SetError(ErrorInfo::from(&error)));
            }
            None => {
                self.store.dispatch(Transition::ClearError);
                tracing::debug!("refresh cycle clean");
            }
        }

        self.store.dispatch(Transition::SetLoading(false));
    }

    /// Start the recurring refresh task.
    ///
    /// Runs one cycle immediately regardless of the auto-refresh
    /// preference, then one per interval while the preference is on. A
    /// tick that finds the preference off is skipped without touching
    /// the gateway, so disabling takes effect at the next scheduling
    /// point. Cancelling the token ends the task; an in-flight cycle
    /// still runs to completion.
    pub fn start(self: Arc<Self>, cancel_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.fetch_all().await;

            let interval_ms = self.store.snapshot().ui_prefs.refresh_interval_ms;
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // the immediate first tick already ran above
            interval.tick().await;

            tracing::info!(interval_ms, "auto-refresh started");

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("auto-refresh stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        if !self.store.snapshot().ui_prefs.auto_refresh {
                            continue;
                        }
                        self.fetch_all().await;
                    }
                }
            }
        })
    }
}
