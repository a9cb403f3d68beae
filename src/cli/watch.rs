//! Watch command: live dashboard driven by the background refresh.

use super::{load_config, Session, WatchArgs};
use crate::cli::output;
use crate::store::{Transition, UiPref};
use std::io::Write;
use tokio_util::sync::CancellationToken;

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.config, args.url.as_deref())?;
    if let Some(interval_ms) = args.interval_ms {
        config.refresh.interval_ms = interval_ms;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;

    crate::logging::init(&config.logging).map_err(anyhow::Error::msg)?;
    tracing::info!(agent = %config.agent.base_url, "Starting console");

    let session = Session::new(config);
    if args.no_auto_refresh {
        session
            .store
            .dispatch(Transition::SetUiPref(UiPref::AutoRefresh(false)));
    }

    let cancel_token = CancellationToken::new();
    let sync_handle = session.sync.clone().start(cancel_token.clone());

    let mut updates = session.store.subscribe();
    let shutdown = shutdown_signal(cancel_token.clone());
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                // repaint settled frames only; mid-cycle churn just flickers
                if !snapshot.loading {
                    print!("\x1b[2J\x1b[1;1H{}", output::render_dashboard(&snapshot));
                    std::io::stdout().flush()?;
                }
            }
        }
    }

    tracing::info!("Waiting for refresh task to stop");
    sync_handle.await?;

    tracing::info!("Console stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_token_completes_shutdown() {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        let handle = tokio::spawn(async move {
            cancel_clone.cancelled().await;
        });

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("shutdown should complete")
            .unwrap();
    }
}
