//! Status command implementation

use super::{load_config, Session, StatusArgs};
use crate::cli::output;

/// Run one refresh cycle and render the resulting snapshot.
///
/// A degraded or unreachable agent still renders (with the classified
/// error); the command only fails on configuration problems.
pub async fn handle_status(args: &StatusArgs) -> anyhow::Result<String> {
    let config = load_config(&args.config, args.url.as_deref())?;
    let session = Session::new(config);

    session.sync.fetch_all().await;
    let snapshot = session.store.snapshot();

    if args.json {
        return Ok(serde_json::to_string_pretty(&snapshot)?);
    }

    let mut out = String::new();
    // the root banner is informational; a miss is not worth failing over
    if let Ok(root) = session.gateway.get_root().await {
        if let Some(message) = root.get("message").and_then(|v| v.as_str()) {
            out.push_str(message);
            out.push('\n');
        }
    }
    out.push_str(&output::render_dashboard(&snapshot));
    Ok(out)
}
