//! Infer command implementation

use super::{load_config, InferArgs, Session};
use crate::cli::output::Theme;
use crate::gateway::{GatewayError, InferenceResponse};
use crate::inference::{InferenceObserver, InferenceOrchestrator};
use std::sync::Arc;

/// Prints terminal-state notifications, the console's stand-in for the
/// dashboard toast.
struct ToastObserver {
    theme: Theme,
}

impl InferenceObserver for ToastObserver {
    fn on_success(&self, result: &InferenceResponse) {
        eprintln!(
            "{} inference completed in {:.2}s",
            self.theme.good("✓"),
            result.processing_time
        );
    }

    fn on_failure(&self, error: &GatewayError) {
        eprintln!("{} inference failed: {}", self.theme.bad("✗"), error);
    }
}

/// Handle infer command
pub async fn handle_infer(args: &InferArgs) -> anyhow::Result<String> {
    let config = load_config(&args.config, args.url.as_deref())?;
    let session = Session::new(config);

    let theme = Theme::from_prefs(&session.store.snapshot().ui_prefs);
    let orchestrator = InferenceOrchestrator::new(
        Arc::clone(&session.store),
        Arc::clone(&session.gateway),
        Arc::clone(&session.sync),
        Arc::new(ToastObserver { theme }),
    );

    let result = orchestrator
        .submit(
            &args.prompt,
            args.max_tokens,
            args.temperature,
            args.model.clone(),
        )
        .await?;

    if args.json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        let mut out = String::new();
        out.push_str(&result.response);
        out.push('\n');
        if let Some(model_path) = result
            .model_info
            .get("model_path")
            .and_then(|v| v.as_str())
        {
            out.push_str(&format!(
                "\n[{} in {:.2}s]",
                model_path, result.processing_time
            ));
        } else {
            out.push_str(&format!("\n[{:.2}s]", result.processing_time));
        }
        Ok(out)
    }
}
