//! Demo model commands
//!
//! The demo-model endpoints are pass-throughs; their payload shape
//! belongs to the agent, so output is the JSON as received.

use super::{load_config, ModelsCommands, Session};

/// Handle models subcommands
pub async fn handle_models(cmd: ModelsCommands) -> anyhow::Result<String> {
    match cmd {
        ModelsCommands::List(args) => {
            let session = Session::new(load_config(&args.config, args.url.as_deref())?);
            let models = session.gateway.get_demo_models().await?;
            Ok(serde_json::to_string_pretty(&models)?)
        }
        ModelsCommands::Current(args) => {
            let session = Session::new(load_config(&args.config, args.url.as_deref())?);
            let current = session.gateway.get_current_demo_model().await?;
            Ok(serde_json::to_string_pretty(&current)?)
        }
        ModelsCommands::Switch(args) => {
            let session = Session::new(load_config(&args.config, args.url.as_deref())?);
            let outcome = session.gateway.switch_demo_model(&args.model_id).await?;
            tracing::info!(model_id = %args.model_id, "switched demo model");

            // the loaded model changed; re-pull agent state so the
            // reported model info matches
            session.sync.fetch_all().await;
            let snapshot = session.store.snapshot();

            let mut out = serde_json::to_string_pretty(&outcome)?;
            if let Some(model_info) = snapshot.model_info {
                out.push_str(&format!("\nnow serving: {}", model_info.model_path));
            }
            Ok(out)
        }
        ModelsCommands::Prompts(args) => {
            let session = Session::new(load_config(&args.config, args.url.as_deref())?);
            let prompts = session.gateway.get_sample_prompts(&args.model_id).await?;
            Ok(serde_json::to_string_pretty(&prompts)?)
        }
    }
}
