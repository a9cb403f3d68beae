//! CLI module for the console
//!
//! Command-line interface definitions and handlers for the `foundry`
//! binary.
//!
//! # Commands
//!
//! - `watch` - Live dashboard with background refresh
//! - `status` - One-shot fetch of agent health, model info and metrics
//! - `infer` - Submit a prompt to the loaded model
//! - `models` - Demo model management (list, current, switch, prompts)
//! - `prefs` - Show or change persisted preferences
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Live dashboard against the local agent
//! foundry watch
//!
//! # One-shot status as JSON
//! foundry status --json
//!
//! # Ad-hoc inference
//! foundry infer "What is an eigenvalue?" --max-tokens 128 -t 0.9
//! ```

pub mod completions;
pub mod config;
pub mod infer;
pub mod models;
pub mod output;
pub mod prefs;
pub mod status;
pub mod watch;

use crate::config::{ConfigError, ConsoleConfig};
use crate::gateway::AgentGateway;
use crate::store::Store;
use crate::sync::SyncEngine;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Foundry Console - terminal client for the Edge Foundry agent
#[derive(Parser, Debug)]
#[command(
    name = "foundry",
    version,
    about = "Terminal console for the Edge Foundry inference agent"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Live dashboard with background refresh
    Watch(WatchArgs),
    /// One-shot fetch of agent health, model info and metrics
    Status(StatusArgs),
    /// Submit a prompt to the loaded model
    Infer(InferArgs),
    /// Manage demo models
    #[command(subcommand)]
    Models(ModelsCommands),
    /// Show or change persisted preferences
    Prefs(PrefsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "foundry.toml")]
    pub config: PathBuf,

    /// Override the agent base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Override the refresh interval in milliseconds
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Start with auto-refresh off (manual cycles only)
    #[arg(long)]
    pub no_auto_refresh: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FOUNDRY_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the agent base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "foundry.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct InferArgs {
    /// Prompt text
    pub prompt: String,

    /// Maximum tokens to generate (1-512)
    #[arg(short, long, default_value = "64")]
    pub max_tokens: u32,

    /// Sampling temperature (0.1-2.0)
    #[arg(short, long, default_value = "0.7")]
    pub temperature: f32,

    /// Target a specific demo model
    #[arg(long)]
    pub model: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the agent base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "foundry.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ModelsCommands {
    /// List available demo models
    List(ModelsListArgs),
    /// Show the currently loaded demo model
    Current(ModelsCurrentArgs),
    /// Switch to a different demo model
    Switch(ModelsSwitchArgs),
    /// Show sample prompts for a demo model
    Prompts(ModelsPromptsArgs),
}

#[derive(Args, Debug)]
pub struct ModelsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the agent base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "foundry.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ModelsCurrentArgs {
    /// Override the agent base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "foundry.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ModelsSwitchArgs {
    /// Demo model id to load
    pub model_id: String,

    /// Override the agent base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "foundry.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ModelsPromptsArgs {
    /// Demo model id
    pub model_id: String,

    /// Override the agent base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "foundry.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct PrefsArgs {
    /// Turn dark mode on or off
    #[arg(long)]
    pub dark_mode: Option<bool>,

    /// Turn auto-refresh on or off
    #[arg(long)]
    pub auto_refresh: Option<bool>,

    /// Path to configuration file
    #[arg(short, long, default_value = "foundry.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "foundry.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load configuration for a command: file (if present), then env, then
/// the CLI URL override; validated before use.
pub(crate) fn load_config(
    path: &Path,
    url_override: Option<&str>,
) -> anyhow::Result<ConsoleConfig> {
    let mut config = match ConsoleConfig::load(Some(path)) {
        Ok(config) => config,
        Err(ConfigError::NotFound(_)) => ConsoleConfig::default(),
        Err(e) => return Err(e.into()),
    }
    .with_env_overrides();

    if let Some(url) = url_override {
        config.agent.base_url = url.to_string();
    }

    config.validate()?;
    Ok(config)
}

/// Composition root for one client instance: store, gateway and sync
/// engine wired together with rehydrated preferences.
pub(crate) struct Session {
    pub store: Arc<Store>,
    pub gateway: Arc<AgentGateway>,
    pub sync: Arc<SyncEngine>,
}

impl Session {
    pub fn new(config: ConsoleConfig) -> Self {
        let ui_prefs = crate::prefs::load(
            &config.prefs_path,
            config.refresh.interval_ms,
            config.refresh.enabled,
        );
        let store = Arc::new(Store::new(ui_prefs));
        let gateway = Arc::new(AgentGateway::new(&config.agent));
        let sync = Arc::new(SyncEngine::new(Arc::clone(&store), Arc::clone(&gateway)));

        Self {
            store,
            gateway,
            sync,
        }
    }
}
