//! Tracing setup for the console.
//!
//! Logs go to stderr so rendered tables and JSON output stay clean on
//! stdout.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Build filter directives string from LoggingConfig.
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels, e.g.
/// "info,foundry::sync=debug".
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",foundry::{}={}", component, level));
        }
    }

    filter_str
}

/// Initialize the global tracing subscriber.
pub fn init(config: &LoggingConfig) -> Result<(), String> {
    let filter = EnvFilter::try_new(build_filter_directives(config))
        .map_err(|e| format!("invalid log filter: {}", e))?;

    match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init(),
    }

    Ok(())
}
