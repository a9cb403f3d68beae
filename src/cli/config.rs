//! Config command implementation

use super::ConfigInitArgs;

const CONFIG_TEMPLATE: &str = include_str!("../../foundry.example.toml");

/// Handle config init command
pub fn handle_config_init(args: &ConfigInitArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists, use --force to overwrite",
            args.output.display()
        );
    }

    std::fs::write(&args.output, CONFIG_TEMPLATE)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
