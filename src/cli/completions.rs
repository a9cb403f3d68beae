//! Shell completions command

use super::{Cli, CompletionsArgs};
use clap::CommandFactory;

/// Generate shell completions on stdout
pub fn handle_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "foundry", &mut std::io::stdout());
}
