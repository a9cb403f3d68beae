use clap::Parser;
use foundry::cli::{self, Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result: anyhow::Result<()> = match cli.command {
        Commands::Watch(args) => cli::watch::run_watch(args).await,
        Commands::Status(args) => cli::status::handle_status(&args)
            .await
            .map(|output| println!("{}", output)),
        Commands::Infer(args) => cli::infer::handle_infer(&args)
            .await
            .map(|output| println!("{}", output)),
        Commands::Models(cmd) => cli::models::handle_models(cmd)
            .await
            .map(|output| println!("{}", output)),
        Commands::Prefs(args) => {
            cli::prefs::handle_prefs(&args).map(|output| println!("{}", output))
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Init(args) => cli::config::handle_config_init(&args),
        },
        Commands::Completions(args) => {
            cli::completions::handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
