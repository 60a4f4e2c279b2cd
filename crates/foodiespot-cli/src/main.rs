//! FoodieSpot chat client entry point.
//!
//! Binary name: `fspot`
//!
//! Parses CLI arguments, initializes configuration and the data directory,
//! then dispatches to the chat loop or a session maintenance command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,foodiespot=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "fspot", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat { server, user } => {
            cli::chat::run_chat_loop(&state, server.as_deref(), user.as_deref()).await?;
        }

        Commands::Reset { force, server } => {
            cli::session::reset(&state, force, server.as_deref()).await?;
        }

        Commands::Status => {
            cli::session::status(&state).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
