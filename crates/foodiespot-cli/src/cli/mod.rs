//! CLI argument definitions for `fspot`.

pub mod chat;
pub mod session;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

/// FoodieSpot conversational client.
#[derive(Debug, Parser)]
#[command(name = "fspot", version, about = "Chat with the FoodieSpot restaurant assistant")]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start (or resume) an interactive chat session.
    Chat {
        /// Conversation server base URL (overrides config.toml).
        #[arg(long)]
        server: Option<String>,

        /// Identity to attach to outgoing messages (overrides config.toml).
        #[arg(long)]
        user: Option<String>,
    },

    /// Delete the current session server-side and clear local state.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,

        /// Conversation server base URL (overrides config.toml).
        #[arg(long)]
        server: Option<String>,
    },

    /// Show the stored session id and data directory.
    Status,

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
