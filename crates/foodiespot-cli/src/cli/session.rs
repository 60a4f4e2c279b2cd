//! Session maintenance commands: `reset` and `status`.
//!
//! These operate on the persisted session id directly, without
//! bootstrapping -- resetting should never create a server session just
//! to delete it.

use console::style;
use tracing::warn;

use foodiespot_core::chat::client::ConversationClient;
use foodiespot_core::session::store::SessionStore;

use crate::state::AppState;

/// Delete the current session server-side (best-effort) and clear local
/// state. Prompts for confirmation unless `force` is set.
pub async fn reset(state: &AppState, force: bool, server_override: Option<&str>) -> anyhow::Result<()> {
    let store = state.build_store();
    let Some(session_id) = store.load().await? else {
        println!("\n  {} No active session.\n", style("i").dim().bold());
        return Ok(());
    };

    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete session '{session_id}' and its conversation?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("\n  {}\n", style("Cancelled.").dim());
            return Ok(());
        }
    }

    // Best-effort server delete; local state is cleared regardless.
    let client = state.build_client(server_override);
    if let Err(err) = client.delete_session(&session_id).await {
        warn!(session_id = %session_id, error = %err, "Server-side delete failed");
        println!(
            "  {} Could not reach the server ({err}); clearing local state anyway.",
            style("!").yellow().bold()
        );
    }
    store.clear().await?;

    println!(
        "\n  {} Session {} deleted.\n",
        style("✓").green().bold(),
        style(&session_id).dim()
    );
    Ok(())
}

/// Show the stored session id, server URL, and data directory.
pub async fn status(state: &AppState) -> anyhow::Result<()> {
    let store = state.build_store();
    let stored = store.load().await?;

    println!();
    println!(
        "  {}  {}",
        style("Server:").bold(),
        style(&state.config.server_url).dim()
    );
    println!(
        "  {}  {}",
        style("Data dir:").bold(),
        style(state.data_dir.display()).dim()
    );
    match stored {
        Some(session_id) => println!(
            "  {}  {}",
            style("Session:").bold(),
            style(session_id).cyan()
        ),
        None => println!("  {}  {}", style("Session:").bold(), style("none").dim()),
    }
    println!();
    Ok(())
}
