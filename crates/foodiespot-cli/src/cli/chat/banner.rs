//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the server, the session id, and whether a prior conversation was
/// restored, with a hint about slash commands.
pub fn print_welcome_banner(server_url: &str, session_id: &str, resumed: bool) {
    println!();
    println!("  {} {}", "🍽", style("FoodieSpot").cyan().bold());
    println!(
        "  {}",
        style("Find the perfect restaurant and make reservations.").dim()
    );
    println!();
    println!("  {}  {}", style("Server:").bold(), style(server_url).dim());
    println!(
        "  {}  {}{}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim(),
        if resumed {
            style(" (restored)").dim().to_string()
        } else {
            String::new()
        }
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
