//! Main chat loop orchestration.
//!
//! Drives the session manager through the conversation lifecycle:
//! bootstrap (restoring a prior conversation transparently), the input
//! loop with a spinner while a send is in flight, slash commands, and the
//! explicit `/recover` action after a timed-out send.

use console::style;

use foodiespot_types::chat::{Message, MessageRole, SendOutcome};

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

/// Spinner shown while a network round trip is in flight.
fn spinner(message: &str) -> indicatif::ProgressBar {
    let bar = indicatif::ProgressBar::new_spinner();
    bar.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static spinner template"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}

/// Print one conversation turn with role styling.
fn print_message(message: &Message) {
    let label = match message.role {
        MessageRole::User => style("You >").green().bold(),
        MessageRole::Assistant => style("FoodieSpot >").cyan().bold(),
    };
    println!("  {} {}", label, message.content);
}

/// Print the assistant's latest turn (reply or notice).
fn print_latest(messages: &[Message]) {
    if let Some(message) = messages.last() {
        println!();
        print_message(message);
        println!();
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(
    state: &AppState,
    server_override: Option<&str>,
    user_override: Option<&str>,
) -> anyhow::Result<()> {
    let mut manager = state.build_manager(server_override, user_override);

    let connecting = spinner("connecting...");
    let bootstrapped = manager.bootstrap().await;
    connecting.finish_and_clear();
    bootstrapped?;

    let session_id = manager
        .session_id()
        .map(|id| id.to_string())
        .unwrap_or_default();
    let resumed = !manager.messages().is_empty();
    let server_url = server_override.unwrap_or(&state.config.server_url);
    print_welcome_banner(server_url, &session_id, resumed);

    for message in manager.messages() {
        print_message(message);
    }
    if resumed {
        println!();
    }

    let idle_prompt = format!("  {} ", style("You >").green().bold());
    let pending_prompt = format!(
        "  {} ",
        style("You (reply pending, /recover) >").yellow().bold()
    );
    let (mut chat_input, _writer) = ChatInput::new(idle_prompt.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session kept; come back any time.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session kept; come back any time.").dim());
                            break;
                        }
                        ChatCommand::Recover => {
                            if !manager.recovery_available() {
                                println!(
                                    "\n  {} Nothing to recover right now.\n",
                                    style("i").dim().bold()
                                );
                            } else {
                                let recovering = spinner("recovering...");
                                let result = manager.recover().await;
                                recovering.finish_and_clear();
                                match result {
                                    Ok(()) => {
                                        println!();
                                        for message in manager.messages() {
                                            print_message(message);
                                        }
                                        println!();
                                    }
                                    Err(err) => {
                                        println!(
                                            "\n  {} Recovery failed: {err}",
                                            style("!").red().bold()
                                        );
                                        println!(
                                            "  {}\n",
                                            style("The reply may still be on its way; /recover to retry.").dim()
                                        );
                                    }
                                }
                            }
                        }
                        ChatCommand::New => {
                            manager.delete().await?;
                            let starting = spinner("starting fresh...");
                            let bootstrapped = manager.bootstrap().await;
                            starting.finish_and_clear();
                            bootstrapped?;
                            println!(
                                "\n  {} New conversation started.\n",
                                style("✓").green().bold()
                            );
                            for message in manager.messages() {
                                print_message(message);
                            }
                        }
                        ChatCommand::History => {
                            println!();
                            for message in manager.messages() {
                                print_message(message);
                            }
                            println!();
                        }
                        ChatCommand::Unknown(name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                } else {
                    let thinking = spinner("thinking...");
                    let outcome = manager.send(text).await;
                    thinking.finish_and_clear();

                    match outcome {
                        Ok(SendOutcome::Delivered) => print_latest(manager.messages()),
                        Ok(SendOutcome::TimedOut) => {
                            print_latest(manager.messages());
                            println!(
                                "  {}\n",
                                style("Type /recover once you want to fetch the reply.").dim()
                            );
                        }
                        Ok(SendOutcome::SessionReset) => {
                            println!(
                                "\n  {} The previous conversation expired; a fresh one was started.",
                                style("!").yellow().bold()
                            );
                            println!(
                                "  {}\n",
                                style("Your last message was not delivered; send it again if you still need it.").dim()
                            );
                            for message in manager.messages() {
                                print_message(message);
                            }
                        }
                        Ok(SendOutcome::Failed) => print_latest(manager.messages()),
                        Err(err) => {
                            println!("\n  {} {err}\n", style("!").red().bold());
                        }
                    }
                }

                let prompt = if manager.recovery_available() {
                    &pending_prompt
                } else {
                    &idle_prompt
                };
                chat_input.update_prompt(prompt);
            }
        }
    }

    Ok(())
}
