//! Main chat loop orchestration.
//!
//! Builds the chat service, prints the banner, then runs one turn per
//! submitted line until the user exits. A failed turn is reported and the
//! loop continues; nothing is retried.

use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use parley_types::chat::{ASSISTANT_LABEL, ConversationKey};

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(spinner_style);
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop for one conversation.
pub async fn run_chat_loop(
    state: &AppState,
    username: &str,
    conversation_id: &str,
) -> anyhow::Result<()> {
    let service = state.chat_service()?;
    let key = ConversationKey::new(username, conversation_id);

    let stored = state.router.route(key.clone()).await?;
    print_welcome_banner(
        username,
        conversation_id,
        service.assembler().model(),
        stored.all_messages().len(),
    );
    drop(stored);

    let prompt = format!("  {} ", style(format!("{username} >")).green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::History => match state.router.transcript(key.clone()).await {
                    Ok(transcript) if transcript.is_empty() => {
                        println!("\n  {}\n", style("No messages yet.").dim());
                    }
                    Ok(transcript) => {
                        println!();
                        for line in &transcript.lines {
                            let speaker = if line.speaker == ASSISTANT_LABEL {
                                style(&line.speaker).cyan().bold()
                            } else {
                                style(&line.speaker).green().bold()
                            };
                            println!("  {speaker} {}", line.text);
                        }
                        println!();
                    }
                    Err(e) => {
                        eprintln!("\n  {} Could not load history: {e}\n", style("!").red().bold());
                    }
                },
                ChatCommand::Clear => match state.router.clear(key.clone()).await {
                    Ok(()) => println!("\n  {} History cleared.\n", style("✓").green().bold()),
                    Err(e) => {
                        eprintln!("\n  {} Could not clear history: {e}\n", style("!").red().bold());
                    }
                },
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        let spinner = thinking_spinner();
        let started = Instant::now();
        let result = service.run_turn(key.clone(), &text).await;
        spinner.finish_and_clear();

        match result {
            Ok(outcome) => {
                println!("\n  {} {}", style(ASSISTANT_LABEL).cyan().bold(), outcome.reply.trim());
                println!(
                    "  {}",
                    style(format!(
                        "{} tokens | {:.1}s | {} stored turns",
                        outcome.usage.output_tokens,
                        started.elapsed().as_secs_f64(),
                        outcome.turns.len()
                    ))
                    .dim()
                );
                println!();
            }
            Err(e) => {
                eprintln!("\n  {} {e}", style("!").red().bold());
                eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
            }
        }
    }

    Ok(())
}
