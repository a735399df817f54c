//! Stored conversation commands: `parley history` and `parley clear`.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use parley_types::chat::{ASSISTANT_LABEL, ConversationKey, Transcript};

use crate::state::AppState;

/// Print the transcript of a conversation.
pub async fn show_history(
    state: &AppState,
    username: &str,
    conversation: &str,
    json: bool,
) -> Result<()> {
    let transcript = state
        .router
        .transcript(ConversationKey::new(username, conversation))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    if transcript.is_empty() {
        println!();
        println!(
            "  No messages stored for {} (conversation {}).",
            style(username).cyan(),
            conversation
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", transcript_table(&transcript));
    println!();
    println!("  {} turn(s)", style(transcript.lines.len()).bold());
    println!();

    Ok(())
}

fn transcript_table(transcript: &Transcript) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Speaker", "Message"]);

    for (i, line) in transcript.lines.iter().enumerate() {
        let speaker = if line.speaker == ASSISTANT_LABEL {
            Cell::new(&line.speaker).fg(Color::Cyan)
        } else {
            Cell::new(&line.speaker).fg(Color::Green)
        };
        table.add_row(vec![Cell::new(i + 1), speaker, Cell::new(&line.text)]);
    }

    table
}

/// Delete a stored conversation, asking first unless `force` is set.
pub async fn clear_history(
    state: &AppState,
    username: &str,
    conversation: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete the stored history of '{username}' (conversation {conversation})? This cannot be undone."
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state
        .router
        .clear(ConversationKey::new(username, conversation))
        .await?;

    if json {
        let body = serde_json::json!({
            "cleared": true,
            "user_id": username,
            "conversation_id": conversation,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!(
            "  {} Cleared history for {}",
            style("✓").green().bold(),
            style(username).cyan()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::{ChatTurn, TurnRole};

    #[test]
    fn test_transcript_table_rows() {
        let key = ConversationKey::default_for("alice");
        let transcript = Transcript::from_turns(
            &key,
            &[
                ChatTurn::new(&key, TurnRole::Human, "What is 2+2?"),
                ChatTurn::new(&key, TurnRole::Assistant, "4"),
            ],
        );

        let rendered = transcript_table(&transcript).to_string();
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("What is 2+2?"));
        assert!(rendered.contains("AI"));
    }
}
