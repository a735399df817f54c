//! One-shot `parley ask` command.

use anyhow::Result;
use console::style;

use parley_types::chat::ConversationKey;

use crate::state::AppState;

/// Run a single turn and print the reply.
pub async fn ask(
    state: &AppState,
    username: &str,
    conversation: &str,
    query: &str,
    json: bool,
) -> Result<()> {
    let service = state.chat_service()?;
    let outcome = service
        .run_turn(ConversationKey::new(username, conversation), query)
        .await?;

    if json {
        let body = serde_json::json!({
            "user_id": username,
            "conversation_id": conversation,
            "reply": outcome.reply,
            "turns": outcome.turns.len(),
            "usage": {
                "input_tokens": outcome.usage.input_tokens,
                "output_tokens": outcome.usage.output_tokens,
            },
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("AI").cyan().bold(), outcome.reply.trim());
    println!();
    Ok(())
}
