//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(username: &str, conversation_id: &str, model: &str, stored_turns: usize) {
    println!();
    println!("  * {}", style("Parley").cyan().bold());
    println!();
    println!("  {}         {}", style("User:").bold(), style(username).dim());
    println!(
        "  {} {}",
        style("Conversation:").bold(),
        style(conversation_id).dim()
    );
    println!("  {}        {}", style("Model:").bold(), style(model).dim());
    if stored_turns > 0 {
        println!(
            "  {}      {}",
            style("History:").bold(),
            style(format!("{stored_turns} stored turn(s), replayed on every message")).dim()
        );
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
