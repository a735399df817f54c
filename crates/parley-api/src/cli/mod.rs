//! CLI command definitions for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod history;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use parley_types::chat::DEFAULT_CONVERSATION_ID;

/// Chat with a language model, one persistent conversation per user.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web widget and REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Interactive chat session in the terminal.
    Chat {
        /// Name identifying your conversation history.
        username: String,

        #[arg(long, short = 'c', default_value = DEFAULT_CONVERSATION_ID)]
        conversation: String,
    },

    /// Send one message and print the reply.
    Ask {
        username: String,

        /// The message to send.
        query: String,

        #[arg(long, short = 'c', default_value = DEFAULT_CONVERSATION_ID)]
        conversation: String,
    },

    /// Print a stored conversation.
    History {
        username: String,

        #[arg(long, short = 'c', default_value = DEFAULT_CONVERSATION_ID)]
        conversation: String,
    },

    /// Delete a stored conversation.
    Clear {
        username: String,

        #[arg(long, short = 'c', default_value = DEFAULT_CONVERSATION_ID)]
        conversation: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Show database, model and storage status.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_conversation_defaults_to_fixed_id() {
        let cli = Cli::try_parse_from(["parley", "history", "alice"]).unwrap();
        match cli.command {
            Commands::History {
                username,
                conversation,
            } => {
                assert_eq!(username, "alice");
                assert_eq!(conversation, "1");
            }
            _ => panic!("expected history command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["parley", "ask", "alice", "hi", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }
}
