//! Business logic and port definitions for Parley.
//!
//! This crate defines the "ports" (`MessageStore`, `LlmProvider`) that the
//! infrastructure layer implements, and the chat pipeline built on them. It
//! depends only on `parley-types` -- never on `parley-infra` or any
//! database/IO crate.

pub mod chat;
pub mod llm;

#[cfg(test)]
pub(crate) mod test_support;
