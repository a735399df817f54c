//! Infrastructure layer for Parley.
//!
//! Contains the implementations of the traits defined in `parley-core`: the
//! SQLite chat history store and the OpenAI-compatible model invoker, plus the
//! startup configuration loader.

pub mod config;
pub mod llm;
pub mod sqlite;
