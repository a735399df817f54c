//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the workspace:
//! chat turns and transcripts, LLM request/response shapes, file
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
