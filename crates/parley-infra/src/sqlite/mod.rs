//! SQLite storage layer.
//!
//! The chat history store, backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod chat_history;
pub mod pool;
