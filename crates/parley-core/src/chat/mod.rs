//! Chat history persistence, replay and the turn pipeline.
//!
//! - `store`: the `MessageStore` port the infrastructure layer implements
//! - `memory`: write-through `ConversationMemory` adapter
//! - `router`: `SessionRouter` building adapters per conversation key
//! - `prompt`: `PromptAssembler` for model-ready requests
//! - `service`: `ChatService::handle_turn` tying them together

pub mod memory;
pub mod prompt;
pub mod router;
pub mod service;
pub mod store;
