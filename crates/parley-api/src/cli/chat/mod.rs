//! Interactive terminal chat for Parley.
//!
//! Every line the user submits is one full turn through `ChatService`: the
//! conversation is replayed from the store, sent to the model, and both turns
//! are persisted. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
