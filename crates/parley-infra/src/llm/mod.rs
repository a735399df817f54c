//! Model invoker implementations.
//!
//! Every supported backend speaks the OpenAI chat completions protocol, so a
//! single [`OpenAiCompatibleProvider`] covers them.

pub mod openai_compat;

pub use self::openai_compat::OpenAiCompatibleProvider;
