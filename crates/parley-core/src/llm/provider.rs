//! LlmProvider trait definition.
//!
//! This is the model invoker abstraction: given an assembled prompt, return
//! one assistant reply or an `LlmError`. Uses RPITIT for `complete`.

use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

/// Trait for LLM provider backends (Gemini, OpenAI, ...).
///
/// Implementations live in parley-infra (e.g., `OpenAiCompatibleProvider`).
/// Callers get no retry, rate limiting or caching from this layer.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Context and output limits of the configured model.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
