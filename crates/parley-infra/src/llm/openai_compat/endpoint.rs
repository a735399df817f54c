//! Where each provider's chat completions endpoint lives and what its models
//! can take.

use parley_types::llm::{ProviderCapabilities, ProviderType};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Resolved endpoint for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointProfile {
    pub name: String,
    pub base_url: String,
    pub capabilities: ProviderCapabilities,
}

impl EndpointProfile {
    /// Profile for `provider`, pointed at `base_url` when one is configured.
    ///
    /// Limits for `openai_compatible` endpoints are conservative because they
    /// cannot be discovered.
    pub fn resolve(provider: ProviderType, base_url: Option<&str>) -> Self {
        let (default_url, max_context_tokens, max_output_tokens) = match provider {
            ProviderType::Gemini => (GEMINI_BASE_URL, 1_000_000, 65_536),
            ProviderType::OpenAi => (OPENAI_BASE_URL, 128_000, 16_384),
            // Credential resolution requires a base URL here.
            ProviderType::OpenAiCompatible => (OPENAI_BASE_URL, 32_768, 4_096),
        };

        Self {
            name: provider.to_string(),
            base_url: base_url
                .unwrap_or(default_url)
                .trim_end_matches('/')
                .to_string(),
            capabilities: ProviderCapabilities {
                max_context_tokens,
                max_output_tokens,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_is_default_endpoint() {
        let profile = EndpointProfile::resolve(ProviderType::Gemini, None);
        assert_eq!(profile.name, "gemini");
        assert_eq!(profile.base_url, GEMINI_BASE_URL);
        assert_eq!(profile.capabilities.max_context_tokens, 1_000_000);
    }

    #[test]
    fn test_openai_endpoint() {
        let profile = EndpointProfile::resolve(ProviderType::OpenAi, None);
        assert_eq!(profile.base_url, "https://api.openai.com/v1");
        assert_eq!(profile.capabilities.max_output_tokens, 16_384);
    }

    #[test]
    fn test_custom_base_url_trims_trailing_slash() {
        let profile = EndpointProfile::resolve(
            ProviderType::OpenAiCompatible,
            Some("http://localhost:11434/v1/"),
        );
        assert_eq!(profile.name, "openai_compatible");
        assert_eq!(profile.base_url, "http://localhost:11434/v1");
        assert_eq!(profile.capabilities.max_output_tokens, 4_096);
    }

    #[test]
    fn test_base_url_override_keeps_provider_limits() {
        let profile = EndpointProfile::resolve(ProviderType::Gemini, Some("https://proxy.local/v1"));
        assert_eq!(profile.name, "gemini");
        assert_eq!(profile.base_url, "https://proxy.local/v1");
        assert_eq!(profile.capabilities.max_output_tokens, 65_536);
    }
}
