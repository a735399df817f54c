//! File configuration types for Parley.
//!
//! `ParleyConfig` represents the optional `config.toml` in the data directory.
//! Credentials never live here; they come from the environment.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderType;

/// System instruction placed at the start of every prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You're an assistant.";

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub model: ModelSettings,

    #[serde(default)]
    pub prompt: PromptSettings,
}

/// Which endpoint to call and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_provider")]
    pub provider: ProviderType,

    /// Model identifier. Environment variables take precedence.
    #[serde(default)]
    pub model: Option<String>,

    /// Override the provider's default base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_provider() -> ProviderType {
    ProviderType::Gemini
}

fn default_max_tokens() -> u32 {
    2048
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSettings {
    #[serde(default = "default_system_prompt")]
    pub system: String,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            system: default_system_prompt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = ParleyConfig::default();
        assert_eq!(config.model.provider, ProviderType::Gemini);
        assert_eq!(config.model.max_tokens, 2048);
        assert!(config.model.model.is_none());
        assert_eq!(config.prompt.system, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: ParleyConfig = toml::from_str("").unwrap();
        assert_eq!(config.model.provider, ProviderType::Gemini);
        assert_eq!(config.prompt.system, "You're an assistant.");
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
[model]
provider = "openai"
model = "gpt-4o-mini"
max_tokens = 512
temperature = 0.2

[prompt]
system = "You are terse."
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.provider, ProviderType::OpenAi);
        assert_eq!(config.model.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.model.max_tokens, 512);
        assert_eq!(config.model.temperature, Some(0.2));
        assert_eq!(config.prompt.system, "You are terse.");
    }
}
