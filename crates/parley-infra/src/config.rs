//! Startup configuration loader for Parley.
//!
//! Reads `config.toml` from the data directory (`~/.parley/` by default) and
//! resolves model credentials from the environment. File settings fall back
//! to defaults when the file is missing or malformed; a missing credential is
//! a `ConfigError` the caller surfaces at startup.

use std::path::{Path, PathBuf};

use parley_types::config::{ModelSettings, ParleyConfig};
use parley_types::error::ConfigError;
use parley_types::llm::ProviderType;
use secrecy::SecretString;

use crate::sqlite::pool::database_url_for;

/// Overrides the model id for any provider.
pub const MODEL_OVERRIDE_ENV: &str = "PARLEY_MODEL";

/// Resolve the data directory.
///
/// Uses `PARLEY_DATA_DIR` if set, otherwise `~/.parley`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PARLEY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".parley");
    }

    PathBuf::from(".parley")
}

/// Resolve the database URL: `PARLEY_DATABASE_URL`, else `parley.db` in `data_dir`.
pub fn resolve_database_url(data_dir: &Path) -> String {
    std::env::var("PARLEY_DATABASE_URL").unwrap_or_else(|_| database_url_for(data_dir))
}

/// What happened when looking for a `.env` file.
#[derive(Debug)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    NotFound,
    Failed(String),
}

impl DotenvOutcome {
    fn from_result(result: Result<PathBuf, dotenv::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(err) if err.not_found() => Self::NotFound,
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    /// Report the outcome. Call once a subscriber is installed.
    pub fn log(&self) {
        match self {
            Self::Loaded(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Self::NotFound => {}
            Self::Failed(err) => tracing::warn!("Failed to load .env: {err}"),
        }
    }
}

/// Load `.env` from the working directory, if there is one.
///
/// Runs before tracing is configured, so the outcome is returned for
/// [`DotenvOutcome::log`] instead of being logged here.
pub fn load_dotenv() -> DotenvOutcome {
    DotenvOutcome::from_result(dotenv::dotenv())
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ParleyConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> ParleyConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ParleyConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ParleyConfig::default();
        }
    };

    match toml::from_str::<ParleyConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ParleyConfig::default()
        }
    }
}

/// Everything needed to construct the model invoker.
///
/// Does NOT derive Debug so the API key cannot end up in logs.
pub struct ModelCredentials {
    pub provider: ProviderType,
    pub model: String,
    pub api_key: SecretString,
    pub base_url: Option<String>,
}

/// Environment variable names consulted for a provider: `(api_key, model)`.
pub fn provider_env_vars(provider: ProviderType) -> (&'static str, &'static str) {
    match provider {
        ProviderType::Gemini => ("GOOGLE_API_KEY", "GOOGLE_MODEL"),
        ProviderType::OpenAi => ("OPENAI_API_KEY", "OPENAI_MODEL"),
        ProviderType::OpenAiCompatible => ("PARLEY_API_KEY", MODEL_OVERRIDE_ENV),
    }
}

/// Resolve credentials for the configured provider.
///
/// `lookup` reads one environment variable; pass `|k| std::env::var(k).ok()`
/// in production. Model precedence: `PARLEY_MODEL`, the provider's model
/// variable, then `model` in `config.toml`.
pub fn resolve_model_credentials(
    settings: &ModelSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ModelCredentials, ConfigError> {
    let (key_var, model_var) = provider_env_vars(settings.provider);
    let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    let api_key = non_empty(key_var).ok_or_else(|| ConfigError::MissingEnv(key_var.to_string()))?;

    let model = non_empty(MODEL_OVERRIDE_ENV)
        .or_else(|| non_empty(model_var))
        .or_else(|| settings.model.clone())
        .ok_or_else(|| ConfigError::MissingEnv(model_var.to_string()))?;

    let base_url = non_empty("PARLEY_BASE_URL").or_else(|| settings.base_url.clone());
    if settings.provider == ProviderType::OpenAiCompatible && base_url.is_none() {
        return Err(ConfigError::Invalid(
            "openai_compatible provider requires base_url or PARLEY_BASE_URL".to_string(),
        ));
    }

    Ok(ModelCredentials {
        provider: settings.provider,
        model,
        api_key: SecretString::from(api_key),
        base_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.model.provider, ProviderType::Gemini);
        assert_eq!(config.prompt.system, "You're an assistant.");
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[model]
provider = "openai"
max_tokens = 300

[prompt]
system = "Answer in French."
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.model.provider, ProviderType::OpenAi);
        assert_eq!(config.model.max_tokens, 300);
        assert_eq!(config.prompt.system, "Answer in French.");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.model.provider, ProviderType::Gemini);
    }

    #[test]
    fn gemini_credentials_from_google_env() {
        let creds = resolve_model_credentials(
            &ModelSettings::default(),
            env(&[("GOOGLE_API_KEY", "g-key"), ("GOOGLE_MODEL", "gemini-2.0-flash")]),
        )
        .unwrap();
        assert_eq!(creds.provider, ProviderType::Gemini);
        assert_eq!(creds.model, "gemini-2.0-flash");
        assert_eq!(creds.api_key.expose_secret(), "g-key");
        assert!(creds.base_url.is_none());
    }

    #[test]
    fn missing_api_key_is_config_error() {
        let result = resolve_model_credentials(
            &ModelSettings::default(),
            env(&[("GOOGLE_MODEL", "gemini-2.0-flash")]),
        );
        match result {
            Err(ConfigError::MissingEnv(var)) => assert_eq!(var, "GOOGLE_API_KEY"),
            _ => panic!("expected MissingEnv"),
        }
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let result = resolve_model_credentials(
            &ModelSettings::default(),
            env(&[("GOOGLE_API_KEY", "  "), ("GOOGLE_MODEL", "gemini-2.0-flash")]),
        );
        assert!(matches!(result, Err(ConfigError::MissingEnv(_))));
    }

    #[test]
    fn missing_model_is_config_error() {
        let result =
            resolve_model_credentials(&ModelSettings::default(), env(&[("GOOGLE_API_KEY", "k")]));
        match result {
            Err(ConfigError::MissingEnv(var)) => assert_eq!(var, "GOOGLE_MODEL"),
            _ => panic!("expected MissingEnv"),
        }
    }

    #[test]
    fn model_precedence() {
        let settings = ModelSettings {
            model: Some("from-file".to_string()),
            ..ModelSettings::default()
        };

        let creds = resolve_model_credentials(&settings, env(&[("GOOGLE_API_KEY", "k")])).unwrap();
        assert_eq!(creds.model, "from-file");

        let creds = resolve_model_credentials(
            &settings,
            env(&[("GOOGLE_API_KEY", "k"), ("GOOGLE_MODEL", "from-env")]),
        )
        .unwrap();
        assert_eq!(creds.model, "from-env");

        let creds = resolve_model_credentials(
            &settings,
            env(&[
                ("GOOGLE_API_KEY", "k"),
                ("GOOGLE_MODEL", "from-env"),
                ("PARLEY_MODEL", "override"),
            ]),
        )
        .unwrap();
        assert_eq!(creds.model, "override");
    }

    #[test]
    fn openai_compatible_requires_base_url() {
        let settings = ModelSettings {
            provider: ProviderType::OpenAiCompatible,
            ..ModelSettings::default()
        };
        let lookup = env(&[("PARLEY_API_KEY", "k"), ("PARLEY_MODEL", "llama3")]);
        assert!(matches!(
            resolve_model_credentials(&settings, &lookup),
            Err(ConfigError::Invalid(_))
        ));

        let with_url = env(&[
            ("PARLEY_API_KEY", "k"),
            ("PARLEY_MODEL", "llama3"),
            ("PARLEY_BASE_URL", "http://localhost:11434/v1"),
        ]);
        let creds = resolve_model_credentials(&settings, with_url).unwrap();
        assert_eq!(creds.base_url.as_deref(), Some("http://localhost:11434/v1"));
    }

    #[test]
    fn dotenv_outcome_classifies_results() {
        let found = DotenvOutcome::from_result(Ok(PathBuf::from("/work/.env")));
        assert!(matches!(found, DotenvOutcome::Loaded(path) if path.ends_with(".env")));

        let missing = DotenvOutcome::from_result(Err(dotenv::Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no .env",
        ))));
        assert!(matches!(missing, DotenvOutcome::NotFound));

        let malformed =
            DotenvOutcome::from_result(Err(dotenv::Error::LineParse("KEY VALUE".to_string(), 3)));
        assert!(matches!(malformed, DotenvOutcome::Failed(_)));
    }
}
