//! Application state wiring the store, router and chat service together.
//!
//! `AppState` holds what every command needs (the database and the session
//! router). The model invoker is only built by commands that call it, so
//! `history`, `clear` and `status` work without credentials.

use std::path::PathBuf;
use std::sync::Arc;

use parley_core::chat::prompt::PromptAssembler;
use parley_core::chat::router::SessionRouter;
use parley_core::chat::service::ChatService;
use parley_core::llm::provider::LlmProvider;
use parley_infra::config::{
    load_config, resolve_data_dir, resolve_database_url, resolve_model_credentials,
};
use parley_infra::llm::OpenAiCompatibleProvider;
use parley_infra::sqlite::chat_history::SqliteMessageStore;
use parley_infra::sqlite::pool::DatabasePool;
use parley_types::config::ParleyConfig;

/// Concrete chat service pinned to the SQLite store and the chat completions
/// client.
pub type ConcreteChatService = ChatService<SqliteMessageStore, OpenAiCompatibleProvider>;

/// Shared application state used by CLI commands and the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub router: SessionRouter<SqliteMessageStore>,
    pub config: Arc<ParleyConfig>,
    pub data_dir: PathBuf,
    pub database_url: String,
}

impl AppState {
    /// Resolve configuration, connect to the database and run migrations.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let database_url = resolve_database_url(&data_dir);
        Self::open(data_dir, database_url, config).await
    }

    /// Connect to `database_url` with an already loaded configuration.
    pub async fn open(
        data_dir: PathBuf,
        database_url: String,
        config: ParleyConfig,
    ) -> anyhow::Result<Self> {
        let pool = DatabasePool::open(&database_url).await?;
        let store = Arc::new(SqliteMessageStore::new(pool));

        Ok(Self {
            router: SessionRouter::new(store),
            config: Arc::new(config),
            data_dir,
            database_url,
        })
    }

    /// Build the chat service, resolving model credentials from the
    /// environment. Fails with `ConfigError::MissingEnv` when they are absent.
    pub fn chat_service(&self) -> anyhow::Result<ConcreteChatService> {
        let creds = resolve_model_credentials(&self.config.model, |key| std::env::var(key).ok())?;
        let provider = OpenAiCompatibleProvider::from_credentials(&creds);

        tracing::debug!(
            provider = provider.name(),
            model = provider.model(),
            base_url = provider.base_url(),
            "Model invoker ready"
        );

        let assembler =
            PromptAssembler::from_settings(&creds.model, &self.config.model, &self.config.prompt);

        Ok(ChatService::new(self.router.clone(), assembler, provider))
    }
}
