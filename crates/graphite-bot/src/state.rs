//! Application state wiring all services together.
//!
//! The command handlers are generic over the store and generation ports;
//! AppState pins them to the SQLite and Hugging Face implementations.

use std::path::PathBuf;
use std::sync::Arc;

use graphite_core::command::handler::QuestCommands;
use graphite_core::service::quest::QuestService;
use graphite_core::suggest::SuggestionService;
use graphite_infra::config::{default_database_url, load_bot_config, resolve_data_dir};
use graphite_infra::sqlite::pool::DatabasePool;
use graphite_infra::sqlite::quest::SqliteQuestRepository;
use graphite_infra::suggest::huggingface::HuggingFaceProvider;
use graphite_types::config::BotConfig;
use secrecy::SecretString;

pub type ConcreteQuestCommands = QuestCommands<SqliteQuestRepository, HuggingFaceProvider>;

/// Shared application state, used by the gateway and the local CLI.
#[derive(Clone)]
pub struct AppState {
    pub commands: Arc<ConcreteQuestCommands>,
    pub config: BotConfig,
    pub data_dir: PathBuf,
    pub database_url: String,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Load config, open the store (running migrations), and wire handlers.
    pub async fn init(
        data_dir: Option<PathBuf>,
        database_url: Option<String>,
        huggingface_api_key: Option<SecretString>,
    ) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(resolve_data_dir);
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_bot_config(&data_dir).await;

        let database_url = database_url.unwrap_or_else(|| default_database_url(&data_dir));
        let db_pool = DatabasePool::new(&database_url).await?;

        let provider = HuggingFaceProvider::new(huggingface_api_key, &config.suggestion)?;
        if !provider.is_configured() {
            tracing::warn!("HUGGINGFACE_API_KEY is not set; /quest suggest will apologize instead of suggesting");
        } else {
            tracing::debug!(model = provider.model(), "suggestion provider ready");
        }

        let commands = QuestCommands::new(
            QuestService::new(SqliteQuestRepository::new(db_pool.clone())),
            SuggestionService::new(provider, config.suggestion.parameters()),
            config.page_size,
        );

        tracing::debug!(data_dir = %data_dir.display(), page_size = config.page_size, "state ready");

        Ok(Self {
            commands: Arc::new(commands),
            config,
            data_dir,
            database_url,
            db_pool,
        })
    }

    /// Release the store handle.
    pub async fn shutdown(&self) {
        self.db_pool.close().await;
        tracing::debug!("database pool closed");
    }
}
