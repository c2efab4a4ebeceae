pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::add_situations::AddSituationsUseCase;
use crate::application::recall::RecallUseCase;
use crate::config::MemoryConfig;
use crate::domain::entities::memory_record::{MemoryMatch, MemoryRecord, NewSituation};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::situation_store::SituationStore;
use crate::domain::values::embedding_strategy::{EmbeddingStrategy, RankingMode};
use crate::infrastructure::embeddings::build_embedder;
use crate::infrastructure::sqlite::situation_store::SqliteSituationStore;
use rusqlite::Connection;
use std::sync::Arc;
use tracing::info;

/// Memory of past market situations and the recommendations made for them.
///
/// The embedding strategy is resolved once from the configuration; callers
/// only see [`add_situations`](Self::add_situations) and
/// [`get_memories`](Self::get_memories).
pub struct MemoryBank {
    name: String,
    config: MemoryConfig,
    strategy: EmbeddingStrategy,
    store: Arc<dyn SituationStore>,
    add_uc: AddSituationsUseCase,
    recall_uc: RecallUseCase,
}

impl MemoryBank {
    /// A bank backed by a private in-memory database.
    pub fn new(name: &str, config: MemoryConfig) -> Result<Self, DomainError> {
        Self::open(name, config, ":memory:")
    }

    /// A bank whose collection lives in the SQLite database at `db_path`;
    /// records added in earlier runs are kept and ids continue after them.
    pub fn open(name: &str, config: MemoryConfig, db_path: &str) -> Result<Self, DomainError> {
        config.validate()?;
        let strategy = EmbeddingStrategy::resolve(&config.llm_provider, &config.backend_url);
        let embedder = build_embedder(&strategy, config.embedding_dimension)?;
        Self::with_embedder(name, config, strategy, embedder, db_path)
    }

    /// Bypass provider construction; `strategy` still decides the ranking mode.
    /// The collection width is `embedder.dimension()`.
    pub fn with_embedder(
        name: &str,
        config: MemoryConfig,
        strategy: EmbeddingStrategy,
        embedder: Arc<dyn EmbeddingProvider>,
        db_path: &str,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Configuration("Memory bank name must not be empty".into()));
        }
        config.validate()?;

        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        let store: Arc<dyn SituationStore> = Arc::new(SqliteSituationStore::open(
            conn,
            name,
            embedder.dimension(),
            config.distance,
        )?);

        let ranking = strategy.ranking_mode();
        info!(
            bank = name,
            strategy = %strategy,
            embedder = %embedder.name(),
            %ranking,
            "memory bank ready"
        );

        Ok(Self {
            name: name.to_string(),
            add_uc: AddSituationsUseCase::new(embedder.clone(), store.clone(), config.max_text_length),
            recall_uc: RecallUseCase::new(embedder, store.clone(), ranking, config.max_text_length),
            config,
            strategy,
            store,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn strategy(&self) -> &EmbeddingStrategy {
        &self.strategy
    }

    pub fn ranking_mode(&self) -> RankingMode {
        self.strategy.ranking_mode()
    }

    pub fn dimension(&self) -> usize {
        self.store.dimension()
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        self.store.count()
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }

    /// Stored records in insertion order.
    pub fn records(&self) -> Result<Vec<MemoryRecord>, DomainError> {
        self.store.all()
    }

    /// Append situation/recommendation pairs. Embedding failures never fail
    /// this call; they degrade to a zero vector.
    pub async fn add_situations<I, P>(&self, pairs: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = P>,
        P: Into<NewSituation>,
    {
        let pairs: Vec<NewSituation> = pairs.into_iter().map(Into::into).collect();
        self.add_uc.execute(pairs).await?;
        Ok(())
    }

    pub async fn get_memories(&self, situation: &str, n_matches: usize) -> Result<Vec<MemoryMatch>, DomainError> {
        self.recall_uc.execute(situation, n_matches).await
    }
}
