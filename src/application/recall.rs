use crate::application::lexical_match;
use crate::domain::entities::memory_record::MemoryMatch;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::situation_store::SituationStore;
use crate::domain::values::embedding_strategy::RankingMode;
use crate::domain::values::text_limit::truncate_for_embedding;
use std::sync::Arc;
use tracing::debug;

pub struct RecallUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn SituationStore>,
    ranking: RankingMode,
    max_text_length: usize,
}

impl RecallUseCase {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn SituationStore>,
        ranking: RankingMode,
        max_text_length: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            ranking,
            max_text_length,
        }
    }

    /// Best matches first. An empty collection yields an empty list whatever
    /// `n_matches` is; otherwise `n_matches` must be positive.
    pub async fn execute(&self, situation: &str, n_matches: usize) -> Result<Vec<MemoryMatch>, DomainError> {
        if self.store.count()? == 0 {
            return Ok(vec![]);
        }
        if n_matches == 0 {
            return Err(DomainError::InvalidInput("n_matches must be at least 1".into()));
        }

        let matches = match self.ranking {
            RankingMode::Lexical => self.lexical(situation, n_matches)?,
            RankingMode::Vector => self.vector(situation, n_matches).await?,
        };
        debug!(
            collection = self.store.collection(),
            ranking = %self.ranking,
            found = matches.len(),
            "recalled memories"
        );
        Ok(matches)
    }

    fn lexical(&self, situation: &str, n_matches: usize) -> Result<Vec<MemoryMatch>, DomainError> {
        let records = self.store.all()?;
        Ok(lexical_match::rank(situation, &records, n_matches))
    }

    async fn vector(&self, situation: &str, n_matches: usize) -> Result<Vec<MemoryMatch>, DomainError> {
        let text = truncate_for_embedding(situation, self.max_text_length);
        let query = self.embedder.embed(&text).await?;
        let hits = self.store.nearest(&query, n_matches)?;
        Ok(hits
            .iter()
            .map(|(record, distance)| MemoryMatch::from_record(record, 1.0 - distance))
            .collect())
    }
}
