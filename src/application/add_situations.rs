use crate::domain::entities::memory_record::NewSituation;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::situation_store::{EmbeddedSituation, SituationStore};
use crate::domain::values::text_limit::truncate_for_embedding;
use std::sync::Arc;
use tracing::info;

pub struct AddSituationsUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn SituationStore>,
    max_text_length: usize,
}

impl AddSituationsUseCase {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn SituationStore>,
        max_text_length: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            max_text_length,
        }
    }

    /// Embed every situation, then insert the whole batch at once. Returns the
    /// assigned ids.
    pub async fn execute(&self, pairs: Vec<NewSituation>) -> Result<Vec<String>, DomainError> {
        if pairs.is_empty() {
            return Ok(vec![]);
        }

        let mut batch = Vec::with_capacity(pairs.len());
        for situation in pairs {
            let embedding = {
                let text = truncate_for_embedding(&situation.situation, self.max_text_length);
                self.embedder.embed(&text).await?
            };
            batch.push(EmbeddedSituation { situation, embedding });
        }

        let ids = self.store.add_batch(&batch)?;
        info!(
            collection = self.store.collection(),
            added = ids.len(),
            "added situations"
        );
        Ok(ids)
    }
}
