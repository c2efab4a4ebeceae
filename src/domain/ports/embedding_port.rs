use crate::domain::error::DomainError;

/// A source of fixed-width text embeddings.
///
/// Implementations may fail; callers that must not fail wrap providers in a
/// [`FallbackChain`](crate::infrastructure::embeddings::fallback::FallbackChain).
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Width of the vectors returned by [`embed`](Self::embed).
    fn dimension(&self) -> usize;

    /// Short label for logs, e.g. `openai:text-embedding-3-small`.
    fn name(&self) -> String;
}
