//! Best-effort embedding: try providers in order, degrade to a zero vector.
//!
//! Every vector leaving the chain has exactly the chain's width. Provider
//! vectors of another native width are zero-padded or cut, so one collection
//! never mixes widths.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct FallbackChain {
    attempts: Vec<Arc<dyn EmbeddingProvider>>,
    dimension: usize,
}

impl FallbackChain {
    pub fn new(attempts: Vec<Arc<dyn EmbeddingProvider>>, dimension: usize) -> Self {
        Self { attempts, dimension }
    }

    pub fn single(provider: Arc<dyn EmbeddingProvider>, dimension: usize) -> Self {
        Self::new(vec![provider], dimension)
    }

    pub fn zero_vector(&self) -> Vec<f32> {
        vec![0.0; self.dimension]
    }

    fn conform(&self, mut vector: Vec<f32>, source: &str) -> Vec<f32> {
        if vector.len() != self.dimension {
            debug!(
                provider = source,
                from = vector.len(),
                to = self.dimension,
                "conforming embedding width"
            );
            vector.resize(self.dimension, 0.0);
        }
        vector
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for FallbackChain {
    /// Never fails.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        for (i, provider) in self.attempts.iter().enumerate() {
            match provider.embed(text).await {
                Ok(vector) => return Ok(self.conform(vector, &provider.name())),
                Err(e) => {
                    let next = self.attempts.get(i + 1).map(|p| p.name());
                    warn!(
                        provider = %provider.name(),
                        fallback = next.as_deref().unwrap_or("zero vector"),
                        "embedding failed: {e}"
                    );
                }
            }
        }
        warn!(dimension = self.dimension, "all embedding providers failed, using zero vector");
        Ok(self.zero_vector())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> String {
        let names: Vec<String> = self.attempts.iter().map(|p| p.name()).collect();
        format!("chain[{}]", names.join(" -> "))
    }
}
