//! Shared test helpers.
#![allow(dead_code)]

use situation_memory::config::MemoryConfig;
use situation_memory::domain::error::DomainError;
use situation_memory::domain::ports::embedding_port::EmbeddingProvider;
use situation_memory::domain::values::embedding_strategy::EmbeddingStrategy;
use situation_memory::domain::values::llm_provider::LlmProvider;
use situation_memory::infrastructure::embeddings::hash::HashEmbedder;
use situation_memory::MemoryBank;
use std::sync::{Arc, Mutex};

pub const DEEPSEEK_URL: &str = "https://api.modelarts-maas.com/v1";

pub fn deepseek_config() -> MemoryConfig {
    MemoryConfig::new(LlmProvider::DeepSeek, DEEPSEEK_URL)
}

/// Bank on the no-embedding backend: hash vectors, lexical ranking.
pub fn lexical_bank() -> MemoryBank {
    MemoryBank::new("test_memory", deepseek_config()).unwrap()
}

pub fn native_strategy() -> EmbeddingStrategy {
    EmbeddingStrategy::Native {
        model: "stub".into(),
        base_url: "http://stub.invalid/v1".into(),
    }
}

/// Bank ranked by vector distance, embedding through `embedder`.
pub fn vector_bank(embedder: Arc<dyn EmbeddingProvider>) -> MemoryBank {
    MemoryBank::with_embedder(
        "test_memory",
        MemoryConfig::default(),
        native_strategy(),
        embedder,
        ":memory:",
    )
    .unwrap()
}

/// Bag-of-words over a fixed vocabulary: component `i` counts occurrences of
/// `vocab[i]`. Texts sharing more vocabulary words land closer together.
pub struct KeywordEmbedder {
    vocab: Vec<&'static str>,
}

impl KeywordEmbedder {
    pub fn market() -> Arc<Self> {
        Arc::new(Self {
            vocab: vec![
                "inflation", "rates", "tech", "volatility", "dollar", "emerging", "yields", "rotation",
            ],
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let lower = text.to_lowercase();
        Ok(self
            .vocab
            .iter()
            .map(|w| lower.matches(w).count() as f32)
            .collect())
    }

    fn dimension(&self) -> usize {
        self.vocab.len()
    }

    fn name(&self) -> String {
        "keyword".into()
    }
}

/// Hash vectors, remembering every text it was asked to embed.
pub struct RecordingEmbedder {
    pub seen: Mutex<Vec<String>>,
    dimension: usize,
}

impl RecordingEmbedder {
    pub fn new(dimension: usize) -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(vec![]),
            dimension,
        })
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for RecordingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(HashEmbedder::hash_vector(text, self.dimension))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> String {
        "recording".into()
    }
}

pub struct FailingEmbedder {
    pub dimension: usize,
}

#[async_trait::async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, DomainError> {
        Err(DomainError::Embedding("provider unavailable".into()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> String {
        "failing".into()
    }
}
