pub mod fallback;
#[cfg(feature = "google")]
pub mod google;
pub mod hash;
pub mod openai;

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::values::embedding_strategy::EmbeddingStrategy;
use fallback::FallbackChain;
use hash::HashEmbedder;
use openai::OpenAiProvider;
use std::sync::Arc;

/// Build the provider for a resolved strategy. Network strategies are wrapped
/// in a [`FallbackChain`] so embedding never fails the caller.
pub fn build_embedder(
    strategy: &EmbeddingStrategy,
    dimension: usize,
) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    let embedder: Arc<dyn EmbeddingProvider> = match strategy {
        EmbeddingStrategy::DeterministicHash => Arc::new(HashEmbedder::new(dimension)),
        EmbeddingStrategy::Native { model, base_url } => Arc::new(FallbackChain::single(
            Arc::new(OpenAiProvider::from_env(model.as_str(), base_url.as_str())),
            dimension,
        )),
        EmbeddingStrategy::Alternate {
            model,
            fallback_model,
            fallback_base_url,
        } => {
            let fallback: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiProvider::from_env(
                fallback_model.as_str(),
                fallback_base_url.as_str(),
            ));
            Arc::new(FallbackChain::new(vec![google_provider(model)?, fallback], dimension))
        }
    };
    Ok(embedder)
}

#[cfg(feature = "google")]
fn google_provider(model: &str) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    Ok(Arc::new(google::GoogleProvider::from_env(model)))
}

#[cfg(not(feature = "google"))]
fn google_provider(model: &str) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    Err(DomainError::Configuration(format!(
        "Google embedding client for {model} is not available; rebuild with `--features google`"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_strategy_needs_no_network() {
        let e = build_embedder(&EmbeddingStrategy::DeterministicHash, 64).unwrap();
        assert_eq!(e.dimension(), 64);
        assert_eq!(e.embed("x").await.unwrap().len(), 64);
    }

    #[test]
    fn test_native_strategy_reports_canonical_width() {
        let strategy = EmbeddingStrategy::Native {
            model: "nomic-embed-text".into(),
            base_url: "http://localhost:11434/v1".into(),
        };
        let e = build_embedder(&strategy, 1536).unwrap();
        assert_eq!(e.dimension(), 1536);
        assert!(e.name().contains("nomic-embed-text"));
    }

    #[cfg(feature = "google")]
    #[test]
    fn test_alternate_strategy_chains_google_then_openai() {
        let strategy = EmbeddingStrategy::resolve(
            &crate::domain::values::llm_provider::LlmProvider::Google,
            "https://generativelanguage.googleapis.com/v1",
        );
        let e = build_embedder(&strategy, 1536).unwrap();
        assert_eq!(
            e.name(),
            "chain[google:text-embedding-004 -> openai:text-embedding-3-small]"
        );
    }

    #[cfg(not(feature = "google"))]
    #[test]
    fn test_alternate_strategy_without_google_is_config_error() {
        let strategy = EmbeddingStrategy::resolve(
            &crate::domain::values::llm_provider::LlmProvider::Google,
            "https://generativelanguage.googleapis.com/v1",
        );
        assert!(matches!(
            build_embedder(&strategy, 1536),
            Err(DomainError::Configuration(_))
        ));
    }
}
