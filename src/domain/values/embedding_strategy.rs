//! Which embedding path a bank uses, decided once from its configuration.
//!
//! Resolution order:
//! 1. backend is the local Ollama endpoint: `nomic-embed-text` through that endpoint
//! 2. backend is known to have no embedding endpoint: deterministic hash vectors,
//!    ranked lexically at query time
//! 3. provider is Google: `text-embedding-004`, falling back to OpenAI's
//!    `text-embedding-3-small` when the Google call fails
//! 4. anything else: `text-embedding-3-small` through the configured backend

use crate::domain::values::llm_provider::LlmProvider;
use serde::Serialize;
use std::fmt;
use url::Url;

pub const LOCAL_EMBEDDING_MODEL: &str = "nomic-embed-text";
pub const GOOGLE_EMBEDDING_MODEL: &str = "text-embedding-004";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const LOCAL_PORT: u16 = 11434;
const NO_EMBEDDING_DOMAIN: &str = "modelarts-maas.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbeddingStrategy {
    /// OpenAI-compatible `/embeddings` on the chat backend (local or remote).
    Native { model: String, base_url: String },
    /// Dedicated Google embedding client, with OpenAI as the fallback.
    Alternate {
        model: String,
        fallback_model: String,
        fallback_base_url: String,
    },
    /// SHA-256 derived pseudo-embedding; no network.
    DeterministicHash,
}

/// How `get_memories` ranks stored situations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    Vector,
    Lexical,
}

impl EmbeddingStrategy {
    pub fn resolve(provider: &LlmProvider, backend_url: &str) -> Self {
        let parsed = Url::parse(backend_url).ok();

        if parsed.as_ref().is_some_and(is_local_endpoint) {
            return EmbeddingStrategy::Native {
                model: LOCAL_EMBEDDING_MODEL.to_string(),
                base_url: backend_url.to_string(),
            };
        }

        if parsed.as_ref().is_some_and(lacks_embeddings) {
            return EmbeddingStrategy::DeterministicHash;
        }

        if *provider == LlmProvider::Google {
            return EmbeddingStrategy::Alternate {
                model: GOOGLE_EMBEDDING_MODEL.to_string(),
                fallback_model: DEFAULT_EMBEDDING_MODEL.to_string(),
                fallback_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            };
        }

        EmbeddingStrategy::Native {
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: backend_url.to_string(),
        }
    }

    /// The hash vectors carry no semantic signal, so that path ranks by word overlap.
    pub fn ranking_mode(&self) -> RankingMode {
        match self {
            EmbeddingStrategy::DeterministicHash => RankingMode::Lexical,
            _ => RankingMode::Vector,
        }
    }
}

impl fmt::Display for EmbeddingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingStrategy::Native { model, base_url } => write!(f, "native:{model} via {base_url}"),
            EmbeddingStrategy::Alternate { model, fallback_model, .. } => {
                write!(f, "google:{model} (fallback openai:{fallback_model})")
            }
            EmbeddingStrategy::DeterministicHash => write!(f, "deterministic-hash"),
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingMode::Vector => write!(f, "vector"),
            RankingMode::Lexical => write!(f, "lexical"),
        }
    }
}

fn is_local_endpoint(url: &Url) -> bool {
    let local_host = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]" | "::1"));
    local_host && url.port_or_known_default() == Some(LOCAL_PORT)
}

fn lacks_embeddings(url: &Url) -> bool {
    url.host_str().is_some_and(|h| {
        h == NO_EMBEDDING_DOMAIN || h.ends_with(&format!(".{NO_EMBEDDING_DOMAIN}"))
    })
}
