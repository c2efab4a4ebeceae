//! Bank configuration.
//!
//! Only `llm_provider` and `backend_url` decide the embedding strategy; the
//! rest tunes the store. Credentials are never part of the config: the
//! embedding clients read `OPENAI_API_KEY` / `GOOGLE_API_KEY` themselves.

use crate::domain::error::DomainError;
use crate::domain::values::distance::DistanceMetric;
use crate::domain::values::embedding_strategy::DEFAULT_OPENAI_BASE_URL;
use crate::domain::values::llm_provider::LlmProvider;
use crate::domain::values::text_limit::DEFAULT_MAX_TEXT_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canonical embedding width (OpenAI `text-embedding-3-small`).
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub llm_provider: LlmProvider,
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    #[serde(default)]
    pub distance: DistanceMetric,
}

fn default_backend_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_embedding_dimension() -> usize {
    DEFAULT_EMBEDDING_DIMENSION
}

fn default_max_text_length() -> usize {
    DEFAULT_MAX_TEXT_LENGTH
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            llm_provider: LlmProvider::OpenAi,
            backend_url: default_backend_url(),
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            distance: DistanceMetric::L2,
        }
    }
}

/// Names accepted by [`MemoryConfig::preset`].
pub const PRESETS: &[&str] = &["openai", "ollama", "deepseek", "gemini"];

impl MemoryConfig {
    pub fn new(llm_provider: LlmProvider, backend_url: impl Into<String>) -> Self {
        Self {
            llm_provider,
            backend_url: backend_url.into(),
            ..Self::default()
        }
    }

    /// Provider templates for the common deployments.
    pub fn preset(name: &str) -> Result<Self, DomainError> {
        let cfg = match name.to_lowercase().as_str() {
            "openai" => Self::new(LlmProvider::OpenAi, DEFAULT_OPENAI_BASE_URL),
            "ollama" => Self::new(LlmProvider::Ollama, "http://localhost:11434/v1"),
            "deepseek" => Self::new(
                LlmProvider::DeepSeek,
                "https://api.modelarts-maas.com/v1",
            ),
            "gemini" | "google" => Self::new(
                LlmProvider::Google,
                "https://generativelanguage.googleapis.com/v1",
            ),
            _ => {
                return Err(DomainError::Configuration(format!(
                    "Unknown preset: {name} (available: {})",
                    PRESETS.join(", ")
                )))
            }
        };
        Ok(cfg)
    }

    /// Overlay `SITUMEM_*` environment variables on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, DomainError> {
        if let Ok(p) = std::env::var("SITUMEM_LLM_PROVIDER") {
            self.llm_provider = p.parse().map_err(DomainError::Configuration)?;
        }
        if let Ok(url) = std::env::var("SITUMEM_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Ok(d) = std::env::var("SITUMEM_EMBEDDING_DIMENSION") {
            self.embedding_dimension = d.parse().map_err(|e| {
                DomainError::Configuration(format!("SITUMEM_EMBEDDING_DIMENSION: {e}"))
            })?;
        }
        if let Ok(n) = std::env::var("SITUMEM_MAX_TEXT_LENGTH") {
            self.max_text_length = n.parse().map_err(|e| {
                DomainError::Configuration(format!("SITUMEM_MAX_TEXT_LENGTH: {e}"))
            })?;
        }
        if let Ok(m) = std::env::var("SITUMEM_DISTANCE") {
            self.distance = m.parse().map_err(DomainError::Configuration)?;
        }
        Ok(self)
    }

    pub fn from_env() -> Result<Self, DomainError> {
        Self::default().with_env_overrides()
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Configuration(format!("{}: {e}", path.display())))?;
        let cfg: Self = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Parse(format!("{}: {e}", path.display())))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.embedding_dimension == 0 {
            return Err(DomainError::Configuration(
                "embedding_dimension must be positive".into(),
            ));
        }
        if self.max_text_length == 0 {
            return Err(DomainError::Configuration(
                "max_text_length must be positive".into(),
            ));
        }
        Ok(())
    }
}
