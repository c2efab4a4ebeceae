use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `models/{model}:embedContent` client.
pub struct GoogleProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

impl GoogleProvider {
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: Option<String>) -> Self {
        let model: String = model.into();
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.trim_start_matches("models/").to_string(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_GOOGLE_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    /// Key from `GOOGLE_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Self {
        Self::new(std::env::var("GOOGLE_API_KEY").ok(), model, None)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for GoogleProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        // Without a key the request can only be rejected; fail fast so the
        // fallback provider gets its turn.
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::Embedding("GOOGLE_API_KEY is not set".into()))?;

        let url = format!("{}/models/{}:embedContent", self.base_url, self.model);
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&EmbedContentRequest {
                model: format!("models/{}", self.model),
                content: Content {
                    parts: vec![Part { text }],
                },
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("Google API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("Google API {status}: {body}")));
        }

        let result: EmbedContentResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Parse error: {e}")))?;
        if result.embedding.values.is_empty() {
            return Err(DomainError::Embedding("Google API returned an empty embedding".into()));
        }
        Ok(result.embedding.values)
    }

    fn dimension(&self) -> usize {
        768
    }

    fn name(&self) -> String {
        format!("google:{}", self.model)
    }
}
