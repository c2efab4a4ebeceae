use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for any OpenAI-compatible `POST {base_url}/embeddings` endpoint
/// (OpenAI itself, Ollama's `/v1`, most hosted gateways).
pub struct OpenAiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    input: Vec<&'a str>,
    model: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    embedding: Vec<f32>,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Key from `OPENAI_API_KEY`; local endpoints work without one.
    pub fn from_env(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::new(std::env::var("OPENAI_API_KEY").ok(), model, base_url)
    }

    fn model_dimension(model: &str) -> usize {
        match model {
            "nomic-embed-text" => 768,
            "text-embedding-3-large" => 3072,
            "text-embedding-3-small" | "text-embedding-ada-002" => 1536,
            _ => 1536,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let url = format!("{}/embeddings", self.base_url);
        let mut req = self.client.post(&url).json(&OpenAiRequest {
            input: vec![text],
            model: &self.model,
        });
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("OpenAI API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("OpenAI API {status}: {body}")));
        }

        let result: OpenAiResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Parse error: {e}")))?;
        result
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DomainError::Embedding("OpenAI API returned no embedding".into()))
    }

    fn dimension(&self) -> usize {
        Self::model_dimension(&self.model)
    }

    fn name(&self) -> String {
        format!("openai:{}", self.model)
    }
}
