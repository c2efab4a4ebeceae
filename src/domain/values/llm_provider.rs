use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The chat model provider a bank is configured for.
///
/// Unknown names are kept verbatim in [`LlmProvider::Other`] and resolve like
/// OpenAI-compatible providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LlmProvider {
    #[default]
    OpenAi,
    Google,
    DeepSeek,
    Ollama,
    Other(String),
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAi => write!(f, "openai"),
            LlmProvider::Google => write!(f, "google"),
            LlmProvider::DeepSeek => write!(f, "deepseek"),
            LlmProvider::Ollama => write!(f, "ollama"),
            LlmProvider::Other(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name.is_empty() {
            return Err("LLM provider name must not be empty".to_string());
        }
        Ok(match name.as_str() {
            "openai" => LlmProvider::OpenAi,
            "google" | "gemini" => LlmProvider::Google,
            "deepseek" => LlmProvider::DeepSeek,
            "ollama" => LlmProvider::Ollama,
            _ => LlmProvider::Other(name),
        })
    }
}

impl From<String> for LlmProvider {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(LlmProvider::OpenAi)
    }
}

impl From<LlmProvider> for String {
    fn from(p: LlmProvider) -> Self {
        p.to_string()
    }
}
