pub mod distance;
pub mod embedding_strategy;
pub mod llm_provider;
pub mod text_limit;
