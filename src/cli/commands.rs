use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "situmem", about = "Recall past market situations and the recommendations made for them")]
pub struct Cli {
    /// Collection to read and write
    #[arg(long, global = true, default_value = "financial_situations")]
    pub collection: String,
    /// JSON config file (llm_provider, backend_url, embedding_dimension, max_text_length, distance)
    #[arg(long, global = true, conflicts_with = "preset")]
    pub config: Option<PathBuf>,
    /// Provider template (openai, ollama, deepseek, gemini)
    #[arg(long, global = true)]
    pub preset: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add situations with their recommendations
    Add {
        /// JSON array of {"situation", "recommendation"} objects or [situation, recommendation] pairs
        json: String,
    },
    /// Find the stored situations closest to a new one
    Recall {
        situation: String,
        #[arg(long, default_value = "1")]
        n_matches: usize,
    },
    /// Show collection size and the resolved embedding strategy
    Stats,
    /// List stored records (without vectors)
    List,
    /// Seed an in-memory bank with sample situations and recall one
    Demo,
}
