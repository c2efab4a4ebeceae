//! Pseudo-embeddings for backends without an embedding endpoint.
//!
//! The SHA-256 digest of the text gives 32 bytes, each mapped to
//! `(byte - 127.5) / 127.5` in `[-1, 1]`. The sequence is doubled by
//! self-concatenation until it reaches the target width, then cut to it.
//! Equal texts get equal vectors; nothing else about the vector is meaningful.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use sha2::{Digest, Sha256};

pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    pub fn hash_vector(text: &str, dimension: usize) -> Vec<f32> {
        let hex_digest = hex::encode(Sha256::digest(text.as_bytes()));
        let mut vector: Vec<f32> = hex_digest
            .as_bytes()
            .chunks(2)
            .filter_map(|pair| std::str::from_utf8(pair).ok())
            .filter_map(|pair| u8::from_str_radix(pair, 16).ok())
            .map(|byte| ((byte as f64 - 127.5) / 127.5) as f32)
            .collect();

        while vector.len() < dimension {
            vector.extend_from_within(..);
        }
        vector.truncate(dimension);
        vector
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        Ok(Self::hash_vector(text, self.dimension))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> String {
        "sha256-hash".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_vector() {
        let a = HashEmbedder::hash_vector("inflation rising", 1536);
        let b = HashEmbedder::hash_vector("inflation rising", 1536);
        assert_eq!(a, b);
        assert_eq!(a.len(), 1536);
    }

    #[test]
    fn test_different_text_different_vector() {
        let a = HashEmbedder::hash_vector("inflation rising", 1536);
        let b = HashEmbedder::hash_vector("inflation falling", 1536);
        assert_ne!(a, b);
    }

    #[test]
    fn test_values_in_unit_range() {
        let v = HashEmbedder::hash_vector("strong dollar", 100);
        assert!(v.iter().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn test_first_values_follow_digest_bytes() {
        // sha256("") = e3b0c442...
        let v = HashEmbedder::hash_vector("", 4);
        let expected: Vec<f32> = [0xe3u8, 0xb0, 0xc4, 0x42]
            .iter()
            .map(|b| ((*b as f64 - 127.5) / 127.5) as f32)
            .collect();
        assert_eq!(v, expected);
    }

    #[test]
    fn test_width_not_multiple_of_digest_is_cut() {
        let v = HashEmbedder::hash_vector("yields", 50);
        assert_eq!(v.len(), 50);
        // the digest repeats every 32 values
        assert_eq!(v[..18], v[32..50]);
    }
}
