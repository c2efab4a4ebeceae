use crate::domain::entities::memory_record::{MemoryRecord, NewSituation};
use crate::domain::error::DomainError;

/// A situation paired with its already computed embedding, ready for insertion.
#[derive(Debug, Clone)]
pub struct EmbeddedSituation {
    pub situation: NewSituation,
    pub embedding: Vec<f32>,
}

/// A named, append-only collection of situation records.
pub trait SituationStore: Send + Sync {
    fn collection(&self) -> &str;

    /// Width every stored vector must have.
    fn dimension(&self) -> usize;

    fn count(&self) -> Result<usize, DomainError>;

    /// Insert a batch atomically. Ids continue from the current count; the
    /// assigned ids are returned in input order.
    fn add_batch(&self, batch: &[EmbeddedSituation]) -> Result<Vec<String>, DomainError>;

    /// All records in insertion order, embeddings included.
    fn all(&self) -> Result<Vec<MemoryRecord>, DomainError>;

    /// Up to `limit` records nearest to `vector` as `(record, distance)`, by
    /// ascending distance with ties resolved by insertion order.
    fn nearest(&self, vector: &[f32], limit: usize) -> Result<Vec<(MemoryRecord, f64)>, DomainError>;
}
