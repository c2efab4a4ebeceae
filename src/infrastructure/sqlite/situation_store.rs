use crate::domain::entities::memory_record::MemoryRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::situation_store::{EmbeddedSituation, SituationStore};
use crate::domain::values::distance::DistanceMetric;
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// One collection inside a SQLite database. The connection mutex also
/// serializes id assignment: count and insert happen in one transaction
/// under the lock.
pub struct SqliteSituationStore {
    conn: Mutex<Connection>,
    collection: String,
    dimension: usize,
    metric: DistanceMetric,
}

impl SqliteSituationStore {
    /// Attach to `collection` in `conn`, creating it if needed. Reopening an
    /// existing collection with a different width is refused.
    pub fn open(
        conn: Connection,
        collection: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<Self, DomainError> {
        run_migrations(&conn)?;

        let stored: Option<i64> = conn
            .query_row(
                "SELECT dimension FROM collections WHERE name = ?1",
                params![collection],
                |r| r.get(0),
            )
            .optional()?;

        match stored {
            Some(d) if d as usize != dimension => {
                return Err(DomainError::Configuration(format!(
                    "Collection {collection} holds {d}-dimensional vectors, configured width is {dimension}"
                )));
            }
            Some(_) => {}
            None => {
                conn.execute(
                    "INSERT INTO collections (name, dimension, created_at) VALUES (?1, ?2, ?3)",
                    params![collection, dimension as i64, Utc::now().to_rfc3339()],
                )?;
            }
        }

        Ok(Self {
            conn: Mutex::new(conn),
            collection: collection.to_string(),
            dimension,
            metric,
        })
    }

    pub fn in_memory(
        collection: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        Self::open(conn, collection, dimension, metric)
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn count_locked(conn: &Connection, collection: &str) -> Result<usize, DomainError> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM situations WHERE collection = ?1",
            params![collection],
            |r| r.get(0),
        )?;
        Ok(count as usize)
    }

    fn load_locked(conn: &Connection, collection: &str) -> Result<Vec<MemoryRecord>, DomainError> {
        let mut stmt = conn.prepare(
            "SELECT id, situation, recommendation, vector, created_at
             FROM situations WHERE collection = ?1 ORDER BY seq",
        )?;
        let rows = stmt
            .query_map(params![collection], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, situation, recommendation, blob, created_at)| {
                let created_at = DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|e| DomainError::Parse(format!("created_at of record {id}: {e}")))?
                    .with_timezone(&Utc);
                Ok(MemoryRecord {
                    id,
                    situation,
                    recommendation,
                    embedding: Some(Self::deserialize_vector(&blob)),
                    created_at,
                })
            })
            .collect()
    }
}

impl SituationStore for SqliteSituationStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self.lock()?;
        Self::count_locked(&conn, &self.collection)
    }

    fn add_batch(&self, batch: &[EmbeddedSituation]) -> Result<Vec<String>, DomainError> {
        if let Some(bad) = batch.iter().find(|b| b.embedding.len() != self.dimension) {
            return Err(DomainError::InvalidInput(format!(
                "dimension mismatch: got {}, collection {} expects {}",
                bad.embedding.len(),
                self.collection,
                self.dimension
            )));
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let offset = Self::count_locked(&tx, &self.collection)?;
        let now = Utc::now().to_rfc3339();

        let mut ids = Vec::with_capacity(batch.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO situations (collection, seq, id, situation, recommendation, vector, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (i, item) in batch.iter().enumerate() {
                let seq = offset + i;
                let id = seq.to_string();
                stmt.execute(params![
                    self.collection,
                    seq as i64,
                    id,
                    item.situation.situation,
                    item.situation.recommendation,
                    Self::serialize_vector(&item.embedding),
                    now,
                ])?;
                ids.push(id);
            }
        }
        tx.commit()?;

        debug!(collection = %self.collection, offset, added = ids.len(), "stored situations");
        Ok(ids)
    }

    fn all(&self) -> Result<Vec<MemoryRecord>, DomainError> {
        let conn = self.lock()?;
        Self::load_locked(&conn, &self.collection)
    }

    fn nearest(&self, vector: &[f32], limit: usize) -> Result<Vec<(MemoryRecord, f64)>, DomainError> {
        if vector.len() != self.dimension {
            return Err(DomainError::InvalidInput(format!(
                "dimension mismatch: query has {}, collection {} expects {}",
                vector.len(),
                self.collection,
                self.dimension
            )));
        }

        let records = {
            let conn = self.lock()?;
            Self::load_locked(&conn, &self.collection)?
        };

        let mut scored: Vec<(MemoryRecord, f64)> = records
            .into_iter()
            .map(|r| {
                let d = r
                    .embedding
                    .as_deref()
                    .map_or(f64::INFINITY, |e| self.metric.distance(vector, e));
                (r, d)
            })
            .collect();

        // stable: equal distances keep insertion order
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }
}
