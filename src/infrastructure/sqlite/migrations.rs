use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS collections (
            name TEXT PRIMARY KEY,
            dimension INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS situations (
            collection TEXT NOT NULL REFERENCES collections(name),
            seq INTEGER NOT NULL,
            id TEXT NOT NULL,
            situation TEXT NOT NULL,
            recommendation TEXT NOT NULL,
            vector BLOB NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (collection, seq)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_situations_id ON situations(collection, id);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
