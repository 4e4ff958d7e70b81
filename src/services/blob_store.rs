//! SQLite-backed blob store
//!
//! Named binary objects keyed by the composite `SYMBOL\filename` name.
//! Writes are last-write-wins upserts; reads never mutate, so concurrent
//! requests share the pool freely. Names are case-sensitive — callers
//! canonicalize the symbol before lookup.

use sqlx::{sqlite::SqliteConnectOptions, Row, SqlitePool};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::error::{AppError, Result};

pub type SharedBlobStore = Arc<BlobStore>;

/// Metadata of a stored blob
#[derive(Debug, Clone)]
pub struct BlobMeta {
    pub name: String,
    pub content_type: String,
    pub length: u64,
}

/// SQLite database holding blob bytes and metadata
#[derive(Debug)]
pub struct BlobStore {
    pool: SqlitePool,
}

impl BlobStore {
    /// Open (or create) the blob database at `database_path`
    pub async fn open(database_path: PathBuf) -> Result<Self> {
        info!("Opening blob store at: {:?}", database_path);

        if let Some(parent) = database_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePool::connect_with(connect_options).await?;

        let store = Self { pool };
        store.initialize_schema().await?;

        info!("Blob store ready");
        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blobs (
                name TEXT PRIMARY KEY,
                content_type TEXT NOT NULL,
                length INTEGER NOT NULL,
                data BLOB NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace a blob (last write wins)
    pub async fn put(&self, name: &str, content_type: &str, data: &[u8]) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO blobs (name, content_type, length, data) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(content_type)
        .bind(data.len() as i64)
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up blob metadata without touching the bytes
    pub async fn stat(&self, name: &str) -> Result<Option<BlobMeta>> {
        let row = sqlx::query("SELECT content_type, length FROM blobs WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| BlobMeta {
            name: name.to_string(),
            content_type: row.get("content_type"),
            length: row.get::<i64, _>("length") as u64,
        }))
    }

    /// Read the full bytes of a blob.
    ///
    /// Returns `NotFound` for a missing name. A store failure while pulling
    /// the bytes surfaces as `UpstreamRead`; callers discard the whole
    /// response rather than returning partial data.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let row = sqlx::query("SELECT data FROM blobs WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::UpstreamRead(e.to_string()))?;

        match row {
            Some(row) => row
                .try_get::<Vec<u8>, _>("data")
                .map_err(|e| AppError::UpstreamRead(e.to_string())),
            None => Err(AppError::NotFound(format!("no blob named {}", name))),
        }
    }

    /// Number of stored blobs
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM blobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// All blob names, sorted
    pub async fn list_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar("SELECT name FROM blobs ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Blob store connection pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn open_temp_store() -> (tempfile::TempDir, BlobStore) {
        let dir = tempdir().unwrap();
        let store = BlobStore::open(dir.path().join("blobs.db")).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_put_stat_read_roundtrip() {
        let (_dir, store) = open_temp_store().await;

        store
            .put("AAA\\stock.csv", "text/csv", b"Date,Open\n")
            .await
            .unwrap();

        let meta = store.stat("AAA\\stock.csv").await.unwrap().unwrap();
        assert_eq!(meta.content_type, "text/csv");
        assert_eq!(meta.length, 10);

        let bytes = store.read("AAA\\stock.csv").await.unwrap();
        assert_eq!(bytes, b"Date,Open\n");

        store.close().await;
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let (_dir, store) = open_temp_store().await;

        assert!(store.stat("ZZZ\\stock.csv").await.unwrap().is_none());
        match store.read("ZZZ\\stock.csv").await {
            Err(AppError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }

        store.close().await;
    }

    #[tokio::test]
    async fn test_put_overwrites_last_write_wins() {
        let (_dir, store) = open_temp_store().await;

        store.put("X\\a.txt", "text/plain", b"first").await.unwrap();
        store.put("X\\a.txt", "text/plain", b"second!").await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.read("X\\a.txt").await.unwrap(), b"second!");
        assert_eq!(store.stat("X\\a.txt").await.unwrap().unwrap().length, 7);

        store.close().await;
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive() {
        let (_dir, store) = open_temp_store().await;

        store.put("AAA\\stock.csv", "text/csv", b"x").await.unwrap();
        assert!(store.stat("aaa\\stock.csv").await.unwrap().is_none());

        store.close().await;
    }
}
