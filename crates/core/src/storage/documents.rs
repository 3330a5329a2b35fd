//! Document storage operations

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::instrument;

use crate::error::Result;

pub struct DocumentStore<'a> {
    conn: &'a Connection,
}

impl<'a> DocumentStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read a document by key
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM documents WHERE key = ?1")?;

        let value = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;

        Ok(value)
    }

    /// Insert or replace a document
    #[instrument(skip(self, value), fields(bytes = value.len()))]
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO documents (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Delete a document
    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM documents WHERE key = ?1", params![key])?;
        Ok(())
    }
}
