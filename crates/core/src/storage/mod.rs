//! SQLite storage layer for Vantage
//!
//! Persistent state is a handful of JSON documents keyed by name, each
//! rewritten whole on save.

mod documents;
mod memory;
mod migrations;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

use crate::error::Result;

pub use documents::DocumentStore;
pub use memory::MemoryDocuments;
pub use traits::DocumentRepository;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        migrations::get_current_version(&self.conn).unwrap_or(0)
    }

    /// Get document store
    pub fn documents(&self) -> DocumentStore<'_> {
        DocumentStore::new(&self.conn)
    }
}

impl DocumentRepository for Database {
    fn get_document(&self, key: &str) -> Result<Option<String>> {
        self.documents().get(key)
    }

    fn put_document(&self, key: &str, value: &str) -> Result<()> {
        self.documents().put(key, value)
    }

    fn remove_document(&self, key: &str) -> Result<()> {
        self.documents().remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_runs_migrations() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version(), 1);
    }
}
