//! Storage repository traits
//!
//! The session store only needs get/put/remove of whole JSON documents by
//! key, so any backend that can do that (SQLite, memory) will serve.

use crate::error::Result;

/// Key/value document operations
pub trait DocumentRepository {
    /// Read the raw document stored under `key`
    fn get_document(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`
    fn put_document(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the document stored under `key` (no-op when absent)
    fn remove_document(&self, key: &str) -> Result<()>;
}

impl<T: DocumentRepository + ?Sized> DocumentRepository for &T {
    fn get_document(&self, key: &str) -> Result<Option<String>> {
        (**self).get_document(key)
    }

    fn put_document(&self, key: &str, value: &str) -> Result<()> {
        (**self).put_document(key, value)
    }

    fn remove_document(&self, key: &str) -> Result<()> {
        (**self).remove_document(key)
    }
}
