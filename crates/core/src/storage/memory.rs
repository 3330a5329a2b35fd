//! In-memory document backend
//!
//! Nothing survives the process.

use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::DocumentRepository;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryDocuments {
    docs: Mutex<HashMap<String, String>>,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    fn docs(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.docs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentRepository for MemoryDocuments {
    fn get_document(&self, key: &str) -> Result<Option<String>> {
        Ok(self.docs().get(key).cloned())
    }

    fn put_document(&self, key: &str, value: &str) -> Result<()> {
        self.docs().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_document(&self, key: &str) -> Result<()> {
        self.docs().remove(key);
        Ok(())
    }
}
