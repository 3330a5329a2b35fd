//! Application state management

use std::path::{Path, PathBuf};

use vantage_core::{AccountStore, Database, Result};

/// Database file inside the data directory
pub const DB_FILE: &str = "vantage.db";

/// Main application state
pub struct AppState {
    pub accounts: AccountStore<Database>,
    data_dir: PathBuf,
}

impl AppState {
    /// Open (or create) the database under `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let db = Database::open(data_dir.join(DB_FILE))?;

        Ok(Self {
            accounts: AccountStore::new(db),
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
