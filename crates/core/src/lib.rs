//! Vantage Core Library
//!
//! Models, AI response sanitizing, and local account/cart storage for the
//! Vantage shopping client.

pub mod accounts;
pub mod error;
pub mod favicon;
pub mod invariants;
pub mod models;
pub mod password;
pub mod sanitize;
pub mod storage;

pub use accounts::AccountStore;
pub use error::{Error, Result};
pub use favicon::{favicon_url, DEFAULT_FAVICON_SIZE};
pub use models::*;
pub use sanitize::{is_direct_product_url, sanitize_search_response, strip_code_fences};
pub use storage::{Database, DocumentRepository, MemoryDocuments};
