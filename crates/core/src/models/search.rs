//! Search result model

use serde::{Deserialize, Serialize};

use super::Product;

/// Outcome of one product search. Recomputed per query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub summary: String,
    pub products: Vec<Product>,
    /// Generated preview as a `data:` URI
    #[serde(default)]
    pub generated_image: Option<String>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
