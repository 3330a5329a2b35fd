//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CartItem, Product};

/// A local shopper account with its saved cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub name: String,
    /// Argon2 PHC string
    pub password_hash: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
}

impl User {
    pub fn new(username: String, name: String, password_hash: String) -> Self {
        Self {
            username,
            name,
            password_hash,
            created_at: Utc::now(),
            cart: Vec::new(),
        }
    }

    /// Case-insensitive username comparison
    pub fn matches_username(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }

    /// Whether a cart entry already points at this product's URL
    pub fn has_in_cart(&self, product: &Product) -> bool {
        self.cart.iter().any(|item| item.url() == product.url)
    }
}
