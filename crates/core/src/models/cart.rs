//! Cart item model

use chrono::{DateTime, SubsecRound, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Product;

/// Length of generated cart item identifiers
const ITEM_ID_LEN: usize = 9;

const ITEM_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A product saved to a user's cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            id: generate_item_id(),
            // Stored as epoch milliseconds
            added_at: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn url(&self) -> &str {
        &self.product.url
    }
}

/// Random lowercase base-36 identifier
pub fn generate_item_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ITEM_ID_LEN)
        .map(|_| ITEM_ID_ALPHABET[rng.gen_range(0..ITEM_ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_base36() {
        let id = generate_item_id();
        assert_eq!(id.len(), ITEM_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(generate_item_id(), generate_item_id());
    }

    #[test]
    fn test_cart_item_flattens_product() {
        let item = CartItem::new(Product {
            title: "Linen Pants".to_string(),
            price: "$30".to_string(),
            store_name: "Shop".to_string(),
            url: "https://shop.example/p/linen".to_string(),
            image_url: None,
            description: String::new(),
            currency: None,
        });

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["url"], "https://shop.example/p/linen");
        assert_eq!(value["storeName"], "Shop");
        assert_eq!(value["id"], item.id.as_str());
        assert!(value["addedAt"].is_i64());

        let back: CartItem = serde_json::from_value(value).unwrap();
        assert_eq!(back.product, item.product);
        assert_eq!(back, item);
    }
}
