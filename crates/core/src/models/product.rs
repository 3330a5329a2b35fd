//! Product model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::favicon::favicon_url;

/// A purchasable item returned by the AI search
///
/// Field names follow the JSON shape the assistant is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Display string, e.g. "$25.99"
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub store_name: String,
    /// Required; entries without a string url are unusable
    pub url: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<String>,
}

/// Accept numbers and booleans as text; null and anything else become empty
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

impl Product {
    /// Image to show for this product: its own image, or the store favicon
    pub fn display_image(&self, favicon_size: u32) -> String {
        match &self.image_url {
            Some(image) if !image.trim().is_empty() => image.clone(),
            _ => favicon_url(&self.url, favicon_size),
        }
    }

    /// Whether the product carries its own image
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .is_some_and(|image| !image.trim().is_empty())
    }
}
