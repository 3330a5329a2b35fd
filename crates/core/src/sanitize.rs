//! AI response sanitizing
//!
//! The search completion comes back as free text that is supposed to hold a
//! JSON object. This module strips markdown code fences, parses the object
//! and drops products whose URL looks like a homepage or a search page.

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::models::{Product, SearchResult};

/// Summary used when the assistant omits one
pub const FALLBACK_SUMMARY: &str = "Here are the best deals we found.";

const FENCE: &str = "```";

/// Tags dropped after a fence even when the payload follows with no space
const KNOWN_TAGS: &[&str] = &["json"];

/// Remove every triple-backtick fence (and any language tag that directly
/// follows one), then trim.
///
/// A known tag is removed whatever follows it. Any other word is only
/// treated as a tag when whitespace (or the end of the text) follows it.
pub fn strip_code_fences(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];

        let tag_len = rest
            .find(|c: char| !is_tag_char(c))
            .unwrap_or(rest.len());
        let (tag, after_tag) = rest.split_at(tag_len);

        let known = KNOWN_TAGS.iter().any(|k| tag.eq_ignore_ascii_case(k));
        let spaced = after_tag.is_empty() || after_tag.starts_with(char::is_whitespace);
        if tag_len > 0 && (known || spaced) {
            rest = after_tag;
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')
}

/// Heuristic check that `raw_url` points at a specific item page.
///
/// Rejects unparseable URLs, root paths, paths containing "search" and URLs
/// carrying a `q` query parameter. Product pages whose path happens to
/// contain "search" are rejected too.
pub fn is_direct_product_url(raw_url: &str) -> bool {
    let Ok(url) = Url::parse(raw_url.trim()) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    let path = url.path();
    if path == "/" || path.len() < 2 {
        return false;
    }

    if path.contains("search") {
        return false;
    }

    !url.query_pairs().any(|(key, _)| key == "q")
}

/// Turn the raw completion text into a [`SearchResult`].
///
/// `generated_image` is obtained independently and passed through untouched.
pub fn sanitize_search_response(raw: &str, generated_image: Option<String>) -> Result<SearchResult> {
    let clean = strip_code_fences(raw);

    let parsed: Value = serde_json::from_str(&clean).map_err(|e| {
        warn!(error = %e, "Search response is not valid JSON");
        Error::MalformedResponse(e.to_string())
    })?;

    let Value::Object(mut object) = parsed else {
        return Err(Error::MalformedResponse(
            "expected a JSON object at the top level".into(),
        ));
    };

    let summary = match object.remove("summary") {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        _ => FALLBACK_SUMMARY.to_string(),
    };

    let candidates = match object.remove("products") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(Error::MalformedResponse(
                "\"products\" is not an array".into(),
            ))
        }
    };

    let total = candidates.len();
    let products: Vec<Product> = candidates
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Product>(value) {
            Ok(product) => Some(product),
            Err(e) => {
                debug!(error = %e, "Dropping product entry without a usable url");
                None
            }
        })
        .filter(|product| {
            let keep = is_direct_product_url(&product.url);
            if !keep {
                debug!(url = %product.url, "Rejected non-product URL");
            }
            keep
        })
        .map(normalize_product)
        .collect();

    debug!(total, kept = products.len(), "Sanitized search response");

    Ok(SearchResult {
        summary,
        products,
        generated_image,
    })
}

fn normalize_product(mut product: Product) -> Product {
    product.image_url = product
        .image_url
        .take()
        .map(|image| image.trim().to_string())
        .filter(|image| !image.is_empty());
    product
}
