//! Favicon fallback for products without an image

use url::form_urlencoded;

/// Third-party favicon service used when a product has no image
pub const FAVICON_ENDPOINT: &str = "https://t2.gstatic.com/faviconV2";

/// Default requested icon size in pixels
pub const DEFAULT_FAVICON_SIZE: u32 = 128;

/// Build a favicon-fetch URL for the page at `target`
pub fn favicon_url(target: &str, size: u32) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("client", "SOCIAL")
        .append_pair("type", "FAVICON")
        .append_pair("fallback_opts", "TYPE,SIZE,URL")
        .append_pair("url", target)
        .append_pair("size", &size.to_string())
        .finish();

    format!("{}?{}", FAVICON_ENDPOINT, query)
}
