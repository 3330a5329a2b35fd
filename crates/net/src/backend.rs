//! Generative AI backend interface

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

/// Mime type assumed when the service does not name one
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Inline image returned by the image model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl GeneratedImage {
    /// Wrap an inline payload, rejecting data that is not valid base64
    pub fn from_inline(mime_type: Option<String>, data: String) -> Result<Self> {
        let data: String = data.split_whitespace().collect();
        if data.is_empty() {
            return Err(Error::InvalidImage("empty payload".into()));
        }
        STANDARD
            .decode(&data)
            .map_err(|e| Error::InvalidImage(e.to_string()))?;

        let mime_type = mime_type
            .filter(|m| m.starts_with("image/"))
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());

        Ok(Self { mime_type, data })
    }

    /// `data:` URI for embedding
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The two calls a product search needs from the AI service
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Search-grounded completion; returns the raw text of the answer
    async fn search_completion(&self, prompt: &str) -> Result<String>;

    /// Single square image; `None` when the model answered without one
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>>;
}

#[async_trait]
impl<T: GenerativeBackend + ?Sized> GenerativeBackend for std::sync::Arc<T> {
    async fn search_completion(&self, prompt: &str) -> Result<String> {
        (**self).search_completion(prompt).await
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>> {
        (**self).generate_image(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        let image = GeneratedImage::from_inline(Some("image/jpeg".into()), "AAEC".into()).unwrap();
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,AAEC");
    }

    #[test]
    fn test_missing_mime_defaults_to_png() {
        let image = GeneratedImage::from_inline(None, "AAEC".into()).unwrap();
        assert_eq!(image.mime_type, DEFAULT_IMAGE_MIME);
    }

    #[test]
    fn test_invalid_payload_rejected() {
        assert!(GeneratedImage::from_inline(None, "not base64!!".into()).is_err());
        assert!(GeneratedImage::from_inline(None, "  ".into()).is_err());
    }
}
