//! Gemini `generateContent` client
//!
//! Two calls are made per search:
//!
//! - the text model with the Google Search tool enabled (no response schema,
//!   the service refuses schema + search together)
//! - the image model asked for a single 1:1 image returned as inline data

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::backend::{GenerativeBackend, GeneratedImage};
use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Text used when the completion carries no text parts
const EMPTY_COMPLETION: &str = "{}";

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Wire types for generateContent

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_parts(self) -> Vec<Part> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate
    fn text(self) -> Option<String> {
        let text: String = self
            .first_parts()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// First inline image of the first candidate
    fn inline_image(self) -> Option<InlineData> {
        self.first_parts().into_iter().find_map(|p| p.inline_data)
    }
}

fn user_content(text: String) -> Vec<Content> {
    vec![Content {
        role: Some("user".to_string()),
        parts: vec![Part {
            text: Some(text),
            inline_data: None,
        }],
    }]
}

/// HTTP client for the Gemini API
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    async fn generate(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let res = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", self.config.api_key.trim())
            .json(body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.text_model))]
    async fn search_completion(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: user_content(prompt.to_string()),
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
            generation_config: None,
        };

        let response = self.generate(&self.config.text_model, &body).await?;
        let text = response.text().unwrap_or_else(|| {
            debug!("Completion had no text parts");
            EMPTY_COMPLETION.to_string()
        });

        Ok(text)
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.image_model))]
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>> {
        let body = GenerateContentRequest {
            contents: user_content(prompt.to_string()),
            tools: None,
            generation_config: Some(GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                },
            }),
        };

        let response = self.generate(&self.config.image_model, &body).await?;
        match response.inline_image() {
            Some(inline) => GeneratedImage::from_inline(inline.mime_type, inline.data).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_rejected() {
        assert!(matches!(
            GeminiClient::new(GeminiConfig::new("  ")),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint() {
        let mut config = GeminiConfig::new("key");
        config.api_base = "https://example.test/v1beta/".into();
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_search_request_shape() {
        let body = GenerateContentRequest {
            contents: user_content("find shoes".into()),
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
            generation_config: None,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "find shoes");
        assert_eq!(value["tools"][0]["google_search"], serde_json::json!({}));
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_image_request_shape() {
        let body = GenerateContentRequest {
            contents: user_content("a hat".into()),
            tools: None,
            generation_config: Some(GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: "1:1".into(),
                },
            }),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["generationConfig"]["imageConfig"]["aspectRatio"], "1:1");
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"```json\n{"},{"text":"}\n```"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("```json\n{}\n```"));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_response_inline_image() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Here it is"},{"inlineData":{"mimeType":"image/png","data":"AAEC"}}]}}]}"#,
        )
        .unwrap();
        let inline = response.inline_image().unwrap();
        assert_eq!(inline.mime_type.as_deref(), Some("image/png"));
        assert_eq!(inline.data, "AAEC");
    }
}
