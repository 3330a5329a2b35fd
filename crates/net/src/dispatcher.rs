//! Query dispatch
//!
//! One search = one grounded text completion and one preview image, both in
//! flight at once. The image is optional; the text is not.

use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use vantage_core::{sanitize_search_response, SearchResult};

use crate::backend::GenerativeBackend;
use crate::error::{Error, Result};
use crate::prompt::{image_prompt, search_prompt};

pub struct Dispatcher<B> {
    backend: B,
}

impl<B: GenerativeBackend> Dispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run a product search for `query`.
    ///
    /// Image failures are logged and yield no image. Text failures and
    /// malformed answers are returned as errors. Nothing is retried.
    #[instrument(skip(self), fields(search_id = %Uuid::new_v4()))]
    pub async fn search(&self, query: &str) -> Result<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let text_prompt = search_prompt(query);
        let picture_prompt = image_prompt(query);

        let (text, image) = tokio::join!(
            self.backend.search_completion(&text_prompt),
            self.preview_image(&picture_prompt),
        );

        let text = text.map_err(|e| {
            error!(error = %e, "Search completion failed");
            e
        })?;

        let result = sanitize_search_response(&text, image)?;
        info!(
            products = result.products.len(),
            has_image = result.generated_image.is_some(),
            "Search complete"
        );
        Ok(result)
    }

    async fn preview_image(&self, prompt: &str) -> Option<String> {
        match self.backend.generate_image(prompt).await {
            Ok(image) => image.map(|i| i.to_data_uri()),
            Err(e) => {
                warn!(error = %e, "Failed to generate preview image");
                None
            }
        }
    }
}
