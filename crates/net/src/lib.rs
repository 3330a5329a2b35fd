//! Vantage Network Library
//!
//! Talks to the hosted generative AI service for product searches.
//!
//! # Architecture
//!
//! - **Backend**: [`GenerativeBackend`] trait, implemented by [`GeminiClient`]
//! - **Dispatcher**: runs the text and image calls concurrently and
//!   sanitizes the answer
//! - **Generation**: tokens for discarding stale search outcomes
//!
//! # Usage
//!
//! ```ignore
//! let client = GeminiClient::new(GeminiConfig::new(api_key))?;
//! let dispatcher = Dispatcher::new(client);
//!
//! let result = dispatcher.search("navy blazer").await?;
//! for product in &result.products {
//!     println!("{} {}", product.title, product.price);
//! }
//! ```

pub mod backend;
pub mod dispatcher;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod prompt;

pub use backend::{GeneratedImage, GenerativeBackend};
pub use dispatcher::Dispatcher;
pub use error::{Error, Result, SEARCH_FAILED_MESSAGE};
pub use gemini::{GeminiClient, GeminiConfig};
pub use generation::SearchGeneration;
