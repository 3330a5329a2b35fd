//! AI client error types

/// AI client result type
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when a search fails for any upstream reason
pub const SEARCH_FAILED_MESSAGE: &str =
    "Oops! We encountered an issue scanning for deals. Please try again.";

/// AI client errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("No API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    #[error(transparent)]
    Sanitize(#[from] vantage_core::Error),
}

impl Error {
    /// Text suitable for showing to the shopper
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptyQuery | Error::MissingApiKey => self.to_string(),
            _ => SEARCH_FAILED_MESSAGE.to_string(),
        }
    }

    /// Whether the assistant answered but broke the JSON contract
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Error::Sanitize(vantage_core::Error::MalformedResponse(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_share_generic_message() {
        let api = Error::Api {
            status: 503,
            body: "overloaded".into(),
        };
        let malformed = Error::from(vantage_core::Error::MalformedResponse("eof".into()));

        assert_eq!(api.user_message(), SEARCH_FAILED_MESSAGE);
        assert_eq!(malformed.user_message(), SEARCH_FAILED_MESSAGE);
        assert!(malformed.is_malformed_response());
        assert!(!api.is_malformed_response());
    }

    #[test]
    fn test_local_errors_are_specific() {
        assert_eq!(Error::EmptyQuery.user_message(), "Search query is empty");
    }
}
