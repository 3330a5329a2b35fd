//! Error types for Vantage Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Received malformed data from AI assistant: {0}")]
    MalformedResponse(String),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, Error>;
