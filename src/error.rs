use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactHuntError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("File error: {path:?} - {message}")]
    FileError {
        path: PathBuf,
        message: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Timeout error: {operation} exceeded {seconds} seconds")]
    TimeoutError {
        operation: String,
        seconds: u64,
    },

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<anyhow::Error> for ContactHuntError {
    fn from(error: anyhow::Error) -> Self {
        ContactHuntError::UnexpectedError(error.to_string())
    }
}

impl From<serde_json::Error> for ContactHuntError {
    fn from(error: serde_json::Error) -> Self {
        ContactHuntError::SerializationError(error.to_string())
    }
}

pub type ContactHuntResult<T> = std::result::Result<T, ContactHuntError>;
