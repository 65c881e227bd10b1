//! Error types for the blog store module.

use thiserror::Error;

use crate::blog::ValidationError;

/// Errors that can occur during blog store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid blog: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Store not initialized at {0}")]
    NotInitialized(String),
}
