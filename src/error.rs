//! Unified error type for the blog-list library.

use thiserror::Error;

use crate::blog::{BlogIdError, ValidationError};
#[cfg(feature = "store")]
use crate::store::StoreError;

/// Any error produced by this crate.
///
/// # Example
///
/// ```ignore
/// use blog_list::{BlogStore, Result};
///
/// fn likes_of(path: &str) -> Result<u64> {
///     let store = BlogStore::open(path)?;
///     Ok(blog_list::total_likes(&store.list()?))
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the blog store.
    #[cfg(feature = "store")]
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A blog input missing a required field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A string that is not a blog id.
    #[error(transparent)]
    BlogId(#[from] BlogIdError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a blog store error.
    #[cfg(feature = "store")]
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns `true` if the input was rejected, either directly or by the store.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            #[cfg(feature = "store")]
            Self::Store(StoreError::Invalid(_)) => true,
            _ => false,
        }
    }
}
