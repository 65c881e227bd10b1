//! Application state management.

use std::sync::Arc;

use thiserror::Error;

use crate::store::{BlogStore, StoreError};

use super::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<BlogStore>,
}

impl AppState {
    /// Wrap an already opened store.
    pub fn new(store: BlogStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Open (or create) the store named in the configuration.
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let path = &config.database.path;
        let store = BlogStore::open_or_init(path).map_err(|source| StateError::OpenStore {
            path: path.clone(),
            source,
        })?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &BlogStore {
        &self.store
    }
}

/// Errors that can occur when setting up application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to open blog store at '{path}': {source}")]
    OpenStore {
        path: String,
        #[source]
        source: StoreError,
    },
}
