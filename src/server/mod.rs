//! HTTP API server for the blog list.
//!
//! Exposes CRUD endpoints for blogs under `/api/blogs` and like statistics
//! under `/api/stats`. All bodies are JSON.

mod config;
mod error;
mod logging;
mod routes;
mod state;

pub use config::{
    Config, ConfigError, CorsConfig, DatabaseConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use error::ApiError;
pub use logging::{LoggingError, init as init_logging};
pub use routes::router;
pub use state::{AppState, StateError};
