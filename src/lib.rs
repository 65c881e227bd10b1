//! A small blog list service.
//!
//! The heart of the crate is [`list_helper`]: pure functions that compute
//! like statistics over a slice of [`Blog`]s. Around it sit a persistent
//! document store and an HTTP API.
//!
//! # Quick Start
//!
//! ```ignore
//! use blog_list::prelude::*;
//!
//! let store = BlogStore::open_or_init(".blog-list")?;
//! store.create(NewBlog::new("Ruokablogi", "www.ruokaonhyvaa.fi").with_likes(10))?;
//! store.create(NewBlog::new("Autoblogi", "www.autoblogi.fi").with_likes(1000))?;
//!
//! let blogs = store.list()?;
//! assert_eq!(total_likes(&blogs), 1010);
//! assert_eq!(favorite_blog(&blogs).map(|b| b.title.as_str()), Some("Autoblogi"));
//! ```
//!
//! # Modules
//!
//! - [`blog`] - Blog record and input types (always available)
//! - [`list_helper`] - Like statistics (always available)
//! - [`store`] - Blog store backed by fjall (requires `store` feature)
//! - [`server`] - HTTP API (requires `server` feature)
//!
//! # Feature Flags
//!
//! - `store` - Enable the persistent blog store (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `server` - Enable the HTTP API server
//! - `full` - Enable all features

pub mod blog;
pub mod list_helper;
mod logging;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;
#[cfg(feature = "store")]
pub mod store;

mod error;

pub use error::{Error, Result};

pub use blog::{Blog, BlogDraft, BlogId, BlogIdError, BlogUpdate, NewBlog, ValidationError};
pub use list_helper::{BlogStats, dummy, favorite_blog, stats, total_likes};

#[cfg(feature = "store")]
pub use store::{BlogStore, StoreError};
