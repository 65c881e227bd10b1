//! Single-import access to the commonly used types.
//!
//! ```ignore
//! use blog_list::prelude::*;
//!
//! let store = BlogStore::open_or_init(".blog-list")?;
//! let blogs = store.list()?;
//! println!("{} likes", total_likes(&blogs));
//! ```

pub use crate::error::{Error, Result};

pub use crate::blog::{Blog, BlogDraft, BlogId, BlogIdError, BlogUpdate, NewBlog, ValidationError};
pub use crate::list_helper::{BlogStats, dummy, favorite_blog, stats, total_likes};

#[cfg(feature = "store")]
pub use crate::store::{BlogStore, StoreError};
