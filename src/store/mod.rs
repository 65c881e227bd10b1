//! Persistent blog store.
//!
//! Blogs are kept as JSON documents in a fjall keyspace, keyed by their
//! [`BlogId`](crate::blog::BlogId). Key order is creation order.

mod blog_store;
mod error;

pub use blog_store::BlogStore;
pub use error::StoreError;
