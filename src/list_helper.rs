//! Like statistics over a list of blogs.
//!
//! All functions borrow the slice for the duration of the call and never
//! mutate it.

use serde::Serialize;

use crate::blog::Blog;

/// Always returns `1`.
pub fn dummy(_blogs: &[Blog]) -> u32 {
    1
}

/// Sum of `likes` over all blogs; `0` for an empty list.
///
/// Saturates at `u64::MAX`.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs
        .iter()
        .fold(0u64, |sum, blog| sum.saturating_add(blog.likes))
}

/// The blog with the most likes.
///
/// When several blogs share the maximum, the first one in input order is
/// returned. Returns `None` for an empty list.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().fold(None, |best, blog| match best {
        Some(current) if current.likes >= blog.likes => Some(current),
        _ => Some(blog),
    })
}

/// Summary of a blog list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub count: usize,
    pub total_likes: u64,
    pub favorite: Option<Blog>,
}

/// Compute [`BlogStats`] for a list of blogs.
pub fn stats(blogs: &[Blog]) -> BlogStats {
    BlogStats {
        count: blogs.len(),
        total_likes: total_likes(blogs),
        favorite: favorite_blog(blogs).cloned(),
    }
}
