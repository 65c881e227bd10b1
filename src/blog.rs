//! Blog record types.
//!
//! [`Blog`] is the stored record. [`NewBlog`] and [`BlogUpdate`] are the
//! loosely-typed inputs accepted from clients; they are checked before
//! anything reaches the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of hex digits in a [`BlogId`].
const ID_LEN: usize = 16;

/// Identifier of a stored blog.
///
/// Ids are 16 lowercase hex digits encoding a sequence number, so the
/// lexical order of ids is the order in which blogs were created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlogId(String);

impl BlogId {
    /// Build the id for a sequence number.
    pub fn from_seq(seq: u64) -> Self {
        Self(format!("{:0width$x}", seq, width = ID_LEN))
    }

    /// The sequence number encoded in this id.
    pub fn seq(&self) -> u64 {
        // Validated on construction, so this cannot fail.
        u64::from_str_radix(&self.0, 16).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BlogId {
    type Err = BlogIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ID_LEN || !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(BlogIdError(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for BlogId {
    type Error = BlogIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlogId> for String {
    fn from(id: BlogId) -> Self {
        id.0
    }
}

/// A string that does not look like a [`BlogId`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformatted id: '{0}'")]
pub struct BlogIdError(pub String);

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
}

impl Blog {
    /// Create a blog with no author and zero likes.
    pub fn new(id: BlogId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: None,
            url: url.into(),
            likes: 0,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_likes(mut self, likes: u64) -> Self {
        self.likes = likes;
        self
    }

    /// Apply an update in place, rejecting a blank `title` or `url`.
    pub fn apply(&mut self, update: BlogUpdate) -> Result<(), ValidationError> {
        update.check()?;
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = Some(author);
        }
        if let Some(url) = update.url {
            self.url = url;
        }
        if let Some(likes) = update.likes {
            self.likes = likes;
        }
        Ok(())
    }
}

/// Input for creating a blog. Every field may be missing on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl NewBlog {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_likes(mut self, likes: u64) -> Self {
        self.likes = Some(likes);
        self
    }

    /// Check required fields and fill defaults.
    ///
    /// `title` and `url` must be present and non-blank. A missing `likes`
    /// becomes `0`.
    pub fn validate(self) -> Result<BlogDraft, ValidationError> {
        let title = required("title", self.title)?;
        let url = required("url", self.url)?;
        Ok(BlogDraft {
            title,
            author: self.author,
            url,
            likes: self.likes.unwrap_or(0),
        })
    }
}

/// A validated [`NewBlog`] waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
}

impl BlogDraft {
    pub fn into_blog(self, id: BlogId) -> Blog {
        Blog {
            id,
            title: self.title,
            author: self.author,
            url: self.url,
            likes: self.likes,
        }
    }
}

/// Partial update for a stored blog. Missing fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl BlogUpdate {
    /// Present `title` and `url` values must not be blank.
    fn check(&self) -> Result<(), ValidationError> {
        if self.title.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::MissingField("title"));
        }
        if self.url.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::MissingField("url"));
        }
        Ok(())
    }
}

/// A blog input that fails the required-field rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{0}` is required")]
    MissingField(&'static str),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !is_blank(&v) => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
