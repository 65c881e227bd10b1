//! Blog store implementation using fjall.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use crate::blog::{Blog, BlogId, BlogUpdate, NewBlog};
use crate::logging::{debug, error, info, trace, warn};

use super::error::StoreError;

/// Key of the format version in the metadata keyspace.
const META_CONFIG_KEY: &str = "config";

/// Key of the next unused id sequence number in the metadata keyspace.
const META_NEXT_SEQ_KEY: &str = "next_seq";

/// Keyspace holding store metadata.
const META_KEYSPACE: &str = "_meta";

/// Keyspace holding the blog documents.
const BLOGS_KEYSPACE: &str = "blogs";

/// Current store version (1).
/// Increment this when changing the on-disk layout or document format.
/// The store will reject opening databases with a different version.
const STORE_VERSION: u32 = 1;

/// A persistent collection of blogs backed by fjall.
///
/// Each blog is stored as a JSON document under its [`BlogId`]. Ids are
/// handed out from an increasing sequence, so iterating the keyspace yields
/// blogs in the order they were created. The sequence is persisted, so an
/// id is never reused, even after the newest blogs are deleted.
///
/// # Example
///
/// ```ignore
/// use blog_list::{BlogStore, NewBlog};
///
/// let store = BlogStore::init(".blog-list")?;
/// let blog = store.create(NewBlog::new("Autoblogi", "www.autoblogi.fi").with_likes(1000))?;
///
/// for blog in store.list()? {
///     println!("{} {} ({} likes)", blog.id, blog.title, blog.likes);
/// }
///
/// store.delete(&blog.id)?;
/// ```
///
/// # Persistence
///
/// All write operations are durably persisted before returning.
pub struct BlogStore {
    db: fjall::Database,
    meta: Keyspace,
    blogs: Keyspace,
    next_seq: AtomicU64,
    /// Serializes writes: id allocation and read-modify-write updates.
    write_lock: Mutex<()>,
}

impl BlogStore {
    /// Open an existing blog store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening blog store");

        if !path.exists() {
            error!(path = %path.display(), "store path does not exist");
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;

        if !Self::check_version(&meta)? {
            error!(path = %path.display(), "store not initialized - no config found");
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }

        let store = Self::with_database(db, meta)?;
        info!(
            path = %path.display(),
            next_seq = store.next_seq.load(Ordering::Relaxed),
            "blog store opened"
        );
        Ok(store)
    }

    /// Initialize a new blog store at the given path.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "initializing blog store");

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;
        Self::write_version(&db, &meta)?;

        let store = Self::with_database(db, meta)?;
        info!(path = %path.display(), version = STORE_VERSION, "blog store initialized");
        Ok(store)
    }

    /// Open the store at `path`, initializing it first if it holds no store yet.
    ///
    /// A missing or empty directory is initialized. A store written with a
    /// different version is still rejected.
    pub fn open_or_init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening or initializing blog store");

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;

        if Self::check_version(&meta)? {
            let store = Self::with_database(db, meta)?;
            info!(path = %path.display(), "blog store opened");
            Ok(store)
        } else {
            Self::write_version(&db, &meta)?;
            let store = Self::with_database(db, meta)?;
            info!(path = %path.display(), version = STORE_VERSION, "blog store initialized");
            Ok(store)
        }
    }

    /// Whether `meta` holds a version marker. Fails if it is not ours.
    fn check_version(meta: &Keyspace) -> Result<bool, StoreError> {
        let Some(config) = meta.get(META_CONFIG_KEY)? else {
            return Ok(false);
        };
        let version = u32::from_le_bytes(
            config
                .as_ref()
                .try_into()
                .map_err(|_| StoreError::InvalidFormat("Invalid config format".to_string()))?,
        );
        if version != STORE_VERSION {
            error!(
                stored_version = version,
                expected_version = STORE_VERSION,
                "store version mismatch"
            );
            return Err(StoreError::InvalidFormat(format!(
                "Store version mismatch: expected {}, got {}",
                STORE_VERSION, version
            )));
        }
        trace!(version = version, "store version verified");
        Ok(true)
    }

    fn write_version(db: &fjall::Database, meta: &Keyspace) -> Result<(), StoreError> {
        meta.insert(META_CONFIG_KEY, STORE_VERSION.to_le_bytes())?;
        db.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn with_database(db: fjall::Database, meta: Keyspace) -> Result<Self, StoreError> {
        let blogs = db.keyspace(BLOGS_KEYSPACE, KeyspaceCreateOptions::default)?;
        let store = Self {
            db,
            meta,
            blogs,
            next_seq: AtomicU64::new(1),
            write_lock: Mutex::new(()),
        };

        // Stores written before the counter was persisted only have their keys.
        let after_last_key = store
            .keys()?
            .iter()
            .map(BlogId::seq)
            .max()
            .map_or(1, |seq| seq.saturating_add(1));
        let next = store.stored_next_seq()?.unwrap_or(1).max(after_last_key);
        store.next_seq.store(next, Ordering::SeqCst);

        Ok(store)
    }

    /// All blogs, oldest first.
    pub fn list(&self) -> Result<Vec<Blog>, StoreError> {
        debug!("listing blogs");

        let mut blogs = Vec::new();
        for kv in self.blogs.prefix("") {
            let (key, value) = kv.into_inner()?;
            let key_str = String::from_utf8_lossy(&key);
            if let Err(e) = key_str.parse::<BlogId>() {
                warn!(key = %key_str, error = %e, "skipping foreign key in blogs keyspace");
                continue;
            }
            blogs.push(serde_json::from_slice::<Blog>(&value)?);
        }

        trace!(count = blogs.len(), "blogs listed");
        Ok(blogs)
    }

    /// Get a single blog.
    pub fn get(&self, id: &BlogId) -> Result<Option<Blog>, StoreError> {
        debug!(id = %id, "getting blog");
        self.load(id)
    }

    /// Validate and store a new blog, assigning it a fresh id.
    pub fn create(&self, new_blog: NewBlog) -> Result<Blog, StoreError> {
        let draft = new_blog.validate().inspect_err(|e| {
            warn!(field = e.field(), "rejected blog");
        })?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let blog = draft.into_blog(self.allocate_id()?);
        self.save(&blog)?;
        self.db.persist(PersistMode::SyncAll)?;

        debug!(id = %blog.id, title = %blog.title, "blog created");
        Ok(blog)
    }

    /// Store several blogs at once.
    ///
    /// Every input is validated before anything is written, so an invalid
    /// entry leaves the store untouched.
    pub fn insert_many(&self, new_blogs: Vec<NewBlog>) -> Result<Vec<Blog>, StoreError> {
        let drafts = new_blogs
            .into_iter()
            .map(NewBlog::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut blogs = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let blog = draft.into_blog(self.allocate_id()?);
            self.save(&blog)?;
            blogs.push(blog);
        }
        self.db.persist(PersistMode::SyncAll)?;

        debug!(count = blogs.len(), "blogs inserted");
        Ok(blogs)
    }

    /// Apply a partial update. Returns `None` if the blog does not exist.
    pub fn update(&self, id: &BlogId, update: BlogUpdate) -> Result<Option<Blog>, StoreError> {
        debug!(id = %id, "updating blog");

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let Some(mut blog) = self.load(id)? else {
            trace!(id = %id, "blog not found");
            return Ok(None);
        };
        blog.apply(update)?;
        self.save(&blog)?;
        self.db.persist(PersistMode::SyncAll)?;

        debug!(id = %id, likes = blog.likes, "blog updated");
        Ok(Some(blog))
    }

    /// Delete a blog. Returns whether it existed.
    pub fn delete(&self, id: &BlogId) -> Result<bool, StoreError> {
        debug!(id = %id, "deleting blog");

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        if self.blogs.get(id.as_str())?.is_none() {
            trace!(id = %id, "blog not found");
            return Ok(false);
        }
        self.blogs.remove(id.as_str())?;
        self.db.persist(PersistMode::SyncAll)?;

        debug!(id = %id, "blog deleted");
        Ok(true)
    }

    /// Delete every blog. Returns how many were removed.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let keys = self.keys()?;
        for id in &keys {
            self.blogs.remove(id.as_str())?;
        }
        self.db.persist(PersistMode::SyncAll)?;

        info!(count = keys.len(), "blog store cleared");
        Ok(keys.len())
    }

    /// Hand out the next id and record the advanced sequence in `_meta`.
    ///
    /// Callers hold `write_lock` and persist afterwards.
    fn allocate_id(&self) -> Result<BlogId, StoreError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.meta.insert(META_NEXT_SEQ_KEY, seq.saturating_add(1).to_le_bytes())?;
        Ok(BlogId::from_seq(seq))
    }

    fn stored_next_seq(&self) -> Result<Option<u64>, StoreError> {
        let Some(bytes) = self.meta.get(META_NEXT_SEQ_KEY)? else {
            return Ok(None);
        };
        let seq = u64::from_le_bytes(
            bytes
                .as_ref()
                .try_into()
                .map_err(|_| StoreError::InvalidFormat("Invalid sequence format".to_string()))?,
        );
        Ok(Some(seq))
    }

    /// All stored ids in key order.
    fn keys(&self) -> Result<Vec<BlogId>, StoreError> {
        let mut ids = Vec::new();
        for kv in self.blogs.prefix("") {
            let key_bytes = kv.key()?;
            let key_str = String::from_utf8_lossy(&key_bytes);
            match key_str.parse::<BlogId>() {
                Ok(id) => ids.push(id),
                Err(e) => {
                    warn!(key = %key_str, error = %e, "skipping foreign key in blogs keyspace");
                }
            }
        }
        Ok(ids)
    }

    fn load(&self, id: &BlogId) -> Result<Option<Blog>, StoreError> {
        let Some(value) = self.blogs.get(id.as_str())? else {
            return Ok(None);
        };
        let blog: Blog = serde_json::from_slice(&value.to_vec())?;
        Ok(Some(blog))
    }

    fn save(&self, blog: &Blog) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(blog)?;
        self.blogs.insert(blog.id.as_str(), bytes)?;
        Ok(())
    }
}
