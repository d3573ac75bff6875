//! Object storage abstraction and a local-directory bucket.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MediaError, Visibility};

/// Directory under the store root holding metadata sidecars.
const META_DIR: &str = ".folio-meta";

/// Custom metadata stored alongside an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub visibility: Visibility,
    pub content_type: String,
    /// Hex md5 of the object body.
    pub hash: String,
}

/// A stored object as returned by `head` and `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub meta: Option<ObjectMeta>,
}

/// Bucket-like key/value storage for media objects.
pub trait ObjectStore: Send + Sync {
    /// Object info for `key`, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the store cannot be read.
    fn head(&self, key: &str) -> Result<Option<ObjectInfo>, MediaError>;

    /// Store `body` under `key`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    fn put(&self, key: &str, body: &[u8], meta: &ObjectMeta) -> Result<(), MediaError>;

    /// Every object whose key starts with `prefix`, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, MediaError>;
}

/// Object store backed by a local directory.
///
/// Bodies live at `root/key`; metadata lives in JSON sidecars at
/// `root/.folio-meta/key.json`. A missing root is an empty bucket.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn body_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.root.join(META_DIR).join(format!("{key}.json"))
    }

    fn read_meta(&self, key: &str) -> Option<ObjectMeta> {
        let path = self.meta_path(key);
        let data = fs::read(&path).ok()?;
        match serde_json::from_slice(&data) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable object metadata");
                None
            }
        }
    }

    fn info(&self, key: String, metadata: &fs::Metadata) -> ObjectInfo {
        let meta = self.read_meta(&key);
        ObjectInfo {
            size: metadata.len(),
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            meta,
            key,
        }
    }

    fn walk(&self, dir: &Path, prefix: &str, out: &mut Vec<ObjectInfo>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let key = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            if key == META_DIR {
                continue;
            }
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.walk(&entry.path(), &key, out)?;
            } else if file_type.is_file() {
                let metadata = entry.metadata()?;
                out.push(self.info(key, &metadata));
            }
        }
        Ok(())
    }
}

/// Keys are relative `/`-separated paths without empty, `.` or `..`
/// segments, and may not address the metadata directory.
fn validate_key(key: &str) -> Result<(), MediaError> {
    let valid = !key.is_empty()
        && !key.contains('\\')
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
        && key.split('/').next() != Some(META_DIR);
    if valid {
        Ok(())
    } else {
        Err(MediaError::InvalidKey(key.to_owned()))
    }
}

impl ObjectStore for FsObjectStore {
    fn head(&self, key: &str) -> Result<Option<ObjectInfo>, MediaError> {
        validate_key(key)?;
        let path = self.body_path(key);
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => Ok(Some(self.info(key.to_owned(), &metadata))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, body: &[u8], meta: &ObjectMeta) -> Result<(), MediaError> {
        validate_key(key)?;
        let path = self.body_path(key);
        let meta_path = self.meta_path(key);
        for parent in [path.parent(), meta_path.parent()].into_iter().flatten() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, body)?;
        fs::write(&meta_path, serde_json::to_vec_pretty(meta)?)?;
        tracing::debug!(key, size = body.len(), "Stored object");
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, MediaError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut objects = Vec::new();
        self.walk(&self.root, "", &mut objects)?;
        objects.retain(|object| object.key.starts_with(prefix));
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }
}
