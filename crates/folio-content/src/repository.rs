//! Post repositories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{ContentError, Post};

/// Source of post records.
pub trait PostRepository: Send + Sync {
    /// Every post, published or not, newest `published_at` first.
    ///
    /// Posts that cannot be loaded are skipped.
    fn load_all(&self) -> Vec<Post>;

    /// A single post by slug.
    fn get(&self, slug: &str) -> Option<Post>;
}

/// Extensions recognised as posts, in lookup priority order.
const POST_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Post repository reading `.mdx`/`.md` files from a flat directory.
#[derive(Debug, Clone)]
pub struct FsPostRepository {
    dir: PathBuf,
    default_author: String,
}

impl FsPostRepository {
    pub fn new(dir: impl Into<PathBuf>, default_author: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_author: default_author.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map each slug to its source file, `.mdx` taking priority over `.md`.
    fn scan(&self) -> BTreeMap<String, PathBuf> {
        let mut files: BTreeMap<String, PathBuf> = BTreeMap::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %self.dir.display(), error = %e, "Posts directory not readable");
                return files;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if slug.starts_with('.') {
                continue;
            }
            let Some(rank) = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(|ext| POST_EXTENSIONS.iter().position(|p| *p == ext))
            else {
                continue;
            };

            let slug = slug.to_owned();
            if files
                .get(&slug)
                .is_none_or(|existing| rank < extension_rank(existing))
            {
                files.insert(slug, path);
            }
        }
        files
    }

    fn load_file(&self, slug: &str, path: &Path) -> Result<Post, ContentError> {
        let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Post::from_source(slug, &source, &self.default_author)
    }
}

fn extension_rank(path: &Path) -> usize {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| POST_EXTENSIONS.iter().position(|p| *p == ext))
        .unwrap_or(usize::MAX)
}

impl PostRepository for FsPostRepository {
    fn load_all(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .scan()
            .into_iter()
            .filter_map(|(slug, path)| match self.load_file(&slug, &path) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping malformed post");
                    None
                }
            })
            .collect();

        // Scan order is by slug, so the stable sort breaks date ties by slug.
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        tracing::debug!(count = posts.len(), dir = %self.dir.display(), "Loaded posts");
        posts
    }

    fn get(&self, slug: &str) -> Option<Post> {
        if slug.is_empty() || slug.starts_with('.') || slug.contains(['/', '\\']) {
            return None;
        }
        let path = POST_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{slug}.{ext}")))
            .find(|path| path.is_file())?;
        match self.load_file(slug, &path) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load post");
                None
            }
        }
    }
}
