//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use folio_content::{FsPostRepository, Post, PostRepository};
use folio_media::{MediaLister, MediaUrls, configured_lister};

use crate::ServerConfig;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Post source, re-read on every request.
    pub(crate) posts: Arc<dyn PostRepository>,
    /// Public media listing.
    pub(crate) media: Box<dyn MediaLister>,
    /// URL builder for media links.
    pub(crate) urls: MediaUrls,
    /// Local store served under `/media/public`.
    pub(crate) media_dir: Option<PathBuf>,
    pub(crate) page_size: usize,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl AppState {
    pub(crate) fn from_config(config: &ServerConfig) -> Self {
        let urls = MediaUrls::new(config.media_base_url.clone(), config.cdn_optimize);
        let media = configured_lister(
            config.media_store_dir.as_deref(),
            &config.media_manifest,
            urls.clone(),
        );
        Self {
            posts: Arc::new(FsPostRepository::new(
                config.posts_dir.clone(),
                config.default_author.clone(),
            )),
            media,
            urls,
            media_dir: config.media_store_dir.clone(),
            page_size: config.page_size,
            version: config.version.clone(),
        }
    }

    /// Posts visible to the request, newest first.
    pub(crate) fn load_posts(&self, include_unpublished: bool) -> Vec<Post> {
        let mut posts = self.posts.load_all();
        if !include_unpublished {
            posts.retain(|post| post.published);
        }
        posts
    }
}
