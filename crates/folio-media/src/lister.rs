//! Media listers.
//!
//! Listing never fails: an unreadable manifest, an unreachable store or a
//! missing configuration all produce an empty list and a log line.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    FsObjectStore, MediaAsset, MediaManifest, MediaType, MediaUrls, ObjectStore, PUBLIC_PREFIX,
};

/// Source of the public media asset list.
pub trait MediaLister: Send + Sync {
    /// Every public asset. Empty when the source is unavailable.
    fn list(&self) -> Vec<MediaAsset>;

    /// A single asset by its path relative to `public/`.
    fn get(&self, path: &str) -> Option<MediaAsset> {
        let path = path.strip_prefix('/').unwrap_or(path);
        self.list().into_iter().find(|asset| asset.path == path)
    }
}

/// Lists assets from a generated manifest file.
#[derive(Debug, Clone)]
pub struct ManifestLister {
    path: PathBuf,
}

impl ManifestLister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MediaLister for ManifestLister {
    fn list(&self) -> Vec<MediaAsset> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Media manifest not readable");
                return Vec::new();
            }
        };
        match serde_json::from_slice::<MediaManifest>(&data) {
            Ok(manifest) => manifest.items,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Invalid media manifest");
                Vec::new()
            }
        }
    }
}

/// Lists the `public/` prefix of an object store.
#[derive(Debug, Clone)]
pub struct StoreLister<S> {
    store: S,
    urls: MediaUrls,
}

impl<S: ObjectStore> StoreLister<S> {
    pub fn new(store: S, urls: MediaUrls) -> Self {
        Self { store, urls }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ObjectStore> MediaLister for StoreLister<S> {
    fn list(&self) -> Vec<MediaAsset> {
        match self.store.list(PUBLIC_PREFIX) {
            Ok(objects) => objects
                .iter()
                .filter_map(|object| MediaAsset::from_object(object, &self.urls))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list media from store");
                Vec::new()
            }
        }
    }

    fn get(&self, path: &str) -> Option<MediaAsset> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let key = format!("{PUBLIC_PREFIX}{path}");
        match self.store.head(&key) {
            Ok(object) => object.and_then(|object| MediaAsset::from_object(&object, &self.urls)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to fetch media asset");
                None
            }
        }
    }
}

/// Lister used when no media store is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl MediaLister for Unconfigured {
    fn list(&self) -> Vec<MediaAsset> {
        tracing::warn!("Media store not configured, media list will be empty");
        Vec::new()
    }
}

/// Pick the lister for a deployment.
///
/// A configured store wins. Without one, a previously generated manifest is
/// used if present; otherwise media is [`Unconfigured`].
pub fn configured_lister(
    store_dir: Option<&Path>,
    manifest: &Path,
    urls: MediaUrls,
) -> Box<dyn MediaLister> {
    if let Some(dir) = store_dir {
        tracing::debug!(dir = %dir.display(), "Listing media from local store");
        return Box::new(StoreLister::new(FsObjectStore::new(dir), urls));
    }
    if manifest.is_file() {
        tracing::debug!(path = %manifest.display(), "Listing media from manifest");
        return Box::new(ManifestLister::new(manifest));
    }
    Box::new(Unconfigured)
}

/// Typed views over one listing of assets.
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    assets: Vec<MediaAsset>,
}

impl MediaLibrary {
    pub fn new(assets: Vec<MediaAsset>) -> Self {
        Self { assets }
    }

    pub fn load(lister: &dyn MediaLister) -> Self {
        Self::new(lister.list())
    }

    pub fn assets(&self) -> &[MediaAsset] {
        &self.assets
    }

    pub fn into_assets(self) -> Vec<MediaAsset> {
        self.assets
    }

    pub fn of_type(&self, media_type: MediaType) -> Vec<&MediaAsset> {
        self.assets
            .iter()
            .filter(|asset| asset.media_type == media_type)
            .collect()
    }

    pub fn images(&self) -> Vec<&MediaAsset> {
        self.of_type(MediaType::Image)
    }

    pub fn documents(&self) -> Vec<&MediaAsset> {
        self.of_type(MediaType::Document)
    }

    pub fn videos(&self) -> Vec<&MediaAsset> {
        self.of_type(MediaType::Video)
    }

    /// Assets of `media_type` under directory `dir`, e.g. images in `images`.
    pub fn by_directory(&self, media_type: MediaType, dir: &str) -> Vec<&MediaAsset> {
        self.assets
            .iter()
            .filter(|asset| asset.media_type == media_type && asset.in_directory(dir))
            .collect()
    }

    /// Gallery images, from `images/`.
    pub fn gallery_images(&self) -> Vec<&MediaAsset> {
        self.by_directory(MediaType::Image, "images")
    }

    /// Downloadable documents, from `docs/`.
    pub fn gallery_documents(&self) -> Vec<&MediaAsset> {
        self.by_directory(MediaType::Document, "docs")
    }
}
