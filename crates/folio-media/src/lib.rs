//! Media library for folio.
//!
//! Assets live in an object store under `public/` (served) and `private/`
//! (never listed) prefixes. This crate provides:
//!
//! - [`MediaAsset`] records and type/MIME classification
//! - [`MediaUrls`] for public, CDN-optimized and `srcset` URLs
//! - [`MediaLister`] implementations that degrade to an empty list instead
//!   of failing
//! - [`MediaManifest`] generation for static listings
//! - [`sync`], an idempotent uploader that skips unchanged files by md5

mod asset;
mod error;
mod lister;
mod manifest;
mod store;
mod sync;
mod urls;

pub use asset::{Dimensions, MediaAsset, MediaType, PUBLIC_PREFIX, extension, mime_type};
pub use error::MediaError;
pub use lister::{
    ManifestLister, MediaLibrary, MediaLister, StoreLister, Unconfigured, configured_lister,
};
pub use manifest::{ManifestSummary, MediaManifest};
pub use store::{FsObjectStore, ObjectInfo, ObjectMeta, ObjectStore};
pub use sync::{
    SUPPORTED_EXTENSIONS, SyncOptions, SyncReport, SyncStats, UploadResult, UploadStatus,
    Visibility, content_hash, scan_files, sync,
};
pub use urls::{ImageOptions, MediaUrls, SRCSET_WIDTHS};
