//! Media asset records and classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MediaUrls, ObjectInfo};

/// Key prefix of publicly served objects.
pub const PUBLIC_PREFIX: &str = "public/";

/// Kind of media, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Document,
    Video,
}

impl MediaType {
    pub const ALL: [Self; 3] = [Self::Image, Self::Document, Self::Video];

    /// Classify a lowercase extension. Unknown extensions are not media.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" | "bmp" | "ico" => Some(Self::Image),
            "pdf" | "doc" | "docx" | "txt" | "md" | "json" => Some(Self::Document),
            "mp4" | "webm" | "ogg" | "mov" | "avi" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        extension(path).as_deref().and_then(Self::from_extension)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Video => "video",
        }
    }
}

/// Lowercased extension of the last path segment, without the dot.
pub fn extension(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Content type sent with an uploaded object.
pub fn mime_type(path: &str) -> &'static str {
    match extension(path).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Pixel size of an image or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A publicly served media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// Path relative to `public/`, e.g. `images/cat.png`.
    pub id: String,
    pub filename: String,
    /// Key without the `public/` prefix.
    pub path: String,
    pub public_url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Size in bytes.
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl MediaAsset {
    /// Build an asset from a listed object.
    ///
    /// Returns `None` for keys outside `public/`, directory markers, and
    /// files whose extension is not a known media type.
    pub fn from_object(object: &ObjectInfo, urls: &MediaUrls) -> Option<Self> {
        let path = object.key.strip_prefix(PUBLIC_PREFIX)?;
        if path.is_empty() || path.ends_with('/') {
            return None;
        }
        let filename = path.rsplit('/').next().unwrap_or(path);
        let media_type = MediaType::from_path(filename)?;

        Some(Self {
            id: path.to_owned(),
            filename: filename.to_owned(),
            path: path.to_owned(),
            public_url: urls.public_url(path),
            media_type,
            size: object.size,
            dimensions: None,
            uploaded_at: object
                .meta
                .as_ref()
                .map(|meta| meta.uploaded_at)
                .or(object.last_modified),
        })
    }

    /// Whether the asset's path lies under `dir` (e.g. `images`).
    pub fn in_directory(&self, dir: &str) -> bool {
        let dir = dir.trim_matches('/');
        dir.is_empty()
            || self
                .path
                .strip_prefix(dir)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}
