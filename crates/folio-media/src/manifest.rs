//! Static media manifest.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MediaAsset, MediaError, MediaType};

/// Snapshot of the public media list, written for builds without store
/// access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaManifest {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub items: Vec<MediaAsset>,
}

/// Asset counts per media type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    pub image: usize,
    pub document: usize,
    pub video: usize,
}

impl ManifestSummary {
    pub fn get(&self, media_type: MediaType) -> usize {
        match media_type {
            MediaType::Image => self.image,
            MediaType::Document => self.document,
            MediaType::Video => self.video,
        }
    }
}

impl MediaManifest {
    pub fn generate(items: Vec<MediaAsset>) -> Self {
        Self {
            generated_at: Utc::now(),
            count: items.len(),
            items,
        }
    }

    /// Write as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), MediaError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), count = self.count, "Wrote media manifest");
        Ok(())
    }

    pub fn summary(&self) -> ManifestSummary {
        let mut summary = ManifestSummary::default();
        for item in &self.items {
            match item.media_type {
                MediaType::Image => summary.image += 1,
                MediaType::Document => summary.document += 1,
                MediaType::Video => summary.video += 1,
            }
        }
        summary
    }
}
