//! Idempotent upload of local media files into an object store.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::{MediaError, ObjectMeta, ObjectStore, extension, mime_type};

/// Extensions accepted for upload.
pub const SUPPORTED_EXTENSIONS: [&str; 15] = [
    "jpg", "jpeg", "png", "gif", "webp", "svg", "pdf", "doc", "docx", "txt", "md", "mp4", "webm",
    "ogg", "mov",
];

/// Top-level key prefix an upload lands under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub visibility: Visibility,
    /// Replace existing objects whose content changed.
    pub overwrite: bool,
    /// Decide every file without writing to the store.
    pub dry_run: bool,
    /// Remove local files after they were uploaded or updated.
    pub delete_after_upload: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploaded,
    Updated,
    Skipped,
    Failed,
}

impl UploadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Updated => "updated",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }

    fn transferred(self) -> bool {
        matches!(self, Self::Uploaded | Self::Updated)
    }
}

/// Outcome for one local file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    /// Path relative to the sync source.
    pub file: String,
    pub key: String,
    pub status: UploadStatus,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStats {
    pub uploaded: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Bytes of every file that did not fail, skipped ones included.
    pub total_size: u64,
}

impl SyncStats {
    fn record(&mut self, result: &UploadResult) {
        match result.status {
            UploadStatus::Uploaded => self.uploaded += 1,
            UploadStatus::Updated => self.updated += 1,
            UploadStatus::Skipped => self.skipped += 1,
            UploadStatus::Failed => self.failed += 1,
        }
        if result.status != UploadStatus::Failed {
            self.total_size += result.size;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub results: Vec<UploadResult>,
    pub stats: SyncStats,
    /// Local files removed after upload.
    pub deleted: usize,
}

/// Hex md5 of `body`, stored as the object's `hash` metadata.
pub fn content_hash(body: &[u8]) -> String {
    hex::encode(Md5::digest(body))
}

fn is_supported(path: &str) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Supported files under `source` as `(relative path, full path)` pairs,
/// sorted by relative path.
///
/// A file source yields itself, keyed by its file name. Directories are
/// walked recursively; hidden files and directories are skipped.
///
/// # Errors
///
/// Returns an error if `source` does not exist or a directory cannot be read.
pub fn scan_files(source: &Path) -> Result<Vec<(String, PathBuf)>, MediaError> {
    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MediaError::SourceNotFound(source.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    if metadata.is_file() {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if is_supported(&name) {
            files.push((name, source.to_path_buf()));
        }
    } else {
        walk_dir(source, "", &mut files)?;
        files.sort_by(|a, b| a.0.cmp(&b.0));
    }
    Ok(files)
}

fn walk_dir(dir: &Path, prefix: &str, files: &mut Vec<(String, PathBuf)>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_hidden(&name) {
            continue;
        }
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk_dir(&entry.path(), &relative, files)?;
        } else if file_type.is_file() && is_supported(&relative) {
            files.push((relative, entry.path()));
        }
    }
    Ok(())
}

/// Upload every supported file under `source` to `store`.
///
/// Re-running a sync is safe: existing objects are skipped unless
/// `overwrite` is set, and even then unchanged content (same md5) is
/// skipped. Per-file errors are reported as failed results.
///
/// # Errors
///
/// Returns an error only if `source` cannot be scanned.
pub fn sync<S>(store: &S, source: &Path, options: &SyncOptions) -> Result<SyncReport, MediaError>
where
    S: ObjectStore + ?Sized,
{
    let files = scan_files(source)?;
    tracing::info!(
        source = %source.display(),
        count = files.len(),
        visibility = %options.visibility,
        dry_run = options.dry_run,
        "Syncing media"
    );

    let mut report = SyncReport::default();
    for (relative, path) in &files {
        let key = format!("{}/{relative}", options.visibility);
        let result = match sync_file(store, &key, path, options) {
            Ok((status, size)) => UploadResult {
                file: relative.clone(),
                key,
                status,
                size,
                message: None,
            },
            Err(e) => {
                tracing::warn!(file = %relative, error = %e, "Upload failed");
                UploadResult {
                    file: relative.clone(),
                    key,
                    status: UploadStatus::Failed,
                    size: 0,
                    message: Some(e.to_string()),
                }
            }
        };
        report.stats.record(&result);
        report.results.push(result);
    }

    if options.delete_after_upload && !options.dry_run {
        for ((_, path), result) in files.iter().zip(&report.results) {
            if !result.status.transferred() {
                continue;
            }
            match fs::remove_file(path) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Deleted local file");
                    report.deleted += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to delete local file");
                }
            }
        }
    }

    Ok(report)
}

fn sync_file<S>(
    store: &S,
    key: &str,
    path: &Path,
    options: &SyncOptions,
) -> Result<(UploadStatus, u64), MediaError>
where
    S: ObjectStore + ?Sized,
{
    let body = fs::read(path)?;
    let size = body.len() as u64;
    let existing = store.head(key)?;

    let status = match &existing {
        Some(_) if !options.overwrite => return Ok((UploadStatus::Skipped, size)),
        Some(_) => UploadStatus::Updated,
        None => UploadStatus::Uploaded,
    };

    let hash = content_hash(&body);
    if existing
        .and_then(|object| object.meta)
        .is_some_and(|meta| meta.hash == hash)
    {
        return Ok((UploadStatus::Skipped, size));
    }

    if options.dry_run {
        return Ok((status, size));
    }

    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let meta = ObjectMeta {
        original_name,
        uploaded_at: Utc::now(),
        visibility: options.visibility,
        content_type: mime_type(key).to_owned(),
        hash,
    };
    store.put(key, &body, &meta)?;
    Ok((status, size))
}
