//! `folio media sync` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_media::{FsObjectStore, SyncOptions, SyncReport, UploadResult, UploadStatus, Visibility, sync};

use super::{load_config, require_store};
use crate::commands::format_size;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the media sync command.
#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Source file or directory.
    #[arg(default_value = "content/media")]
    source: PathBuf,

    /// Upload under `private/` instead of `public/`.
    #[arg(long)]
    private: bool,

    /// Update existing objects whose content changed.
    #[arg(long)]
    overwrite: bool,

    /// Show what would be uploaded without uploading.
    #[arg(long)]
    dry_run: bool,

    /// Delete local files after a successful upload.
    #[arg(long)]
    delete_after_upload: bool,

    /// Local media store directory (overrides config).
    #[arg(long)]
    store_dir: Option<PathBuf>,
}

impl SyncArgs {
    fn options(&self) -> SyncOptions {
        SyncOptions {
            visibility: if self.private {
                Visibility::Private
            } else {
                Visibility::Public
            },
            overwrite: self.overwrite,
            dry_run: self.dry_run,
            delete_after_upload: self.delete_after_upload,
        }
    }

    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let options = self.options();
        let config = load_config(config_path, self.store_dir)?;
        let store = FsObjectStore::new(require_store(&config)?);

        output.info(&format!(
            "Syncing {} to {} ({})",
            self.source.display(),
            store.root().display(),
            options.visibility
        ));
        if options.dry_run {
            output.warning("Dry run: nothing will be written");
        }

        let report = sync(&store, &self.source, &options)?;
        if report.results.is_empty() {
            output.warning("No supported files found");
        }
        for result in &report.results {
            match result.status {
                UploadStatus::Failed => output.error(&result_line(result)),
                UploadStatus::Skipped => output.data_dim(&result_line(result)),
                UploadStatus::Uploaded | UploadStatus::Updated => output.data(&result_line(result)),
            }
        }

        output.separator();
        for line in summary_lines(&report) {
            output.data(&line);
        }
        Ok(())
    }
}

fn result_line(result: &UploadResult) -> String {
    match &result.message {
        Some(message) if result.status == UploadStatus::Failed => {
            format!("{:<8} {} - {message}", result.status.as_str(), result.key)
        }
        _ => format!(
            "{:<8} {} ({})",
            result.status.as_str(),
            result.key,
            format_size(result.size)
        ),
    }
}

fn summary_lines(report: &SyncReport) -> Vec<String> {
    let stats = &report.stats;
    let mut lines = vec![
        format!("Uploaded:   {}", stats.uploaded),
        format!("Updated:    {}", stats.updated),
        format!("Skipped:    {}", stats.skipped),
        format!("Failed:     {}", stats.failed),
        format!("Total size: {}", format_size(stats.total_size)),
    ];
    if report.deleted > 0 {
        lines.push(format!("Deleted:    {} local files", report.deleted));
    }
    lines
}
