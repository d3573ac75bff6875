//! `folio media manifest` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_media::{FsObjectStore, MediaLister, MediaManifest, MediaType, StoreLister};

use super::{load_config, media_urls, require_store};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the media manifest command.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Output path (default: media.manifest from config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Local media store directory (overrides config).
    #[arg(long)]
    store_dir: Option<PathBuf>,
}

impl ManifestArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(config_path, self.store_dir)?;
        let store_dir = require_store(&config)?;

        output.info(&format!("Generating media manifest from {}", store_dir.display()));
        let lister = StoreLister::new(FsObjectStore::new(store_dir), media_urls(&config));
        let manifest = MediaManifest::generate(lister.list());

        let path = self
            .output
            .unwrap_or_else(|| config.media_resolved.manifest.clone());
        manifest.write(&path)?;

        output.success(&format!(
            "Generated manifest with {} items: {}",
            manifest.count,
            path.display()
        ));
        let summary = manifest.summary();
        for media_type in MediaType::ALL {
            output.info(&format!("  {}: {}", media_type.as_str(), summary.get(media_type)));
        }
        Ok(())
    }
}
