//! `folio media` subcommand group.

mod list;
mod manifest;
mod sync;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use folio_config::{CliSettings, Config};
use folio_media::MediaUrls;

use list::ListArgs;
use manifest::ManifestArgs;
use sync::SyncArgs;

use crate::error::CliError;

/// Media library commands.
#[derive(Subcommand)]
pub(crate) enum MediaCommand {
    /// List public media assets.
    List(ListArgs),
    /// Generate the media manifest from the store.
    Manifest(ManifestArgs),
    /// Upload local files into the store.
    Sync(SyncArgs),
}

impl MediaCommand {
    /// Execute the media subcommand.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        match self {
            Self::List(args) => args.execute(config_path),
            Self::Manifest(args) => args.execute(config_path),
            Self::Sync(args) => args.execute(config_path),
        }
    }
}

/// Load config with an optional `--store-dir` override.
fn load_config(config_path: Option<&Path>, store_dir: Option<PathBuf>) -> Result<Config, CliError> {
    let settings = CliSettings {
        store_dir,
        ..CliSettings::default()
    };
    Ok(Config::load(config_path, Some(&settings))?)
}

fn media_urls(config: &Config) -> MediaUrls {
    MediaUrls::new(
        config.media_resolved.base_url.clone(),
        config.media_resolved.cdn_optimize,
    )
}

/// The configured store directory, required by commands that write.
fn require_store(config: &Config) -> Result<PathBuf, CliError> {
    config.media_resolved.store_dir.clone().ok_or_else(|| {
        CliError::Validation(
            "Media store not configured: set media.store_dir in folio.toml or pass --store-dir"
                .to_owned(),
        )
    })
}
