//! `folio media list` command implementation.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use folio_media::{MediaAsset, MediaLibrary, MediaType, configured_lister};

use super::{load_config, media_urls};
use crate::commands::format_size;
use crate::error::CliError;
use crate::output::Output;

#[derive(Clone, Copy, ValueEnum)]
enum TypeFilter {
    Image,
    Document,
    Video,
}

impl From<TypeFilter> for MediaType {
    fn from(filter: TypeFilter) -> Self {
        match filter {
            TypeFilter::Image => Self::Image,
            TypeFilter::Document => Self::Document,
            TypeFilter::Video => Self::Video,
        }
    }
}

/// Arguments for the media list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Only list assets of this type.
    #[arg(short = 't', long = "type", value_enum)]
    media_type: Option<TypeFilter>,

    /// Only list assets under this directory (e.g. `images`).
    #[arg(short, long)]
    dir: Option<String>,

    /// Local media store directory (overrides config).
    #[arg(long)]
    store_dir: Option<PathBuf>,
}

impl ListArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(config_path, self.store_dir)?;

        let lister = configured_lister(
            config.media_resolved.store_dir.as_deref(),
            &config.media_resolved.manifest,
            media_urls(&config),
        );
        let library = MediaLibrary::load(lister.as_ref());
        let assets = select(&library, self.media_type.map(MediaType::from), self.dir.as_deref());

        if assets.is_empty() {
            output.warning("No media found");
            return Ok(());
        }
        for asset in &assets {
            output.data(&asset_line(asset));
        }
        output.info(&format!("{} assets", assets.len()));
        Ok(())
    }
}

fn select<'a>(
    library: &'a MediaLibrary,
    media_type: Option<MediaType>,
    dir: Option<&str>,
) -> Vec<&'a MediaAsset> {
    library
        .assets()
        .iter()
        .filter(|asset| media_type.is_none_or(|t| asset.media_type == t))
        .filter(|asset| dir.is_none_or(|d| asset.in_directory(d)))
        .collect()
}

fn asset_line(asset: &MediaAsset) -> String {
    format!(
        "{:<8} {:<40} {:>10}  {}",
        asset.media_type.as_str(),
        asset.path,
        format_size(asset.size),
        asset.public_url
    )
}
