//! CLI command implementations.

pub(crate) mod media;
pub(crate) mod posts;
pub(crate) mod serve;
pub(crate) mod tags;
pub(crate) mod toc;

pub(crate) use media::MediaCommand;
pub(crate) use posts::PostsArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use tags::TagsArgs;
pub(crate) use toc::TocArgs;

use folio_config::Config;
use folio_content::FsPostRepository;

/// Post repository for the configured posts directory.
pub(crate) fn repository(config: &Config) -> FsPostRepository {
    FsPostRepository::new(
        config.content_resolved.posts_dir.clone(),
        config.content_resolved.default_author.clone(),
    )
}

/// Human-readable byte size, e.g. `2.00 KB`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < KB * KB {
        format!("{:.2} KB", bytes / KB)
    } else {
        format!("{:.2} MB", bytes / (KB * KB))
    }
}
