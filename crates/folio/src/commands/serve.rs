//! `folio serve` command implementation.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_content::PostRepository;
use folio_server::{run_server, server_config_from_config};

use crate::commands::repository;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Posts directory (overrides config).
    #[arg(long)]
    posts_dir: Option<PathBuf>,

    /// Local media store directory (overrides config).
    #[arg(long)]
    store_dir: Option<PathBuf>,
}

/// Where `/api/media` will read assets from.
#[derive(Debug, PartialEq, Eq)]
enum MediaSource<'a> {
    Store(&'a Path),
    Manifest(&'a Path),
    None,
}

impl<'a> MediaSource<'a> {
    /// Same precedence the server applies: store, then an existing manifest.
    fn of(config: &'a Config) -> Self {
        let media = &config.media_resolved;
        match &media.store_dir {
            Some(dir) => Self::Store(dir),
            None if media.manifest.is_file() => Self::Manifest(&media.manifest),
            None => Self::None,
        }
    }
}

impl fmt::Display for MediaSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(dir) => write!(f, "store {}", dir.display()),
            Self::Manifest(path) => write!(f, "manifest {}", path.display()),
            Self::None => f.write_str("none"),
        }
    }
}

impl ServeArgs {
    fn settings(self) -> CliSettings {
        CliSettings {
            host: self.host,
            port: self.port,
            posts_dir: self.posts_dir,
            store_dir: self.store_dir,
        }
    }

    pub(crate) fn execute(self, config_path: Option<&Path>, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, Some(&self.settings()))?;

        let posts = repository(&config).load_all();
        let drafts = posts.iter().filter(|post| !post.published).count();
        for line in banner(&config, posts.len(), drafts) {
            output.info(&line);
        }
        if MediaSource::of(&config) == MediaSource::None {
            output.warning("No media store or manifest; /api/media will be empty");
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        tokio::runtime::Runtime::new()?
            .block_on(run_server(server_config))
            .map_err(|e| CliError::Server(e.to_string()))
    }
}

/// Startup summary shown before the listener binds.
fn banner(config: &Config, posts: usize, drafts: usize) -> Vec<String> {
    let media = &config.media_resolved;
    let mut lines = vec![
        format!("folio on http://{}:{}", config.server.host, config.server.port),
        format!(
            "{posts} posts ({drafts} unpublished) in {}, {} per page",
            config.content_resolved.posts_dir.display(),
            config.content_resolved.page_size
        ),
        format!("media: {} at {}", MediaSource::of(config), media.base_url),
    ];
    if media.cdn_optimize {
        lines.push("media: CDN resize parameters on".to_owned());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn load(temp: &TempDir, toml: &str) -> Config {
        let path = temp.path().join("folio.toml");
        fs::write(&path, toml).unwrap();
        Config::load(Some(&path), None).unwrap()
    }

    #[test]
    fn test_media_source_precedence() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp, "[media]\nmanifest = \"m.json\"\n");
        assert_eq!(MediaSource::of(&config), MediaSource::None);

        fs::write(temp.path().join("m.json"), "{}").unwrap();
        let config = load(&temp, "[media]\nmanifest = \"m.json\"\n");
        assert!(matches!(MediaSource::of(&config), MediaSource::Manifest(_)));

        let config = load(&temp, "[media]\nmanifest = \"m.json\"\nstore_dir = \"bucket\"\n");
        assert_eq!(
            MediaSource::of(&config),
            MediaSource::Store(&temp.path().join("bucket"))
        );
    }

    #[test]
    fn test_banner() {
        let temp = TempDir::new().unwrap();
        let config = load(
            &temp,
            "[server]\nhost = \"0.0.0.0\"\nport = 8080\n\n[content]\nposts_dir = \"posts\"\npage_size = 6\n\n[media]\ncdn_optimize = true\n",
        );
        let lines = banner(&config, 12, 2);

        assert_eq!(lines[0], "folio on http://0.0.0.0:8080");
        assert!(lines[1].starts_with("12 posts (2 unpublished) in "));
        assert!(lines[1].ends_with(", 6 per page"));
        assert_eq!(lines[2], "media: none at /media");
        assert_eq!(lines[3], "media: CDN resize parameters on");
    }

    #[test]
    fn test_settings_carry_overrides() {
        let args = ServeArgs {
            host: None,
            port: Some(9001),
            posts_dir: None,
            store_dir: Some(PathBuf::from("/srv/bucket")),
        };
        let settings = args.settings();
        assert_eq!(settings.port, Some(9001));
        assert_eq!(settings.store_dir, Some(PathBuf::from("/srv/bucket")));
        assert_eq!(settings.host, None);
    }
}
