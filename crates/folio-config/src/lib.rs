//! Configuration management for folio.
//!
//! Parses `folio.toml` with serde and discovers the file by walking up from
//! the current directory. CLI overrides are applied during load via
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `media.base_url`
//! - `media.store_dir`
//! - `media.manifest`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the posts directory.
    pub posts_dir: Option<PathBuf>,
    /// Override the media store directory.
    pub store_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Posts shown per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content section as written in TOML.
    content: ContentConfigRaw,
    /// Media section as written in TOML.
    media: MediaConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved media configuration (set after loading).
    #[serde(skip)]
    pub media_resolved: MediaConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    posts_dir: Option<String>,
    page_size: Option<usize>,
    default_author: Option<String>,
}

/// Resolved content configuration.
#[derive(Debug)]
pub struct ContentConfig {
    /// Directory holding `.mdx`/`.md` post files.
    pub posts_dir: PathBuf,
    /// Posts per listing page.
    pub page_size: usize,
    /// Author used when a post's front matter omits one.
    pub default_author: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("content/posts"),
            page_size: DEFAULT_PAGE_SIZE,
            default_author: "Anonymous".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MediaConfigRaw {
    base_url: Option<String>,
    store_dir: Option<String>,
    manifest: Option<String>,
    cdn_optimize: Option<bool>,
}

/// Resolved media configuration.
#[derive(Debug)]
pub struct MediaConfig {
    /// Base URL prepended to `public/<path>` when building asset URLs.
    pub base_url: String,
    /// Local bucket directory. `None` means media storage is unconfigured.
    pub store_dir: Option<PathBuf>,
    /// Location of the generated media manifest.
    pub manifest: PathBuf,
    /// Whether image URLs carry CDN resize parameters.
    pub cdn_optimize: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: "/media".to_owned(),
            store_dir: None,
            manifest: PathBuf::from("public/media-manifest.json"),
            cdn_optimize: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`media.store_dir`").
        field: String,
        /// Error message (e.g., "${`FOLIO_BUCKET`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `folio.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(posts_dir) = &settings.posts_dir {
            self.content_resolved.posts_dir.clone_from(posts_dir);
        }
        if let Some(store_dir) = &settings.store_dir {
            self.media_resolved.store_dir = Some(store_dir.clone());
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        let content = ContentConfig::default();
        let media = MediaConfig::default();
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            media: MediaConfigRaw::default(),
            content_resolved: ContentConfig {
                posts_dir: base.join(content.posts_dir),
                ..content
            },
            media_resolved: MediaConfig {
                manifest: base.join(media.manifest),
                ..media
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        if self.content_resolved.page_size == 0 {
            return Err(ConfigError::Validation(
                "content.page_size must be greater than 0".to_owned(),
            ));
        }
        require_non_empty(&self.media_resolved.base_url, "media.base_url")?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref url) = self.media.base_url {
            self.media.base_url = Some(expand::expand_env(url, "media.base_url")?);
        }
        if let Some(ref dir) = self.media.store_dir {
            self.media.store_dir = Some(expand::expand_env(dir, "media.store_dir")?);
        }
        if let Some(ref manifest) = self.media.manifest {
            self.media.manifest = Some(expand::expand_env(manifest, "media.manifest")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = ContentConfig::default();
        self.content_resolved = ContentConfig {
            posts_dir: config_dir.join(
                self.content
                    .posts_dir
                    .as_deref()
                    .map_or(defaults.posts_dir.as_path(), Path::new),
            ),
            page_size: self.content.page_size.unwrap_or(defaults.page_size),
            default_author: self
                .content
                .default_author
                .clone()
                .unwrap_or(defaults.default_author),
        };

        let defaults = MediaConfig::default();
        self.media_resolved = MediaConfig {
            // An empty store_dir (e.g. `${FOLIO_STORE:-}`) leaves media unconfigured.
            store_dir: self
                .media
                .store_dir
                .as_deref()
                .filter(|dir| !dir.is_empty())
                .map(|dir| config_dir.join(dir)),
            manifest: config_dir.join(
                self.media
                    .manifest
                    .as_deref()
                    .map_or(defaults.manifest.as_path(), Path::new),
            ),
            base_url: self
                .media
                .base_url
                .as_deref()
                .map_or(defaults.base_url, |url| url.trim_end_matches('/').to_owned()),
            cdn_optimize: self.media.cdn_optimize.unwrap_or(defaults.cdn_optimize),
        };
    }
}
