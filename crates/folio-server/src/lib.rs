//! HTTP server for folio.
//!
//! Serves a JSON API over the post repository, the listing engine and the
//! media library:
//!
//! - `GET /api/posts`: filtered, paginated post listing with live tag counts
//! - `GET /api/posts/{slug}`: a rendered article with its heading outline
//! - `GET /api/tags`: tags grouped by category
//! - `GET /api/media`: public media assets
//! - `GET /media/public/*`: asset files from the local store, when configured
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         posts_dir: "content/posts".into(),
//!         ..ServerConfig::default()
//!     };
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory of `.mdx`/`.md` posts.
    pub posts_dir: PathBuf,
    /// Author for posts that do not name one.
    pub default_author: String,
    /// Posts per listing page.
    pub page_size: usize,
    /// Base URL media links are built on.
    pub media_base_url: String,
    /// Local media store (`None` leaves media unconfigured).
    pub media_store_dir: Option<PathBuf>,
    /// Media manifest used when no store is configured.
    pub media_manifest: PathBuf,
    /// Append CDN transform parameters to image URLs.
    pub cdn_optimize: bool,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            posts_dir: PathBuf::from("content/posts"),
            default_author: "Anonymous".to_owned(),
            page_size: folio_listing::PAGE_SIZE,
            media_base_url: "/media".to_owned(),
            media_store_dir: None,
            media_manifest: PathBuf::from("public/media-manifest.json"),
            cdn_optimize: false,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_config(&config));
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        posts_dir = %config.posts_dir.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a loaded folio config.
#[must_use]
pub fn server_config_from_config(config: &folio_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        posts_dir: config.content_resolved.posts_dir.clone(),
        default_author: config.content_resolved.default_author.clone(),
        page_size: config.content_resolved.page_size,
        media_base_url: config.media_resolved.base_url.clone(),
        media_store_dir: config.media_resolved.store_dir.clone(),
        media_manifest: config.media_resolved.manifest.clone(),
        cdn_optimize: config.media_resolved.cdn_optimize,
        version,
    }
}
