//! folio CLI - Personal blog engine.
//!
//! Provides commands for:
//! - `serve`: Start the JSON API server
//! - `posts`: Print a listing page with tag counts
//! - `tags`: Print tags grouped by category
//! - `toc`: Print a post's heading outline
//! - `media list|manifest|sync`: Manage the media library

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{MediaCommand, PostsArgs, ServeArgs, TagsArgs, TocArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// folio - Personal blog engine.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server.
    Serve(ServeArgs),
    /// Print a page of the post listing.
    Posts(PostsArgs),
    /// Print tags grouped by category.
    Tags(TagsArgs),
    /// Print the heading outline of a post.
    Toc(TocArgs),
    /// Media library commands.
    #[command(subcommand)]
    Media(MediaCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Serve(args) => args.execute(config, VERSION),
        Commands::Posts(args) => args.execute(config),
        Commands::Tags(args) => args.execute(config),
        Commands::Toc(args) => args.execute(config),
        Commands::Media(cmd) => cmd.execute(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["folio", "tags", "--verbose", "--config", "site/folio.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("site/folio.toml")));
    }

    #[test]
    fn test_media_sync_flags() {
        let cli = Cli::try_parse_from(["folio", "media", "sync", "./uploads", "--private", "--dry-run"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Media(MediaCommand::Sync(_))));
    }
}
