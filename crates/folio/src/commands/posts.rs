//! `folio posts` command implementation.

use std::path::Path;

use clap::Args;
use folio_config::Config;
use folio_content::PostRepository;
use folio_listing::{BrowseState, Listing, PageLink, TagSelection};

use crate::commands::repository;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the posts command.
#[derive(Args)]
pub(crate) struct PostsArgs {
    /// Only show posts carrying this tag id (repeatable, all must match).
    #[arg(short, long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Page to show (1-based).
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Include unpublished posts.
    #[arg(long)]
    unpublished: bool,
}

impl PostsArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, None)?;

        let posts = repository(&config).load_all();
        let selection: TagSelection = self.tags.iter().map(String::as_str).collect();
        let state = BrowseState::new(selection, self.page, self.unpublished);
        let listing = Listing::derive(&posts, &state, config.content_resolved.page_size);

        for line in listing_lines(&listing) {
            output.data(&line);
        }
        Ok(())
    }
}

/// Text rendering of a listing page.
fn listing_lines(listing: &Listing<'_>) -> Vec<String> {
    let mut lines = Vec::new();

    match listing.range {
        Some(range) => lines.push(format!(
            "Showing {} to {} of {} posts",
            range.first, range.last, range.total
        )),
        None if listing.filtered_count == 0 => lines.push("No posts found".to_owned()),
        None => lines.push(format!(
            "Page {} is out of range ({} pages)",
            listing.page, listing.total_pages
        )),
    }

    for post in &listing.posts {
        let tags: Vec<&str> = post.tag_ids().collect();
        let draft = if post.published { "" } else { " (draft)" };
        lines.push(format!(
            "  {}  {}{draft}  [{}]  {} min",
            post.published_at.format("%Y-%m-%d"),
            post.title,
            tags.join(", "),
            post.stats.reading_time,
        ));
    }

    if !listing.tags.is_empty() {
        lines.push(String::new());
        lines.push("Tags:".to_owned());
        for entry in &listing.tags {
            let marker = if entry.selected { "*" } else { " " };
            lines.push(format!(
                "  {marker} {} ({}) [{}]",
                entry.tag.name, entry.count, entry.tag.id
            ));
        }
    }

    if !listing.pages.is_empty() {
        let pages: Vec<String> = listing
            .pages
            .iter()
            .map(|link| match link {
                PageLink::Page(n) if *n == listing.page => format!("[{n}]"),
                other => other.to_string(),
            })
            .collect();
        lines.push(String::new());
        lines.push(format!("Pages: {}", pages.join(" ")));
    }

    lines
}
