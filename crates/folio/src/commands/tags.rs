//! `folio tags` command implementation.

use std::path::Path;

use clap::Args;
use folio_config::Config;
use folio_content::{Post, PostRepository, TagCategory};
use folio_listing::{TagIndex, TagSelection};

use crate::commands::repository;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tags command.
#[derive(Args)]
pub(crate) struct TagsArgs {
    /// Count unpublished posts too.
    #[arg(long)]
    unpublished: bool,
}

impl TagsArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, None)?;

        let mut posts = repository(&config).load_all();
        if !self.unpublished {
            posts.retain(|post| post.published);
        }

        for (category, lines) in category_groups(&posts) {
            output.heading(&title_case(category.as_str()));
            for line in lines {
                output.data(&line);
            }
        }
        Ok(())
    }
}

/// Tag lines per non-empty category, in category display order.
fn category_groups(posts: &[Post]) -> Vec<(TagCategory, Vec<String>)> {
    let visible = TagIndex::build(posts, &TagSelection::new()).visible();
    TagCategory::ALL
        .into_iter()
        .map(|category| {
            let lines = visible
                .iter()
                .filter(|entry| entry.tag.category == category)
                .map(|entry| {
                    format!(
                        "  {:<24} {:>3}  {}  {}",
                        entry.tag.id, entry.count, entry.tag.color, entry.tag.name
                    )
                })
                .collect::<Vec<_>>();
            (category, lines)
        })
        .filter(|(_, lines)| !lines.is_empty())
        .collect()
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
