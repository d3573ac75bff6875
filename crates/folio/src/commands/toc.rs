//! `folio toc` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::Config;
use folio_content::{PostRepository, split_front_matter};
use folio_toc::{HeadingNode, Outline, render_html};

use crate::commands::repository;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Post slug, or path to a markdown file.
    target: String,

    /// Print the rendered HTML instead of the outline.
    #[arg(long)]
    html: bool,
}

impl TocArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let body = self.load_body(config_path)?;

        if self.html {
            output.data(&render_html(&body));
            return Ok(());
        }

        let outline = Outline::from_source(&body);
        if outline.is_empty() {
            output.warning("No headings found");
        }
        for line in outline_lines(&outline) {
            output.data(&line);
        }
        Ok(())
    }

    /// Markdown body of the target, without front matter.
    fn load_body(&self, config_path: Option<&Path>) -> Result<String, CliError> {
        let path = PathBuf::from(&self.target);
        if path.is_file() {
            let source = fs::read_to_string(&path)?;
            let body = split_front_matter(&source).map_or(source.as_str(), |(_, body)| body);
            return Ok(body.to_owned());
        }

        let config = Config::load(config_path, None)?;
        repository(&config)
            .get(&self.target)
            .map(|post| post.content)
            .ok_or_else(|| CliError::NotFound(format!("Post not found: {}", self.target)))
    }
}

/// Indented outline tree, one heading per line with its anchor.
fn outline_lines(outline: &Outline) -> Vec<String> {
    fn walk(node: &HeadingNode, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}- {} (#{})", "  ".repeat(depth), node.text, node.id));
        for child in &node.children {
            walk(child, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    for root in outline.roots() {
        walk(root, 0, &mut lines);
    }
    lines
}
