//! Markdown to HTML with anchored headings.

use pulldown_cmark::{Event, Options, Parser, Tag, html};

use crate::{Outline, anchor_id};

/// A rendered article and its outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub html: String,
    pub outline: Outline,
}

/// Render an article body and extract its outline.
pub fn render_article(source: &str) -> Article {
    Article {
        html: render_html(source),
        outline: Outline::from_source(source),
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH
        | Options::ENABLE_GFM
}

/// Render markdown to HTML.
///
/// Every heading, at any level, gets an `id` computed by [`anchor_id`]
/// from its source text, the same input the outline uses.
pub fn render_html(source: &str) -> String {
    let mut events: Vec<Event<'_>> = Vec::new();
    for (mut event, range) in Parser::new_ext(source, parser_options()).into_offset_iter() {
        if let Event::Start(Tag::Heading { id, .. }) = &mut event {
            let raw = source.get(range).map_or("", heading_source);
            *id = Some(anchor_id(raw).into());
        }
        events.push(event);
    }

    let mut output = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut output, events.into_iter());
    output
}

/// Heading text as written: the first line with the `#` marker removed.
fn heading_source(span: &str) -> &str {
    span.trim_start()
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches('#')
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_ids_all_levels() {
        let html = render_html("# Title\n\n## Getting Started\n\n#### Deep Dive!\n");
        assert_eq!(
            html,
            "<h1 id=\"title\">Title</h1>\n<h2 id=\"getting-started\">Getting Started</h2>\n<h4 id=\"deep-dive\">Deep Dive!</h4>\n"
        );
    }

    #[test]
    fn test_heading_with_inline_code() {
        let html = render_html("## Using `serde_json`\n");
        assert!(html.starts_with("<h2 id=\"using-serde-json\">"));
    }

    #[test]
    fn test_heading_ids_match_outline() {
        let source = "## Cost ($J(\\theta)$) Function\n\ntext\n\n### The *Big* Picture\n\n## See [the docs](https://example.com)\n";
        let article = render_article(source);

        for node in &article.outline {
            assert!(
                article.html.contains(&format!("id=\"{}\"", node.id)),
                "missing anchor {} in {}",
                node.id,
                article.html
            );
        }
    }

    #[test]
    fn test_heading_with_link_uses_source_text() {
        let article = render_article("## See [the docs](https://example.com)\n");
        let id = &article.outline.roots()[0].id;
        assert_eq!(id, "see-the-docs-https-example-com");
        assert!(article.html.starts_with(&format!("<h2 id=\"{id}\">")));
    }

    #[test]
    fn test_setext_heading_id() {
        let html = render_html("Overview\n========\n");
        assert!(html.starts_with("<h1 id=\"overview\">"));
    }

    #[test]
    fn test_duplicate_headings_share_id() {
        let html = render_html("## Notes\n\n## Notes\n");
        assert_eq!(html.matches("id=\"notes\"").count(), 2);
    }

    #[test]
    fn test_body_rendering() {
        let html = render_html("Some **bold** text\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_empty_article() {
        let article = render_article("");
        assert_eq!(article.html, "");
        assert!(article.outline.is_empty());
    }
}
