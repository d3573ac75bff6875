//! Lazy heading scanner.

use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

use crate::text::{anchor_id, display_text};

/// `##` or `###` followed by whitespace and the heading text.
static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{2,3})\s+(.+)$").unwrap());

/// A level-2 or level-3 heading found in document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    /// Display text with math and TeX markup stripped.
    pub text: String,
    /// Anchor id derived from the raw heading text.
    pub id: String,
}

/// Iterator over the headings of a document, in document order.
pub struct Headings<'a> {
    matches: CaptureMatches<'static, 'a>,
}

/// Scan `source` for level-2 and level-3 headings.
///
/// Level-1 and level-4+ headings are never yielded.
pub fn headings(source: &str) -> Headings<'_> {
    Headings {
        matches: HEADING_PATTERN.captures_iter(source),
    }
}

impl Iterator for Headings<'_> {
    type Item = Heading;

    fn next(&mut self) -> Option<Heading> {
        let caps = self.matches.next()?;
        let level = if caps[1].len() == 2 { 2 } else { 3 };
        let raw = caps[2].trim();
        Some(Heading {
            level,
            text: display_text(raw),
            id: anchor_id(raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn levels(source: &str) -> Vec<u8> {
        headings(source).map(|h| h.level).collect()
    }

    #[test]
    fn test_only_levels_two_and_three() {
        let source = "# Title\n## Two\n### Three\n#### Four\n##### Five\n## Again\n";
        assert_eq!(levels(source), vec![2, 3, 2]);
    }

    #[test]
    fn test_heading_fields() {
        let found: Vec<_> = headings("## Cost ($$J(\\theta)$$) Function  \n").collect();
        assert_eq!(
            found,
            vec![Heading {
                level: 2,
                text: "Cost (J()) Function".to_owned(),
                id: "cost-j-theta-function".to_owned(),
            }]
        );
    }

    #[test]
    fn test_requires_line_start_and_space() {
        assert_eq!(levels("text ## not a heading\n##NoSpace\n  ## indented\n"), vec![]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let found: Vec<_> = headings("## First\r\n### Second\r\n").collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "First");
        assert_eq!(found[1].id, "second");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(headings("").next(), None);
    }

    #[test]
    fn test_iterator_is_lazy() {
        let mut iter = headings("## A\n## B\n## C\n");
        assert_eq!(iter.next().map(|h| h.id), Some("a".to_owned()));
        let rest: Vec<_> = iter.map(|h| h.id).collect();
        assert_eq!(rest, vec!["b", "c"]);
    }
}
