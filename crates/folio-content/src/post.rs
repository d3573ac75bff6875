//! Post records and derived reading statistics.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::front_matter::{FrontMatter, parse_date, split_front_matter};
use crate::{ContentError, Tag};

/// Inline `$...$` or display `$$...$$` math.
static FORMULA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$.*?\$\$|\$[^$]+\$").unwrap());

const WORDS_PER_MINUTE: usize = 200;

/// Post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            avatar: None,
        }
    }
}

/// Statistics derived from a post body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    /// Estimated minutes to read, at 200 words per minute, rounded up.
    pub reading_time: usize,
    pub word_count: usize,
    pub has_formulas: bool,
}

impl PostStats {
    pub fn from_content(content: &str) -> Self {
        let word_count = content.split_whitespace().count();
        Self {
            reading_time: word_count.div_ceil(WORDS_PER_MINUTE),
            word_count,
            has_formulas: FORMULA_PATTERN.is_match(content),
        }
    }
}

/// A blog post loaded from a content file.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Unique id; equal to the slug.
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Body text without the front-matter block.
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub author: Author,
    pub stats: PostStats,
    pub published: bool,
}

impl Post {
    /// Build a post from a content file's full source text.
    ///
    /// # Errors
    ///
    /// Returns an error if the front matter is missing, malformed, or holds
    /// an unparseable date.
    pub fn from_source(slug: &str, source: &str, default_author: &str) -> Result<Self, ContentError> {
        let (yaml, body) = split_front_matter(source).ok_or(ContentError::MissingFrontMatter)?;
        let front = FrontMatter::parse(yaml)?;
        Self::from_front_matter(slug, front, body, default_author)
    }

    /// Build a post from already parsed front matter and its body.
    ///
    /// # Errors
    ///
    /// Returns an error if `publishedAt` or `updatedAt` cannot be parsed.
    pub fn from_front_matter(
        slug: &str,
        front: FrontMatter,
        body: &str,
        default_author: &str,
    ) -> Result<Self, ContentError> {
        let published = front.is_published();
        let published_at = parse_date("publishedAt", &front.published_at)?;
        let updated_at = match front.updated_at.as_deref() {
            Some(value) => parse_date("updatedAt", value)?,
            None => published_at,
        };

        Ok(Self {
            id: slug.to_owned(),
            slug: slug.to_owned(),
            title: front.title,
            excerpt: front.excerpt,
            content: body.to_owned(),
            published_at,
            updated_at,
            tags: front.tags.iter().map(|id| Tag::resolve(id)).collect(),
            author: Author::named(front.author.unwrap_or_else(|| default_author.to_owned())),
            stats: PostStats::from_content(body),
            published,
        })
    }

    /// Whether any of the post's tags has the given id.
    pub fn has_tag(&self, id: &str) -> bool {
        self.tags.iter().any(|tag| tag.id == id)
    }

    pub fn tag_ids(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.id.as_str())
    }
}
