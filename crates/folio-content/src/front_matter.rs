//! Front-matter splitting and schema-checked parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::ContentError;

/// Split a post source into its YAML front matter and body.
///
/// The front matter must open on the first line with `---` and close with a
/// line that is exactly `---`. Returns `None` when there is no such block.
pub fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Post metadata as written in the front-matter block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub published_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Tag ids, resolved against the default table when the post is built.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl FrontMatter {
    /// Parse front matter YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or `title`/`publishedAt`
    /// are missing.
    pub fn parse(yaml: &str) -> Result<Self, ContentError> {
        Ok(serde_yaml::from_str(yaml.trim())?)
    }

    /// Posts are published unless the front matter says `published: false`.
    pub fn is_published(&self) -> bool {
        self.published != Some(false)
    }
}

/// Parse a front-matter date.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS`
/// (taken as UTC) and bare `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, ContentError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ContentError::InvalidDate {
            field,
            value: value.to_owned(),
        })
}
