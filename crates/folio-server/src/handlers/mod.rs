//! HTTP request handlers.

pub(crate) mod media;
pub(crate) mod posts;
pub(crate) mod tags;

use folio_content::Tag;
use serde::{Deserialize, Deserializer, Serialize};

/// Query flag that is set only by the literal value `true`.
///
/// Any other value, including `1` or an empty string, reads as unset.
pub(crate) fn query_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref() == Some("true"))
}

/// Tag with its live post count.
#[derive(Debug, Serialize)]
pub(crate) struct TagResponse {
    id: String,
    name: String,
    category: folio_content::TagCategory,
    color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    count: usize,
    selected: bool,
}

impl TagResponse {
    pub(crate) fn new(tag: &Tag, count: usize, selected: bool) -> Self {
        Self {
            id: tag.id.clone(),
            name: tag.name.clone(),
            category: tag.category,
            color: tag.color.clone(),
            description: tag.description.clone(),
            count,
            selected,
        }
    }
}

impl From<folio_listing::TagCount<'_>> for TagResponse {
    fn from(entry: folio_listing::TagCount<'_>) -> Self {
        Self::new(entry.tag, entry.count, entry.selected)
    }
}
