//! Tags and the default tag table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of tag categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Official,
    Personal,
    Technical,
    Family,
}

impl TagCategory {
    /// Display order used when grouping tags by category.
    pub const ALL: [Self; 4] = [Self::Official, Self::Technical, Self::Personal, Self::Family];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Personal => "personal",
            Self::Technical => "technical",
            Self::Family => "family",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label attached to posts.
///
/// Identity is the `id` alone. Two tags with the same id are the same tag
/// for filtering and counting even if their display fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub category: TagCategory,
    /// CSS color token.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Color given to tags missing from the default table.
pub const FALLBACK_TAG_COLOR: &str = "#6b7280";

struct TagDef {
    id: &'static str,
    name: &'static str,
    category: TagCategory,
    color: &'static str,
    description: &'static str,
}

impl TagDef {
    fn to_tag(&self) -> Tag {
        Tag {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            category: self.category,
            color: self.color.to_owned(),
            description: Some(self.description.to_owned()),
        }
    }
}

#[rustfmt::skip]
const DEFAULT_TAGS: &[TagDef] = &[
    TagDef { id: "ai", name: "AI", category: TagCategory::Technical, color: "#3b82f6", description: "Artificial Intelligence research and applications" },
    TagDef { id: "machine-learning", name: "Machine Learning", category: TagCategory::Technical, color: "#8b5cf6", description: "Machine learning algorithms and techniques" },
    TagDef { id: "reinforcement-learning", name: "Reinforcement Learning", category: TagCategory::Technical, color: "#a855f7", description: "Reinforcement learning and alignment techniques" },
    TagDef { id: "deep-learning", name: "Deep Learning", category: TagCategory::Technical, color: "#7c3aed", description: "Neural networks and deep learning" },
    TagDef { id: "autonomous-driving", name: "Autonomous Driving", category: TagCategory::Technical, color: "#0891b2", description: "Self-driving cars and autonomous vehicle technology" },
    TagDef { id: "research", name: "Research", category: TagCategory::Technical, color: "#059669", description: "Academic and industry research" },
    TagDef { id: "personal", name: "Personal", category: TagCategory::Personal, color: "#ec4899", description: "Personal thoughts and experiences" },
    TagDef { id: "family", name: "Family", category: TagCategory::Family, color: "#f59e0b", description: "Family life and experiences" },
    TagDef { id: "official", name: "Official", category: TagCategory::Official, color: "#10b981", description: "Official work and professional content" },
    TagDef { id: "uk", name: "UK Life", category: TagCategory::Personal, color: "#dc2626", description: "Life experiences in the United Kingdom" },
    TagDef { id: "technology", name: "Technology", category: TagCategory::Technical, color: "#2563eb", description: "Technology trends and insights" },
    TagDef { id: "systems", name: "Systems", category: TagCategory::Technical, color: "#7c2d12", description: "System design and architecture" },
];

/// All tags from the default table, in table order.
pub fn default_tags() -> Vec<Tag> {
    DEFAULT_TAGS.iter().map(TagDef::to_tag).collect()
}

impl Tag {
    /// Resolve a tag id to its canonical metadata.
    ///
    /// Unknown ids get a synthesized tag, see [`Tag::fallback`].
    pub fn resolve(id: &str) -> Self {
        DEFAULT_TAGS
            .iter()
            .find(|def| def.id == id)
            .map_or_else(|| Self::fallback(id), TagDef::to_tag)
    }

    /// Synthesize a tag for an id outside the default table.
    ///
    /// The name is the id with its first character uppercased; category is
    /// technical and color is [`FALLBACK_TAG_COLOR`].
    pub fn fallback(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: capitalize_first(id),
            category: TagCategory::Technical,
            color: FALLBACK_TAG_COLOR.to_owned(),
            description: Some(format!("Posts tagged with {id}")),
        }
    }

    /// Whether the id is in the default table.
    pub fn is_known(id: &str) -> bool {
        DEFAULT_TAGS.iter().any(|def| def.id == id)
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(s.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    out
}
