//! Conjunctive tag filtering and live tag counts.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use folio_content::{Post, Tag, TagCategory};
use serde::Serialize;

use crate::TagSelection;

/// Whether `post` carries every selected tag id.
pub fn matches_selection(post: &Post, selection: &TagSelection) -> bool {
    selection.iter().all(|id| post.has_tag(id))
}

/// Posts carrying every selected tag id, in input order.
///
/// An empty selection keeps every post.
pub fn filter_posts<'a, I>(posts: I, selection: &TagSelection) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts
        .into_iter()
        .filter(|post| matches_selection(post, selection))
        .collect()
}

/// Every distinct tag in the collection, deduplicated by id.
///
/// The first instance seen for an id wins.
pub fn all_tags<'a, I>(posts: I) -> Vec<&'a Tag>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    posts
        .into_iter()
        .flat_map(|post| &post.tags)
        .filter(|tag| seen.insert(tag.id.as_str()))
        .collect()
}

/// Number of posts carrying each tag, over the whole collection.
pub fn tag_counts<'a, I>(posts: I) -> Vec<TagCount<'a>>
where
    I: IntoIterator<Item = &'a Post>,
{
    TagIndex::build(posts, &TagSelection::new()).entries
}

/// Tags belonging to `category`.
pub fn tags_by_category<'a, I>(tags: I, category: TagCategory) -> Vec<&'a Tag>
where
    I: IntoIterator<Item = &'a Tag>,
{
    tags.into_iter().filter(|tag| tag.category == category).collect()
}

/// Posts with at least one tag in `category`.
pub fn posts_by_category<'a, I>(posts: I, category: TagCategory) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts
        .into_iter()
        .filter(|post| post.tags.iter().any(|tag| tag.category == category))
        .collect()
}

/// A tag with the number of posts it would leave visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagCount<'a> {
    pub tag: &'a Tag,
    pub count: usize,
    pub selected: bool,
}

/// Filter result and per-tag counts for one tag selection.
#[derive(Debug, Clone)]
pub struct TagIndex<'a> {
    filtered: Vec<&'a Post>,
    entries: Vec<TagCount<'a>>,
}

impl<'a> TagIndex<'a> {
    /// Filter `posts` by `selection` and count every tag in the collection.
    ///
    /// For a selected tag the count is the number of filtered posts that
    /// carry it. For an unselected tag it is the size of the filtered set the
    /// user would get by also selecting it. Both reduce to counting filtered
    /// posts that carry the tag.
    pub fn build<I>(posts: I, selection: &TagSelection) -> Self
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let posts: Vec<&'a Post> = posts.into_iter().collect();
        let filtered = filter_posts(posts.iter().copied(), selection);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for post in &filtered {
            let mut seen: HashSet<&str> = HashSet::new();
            for id in post.tag_ids() {
                if seen.insert(id) {
                    *counts.entry(id).or_default() += 1;
                }
            }
        }

        let entries = all_tags(posts.iter().copied())
            .into_iter()
            .map(|tag| TagCount {
                tag,
                count: counts.get(tag.id.as_str()).copied().unwrap_or(0),
                selected: selection.contains(&tag.id),
            })
            .collect();

        Self { filtered, entries }
    }

    /// Posts matching every selected tag.
    pub fn filtered(&self) -> &[&'a Post] {
        &self.filtered
    }

    pub fn into_filtered(self) -> Vec<&'a Post> {
        self.filtered
    }

    /// Every tag observed in the collection, in first-seen order, including
    /// tags whose count is zero.
    pub fn entries(&self) -> &[TagCount<'a>] {
        &self.entries
    }

    pub fn count(&self, id: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.tag.id == id)
            .map(|entry| entry.count)
    }

    /// Tags to display: zero counts dropped, selected tags first, then by
    /// descending count, then by name.
    pub fn visible(&self) -> Vec<TagCount<'a>> {
        let mut visible: Vec<TagCount<'a>> = self
            .entries
            .iter()
            .filter(|entry| entry.count > 0)
            .copied()
            .collect();
        visible.sort_by(|a, b| {
            b.selected
                .cmp(&a.selected)
                .then(b.count.cmp(&a.count))
                .then_with(|| compare_names(&a.tag.name, &b.tag.name))
        });
        visible
    }
}

/// Case-insensitive name order, falling back to byte order.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
