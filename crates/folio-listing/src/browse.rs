//! Browse state and the derived listing view.

use folio_content::Post;
use serde::{Deserialize, Serialize};

use crate::{PageLink, PageRange, Paginator, TagCount, TagIndex, TagSelection};

/// Everything a reader controls on the listing page.
///
/// Changing the tag selection or the unpublished toggle sends the reader
/// back to page 1; only [`BrowseState::set_page`] moves between pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseState {
    selection: TagSelection,
    page: usize,
    show_unpublished: bool,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            selection: TagSelection::new(),
            page: 1,
            show_unpublished: false,
        }
    }
}

impl BrowseState {
    pub fn new(selection: TagSelection, page: usize, show_unpublished: bool) -> Self {
        Self {
            selection,
            page,
            show_unpublished,
        }
    }

    pub fn selection(&self) -> &TagSelection {
        &self.selection
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn show_unpublished(&self) -> bool {
        self.show_unpublished
    }

    pub fn toggle_tag(&mut self, id: &str) {
        self.selection.toggle(id);
        self.page = 1;
    }

    pub fn clear_tags(&mut self) {
        self.selection.clear();
        self.page = 1;
    }

    pub fn set_show_unpublished(&mut self, show: bool) {
        if self.show_unpublished != show {
            self.show_unpublished = show;
            self.page = 1;
        }
    }

    /// Move to `page`. Out-of-range pages are kept and derive an empty slice.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Go back to page 1, e.g. after the post collection was reloaded.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}

/// One rendered listing page.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    /// Posts on the current page.
    pub posts: Vec<&'a Post>,
    /// Tags to display, in display order, with live counts.
    pub tags: Vec<TagCount<'a>>,
    pub page: usize,
    pub total_pages: usize,
    /// Page links for the pager; empty when there is a single page.
    pub pages: Vec<PageLink>,
    /// Positions of `posts` within the filtered list.
    pub range: Option<PageRange>,
    /// Posts matching the tag selection.
    pub filtered_count: usize,
    /// Posts left after the published pre-filter, before tag filtering.
    pub visible_count: usize,
}

impl<'a> Listing<'a> {
    /// Derive the listing page for `state` over a newest-first collection.
    pub fn derive(posts: &'a [Post], state: &BrowseState, page_size: usize) -> Self {
        let visible: Vec<&'a Post> = posts
            .iter()
            .filter(|post| state.show_unpublished || post.published)
            .collect();
        let index = TagIndex::build(visible.iter().copied(), &state.selection);
        let paginator = Paginator::new(index.filtered(), page_size);

        Self {
            posts: paginator.page(state.page).to_vec(),
            tags: index.visible(),
            page: state.page,
            total_pages: paginator.total_pages(),
            pages: paginator.window(state.page),
            range: paginator.range(state.page),
            filtered_count: index.filtered().len(),
            visible_count: visible.len(),
        }
    }

    /// Whether a tag selection is narrowing the visible posts.
    pub fn is_filtered(&self) -> bool {
        self.filtered_count != self.visible_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PAGE_SIZE;
    use crate::fixtures::{post, scenario, slugs};
    use pretty_assertions::assert_eq;

    fn many(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| post(&format!("post-{i:02}"), i64::try_from(i).unwrap(), &["ai"]))
            .collect()
    }

    // ── BrowseState tests ────────────────────────────────────────────

    #[test]
    fn test_transitions_reset_page() {
        let mut state = BrowseState::default();
        state.set_page(3);
        assert_eq!(state.page(), 3);

        state.toggle_tag("ai");
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_show_unpublished(true);
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_show_unpublished(true);
        assert_eq!(state.page(), 2, "unchanged toggle keeps the page");

        state.clear_tags();
        assert_eq!(state.page(), 1);
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = BrowseState::new(TagSelection::parse("ai,uk"), 2, true);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"selection":["ai","uk"],"page":2,"showUnpublished":true}"#);
        let parsed: BrowseState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);

        let defaulted: BrowseState = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted, BrowseState::default());
    }

    // ── Listing tests ────────────────────────────────────────────────

    #[test]
    fn test_listing_page_size_boundary() {
        let nine = many(9);
        let listing = Listing::derive(&nine, &BrowseState::default(), PAGE_SIZE);
        assert_eq!(listing.total_pages, 1);
        assert!(listing.pages.is_empty());

        let ten = many(10);
        let mut state = BrowseState::default();
        state.set_page(2);
        let listing = Listing::derive(&ten, &state, PAGE_SIZE);
        assert_eq!(listing.total_pages, 2);
        assert_eq!(slugs(listing.posts.iter().copied()), vec!["post-09"]);
        assert_eq!(
            listing.range,
            Some(PageRange {
                first: 10,
                last: 10,
                total: 10
            })
        );
        assert_eq!(listing.pages, vec![PageLink::Page(1), PageLink::Page(2)]);
    }

    #[test]
    fn test_listing_hides_unpublished_by_default() {
        let mut posts = scenario();
        posts[0].published = false;
        posts[9].published = false;

        let listing = Listing::derive(&posts, &BrowseState::default(), PAGE_SIZE);
        assert_eq!(listing.visible_count, 8);
        assert_eq!(listing.filtered_count, 8);
        assert!(!listing.posts.iter().any(|p| !p.published));
        // uk only appeared on the two hidden posts
        assert!(listing.tags.iter().all(|t| t.tag.id != "uk"));

        let mut state = BrowseState::default();
        state.set_show_unpublished(true);
        let listing = Listing::derive(&posts, &state, PAGE_SIZE);
        assert_eq!(listing.visible_count, 10);
    }

    #[test]
    fn test_listing_end_to_end_tag_flow() {
        let posts = scenario();
        let mut state = BrowseState::default();

        let listing = Listing::derive(&posts, &state, PAGE_SIZE);
        assert_eq!(listing.total_pages, 2);
        assert!(!listing.is_filtered());

        state.set_page(2);
        state.toggle_tag("ai");
        let listing = Listing::derive(&posts, &state, PAGE_SIZE);
        assert_eq!(listing.page, 1);
        assert_eq!(listing.filtered_count, 6);
        assert_eq!(listing.total_pages, 1);
        assert!(listing.is_filtered());

        state.toggle_tag("research");
        let listing = Listing::derive(&posts, &state, PAGE_SIZE);
        assert_eq!(slugs(listing.posts.iter().copied()), vec!["p06"]);
        let tags: Vec<_> = listing
            .tags
            .iter()
            .map(|t| (t.tag.id.as_str(), t.count, t.selected))
            .collect();
        assert_eq!(tags, vec![("ai", 1, true), ("research", 1, true)]);

        state.clear_tags();
        let listing = Listing::derive(&posts, &state, PAGE_SIZE);
        assert_eq!(listing.filtered_count, 10);
        let counts: Vec<_> = listing.tags.iter().map(|t| t.count).collect();
        assert_eq!(counts, vec![6, 4, 2]);
    }

    #[test]
    fn test_listing_out_of_range_page_is_empty() {
        let posts = scenario();
        let state = BrowseState::new(TagSelection::new(), 7, false);
        let listing = Listing::derive(&posts, &state, PAGE_SIZE);
        assert!(listing.posts.is_empty());
        assert_eq!(listing.range, None);
        assert_eq!(listing.total_pages, 2);
    }

    #[test]
    fn test_listing_is_deterministic() {
        let posts = scenario();
        let state = BrowseState::new(TagSelection::parse("research"), 1, false);
        let first = Listing::derive(&posts, &state, PAGE_SIZE);
        let second = Listing::derive(&posts, &state, PAGE_SIZE);
        assert_eq!(first.posts, second.posts);
        assert_eq!(first.tags, second.tags);
    }
}
