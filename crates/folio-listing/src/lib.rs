//! Post listing engine.
//!
//! Everything here is a pure function of the post collection and a
//! [`BrowseState`]:
//!
//! 1. unpublished posts are dropped unless the state shows them
//! 2. [`TagIndex`] applies the conjunctive tag filter and computes live counts
//! 3. [`Paginator`] slices the filtered posts into fixed-size pages
//!
//! [`Listing::derive`] runs the whole pipeline.

mod browse;
mod paginate;
mod selection;
mod tags;

pub use browse::{BrowseState, Listing};
pub use paginate::{PAGE_SIZE, PageLink, PageRange, Paginator, page_window};
pub use selection::TagSelection;
pub use tags::{
    TagCount, TagIndex, all_tags, filter_posts, matches_selection, posts_by_category, tag_counts,
    tags_by_category,
};

#[cfg(test)]
mod fixtures;
