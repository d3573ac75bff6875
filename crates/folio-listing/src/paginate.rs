//! Fixed-size pagination and the windowed page list.

use std::fmt;

use serde::{Serialize, Serializer};

/// Posts per listing page.
pub const PAGE_SIZE: usize = 9;

/// Pages shown on each side of the current page.
const WINDOW_DELTA: usize = 2;

/// Entry in the rendered list of page links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(n) => n.serialize(serializer),
            Self::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// 1-based positions of the items on a page, for "Showing X to Y of Z".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

/// Slices a list into pages of `page_size` items.
#[derive(Debug)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
}

impl<T> Clone for Paginator<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Paginator<'_, T> {}

impl<'a, T> Paginator<'a, T> {
    /// A `page_size` of zero is treated as one.
    pub fn new(items: &'a [T], page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(len / page_size)`; zero for an empty list.
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// Items on 1-based `page`. Out-of-range pages, including 0, are empty.
    pub fn page(&self, page: usize) -> &'a [T] {
        let Some(index) = page.checked_sub(1) else {
            return &[];
        };
        let start = index.saturating_mul(self.page_size);
        if start >= self.items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    /// Positions covered by `page`, or `None` when the page is empty.
    pub fn range(&self, page: usize) -> Option<PageRange> {
        let len = self.page(page).len();
        if len == 0 {
            return None;
        }
        let first = (page - 1) * self.page_size + 1;
        Some(PageRange {
            first,
            last: first + len - 1,
            total: self.items.len(),
        })
    }

    /// Page links around `current`, see [`page_window`].
    pub fn window(&self, current: usize) -> Vec<PageLink> {
        page_window(current, self.total_pages())
    }
}

/// Page links for a pager: the first and last page, two pages either side
/// of `current`, and an ellipsis for each elided stretch.
///
/// Empty when there is at most one page.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    if total <= 1 {
        return Vec::new();
    }

    let low = current.saturating_sub(WINDOW_DELTA).max(2);
    let high = current.saturating_add(WINDOW_DELTA).min(total - 1);

    let mut links = vec![PageLink::Page(1)];
    if current.saturating_sub(WINDOW_DELTA) > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((low..=high).map(PageLink::Page));
    if current.saturating_add(WINDOW_DELTA) < total - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use PageLink::{Ellipsis, Page};

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    // ── Paginator tests ──────────────────────────────────────────────

    #[test]
    fn test_total_pages_boundaries() {
        assert_eq!(Paginator::new(&numbers(0), PAGE_SIZE).total_pages(), 0);
        assert_eq!(Paginator::new(&numbers(1), PAGE_SIZE).total_pages(), 1);
        assert_eq!(Paginator::new(&numbers(9), PAGE_SIZE).total_pages(), 1);
        assert_eq!(Paginator::new(&numbers(10), PAGE_SIZE).total_pages(), 2);
        assert_eq!(Paginator::new(&numbers(27), PAGE_SIZE).total_pages(), 3);
    }

    #[test]
    fn test_second_page_holds_remainder() {
        let items = numbers(10);
        let paginator = Paginator::new(&items, PAGE_SIZE);
        assert_eq!(paginator.page(1), &items[..9]);
        assert_eq!(paginator.page(2), &[10]);
    }

    #[test]
    fn test_pages_partition_items() {
        let items = numbers(23);
        let paginator = Paginator::new(&items, 5);
        let joined: Vec<usize> = (1..=paginator.total_pages())
            .flat_map(|n| paginator.page(n).iter().copied())
            .collect();
        assert_eq!(joined, items);
        assert!(paginator.page(paginator.total_pages()).len() <= 5);
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let items = numbers(10);
        let paginator = Paginator::new(&items, PAGE_SIZE);
        assert!(paginator.page(0).is_empty());
        assert!(paginator.page(3).is_empty());
        assert!(paginator.page(usize::MAX).is_empty());
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<usize> = Vec::new();
        let paginator = Paginator::new(&items, PAGE_SIZE);
        assert_eq!(paginator.total_pages(), 0);
        assert!(paginator.page(1).is_empty());
        assert_eq!(paginator.range(1), None);
        assert!(paginator.window(1).is_empty());
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let items = numbers(3);
        assert_eq!(Paginator::new(&items, 0).total_pages(), 3);
    }

    #[test]
    fn test_range() {
        let items = numbers(20);
        let paginator = Paginator::new(&items, PAGE_SIZE);
        assert_eq!(
            paginator.range(3),
            Some(PageRange {
                first: 19,
                last: 20,
                total: 20
            })
        );
        assert_eq!(paginator.range(4), None);
    }

    // ── page_window tests ────────────────────────────────────────────

    #[test]
    fn test_window_middle() {
        assert_eq!(
            page_window(5, 10),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_window_near_edges() {
        assert_eq!(
            page_window(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(4, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_window_small_totals() {
        assert!(page_window(1, 0).is_empty());
        assert!(page_window(1, 1).is_empty());
        assert_eq!(page_window(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(
            page_window(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_window_serializes_ellipsis_as_string() {
        let json = serde_json::to_string(&page_window(5, 10)).unwrap();
        assert_eq!(json, r#"[1,"...",3,4,5,6,7,"...",10]"#);
    }
}
