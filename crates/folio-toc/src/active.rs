//! Scroll-driven active heading tracking.
//!
//! The browser-side intersection machinery is abstracted as a
//! [`ViewportObserver`]; [`LayoutObserver`] implements it from anchor
//! geometry so the tracking logic runs without a rendering environment.

use std::collections::{HashMap, HashSet};

use crate::Outline;

/// Height of the fixed page header, in pixels.
pub const HEADER_OFFSET: f64 = 80.0;

/// Horizontal strip of the viewport in which a heading counts as current.
///
/// With the defaults the band starts 80px below the top of the viewport and
/// ends at 20% of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    /// Pixels excluded from the top of the viewport.
    pub top_inset: f64,
    /// Fraction of the viewport height excluded from the bottom.
    pub bottom_ratio: f64,
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self {
            top_inset: HEADER_OFFSET,
            bottom_ratio: 0.8,
        }
    }
}

impl ViewportBand {
    /// Whether a box spanning `top..bottom` (viewport coordinates) overlaps
    /// the band.
    pub fn intersects(&self, top: f64, bottom: f64, viewport_height: f64) -> bool {
        let band_top = self.top_inset;
        let band_bottom = viewport_height * (1.0 - self.bottom_ratio);
        band_top < band_bottom && top < band_bottom && bottom > band_top
    }
}

/// Change in an anchor's intersection with the viewport band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub id: String,
    pub is_intersecting: bool,
}

/// Source of intersection changes for heading anchors.
pub trait ViewportObserver {
    /// Entries whose intersection state changed since the previous poll,
    /// in document order. The first poll reports every anchor.
    fn poll(&mut self) -> Vec<IntersectionEntry>;
}

/// Position of a heading anchor in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// [`ViewportObserver`] computed from anchor boxes and the scroll position.
#[derive(Debug, Clone)]
pub struct LayoutObserver {
    band: ViewportBand,
    anchors: Vec<AnchorBox>,
    scroll_y: f64,
    viewport_height: f64,
    reported: HashMap<String, bool>,
}

impl LayoutObserver {
    pub fn new(band: ViewportBand, anchors: Vec<AnchorBox>, viewport_height: f64) -> Self {
        Self {
            band,
            anchors,
            scroll_y: 0.0,
            viewport_height,
            reported: HashMap::new(),
        }
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }
}

impl ViewportObserver for LayoutObserver {
    fn poll(&mut self) -> Vec<IntersectionEntry> {
        let mut changes = Vec::new();
        for anchor in &self.anchors {
            let top = anchor.top - self.scroll_y;
            let is_intersecting = self
                .band
                .intersects(top, top + anchor.height, self.viewport_height);
            if self.reported.get(&anchor.id) != Some(&is_intersecting) {
                self.reported.insert(anchor.id.clone(), is_intersecting);
                changes.push(IntersectionEntry {
                    id: anchor.id.clone(),
                    is_intersecting,
                });
            }
        }
        changes
    }
}

/// Tracks which outline heading is currently active.
///
/// The active id only moves when an observed anchor starts intersecting;
/// anchors leaving the band never clear it.
#[derive(Debug, Clone, Default)]
pub struct ActiveHeading {
    observed: HashSet<String>,
    active: Option<String>,
}

impl ActiveHeading {
    /// Track the anchors that appear in `outline`.
    pub fn new(outline: &Outline) -> Self {
        Self {
            observed: outline.iter().map(|node| node.id.clone()).collect(),
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Apply a batch of intersection changes.
    ///
    /// The last intersecting observed entry in the batch becomes active.
    /// Returns whether the active id changed.
    pub fn observe<I>(&mut self, entries: I) -> bool
    where
        I: IntoIterator<Item = IntersectionEntry>,
    {
        let latest = entries
            .into_iter()
            .filter(|entry| entry.is_intersecting && self.observed.contains(&entry.id))
            .last();

        match latest {
            Some(entry) if self.active.as_deref() != Some(entry.id.as_str()) => {
                self.active = Some(entry.id);
                true
            }
            _ => false,
        }
    }

    /// Poll `observer` and apply its changes.
    pub fn sync(&mut self, observer: &mut dyn ViewportObserver) -> bool {
        self.observe(observer.poll())
    }
}

/// Scroll position that brings an anchor at `anchor_top` (document
/// coordinates) just below the fixed header.
pub fn scroll_target(anchor_top: f64) -> f64 {
    (anchor_top - HEADER_OFFSET).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: &str, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            id: id.to_owned(),
            is_intersecting,
        }
    }

    fn anchor(id: &str, top: f64) -> AnchorBox {
        AnchorBox {
            id: id.to_owned(),
            top,
            height: 30.0,
        }
    }

    #[test]
    fn test_band_default_spans_top_fifth() {
        let band = ViewportBand::default();
        // 1000px viewport: band is 80..200
        assert!(band.intersects(100.0, 130.0, 1000.0));
        assert!(band.intersects(60.0, 90.0, 1000.0));
        assert!(!band.intersects(20.0, 50.0, 1000.0));
        assert!(!band.intersects(250.0, 280.0, 1000.0));
    }

    #[test]
    fn test_band_too_small_viewport_never_intersects() {
        assert!(!ViewportBand::default().intersects(50.0, 80.0, 300.0));
    }

    #[test]
    fn test_observe_last_intersecting_wins() {
        let outline = Outline::from_source("## A\n### A1\n## B\n");
        let mut active = ActiveHeading::new(&outline);

        assert!(active.observe(vec![entry("a", true), entry("a1", true), entry("b", false)]));
        assert_eq!(active.active(), Some("a1"));
    }

    #[test]
    fn test_observe_ignores_leaving_and_unknown_anchors() {
        let outline = Outline::from_source("## A\n## B\n");
        let mut active = ActiveHeading::new(&outline);
        active.observe(vec![entry("a", true)]);

        assert!(!active.observe(vec![entry("a", false)]));
        assert!(!active.observe(vec![entry("footnotes", true)]));
        assert_eq!(active.active(), Some("a"));
    }

    #[test]
    fn test_layout_observer_reports_changes_only() {
        let mut observer = LayoutObserver::new(
            ViewportBand::default(),
            vec![anchor("a", 100.0), anchor("b", 900.0)],
            1000.0,
        );

        assert_eq!(observer.poll(), vec![entry("a", true), entry("b", false)]);
        assert_eq!(observer.poll(), vec![]);

        observer.scroll_to(800.0);
        assert_eq!(observer.poll(), vec![entry("a", false), entry("b", true)]);
    }

    #[test]
    fn test_sync_follows_scroll() {
        let outline = Outline::from_source("## Intro\n## Method\n### Loss\n## Results\n");
        let mut observer = LayoutObserver::new(
            ViewportBand::default(),
            vec![
                anchor("intro", 100.0),
                anchor("method", 1200.0),
                anchor("loss", 1600.0),
                anchor("results", 2600.0),
            ],
            1000.0,
        );
        let mut active = ActiveHeading::new(&outline);

        assert!(active.sync(&mut observer));
        assert_eq!(active.active(), Some("intro"));

        observer.scroll_to(1100.0);
        active.sync(&mut observer);
        assert_eq!(active.active(), Some("method"));

        // Between headings nothing intersects; the last one stays active.
        observer.scroll_to(1300.0);
        assert!(!active.sync(&mut observer));
        assert_eq!(active.active(), Some("method"));

        observer.scroll_to(1500.0);
        active.sync(&mut observer);
        assert_eq!(active.active(), Some("loss"));
        assert_eq!(
            outline.active_root("loss").map(|n| n.id.as_str()),
            Some("method")
        );
    }

    #[test]
    fn test_scroll_target_offsets_header() {
        assert!((scroll_target(500.0) - 420.0).abs() < f64::EPSILON);
        assert!(scroll_target(30.0).abs() < f64::EPSILON);
    }
}
