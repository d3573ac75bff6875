//! Table-of-contents engine for folio articles.
//!
//! Scans markdown source for level-2 and level-3 headings, derives display
//! text and anchor ids, and assembles them into an [`Outline`] forest.
//! [`render_article`] produces HTML whose heading ids use the same
//! [`anchor_id`] rule, so outline links always resolve.
//!
//! Scroll-driven highlighting lives in [`active`]: a [`ViewportObserver`]
//! reports which anchors intersect the viewport band and
//! [`ActiveHeading`] keeps the most recent one.
//!
//! ```
//! use folio_toc::Outline;
//!
//! let outline = Outline::from_source("## Setup\n### Install\n## Usage\n");
//! assert_eq!(outline.roots().len(), 2);
//! assert_eq!(outline.roots()[0].children[0].id, "install");
//! ```

pub mod active;
mod extract;
mod outline;
mod render;
mod text;

pub use active::{
    ActiveHeading, AnchorBox, HEADER_OFFSET, IntersectionEntry, LayoutObserver, ViewportBand,
    ViewportObserver, scroll_target,
};
pub use extract::{Heading, Headings, headings};
pub use outline::{HeadingNode, Iter as OutlineIter, Outline};
pub use render::{Article, render_article, render_html};
pub use text::{anchor_id, display_text};
