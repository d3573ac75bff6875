//! Blog content model for folio.
//!
//! Posts are `.mdx`/`.md` files with a YAML front-matter block. This crate
//! parses them into [`Post`] records, resolves tag ids against the default
//! tag table, and exposes them through the [`PostRepository`] trait.
//!
//! ```ignore
//! use folio_content::{FsPostRepository, PostRepository};
//!
//! let repo = FsPostRepository::new("content/posts", "Jo Writer");
//! for post in repo.load_all() {
//!     println!("{} ({} min)", post.title, post.stats.reading_time);
//! }
//! ```

mod error;
mod front_matter;
mod post;
mod repository;
mod tag;

pub use error::ContentError;
pub use front_matter::{FrontMatter, split_front_matter};
pub use post::{Author, Post, PostStats};
pub use repository::{FsPostRepository, PostRepository};
pub use tag::{FALLBACK_TAG_COLOR, Tag, TagCategory, default_tags};
