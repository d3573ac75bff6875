//! Post builders shared by the unit tests.

use chrono::{Duration, TimeZone, Utc};
use folio_content::{Author, Post, PostStats, Tag};

/// A published post whose `published_at` is `age_days` before a fixed date.
pub(crate) fn post(slug: &str, age_days: i64, tags: &[&str]) -> Post {
    let published_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() - Duration::days(age_days);
    Post {
        id: slug.to_owned(),
        slug: slug.to_owned(),
        title: slug.to_uppercase(),
        excerpt: String::new(),
        content: String::new(),
        published_at,
        updated_at: published_at,
        tags: tags.iter().map(|id| Tag::resolve(id)).collect(),
        author: Author::named("Tester"),
        stats: PostStats::default(),
        published: true,
    }
}

/// Ten posts, newest first:
/// `ai` on six (p01-p06), `research` on four (p06-p09), `uk` on two
/// (p01, p10). Only p06 carries both `ai` and `research`.
pub(crate) fn scenario() -> Vec<Post> {
    vec![
        post("p01", 1, &["ai", "uk"]),
        post("p02", 2, &["ai"]),
        post("p03", 3, &["ai"]),
        post("p04", 4, &["ai"]),
        post("p05", 5, &["ai"]),
        post("p06", 6, &["ai", "research"]),
        post("p07", 7, &["research"]),
        post("p08", 8, &["research"]),
        post("p09", 9, &["research"]),
        post("p10", 10, &["uk"]),
    ]
}

pub(crate) fn slugs<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<&'a str> {
    posts.into_iter().map(|p| p.slug.as_str()).collect()
}
