//! Posts API endpoints.
//!
//! The listing endpoint runs the browse pipeline (published filter, tag
//! filter, pagination) over a fresh load of the repository; the article
//! endpoint renders one post with its heading outline.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use folio_content::{Post, Tag};
use folio_listing::{BrowseState, Listing, PageLink, PageRange, TagSelection};
use folio_toc::{Outline, render_article};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::handlers::{TagResponse, query_flag};
use crate::state::AppState;

/// Query string for GET /api/posts.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    /// Comma-separated tag ids.
    tags: Option<String>,
    /// 1-based page; unparseable values fall back to 1.
    page: Option<String>,
    #[serde(default, deserialize_with = "query_flag")]
    unpublished: bool,
    utm_source: Option<String>,
    #[serde(rename = "ref")]
    referrer: Option<String>,
}

impl ListQuery {
    fn browse_state(&self) -> BrowseState {
        let selection = self
            .tags
            .as_deref()
            .map(TagSelection::parse)
            .unwrap_or_default();
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1);
        BrowseState::new(selection, page, self.unpublished)
    }
}

/// Query string for GET /api/posts/{slug}.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PostQuery {
    #[serde(default, deserialize_with = "query_flag")]
    unpublished: bool,
}

/// Post fields shown in listings and article headers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostSummary {
    slug: String,
    title: String,
    excerpt: String,
    published_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tags: Vec<Tag>,
    author: String,
    reading_time: usize,
    word_count: usize,
    has_formulas: bool,
    published: bool,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            published_at: post.published_at,
            updated_at: post.updated_at,
            tags: post.tags.clone(),
            author: post.author.name.clone(),
            reading_time: post.stats.reading_time,
            word_count: post.stats.word_count,
            has_formulas: post.stats.has_formulas,
            published: post.published,
        }
    }
}

/// Response for GET /api/posts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse {
    posts: Vec<PostSummary>,
    tags: Vec<TagResponse>,
    selected_tags: TagSelection,
    page: usize,
    total_pages: usize,
    pages: Vec<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<PageRange>,
    filtered_count: usize,
    visible_count: usize,
}

/// Response for GET /api/posts/{slug}.
#[derive(Debug, Serialize)]
pub(crate) struct ArticleResponse {
    post: PostSummary,
    /// Rendered HTML with anchored headings.
    content: String,
    outline: Outline,
}

/// Handle GET /api/posts.
pub(crate) async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    if query.utm_source.is_some() || query.referrer.is_some() {
        tracing::info!(
            utm_source = query.utm_source.as_deref().unwrap_or_default(),
            referrer = query.referrer.as_deref().unwrap_or_default(),
            "Listing visit"
        );
    }

    let browse = query.browse_state();
    // The listing applies its own published filter.
    let posts = state.load_posts(true);
    let listing = Listing::derive(&posts, &browse, state.page_size);

    Json(ListResponse {
        posts: listing.posts.iter().map(|post| PostSummary::from(*post)).collect(),
        tags: listing.tags.into_iter().map(TagResponse::from).collect(),
        selected_tags: browse.selection().clone(),
        page: listing.page,
        total_pages: listing.total_pages,
        pages: listing.pages,
        range: listing.range,
        filtered_count: listing.filtered_count,
        visible_count: listing.visible_count,
    })
}

/// Handle GET /api/posts/{slug}.
pub(crate) async fn get_post(
    Path(slug): Path<String>,
    Query(query): Query<PostQuery>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let post = state
        .posts
        .get(&slug)
        .filter(|post| post.published || query.unpublished)
        .ok_or_else(|| ServerError::PostNotFound(slug.clone()))?;

    let article = render_article(&post.content);
    let etag = compute_etag(&state.version, &post.content);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let response = ArticleResponse {
        post: PostSummary::from(&post),
        content: article.html,
        outline: article.outline,
    };

    Ok((
        [
            (header::ETAG, etag),
            (
                header::LAST_MODIFIED,
                post.updated_at
                    .format("%a, %d %b %Y %H:%M:%S GMT")
                    .to_string(),
            ),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Json(response),
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
