//! Tags API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use folio_content::TagCategory;
use folio_listing::{TagIndex, TagSelection};
use serde::{Deserialize, Serialize};

use crate::handlers::{TagResponse, query_flag};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TagsQuery {
    #[serde(default, deserialize_with = "query_flag")]
    unpublished: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryGroup {
    category: TagCategory,
    tags: Vec<TagResponse>,
}

/// Response for GET /api/tags.
#[derive(Debug, Serialize)]
pub(crate) struct TagsResponse {
    categories: Vec<CategoryGroup>,
    /// Posts the counts were taken over.
    total: usize,
}

/// Handle GET /api/tags.
///
/// Groups follow the fixed category order and empty categories are
/// omitted. Within a group, tags are ordered by count, then name.
pub(crate) async fn list_tags(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TagsQuery>,
) -> Json<TagsResponse> {
    let posts = state.load_posts(query.unpublished);
    let visible = TagIndex::build(&posts, &TagSelection::new()).visible();

    let categories = TagCategory::ALL
        .into_iter()
        .map(|category| CategoryGroup {
            category,
            tags: visible
                .iter()
                .filter(|entry| entry.tag.category == category)
                .map(|entry| TagResponse::from(*entry))
                .collect(),
        })
        .filter(|group| !group.tags.is_empty())
        .collect();

    Json(TagsResponse {
        categories,
        total: posts.len(),
    })
}
