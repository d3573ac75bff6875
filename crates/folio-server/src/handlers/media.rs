//! Media API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use folio_media::{MediaAsset, MediaLibrary, MediaType, MediaUrls};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Asset with responsive image sources.
#[derive(Debug, Serialize)]
pub(crate) struct MediaItem {
    #[serde(flatten)]
    asset: MediaAsset,
    #[serde(skip_serializing_if = "Option::is_none")]
    srcset: Option<String>,
}

impl MediaItem {
    fn new(asset: MediaAsset, urls: &MediaUrls) -> Self {
        let srcset = (asset.media_type == MediaType::Image).then(|| urls.srcset(&asset.path));
        Self { asset, srcset }
    }
}

/// Response for GET /api/media.
#[derive(Debug, Serialize)]
pub(crate) struct MediaResponse {
    images: Vec<MediaItem>,
    documents: Vec<MediaItem>,
    videos: Vec<MediaItem>,
}

/// Handle GET /api/media.
pub(crate) async fn list_media(State(state): State<Arc<AppState>>) -> Json<MediaResponse> {
    let library = MediaLibrary::load(state.media.as_ref());
    let items = |media_type: MediaType| -> Vec<MediaItem> {
        library
            .of_type(media_type)
            .into_iter()
            .map(|asset| MediaItem::new(asset.clone(), &state.urls))
            .collect()
    };

    Json(MediaResponse {
        images: items(MediaType::Image),
        documents: items(MediaType::Document),
        videos: items(MediaType::Video),
    })
}

/// Handle GET /api/media/{*path}.
pub(crate) async fn get_asset(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MediaItem>, ServerError> {
    let asset = state
        .media
        .get(&path)
        .ok_or_else(|| ServerError::AssetNotFound(path.clone()))?;
    Ok(Json(MediaItem::new(asset, &state.urls)))
}
