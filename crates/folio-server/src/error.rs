//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No post (visible to the request) has the given slug.
    #[error("Post not found: {0}")]
    PostNotFound(String),

    /// No public media asset at the given path.
    #[error("Media asset not found: {0}")]
    AssetNotFound(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PostNotFound(slug) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Post not found", "slug": slug}),
            ),
            Self::AssetNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Media asset not found", "path": path}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
