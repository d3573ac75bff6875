//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/posts", get(handlers::posts::list_posts))
        .route("/api/posts/{slug}", get(handlers::posts::get_post))
        .route("/api/tags", get(handlers::tags::list_tags))
        .route("/api/media", get(handlers::media::list_media))
        .route("/api/media/{*path}", get(handlers::media::get_asset));

    let mut router = Router::new().merge(api_routes);

    // Only the public prefix of the store is exposed.
    if let Some(dir) = &state.media_dir {
        router = router.nest_service("/media/public", ServeDir::new(dir.join("public")));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::ServerConfig;

    fn write_post(dir: &Path, slug: &str, date: &str, tags: &str, extra: &str) {
        fs::write(
            dir.join(format!("{slug}.md")),
            format!(
                "---\ntitle: {slug}\nexcerpt: About {slug}\npublishedAt: {date}\ntags: [{tags}]\n{extra}---\n## Intro\n\nSome $x$ words.\n\n### Detail\n\nMore words.\n"
            ),
        )
        .unwrap();
    }

    fn site() -> TempDir {
        let temp = TempDir::new().unwrap();
        let posts = temp.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        for day in 1..=10 {
            let tags = match day {
                1 => "ai, uk",
                2..=5 => "ai",
                6 => "ai, research",
                7..=9 => "research",
                _ => "uk",
            };
            // p01 is the newest post
            let slug = format!("p{day:02}");
            let date = format!("2024-01-{:02}", 21 - day);
            write_post(&posts, &slug, &date, tags, "");
        }
        write_post(&posts, "draft", "2024-02-01", "ai", "published: false\n");

        let bucket = temp.path().join("bucket");
        for (path, body) in [
            ("public/images/cat.png", "cat"),
            ("public/docs/cv.pdf", "cv"),
            ("private/secret.pdf", "secret"),
        ] {
            let path = bucket.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        temp
    }

    fn router(temp: &TempDir, with_store: bool) -> Router {
        let config = ServerConfig {
            posts_dir: temp.path().join("posts"),
            media_store_dir: with_store.then(|| temp.path().join("bucket")),
            media_manifest: temp.path().join("missing-manifest.json"),
            version: "test".to_owned(),
            ..ServerConfig::default()
        };
        create_router(Arc::new(AppState::from_config(&config)))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = get(router, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn slugs(json: &Value) -> Vec<String> {
        json["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap().to_owned())
            .collect()
    }

    // ── /api/posts tests ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_posts_first_page() {
        let temp = site();
        let (status, json) = get_json(router(&temp, false), "/api/posts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["posts"].as_array().unwrap().len(), 9);
        assert_eq!(json["posts"][0]["slug"], "p01");
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["pages"], serde_json::json!([1, 2]));
        assert_eq!(json["filteredCount"], 10);
        assert_eq!(json["range"]["first"], 1);
        assert_eq!(json["range"]["last"], 9);

        let post = &json["posts"][0];
        assert_eq!(post["excerpt"], "About p01");
        assert_eq!(post["author"], "Anonymous");
        assert_eq!(post["hasFormulas"], true);
        assert_eq!(post["tags"][0]["name"], "AI");
    }

    #[tokio::test]
    async fn test_list_posts_with_tag_filter() {
        let temp = site();
        let (_, json) = get_json(router(&temp, false), "/api/posts?tags=ai,research").await;

        assert_eq!(slugs(&json), vec!["p06"]);
        assert_eq!(json["selectedTags"], serde_json::json!(["ai", "research"]));
        let tags: Vec<_> = json["tags"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| (t["id"].as_str().unwrap(), t["count"].as_u64().unwrap(), t["selected"].as_bool().unwrap()))
            .collect();
        assert_eq!(tags, vec![("ai", 1, true), ("research", 1, true)]);
    }

    #[tokio::test]
    async fn test_list_posts_second_page_and_bad_page() {
        let temp = site();
        let (_, json) = get_json(router(&temp, false), "/api/posts?page=2").await;
        assert_eq!(slugs(&json), vec!["p10"]);

        let (status, json) = get_json(router(&temp, false), "/api/posts?page=oops").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["page"], 1);

        let (_, json) = get_json(router(&temp, false), "/api/posts?page=9").await;
        assert!(json["posts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_posts_unpublished_toggle() {
        let temp = site();
        let (_, json) = get_json(router(&temp, false), "/api/posts").await;
        assert!(!slugs(&json).contains(&"draft".to_owned()));

        let (_, json) = get_json(router(&temp, false), "/api/posts?unpublished=true").await;
        assert_eq!(slugs(&json)[0], "draft");
        assert_eq!(json["posts"][0]["published"], false);
    }

    #[tokio::test]
    async fn test_list_posts_non_true_unpublished_reads_as_false() {
        let temp = site();
        for uri in ["/api/posts?unpublished=1", "/api/posts?unpublished=", "/api/posts?unpublished=yes"] {
            let (status, json) = get_json(router(&temp, false), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(json["visibleCount"], 10, "{uri}");
            assert!(!slugs(&json).contains(&"draft".to_owned()), "{uri}");
        }

        let (status, _) = get_json(router(&temp, false), "/api/posts/draft?unpublished=1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = get_json(router(&temp, false), "/api/tags?unpublished=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 10);
    }

    #[tokio::test]
    async fn test_list_posts_ignores_tracking_params() {
        let temp = site();
        let (status, json) =
            get_json(router(&temp, false), "/api/posts?utm_source=newsletter&ref=friend").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["filteredCount"], 10);
    }

    // ── /api/posts/{slug} tests ──────────────────────────────────────

    #[tokio::test]
    async fn test_get_post_renders_article() {
        let temp = site();
        let (status, headers, body) = get(router(&temp, false), "/api/posts/p03").await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["post"]["slug"], "p03");
        assert!(json["content"].as_str().unwrap().contains(r#"<h2 id="intro">Intro</h2>"#));
        assert_eq!(json["outline"][0]["id"], "intro");
        assert_eq!(json["outline"][0]["children"][0]["id"], "detail");

        let etag = headers.get(header::ETAG).unwrap().to_str().unwrap();
        assert_eq!(etag.len(), 18);
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    }

    #[tokio::test]
    async fn test_get_post_not_modified() {
        let temp = site();
        let (_, headers, _) = get(router(&temp, false), "/api/posts/p03").await;
        let etag = headers.get(header::ETAG).unwrap().clone();

        let response = router(&temp, false)
            .oneshot(
                Request::get("/api/posts/p03")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let temp = site();
        let (status, json) = get_json(router(&temp, false), "/api/posts/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Post not found");
        assert_eq!(json["slug"], "nope");
    }

    #[tokio::test]
    async fn test_get_unpublished_post_requires_flag() {
        let temp = site();
        let (status, _) = get_json(router(&temp, false), "/api/posts/draft").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = get_json(router(&temp, false), "/api/posts/draft?unpublished=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["post"]["published"], false);
    }

    // ── /api/tags tests ──────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_tags_grouped_by_category() {
        let temp = site();
        let (status, json) = get_json(router(&temp, false), "/api/tags").await;

        assert_eq!(status, StatusCode::OK);
        let groups = json["categories"].as_array().unwrap();
        let names: Vec<_> = groups.iter().map(|g| g["category"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["technical", "personal"]);
        assert_eq!(groups[0]["tags"][0]["id"], "ai");
        assert_eq!(groups[0]["tags"][0]["count"], 6);
        assert_eq!(groups[0]["tags"][1]["id"], "research");
        assert_eq!(groups[1]["tags"][0]["id"], "uk");
        assert_eq!(json["total"], 10);
    }

    // ── /api/media tests ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_media_from_store() {
        let temp = site();
        let (status, json) = get_json(router(&temp, true), "/api/media").await;

        assert_eq!(status, StatusCode::OK);
        let image = &json["images"][0];
        assert_eq!(image["path"], "images/cat.png");
        assert_eq!(image["publicUrl"], "/media/public/images/cat.png");
        assert!(image["srcset"].as_str().unwrap().contains("640w"));
        assert_eq!(json["documents"][0]["filename"], "cv.pdf");
        assert!(json["documents"][0].get("srcset").is_none());
        assert!(json["videos"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_media_unconfigured_is_empty() {
        let temp = site();
        let (status, json) = get_json(router(&temp, false), "/api/media").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["images"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_media_asset() {
        let temp = site();
        let (status, json) = get_json(router(&temp, true), "/api/media/docs/cv.pdf").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "document");

        let (status, _) = get_json(router(&temp, true), "/api/media/docs/missing.pdf").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serves_public_media_files_only() {
        let temp = site();
        let (status, _, body) = get(router(&temp, true), "/media/public/images/cat.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"cat");

        let (status, _, _) = get(router(&temp, true), "/media/private/secret.pdf").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = get(router(&temp, false), "/media/public/images/cat.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
