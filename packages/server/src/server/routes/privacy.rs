//! Privacy-policy page: embedded markdown rendered to a full HTML document.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::server::markdown;
use crate::server::static_files::StaticAssets;

pub async fn privacy_handler() -> Response {
    let Some(asset) = StaticAssets::get("privacy.md") else {
        tracing::error!("privacy.md missing from embedded assets");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Privacy policy unavailable").into_response();
    };

    let source = String::from_utf8_lossy(&asset.data);
    let body = markdown::render(&source);

    let head = r#"<head><title>Privacy Policy</title><link rel="stylesheet" href="/static/style.css"></head>"#;
    let page = format!(
        "<!DOCTYPE html><html>{head}<body><main>{body}</main><center>© 2023-2024 all rights reserved</center></body></html>"
    );

    Html(page).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_privacy_page_renders_with_anchored_headings() {
        let router = Router::new().route("/privacy", get(privacy_handler));
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/privacy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"privacy-policy\""));
        assert!(html.contains("href=\"#privacy-policy\""));
    }
}
