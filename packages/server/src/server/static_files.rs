use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Assets embedded from the crate-local `static/` directory at compile time.
#[derive(RustEmbed)]
#[folder = "static"]
pub struct StaticAssets;

/// Serve embedded static assets under `/static`
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri
        .path()
        .trim_start_matches("/static")
        .trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_assets_present() {
        assert!(StaticAssets::get("privacy.md").is_some());
        assert!(StaticAssets::get("style.css").is_some());
    }

    #[tokio::test]
    async fn test_unknown_asset_is_not_found() {
        let response = serve_static("/static/missing.txt".parse().unwrap()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_css_served_with_content_type() {
        let response = serve_static("/static/style.css".parse().unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, "text/css");
    }
}
