//! Browse-mode endpoint: `POST /browse` with `{url, topic}`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct BrowseRequest {
    url: String,
    topic: String,
}

/// Indexes every paragraph of the page at `url`, then answers with the
/// backend's most relevant items for `topic` as a JSON array.
pub async fn browse_handler(
    State(state): State<AppState>,
    Json(body): Json<BrowseRequest>,
) -> Response {
    match state.pipeline.browse(&body.url, &body.topic).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => {
            tracing::error!(error = %e, url = %body.url, "browse request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Browse failed").into_response()
        }
    }
}
