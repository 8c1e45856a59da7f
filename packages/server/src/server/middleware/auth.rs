//! Static bearer-token check for the orchestration endpoints.
//!
//! Rejected requests never reach a handler, so no downstream fetch or
//! backend call happens for unauthorized traffic.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::server::app::AppState;

/// Middleware enforcing `Authorization: Bearer <shared-secret>`.
pub async fn bearer_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if authorized(request.headers(), &state.api_secret) {
        next.run(request).await
    } else {
        tracing::warn!("Unauthorized request");
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

fn authorized(headers: &HeaderMap, secret: &str) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token == secret)
        .unwrap_or(false)
}
