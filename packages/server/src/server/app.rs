//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use retrieval::{
    EmbedApiClient, GoogleSearchSource, RetrievalPipeline, TokenBudgeter, WikipediaSource,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::middleware::bearer_auth;
use crate::server::routes::{browse_handler, health_handler, privacy_handler, search_handler};
use crate::server::static_files::serve_static;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RetrievalPipeline>,
    pub api_secret: Arc<String>,
}

/// Wire the retrieval pipeline and shared state from configuration.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let budgeter = TokenBudgeter::for_model(&config.tokenizer_model)?;
    let passages = Arc::new(WikipediaSource::new(&config.contact)?);
    let snippets = Arc::new(GoogleSearchSource::new(
        config.google_api_key.clone(),
        config.google_cx.clone(),
    )?);
    let store = Arc::new(EmbedApiClient::new(config.embed_api_url.clone())?);

    let pipeline = RetrievalPipeline::new(
        passages,
        snippets,
        store,
        budgeter,
        config.embed_token_limit,
    )?;

    Ok(AppState {
        pipeline: Arc::new(pipeline),
        api_secret: Arc::new(config.api_secret.clone()),
    })
}

/// Build the Axum application router
///
/// `/browse` and `/search` sit behind the bearer check; the privacy page,
/// health check, and static assets are public.
pub fn build_app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/browse", post(browse_handler))
        .route("/search", get(search_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    protected
        .route("/privacy", get(privacy_handler))
        .route("/health", get(health_handler))
        .route("/static/*path", get(serve_static))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}


#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let config = Config {
        port: 0,
        api_secret: "test-secret".to_string(),
        // Unroutable on purpose: tests must never reach a real backend.
        embed_api_url: "http://127.0.0.1:1".to_string(),
        contact: "ops@example.com".to_string(),
        google_api_key: "key".to_string(),
        google_cx: "cx".to_string(),
        tokenizer_model: "gpt-3.5-turbo-16k".to_string(),
        embed_token_limit: 8190,
    };
    build_state(&config).expect("test state")
}
