//! Query-mode endpoint: `GET /search?q=<query>`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

/// Substituted when the backend returns no relevant items.
const NO_RESULTS_PLACEHOLDER: &str = "No results found";

/// UTC, matching `toUTCString` minus the comma and ` GMT` suffix.
const DATE_FORMAT: &str = "%a %d %b %Y %H:%M:%S";

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    results: Vec<String>,
    links: Vec<String>,
    date: String,
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params.q.filter(|q| !q.trim().is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing query parameter: q").into_response();
    };

    match state.pipeline.search(&query).await {
        Ok(outcome) => {
            let results = if outcome.items.is_empty() {
                vec![NO_RESULTS_PLACEHOLDER.to_string()]
            } else {
                outcome.items
            };
            Json(SearchResponse {
                results,
                links: outcome.links,
                date: outcome.retrieved_at.format(DATE_FORMAT).to_string(),
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, query = %query, "search request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Search failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_format_matches_reference() {
        let moment = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 17, 5, 2).unwrap();
        assert_eq!(
            moment.format(DATE_FORMAT).to_string(),
            "Sat 09 Mar 2024 17:05:02"
        );
    }
}
