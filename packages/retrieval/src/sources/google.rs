//! Google Custom Search snippet source.
//!
//! Asks for a fixed small number of results and returns each hit's snippet
//! and originating URL as index-aligned sequences. A hit missing either
//! field contributes an empty string at its index rather than being dropped.

use async_trait::async_trait;
use serde::Deserialize;

use super::{SnippetResults, SnippetSource};
use crate::error::{Result, RetrievalError};

const API_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Results requested per search.
const RESULT_COUNT: u8 = 5;

/// Custom Search API response, trimmed to the fields we read.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Snippet source backed by the Google Custom Search JSON API.
pub struct GoogleSearchSource {
    client: reqwest::Client,
    api_key: String,
    cx: String,
}

impl GoogleSearchSource {
    /// Create a new source from an API key and search-engine identifier.
    pub fn new(api_key: impl Into<String>, cx: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("retrieval-orchestrator/0.1")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            cx: cx.into(),
        })
    }

    fn align(items: Vec<SearchItem>) -> SnippetResults {
        let mut results = SnippetResults::default();
        for item in items {
            results.push(
                item.snippet.unwrap_or_default(),
                item.link.unwrap_or_default(),
            );
        }
        results
    }
}

#[async_trait]
impl SnippetSource for GoogleSearchSource {
    async fn search(&self, query: &str) -> Result<SnippetResults> {
        let num = RESULT_COUNT.to_string();
        let response = self
            .client
            .get(API_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RetrievalError::UpstreamStatus {
                service: "google custom search",
                status: response.status(),
            });
        }

        let body: SearchResponse = response.json().await?;

        // No hits is a normal outcome: two empty, still-aligned sequences.
        let Some(items) = body.items else {
            tracing::debug!(query, "web search returned no items");
            return Ok(SnippetResults::default());
        };

        Ok(Self::align(items))
    }
}
