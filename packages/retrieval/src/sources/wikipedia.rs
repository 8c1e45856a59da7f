//! Wikipedia passage source.
//!
//! Feeds the best search hit into the MediaWiki extracts module and splits
//! the plain-text extract into paragraph fragments. Trailing "See also"
//! material and everything after it is discarded.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use super::{Fragment, FragmentSource};
use crate::error::{Result, RetrievalError};

const API_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Extracts are split into paragraphs on this boundary.
const PARAGRAPH_BOUNDARY: &str = "\n\n\n";

/// Everything at or after this section heading is dropped.
const SEE_ALSO_MARKER: &str = "== See also ==\n";

/// MediaWiki API response, trimmed to the fields we read.
#[derive(Debug, Deserialize)]
struct WikiResponse {
    #[serde(default)]
    query: Option<WikiQuery>,
}

#[derive(Debug, Deserialize)]
struct WikiQuery {
    #[serde(default)]
    pages: HashMap<String, WikiPage>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    #[serde(default)]
    extract: String,
}

/// Passage source backed by the Wikipedia MediaWiki API.
pub struct WikipediaSource {
    client: reqwest::Client,
}

impl WikipediaSource {
    /// Create a new source. `contact` identifies the operator in the
    /// User-Agent so Wikimedia can reach out about our traffic.
    pub fn new(contact: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(format!("retrieval-orchestrator/0.1 ({contact})"))
            .build()?;

        Ok(Self { client })
    }

    /// Split a plain-text extract into paragraph fragments, stopping before
    /// any "See also" section.
    fn split_extract(extract: &str, page_id: &str) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        for paragraph in extract.split(PARAGRAPH_BOUNDARY) {
            if paragraph.contains(SEE_ALSO_MARKER) {
                break;
            }
            if paragraph.trim().is_empty() {
                continue;
            }
            fragments.push(Fragment::new(paragraph).with_page_id(page_id));
        }
        fragments
    }
}

#[async_trait]
impl FragmentSource for WikipediaSource {
    async fn fetch(&self, query: &str) -> Result<Vec<Fragment>> {
        let response = self
            .client
            .get(API_ENDPOINT)
            .query(&[
                ("action", "query"),
                // Feed search results into...
                ("generator", "search"),
                ("gsrlimit", "1"),
                ("gsrsearch", query),
                ("format", "json"),
                // ...the extracts module
                ("prop", "extracts"),
                ("exlimit", "1"),
                ("explaintext", "true"),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RetrievalError::UpstreamStatus {
                service: "wikipedia",
                status: response.status(),
            });
        }

        let body: WikiResponse = response.json().await?;

        // No matching page is a normal outcome, not an error.
        let Some(wiki_query) = body.query else {
            tracing::debug!(query, "wikipedia search returned no pages");
            return Ok(Vec::new());
        };
        let Some((page_id, page)) = wiki_query.pages.into_iter().next() else {
            tracing::debug!(query, "wikipedia search returned no pages");
            return Ok(Vec::new());
        };

        Ok(Self::split_extract(&page.extract, &page_id))
    }
}
