//! Client boundary for the external embedding/vector-index service.
//!
//! The backend is an opaque `add`/`query` HTTP service with unspecified
//! internal consistency; everything behind [`EmbedStore`] can be swapped for
//! an in-memory fake in tests. Write-path failures come back as a typed
//! [`AddOutcome`] so callers can absorb them; read-path failures are errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// Timeout hint attached to every outgoing backend call.
const REQUEST_TIMEOUT_HINT: &str = "50";

/// Tagged result of an `add` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Text was indexed; the backend reports its item count.
    Indexed(u64),

    /// The backend refused the text. Not fatal to the request.
    Failed(String),
}

/// Capability interface over the embedding backend.
#[async_trait]
pub trait EmbedStore: Send + Sync {
    /// Forward already token-budgeted text for indexing.
    ///
    /// Transport failures are `Err`; an application-level refusal is
    /// `Ok(AddOutcome::Failed)`. Callers decide whether to continue.
    async fn add(&self, text: &str, page_id: Option<&str>) -> Result<AddOutcome>;

    /// Ask for the most relevant previously-indexed items.
    ///
    /// The backend returns a small fixed number of top matches (3 in the
    /// reference deployment); order and count are passed through verbatim.
    async fn query(&self, text: &str) -> Result<Vec<String>>;
}

#[derive(Serialize)]
struct AddRequest<'a> {
    text: &'a str,
    #[serde(rename = "pageID", skip_serializing_if = "Option::is_none")]
    page_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AddResponse {
    success: bool,
    #[serde(default)]
    items: Option<u64>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    success: bool,
    #[serde(default)]
    items: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP implementation of [`EmbedStore`].
pub struct EmbedApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl EmbedApiClient {
    /// Create a client for a backend base URL (e.g. `http://db:4211`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("retrieval-orchestrator/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn outcome_from(body: AddResponse) -> AddOutcome {
        if body.success {
            AddOutcome::Indexed(body.items.unwrap_or_default())
        } else {
            AddOutcome::Failed(
                body.error
                    .unwrap_or_else(|| "unspecified add failure".to_string()),
            )
        }
    }
}

#[async_trait]
impl EmbedStore for EmbedApiClient {
    async fn add(&self, text: &str, page_id: Option<&str>) -> Result<AddOutcome> {
        let response = self
            .client
            .post(format!("{}/add", self.base_url))
            .header("Request-Timeout", REQUEST_TIMEOUT_HINT)
            .json(&AddRequest { text, page_id })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RetrievalError::UpstreamStatus {
                service: "embedding backend",
                status: response.status(),
            });
        }

        let body: AddResponse = response.json().await?;
        Ok(Self::outcome_from(body))
    }

    async fn query(&self, text: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .header("Request-Timeout", REQUEST_TIMEOUT_HINT)
            .json(&QueryRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RetrievalError::UpstreamStatus {
                service: "embedding backend",
                status: response.status(),
            });
        }

        let body: QueryResponse = response.json().await?;
        if !body.success {
            return Err(RetrievalError::Backend(
                body.error
                    .unwrap_or_else(|| "unspecified query failure".to_string()),
            ));
        }

        Ok(body.items.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_add_maps_to_indexed() {
        let body: AddResponse = serde_json::from_str(r#"{"success":true,"items":12}"#).unwrap();
        assert_eq!(EmbedApiClient::outcome_from(body), AddOutcome::Indexed(12));
    }

    #[test]
    fn test_failed_add_maps_to_failed() {
        let body: AddResponse =
            serde_json::from_str(r#"{"success":false,"error":"index full"}"#).unwrap();
        assert_eq!(
            EmbedApiClient::outcome_from(body),
            AddOutcome::Failed("index full".to_string())
        );
    }

    #[test]
    fn test_query_response_without_items_parses() {
        let body: QueryResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(body.success);
        assert!(body.items.is_none());
    }
}
