//! The retrieval orchestrator.
//!
//! Query mode fans out to the passage and snippet sources concurrently,
//! ingests their fragments under one shared budget (passages first, order
//! preserved), then issues exactly one relevance query. Browse mode indexes
//! every paragraph of a fetched page, unbudgeted, before the query.
//!
//! Failure interaction: source fetches and the relevance query are the read
//! path and abort the request; individual `add` calls are the write path and
//! are absorbed with a warning.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::budget::{IngestionBudget, TokenBudgeter};
use crate::embed::{AddOutcome, EmbedStore};
use crate::error::{Result, RetrievalError};
use crate::page;
use crate::sources::{Fragment, FragmentSource, SnippetSource};

/// Maximum `add` calls per orchestrated query-mode request, across all
/// sources combined.
pub const DEFAULT_INGEST_LIMIT: usize = 25;

/// Final output of a query-mode request.
#[derive(Debug, Clone)]
pub struct RetrievalOutcome {
    /// Ranked items verbatim from the embedding backend.
    pub items: Vec<String>,

    /// Source links from the snippet search. Always reflects the full
    /// search result set, independent of which snippets were ingested.
    pub links: Vec<String>,

    /// When the outcome was assembled.
    pub retrieved_at: DateTime<Utc>,
}

/// Composes sources, budgets, and the embedding backend into the two
/// orchestrated request modes.
pub struct RetrievalPipeline {
    passages: Arc<dyn FragmentSource>,
    snippets: Arc<dyn SnippetSource>,
    store: Arc<dyn EmbedStore>,
    budgeter: TokenBudgeter,
    token_limit: usize,
    ingest_limit: usize,
    http: reqwest::Client,
}

impl RetrievalPipeline {
    /// Wire a pipeline from its collaborators. `token_limit` is the
    /// embedding backend's input ceiling in tokens.
    pub fn new(
        passages: Arc<dyn FragmentSource>,
        snippets: Arc<dyn SnippetSource>,
        store: Arc<dyn EmbedStore>,
        budgeter: TokenBudgeter,
        token_limit: usize,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("retrieval-orchestrator/0.1")
            .build()?;

        Ok(Self {
            passages,
            snippets,
            store,
            budgeter,
            token_limit,
            ingest_limit: DEFAULT_INGEST_LIMIT,
            http,
        })
    }

    /// Override the per-request ingestion cap.
    pub fn with_ingest_limit(mut self, limit: usize) -> Self {
        self.ingest_limit = limit;
        self
    }

    /// Query mode: fan out to both sources, ingest under a shared budget,
    /// then ask the backend for the most relevant indexed items.
    pub async fn search(&self, query: &str) -> Result<RetrievalOutcome> {
        let (passages, snippets) =
            tokio::join!(self.passages.fetch(query), self.snippets.search(query));
        let passages = passages?;
        let snippets = snippets?;

        debug!(
            query,
            passage_count = passages.len(),
            snippet_count = snippets.len(),
            "sources resolved"
        );

        let mut budget = IngestionBudget::new(self.ingest_limit);
        let combined = passages.into_iter().chain(snippets.fragments());
        self.ingest(combined, &mut budget).await;

        let items = self.store.query(query).await?;

        Ok(RetrievalOutcome {
            items,
            links: snippets.links,
            retrieved_at: Utc::now(),
        })
    }

    /// Browse mode: fetch a page, index every paragraph (no ingestion
    /// budget), then query the backend with the caller's topic.
    pub async fn browse(&self, url: &str, topic: &str) -> Result<Vec<String>> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(RetrievalError::UpstreamStatus {
                service: "page fetch",
                status: response.status(),
            });
        }
        let html = response.text().await?;

        self.index_page(&html, topic).await
    }

    /// Ingest fragments in priority order until the supply or the shared
    /// budget runs out. Per-fragment failures are absorbed; the cutoff stops
    /// ingestion for the entire request.
    async fn ingest(
        &self,
        fragments: impl IntoIterator<Item = Fragment>,
        budget: &mut IngestionBudget,
    ) {
        for fragment in fragments {
            if !budget.try_take() {
                debug!(used = budget.used(), "ingestion budget exhausted");
                break;
            }

            let text = self.budgeter.truncate(&fragment.text, self.token_limit);
            match self.store.add(&text, fragment.page_id.as_deref()).await {
                Ok(AddOutcome::Indexed(_)) => {}
                Ok(AddOutcome::Failed(reason)) => {
                    warn!(reason, "embedding backend refused fragment");
                }
                Err(e) => {
                    warn!(error = %e, "add call failed, skipping fragment");
                }
            }
        }
    }

    /// Index a page's paragraphs as a joined concurrent batch, then run the
    /// topic query. Split from [`browse`](Self::browse) so the post-fetch
    /// half is testable without a live page.
    async fn index_page(&self, html: &str, topic: &str) -> Result<Vec<String>> {
        let paragraphs = page::extract_paragraphs(html);
        debug!(paragraph_count = paragraphs.len(), "page parsed");

        let adds = paragraphs.iter().map(|paragraph| {
            let text = self.budgeter.truncate(paragraph, self.token_limit);
            async move { self.store.add(&text, None).await }
        });

        for outcome in join_all(adds).await {
            match outcome {
                Ok(AddOutcome::Indexed(_)) => {}
                Ok(AddOutcome::Failed(reason)) => {
                    warn!(reason, "embedding backend refused paragraph");
                }
                Err(e) => {
                    warn!(error = %e, "add call failed, skipping paragraph");
                }
            }
        }

        self.store.query(topic).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SnippetResults;
    use crate::testing::{RecordingEmbedStore, StaticPassageSource, StaticSnippetSource};

    fn passages(count: usize) -> StaticPassageSource {
        StaticPassageSource::new(
            (0..count)
                .map(|i| Fragment::new(format!("passage {i}")))
                .collect(),
        )
    }

    fn snippets(count: usize) -> StaticSnippetSource {
        let mut results = SnippetResults::default();
        for i in 0..count {
            results.push(format!("snippet {i}"), format!("https://link{i}.example"));
        }
        StaticSnippetSource::new(results)
    }

    fn pipeline(
        passage_source: StaticPassageSource,
        snippet_source: StaticSnippetSource,
        store: Arc<RecordingEmbedStore>,
    ) -> RetrievalPipeline {
        RetrievalPipeline::new(
            Arc::new(passage_source),
            Arc::new(snippet_source),
            store,
            TokenBudgeter::for_model("gpt-3.5-turbo-16k").unwrap(),
            8190,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_both_sources_ingested_then_one_query() {
        // Scenario A: 10 passages + 5 snippets -> 15 adds, 1 query, 5 links.
        let store = Arc::new(RecordingEmbedStore::new().with_items(vec!["hit".to_string()]));
        let p = pipeline(passages(10), snippets(5), store.clone());

        let outcome = p.search("rust").await.unwrap();

        assert_eq!(store.added_texts().len(), 15);
        assert_eq!(store.query_count(), 1);
        assert_eq!(outcome.links.len(), 5);
        assert_eq!(outcome.items, vec!["hit"]);
    }

    #[tokio::test]
    async fn test_passages_ingested_before_snippets() {
        let store = Arc::new(RecordingEmbedStore::new());
        let p = pipeline(passages(3), snippets(2), store.clone());

        p.search("rust").await.unwrap();

        let added = store.added_texts();
        assert_eq!(
            added,
            vec![
                "passage 0", "passage 1", "passage 2", "snippet 0", "snippet 1"
            ]
        );
    }

    #[tokio::test]
    async fn test_budget_caps_total_adds_across_sources() {
        // 20 passages + 10 snippets -> exactly 25 adds, cut mid-snippet.
        let store = Arc::new(RecordingEmbedStore::new());
        let p = pipeline(passages(20), snippets(10), store.clone());

        let outcome = p.search("rust").await.unwrap();

        let added = store.added_texts();
        assert_eq!(added.len(), 25);
        assert_eq!(added[19], "passage 19");
        assert_eq!(added[20], "snippet 0");
        assert_eq!(added[24], "snippet 4");
        // Links still reflect the full snippet fetch.
        assert_eq!(outcome.links.len(), 10);
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_passage_source_is_not_an_error() {
        // Scenario B: no matching page, 3 snippets -> 3 adds, success.
        let store = Arc::new(RecordingEmbedStore::new());
        let p = pipeline(passages(0), snippets(3), store.clone());

        let outcome = p.search("obscure topic").await.unwrap();

        assert_eq!(store.added_texts().len(), 3);
        assert_eq!(outcome.links.len(), 3);
    }

    #[tokio::test]
    async fn test_add_failures_do_not_fail_the_request() {
        let store = Arc::new(RecordingEmbedStore::new().with_failing_adds());
        let p = pipeline(passages(4), snippets(2), store.clone());

        let outcome = p.search("rust").await.unwrap();

        // Every add was attempted despite the refusals.
        assert_eq!(store.added_texts().len(), 6);
        assert_eq!(store.query_count(), 1);
        assert!(outcome.items.is_empty());
    }

    #[tokio::test]
    async fn test_query_failure_is_fatal() {
        // Scenario C: the single relevance query fails -> whole request fails.
        let store = Arc::new(RecordingEmbedStore::new().with_failing_query());
        let p = pipeline(passages(2), snippets(2), store.clone());

        let err = p.search("rust").await.unwrap_err();
        assert!(matches!(err, RetrievalError::Backend(_)));
    }

    #[tokio::test]
    async fn test_browse_ingests_every_paragraph_unbudgeted() {
        // Scenario E: 30 paragraphs all ingested, then one topic query.
        let store = Arc::new(RecordingEmbedStore::new().with_items(vec!["a".to_string()]));
        let p = pipeline(passages(0), snippets(0), store.clone());

        let html: String = (0..30).map(|i| format!("<p>paragraph {i}</p>")).collect();
        let items = p.index_page(&html, "the topic").await.unwrap();

        assert_eq!(store.added_texts().len(), 30);
        assert_eq!(store.query_count(), 1);
        assert_eq!(store.queried_texts(), vec!["the topic"]);
        assert_eq!(items, vec!["a"]);
    }

    #[tokio::test]
    async fn test_zero_ingest_limit_still_queries() {
        let store = Arc::new(RecordingEmbedStore::new());
        let p = pipeline(passages(5), snippets(5), store.clone()).with_ingest_limit(0);

        p.search("rust").await.unwrap();

        assert!(store.added_texts().is_empty());
        assert_eq!(store.query_count(), 1);
    }
}
