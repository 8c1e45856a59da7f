//! Testing utilities including recording doubles for the pipeline seams.
//!
//! These let applications exercise orchestration logic without network
//! calls: fixed-response sources and an embedding store that records every
//! `add`/`query` it receives.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::embed::{AddOutcome, EmbedStore};
use crate::error::{Result, RetrievalError};
use crate::sources::{Fragment, FragmentSource, SnippetResults, SnippetSource};

/// A passage source returning a fixed fragment list for every query.
#[derive(Default)]
pub struct StaticPassageSource {
    fragments: Vec<Fragment>,
}

impl StaticPassageSource {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }
}

#[async_trait]
impl FragmentSource for StaticPassageSource {
    async fn fetch(&self, _query: &str) -> Result<Vec<Fragment>> {
        Ok(self.fragments.clone())
    }
}

/// A snippet source returning fixed results for every query.
#[derive(Default)]
pub struct StaticSnippetSource {
    results: SnippetResults,
}

impl StaticSnippetSource {
    pub fn new(results: SnippetResults) -> Self {
        Self { results }
    }
}

#[async_trait]
impl SnippetSource for StaticSnippetSource {
    async fn search(&self, _query: &str) -> Result<SnippetResults> {
        Ok(self.results.clone())
    }
}

/// An in-memory embedding store that records calls for assertions.
///
/// By default every `add` succeeds and `query` returns the configured item
/// list. Failure modes are opt-in per seam.
#[derive(Default)]
pub struct RecordingEmbedStore {
    adds: Mutex<Vec<String>>,
    queries: Mutex<Vec<String>>,
    items: Vec<String>,
    fail_adds: bool,
    fail_query: bool,
}

impl RecordingEmbedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items returned by every successful `query`.
    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    /// Make every `add` return an application-level refusal.
    pub fn with_failing_adds(mut self) -> Self {
        self.fail_adds = true;
        self
    }

    /// Make every `query` fail (read-path failures are fatal).
    pub fn with_failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    /// Texts passed to `add`, in call order.
    pub fn added_texts(&self) -> Vec<String> {
        self.adds.lock().unwrap().clone()
    }

    /// Texts passed to `query`, in call order.
    pub fn queried_texts(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Number of `query` calls received.
    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl EmbedStore for RecordingEmbedStore {
    async fn add(&self, text: &str, _page_id: Option<&str>) -> Result<AddOutcome> {
        self.adds.lock().unwrap().push(text.to_string());
        if self.fail_adds {
            Ok(AddOutcome::Failed("refused by test store".to_string()))
        } else {
            Ok(AddOutcome::Indexed(1))
        }
    }

    async fn query(&self, text: &str) -> Result<Vec<String>> {
        self.queries.lock().unwrap().push(text.to_string());
        if self.fail_query {
            Err(RetrievalError::Backend("query failed in test store".to_string()))
        } else {
            Ok(self.items.clone())
        }
    }
}
