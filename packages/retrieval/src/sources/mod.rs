//! Content sources feeding the retrieval pipeline.
//!
//! Sources are a small closed set of variants behind shared capabilities:
//! a passage source yields ordered full-text fragments for a topic, a
//! snippet source yields short search descriptions with their originating
//! links. Ingestion treats them uniformly via [`Fragment`] iteration.

mod google;
mod wikipedia;

pub use google::GoogleSearchSource;
pub use wikipedia::WikipediaSource;

use async_trait::async_trait;

use crate::error::Result;

/// A unit of candidate text bound for the embedding backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Raw text; non-empty after trimming.
    pub text: String,

    /// Identifier of the source page, if the source has one.
    pub page_id: Option<String>,
}

impl Fragment {
    /// Create a fragment without a source identifier.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_id: None,
        }
    }

    /// Attach a source page identifier.
    pub fn with_page_id(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }
}

/// A source that produces ordered text fragments for a query.
///
/// Finding nothing is a normal outcome (empty vec), not an error; only
/// transport/HTTP failures propagate.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<Fragment>>;
}

/// Index-aligned snippet/link pairs from a web search.
///
/// The two sequences always have the same length; a missing snippet or link
/// is an empty string at its index, never a dropped entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetResults {
    pub snippets: Vec<String>,
    pub links: Vec<String>,
}

impl SnippetResults {
    /// Append one aligned snippet/link pair.
    pub fn push(&mut self, snippet: String, link: String) {
        self.snippets.push(snippet);
        self.links.push(link);
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Snippets as ingestible fragments, skipping entries that are empty
    /// after trimming (the aligned link stays in `links` regardless).
    pub fn fragments(&self) -> Vec<Fragment> {
        self.snippets
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(Fragment::new)
            .collect()
    }
}

/// A web-search source yielding snippets with their originating links.
#[async_trait]
pub trait SnippetSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<SnippetResults>;
}
