//! Retrieval Orchestration Library
//!
//! Gathers candidate text from heterogeneous content sources, budgets it for
//! a fixed-capacity embedding backend, and merges asynchronous source results
//! with a single downstream relevance query.
//!
//! # Design Philosophy
//!
//! - The embedding backend is an opaque capability (`add`/`query`) behind the
//!   [`EmbedStore`] trait; any real implementation can be substituted.
//! - Content sources implement a shared "produces fragments" capability so
//!   ingestion iterates them uniformly instead of branching per source.
//! - The per-request ingestion budget is an explicit counter passed into a
//!   single ingestion routine, keeping the cutoff check in one place.
//! - Library handles mechanics (fan-out, budgeting, merging); the app decides
//!   how results are presented.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use retrieval::{
//!     EmbedApiClient, GoogleSearchSource, RetrievalPipeline, TokenBudgeter,
//!     WikipediaSource,
//! };
//!
//! let pipeline = RetrievalPipeline::new(
//!     Arc::new(WikipediaSource::new("ops@example.com")?),
//!     Arc::new(GoogleSearchSource::new(api_key, cx)?),
//!     Arc::new(EmbedApiClient::new("http://db:4211")?),
//!     TokenBudgeter::for_model("gpt-3.5-turbo-16k")?,
//!     8190,
//! )?;
//!
//! // Query mode: fan out, ingest under a shared budget, one relevance query.
//! let outcome = pipeline.search("rust borrow checker").await?;
//!
//! // Browse mode: index every paragraph of a page, then query a topic.
//! let items = pipeline.browse("https://example.com/post", "ownership").await?;
//! ```
//!
//! # Modules
//!
//! - [`sources`] - Fragment sources (Wikipedia passages, Google snippets)
//! - [`embed`] - Embedding-backend client (`add`/`query`)
//! - [`budget`] - Token truncation and the per-request ingestion budget
//! - [`page`] - Paragraph extraction from fetched HTML
//! - [`pipeline`] - The retrieval orchestrator (query and browse modes)
//! - [`testing`] - Recording doubles for the pipeline seams

pub mod budget;
pub mod embed;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod sources;
pub mod testing;

// Re-export core types at crate root
pub use budget::{IngestionBudget, TokenBudgeter};
pub use embed::{AddOutcome, EmbedApiClient, EmbedStore};
pub use error::{Result, RetrievalError};
pub use pipeline::{RetrievalOutcome, RetrievalPipeline, DEFAULT_INGEST_LIMIT};
pub use sources::{
    Fragment, FragmentSource, GoogleSearchSource, SnippetResults, SnippetSource, WikipediaSource,
};
