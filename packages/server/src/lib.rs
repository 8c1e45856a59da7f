//! HTTP surface for the retrieval orchestration service.
//!
//! Thin axum layer over the `retrieval` pipeline: bearer-authenticated
//! `/browse` and `/search` endpoints, a rendered privacy page, embedded
//! static assets, and environment-driven configuration.

pub mod config;
pub mod server;

pub use config::Config;
