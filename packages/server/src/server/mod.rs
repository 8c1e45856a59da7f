//! Server module: router assembly, middleware, routes, and rendering.

pub mod app;
pub mod markdown;
pub mod middleware;
pub mod routes;
pub mod static_files;

pub use app::{build_app, build_state, AppState};
