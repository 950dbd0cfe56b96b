//! The pub/sub HTTP resource: request routing, the sync/async dispatch
//! pipeline, structured access logging, and process wiring.
//!
//! The same binary plays both roles spec.md §4.7 describes — single-node
//! backend process (wraps a `MemoryBackend`) and clustered frontend
//! process (wraps a `HashBackend` over `ProxyBackend`s) — since both are
//! just this one HTTP resource constructed with a different backend
//! handle.

pub mod access_log;
pub mod app;
pub mod config;
pub mod pipeline;

pub use app::build_router;
pub use config::load_backend;
