//! Core pub/sub state machine: topics, messages, the backend contract, and
//! the two concrete in-process backends (`MemoryBackend`, `HashBackend`).
//!
//! `ProxyBackend`, the third backend implementation, lives in the
//! `pubsub-proxy` crate since it needs an HTTP client; it implements the
//! same [`Backend`] trait defined here.

mod backend;
mod hash_backend;
mod memory;
mod model;
mod partition;

pub use backend::{Backend, BackendError};
pub use hash_backend::HashBackend;
pub use memory::MemoryBackend;
pub use model::{Message, Topic};
pub use partition::partition;
