//! Forwards the backend contract over HTTP to a remote `MemoryBackend`
//! sitting behind the same frontend HTTP surface (see `pubsub_core::Backend`
//! for the contract and `services/pubsub-frontend` for the surface both
//! ends speak).

mod client;
mod proxy_backend;

pub use proxy_backend::ProxyBackend;
