use async_trait::async_trait;
use thiserror::Error;

/// Everything that can go wrong in a backend call that isn't one of the
/// semantic status codes (200/204/404) the contract already returns as a
/// normal value.
///
/// Backends never translate their own errors into HTTP statuses — they
/// either return a semantic status or propagate one of these. Only the
/// frontend's request pipeline is allowed to turn a `BackendError` into a
/// `500` response.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend transport failure: {0}")]
    Transport(String),
    #[error("backend returned an unexpected status: {0}")]
    UnexpectedStatus(u16),
}

/// The four-operation contract every backend implementation satisfies:
/// `MemoryBackend` (synchronous, in-process), `ProxyBackend` (forwards over
/// HTTP, genuinely asynchronous), and `HashBackend` (dispatches to one of a
/// fixed list of other backends).
///
/// A synchronous implementation and a later-resolving one are
/// indistinguishable to callers — `async_trait` gives every implementor a
/// `Future`-returning method, whether or not that future ever actually
/// suspends.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Subscribes `user` to `topic`, creating the topic if absent.
    /// Idempotent: returns `200` whether or not `user` was already
    /// subscribed.
    async fn subscribe(&self, topic: &[u8], user: &[u8]) -> Result<u16, BackendError>;

    /// Removes `user` from `topic`'s subscribers and evicts `user` from
    /// every pending message, dropping any message this empties. Returns
    /// `200` if `user` was subscribed, `404` otherwise.
    async fn unsubscribe(&self, topic: &[u8], user: &[u8]) -> Result<u16, BackendError>;

    /// Posts `body` to `topic`, creating the topic if absent. If the topic
    /// currently has no subscribers the post is silently dropped. Always
    /// returns `200`.
    async fn post_message(&self, topic: &[u8], body: &[u8]) -> Result<u16, BackendError>;

    /// Returns the oldest message addressed to `user` on `topic`, removing
    /// `user` from its delivery list (and the message from the topic, if
    /// that empties its delivery list). `(200, body)` on a hit, `(204,
    /// None)` if subscribed with nothing pending, `(404, None)` if `user`
    /// is not currently subscribed to `topic`.
    async fn get_message(
        &self,
        topic: &[u8],
        user: &[u8],
    ) -> Result<(u16, Option<Vec<u8>>), BackendError>;
}
