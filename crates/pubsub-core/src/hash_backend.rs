use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{Backend, BackendError};
use crate::partition::partition;

/// Dispatches each call to exactly one of a fixed, ordered list of
/// backends, chosen by [`partition`]. The chosen index is constant for the
/// life of the process and identical across every `HashBackend` built from
/// the same ordered list (invariant H1): `partition` is pure and the list
/// never changes after construction.
pub struct HashBackend {
    backends: Vec<Arc<dyn Backend>>,
}

impl HashBackend {
    pub fn new(backends: Vec<Arc<dyn Backend>>) -> Self {
        assert!(!backends.is_empty(), "HashBackend needs at least one backend");
        HashBackend { backends }
    }

    fn backend_for(&self, topic: &[u8]) -> &Arc<dyn Backend> {
        &self.backends[partition(topic, self.backends.len())]
    }
}

#[async_trait]
impl Backend for HashBackend {
    async fn subscribe(&self, topic: &[u8], user: &[u8]) -> Result<u16, BackendError> {
        self.backend_for(topic).subscribe(topic, user).await
    }

    async fn unsubscribe(&self, topic: &[u8], user: &[u8]) -> Result<u16, BackendError> {
        self.backend_for(topic).unsubscribe(topic, user).await
    }

    async fn post_message(&self, topic: &[u8], body: &[u8]) -> Result<u16, BackendError> {
        self.backend_for(topic).post_message(topic, body).await
    }

    async fn get_message(
        &self,
        topic: &[u8],
        user: &[u8],
    ) -> Result<(u16, Option<Vec<u8>>), BackendError> {
        self.backend_for(topic).get_message(topic, user).await
    }
}
