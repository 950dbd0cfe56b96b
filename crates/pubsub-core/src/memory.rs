use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::backend::{Backend, BackendError};
use crate::model::{Message, Topic};

/// The authoritative, in-memory pub/sub state machine.
///
/// The original implementation this was ported from runs on a single
/// cooperative event-loop thread and needs no locking at all: every
/// operation runs to completion before the next is polled. A Tokio service
/// has no such guarantee — two requests can land on different worker
/// threads at the same instant — so every operation here is serialized
/// behind one mutex over the whole topic map. That is the only change
/// needed to keep this component's ordering guarantee ("operations on a
/// single backend complete in the order they were dispatched to it") true
/// under a real multi-threaded runtime.
pub struct MemoryBackend {
    topics: Mutex<HashMap<Vec<u8>, Topic>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        MemoryBackend::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            topics: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn subscribe(&self, topic: &[u8], user: &[u8]) -> Result<u16, BackendError> {
        let mut topics = self.topics.lock().await;
        let topic = topics.entry(topic.to_vec()).or_insert_with(Topic::new);
        topic.subs.insert(user.to_vec());
        Ok(200)
    }

    async fn unsubscribe(&self, topic: &[u8], user: &[u8]) -> Result<u16, BackendError> {
        let mut topics = self.topics.lock().await;
        let topic = topics.entry(topic.to_vec()).or_insert_with(Topic::new);
        if !topic.subs.remove(user) {
            return Ok(404);
        }
        for message in topic.messages.iter_mut() {
            message.subs.remove(user);
        }
        topic.messages.retain(|m| !m.delivered());
        Ok(200)
    }

    async fn post_message(&self, topic: &[u8], body: &[u8]) -> Result<u16, BackendError> {
        let mut topics = self.topics.lock().await;
        let topic = topics.entry(topic.to_vec()).or_insert_with(Topic::new);
        if !topic.subs.is_empty() {
            topic
                .messages
                .push(Message::new(topic.subs.clone(), body.to_vec()));
        }
        Ok(200)
    }

    async fn get_message(
        &self,
        topic: &[u8],
        user: &[u8],
    ) -> Result<(u16, Option<Vec<u8>>), BackendError> {
        let mut topics = self.topics.lock().await;
        let topic = topics.entry(topic.to_vec()).or_insert_with(Topic::new);
        if !topic.subs.contains(user) {
            return Ok((404, None));
        }
        for (index, message) in topic.messages.iter_mut().enumerate() {
            if message.subs.remove(user) {
                let body = message.body.clone();
                if message.delivered() {
                    topic.messages.remove(index);
                }
                return Ok((200, Some(body)));
            }
        }
        Ok((204, None))
    }
}
