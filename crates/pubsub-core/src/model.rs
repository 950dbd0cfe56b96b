use std::collections::HashSet;

/// A pending post, addressed to every subscriber who was on the topic when
/// it was posted and has not yet received it.
///
/// `subs` starts as a snapshot copy of the topic's subscriber set at post
/// time (invariant M1) — never a live reference to it — so that a
/// subscriber who joins later never sees messages posted before it
/// subscribed.
#[derive(Debug, Clone)]
pub struct Message {
    pub body: Vec<u8>,
    pub subs: HashSet<Vec<u8>>,
}

impl Message {
    pub fn new(subs: HashSet<Vec<u8>>, body: Vec<u8>) -> Self {
        Message { body, subs }
    }

    /// True once every addressed subscriber has received this message
    /// (invariant M2: the message is removed from its topic at this point).
    pub fn delivered(&self) -> bool {
        self.subs.is_empty()
    }
}

/// A named topic: its current subscribers plus an ordered queue of pending
/// messages, oldest first.
///
/// Created lazily by any operation that references it and never destroyed
/// (spec's "topic creation side effects" non-goal).
#[derive(Debug, Default)]
pub struct Topic {
    pub subs: HashSet<Vec<u8>>,
    pub messages: Vec<Message>,
}

impl Topic {
    pub fn new() -> Self {
        Topic::default()
    }
}
