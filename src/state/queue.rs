//! Client-side queues: the outbound queue and the awaiting-ack set.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::message::Message;

/// FIFO queue of locally composed messages not yet handed to the transport.
///
/// Multiple producers (the input actor, programmatic sends), single consumer
/// (the relay). An entry is removed exactly once, when the relay hands it to
/// the transport.
#[derive(Debug, Default)]
pub struct OutboundQueue {
    entries: Mutex<VecDeque<Message>>,
}

impl OutboundQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Message>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue a composed message.
    pub fn push(&self, message: Message) {
        self.lock().push_back(message);
    }

    /// Dequeue the oldest message, if any.
    pub fn pop(&self) -> Option<Message> {
        self.lock().pop_front()
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clone the queue contents in queue order, without consuming.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().iter().cloned().collect()
    }
}

/// Messages handed to the transport but not yet confirmed by the remote side.
///
/// The set has no intrinsic order; insertion order is kept so rendering is
/// deterministic. A message enters when the relay forwards it to the
/// transport and leaves when its echo comes back with the local sender
/// identity. The relay is the sole mutator.
#[derive(Debug, Default)]
pub struct PendingSet {
    entries: Mutex<Vec<Message>>,
}

impl PendingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a message as in flight.
    pub fn insert(&self, message: Message) {
        self.lock().push(message);
    }

    /// Acknowledge by id. Returns `true` if an entry was removed.
    pub fn remove(&self, id: u64) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|m| m.id() != id);
        entries.len() != before
    }

    /// Number of in-flight messages.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether anything is awaiting acknowledgment.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Check whether the given id is in flight.
    pub fn contains_id(&self, id: u64) -> bool {
        self.lock().iter().any(|m| m.id() == id)
    }

    /// Clone the in-flight messages in insertion order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageIds;

    #[test]
    fn test_outbound_fifo_order() {
        let ids = MessageIds::new();
        let queue = OutboundQueue::new();
        queue.push(Message::new(&ids, "me", "one"));
        queue.push(Message::new(&ids, "me", "two"));

        assert_eq!(queue.pop().unwrap().body(), "one");
        assert_eq!(queue.pop().unwrap().body(), "two");
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_outbound_snapshot_does_not_consume() {
        let ids = MessageIds::new();
        let queue = OutboundQueue::new();
        queue.push(Message::new(&ids, "me", "kept"));

        assert_eq!(queue.snapshot().len(), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_pending_remove_by_id() {
        let ids = MessageIds::new();
        let pending = PendingSet::new();
        let msg = Message::new(&ids, "me", "hello");
        let id = msg.id();
        pending.insert(msg);

        assert!(pending.contains_id(id));
        assert!(pending.remove(id));
        assert!(!pending.remove(id));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_pending_remove_unknown_id_is_noop() {
        let ids = MessageIds::new();
        let pending = PendingSet::new();
        pending.insert(Message::new(&ids, "me", "hello"));

        assert!(!pending.remove(999));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_pending_keeps_insertion_order() {
        let ids = MessageIds::new();
        let pending = PendingSet::new();
        pending.insert(Message::new(&ids, "me", "a"));
        pending.insert(Message::new(&ids, "me", "b"));
        pending.insert(Message::new(&ids, "me", "c"));
        pending.remove(1);

        let snap = pending.snapshot();
        assert_eq!(snap[0].body(), "a");
        assert_eq!(snap[1].body(), "c");
    }
}
