//! `ChatLog`: append-only delivered-message history.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::message::Message;

/// The canonical display history: every acknowledged or received message,
/// in arrival order at the relay.
///
/// Append-only. Entries are never removed or reordered; this is the single
/// source of truth for what the local view considers delivered.
#[derive(Debug, Default)]
pub struct ChatLog {
    entries: Mutex<Vec<Message>>,
}

impl ChatLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer must not wedge every other actor; recover the
    // guard from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a delivered message.
    pub fn append(&self, message: Message) {
        self.lock().push(message);
    }

    /// Number of delivered messages.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Check whether any entry carries the given id.
    pub fn contains_id(&self, id: u64) -> bool {
        self.lock().iter().any(|m| m.id() == id)
    }

    /// Clone the full history in log order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageIds;

    #[test]
    fn test_append_preserves_order() {
        let ids = MessageIds::new();
        let log = ChatLog::new();
        log.append(Message::new(&ids, "a", "first"));
        log.append(Message::new(&ids, "b", "second"));

        let snap = log.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].body(), "first");
        assert_eq!(snap[1].body(), "second");
    }

    #[test]
    fn test_contains_id() {
        let ids = MessageIds::new();
        let log = ChatLog::new();
        let msg = Message::new(&ids, "a", "hello");
        let id = msg.id();
        log.append(msg);

        assert!(log.contains_id(id));
        assert!(!log.contains_id(id + 1));
    }
}
