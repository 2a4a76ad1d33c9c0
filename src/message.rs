//! Message: the immutable unit of chat traffic.
//!
//! Every message carries its author, its body, and a process-unique id
//! assigned at construction. Ids come from a shared [`MessageIds`] counter
//! owned by the chat context, so uniqueness and monotonicity hold no matter
//! which actor allocates.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A single chat message. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who authored the message.
    sender: String,
    /// The message text.
    body: String,
    /// Monotonically increasing id, unique across all actors.
    id: u64,
}

impl Message {
    /// Create a message with a fresh id drawn from `ids`.
    pub fn new(ids: &MessageIds, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            id: ids.next(),
        }
    }

    /// The author of the message.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// The message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The unique message id.
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, self.body)
    }
}

/// Shared id allocator for messages.
///
/// Lives inside the chat context rather than in a process-wide static, so
/// tests can run isolated id spaces side by side.
#[derive(Debug, Default)]
pub struct MessageIds {
    next: AtomicU64,
}

impl MessageIds {
    /// Create an allocator starting at id 0.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Allocate the next id.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
