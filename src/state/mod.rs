//! Shared chat state: the context object handed to every actor.
//!
//! All mutable state that crosses actor boundaries lives here, each piece
//! behind its own internal synchronization:
//! - [`ChatLog`]: append-only delivered history (relay writes, render reads)
//! - [`PendingSet`]: sent-but-unacknowledged messages (relay mutates)
//! - [`OutboundQueue`]: composed-but-unsent messages (input pushes, relay pops)
//! - [`InputSlot`]: best-effort view of the in-progress input line
//!
//! Callers never layer extra locking on top; each structure is responsible
//! for its own consistency under concurrent mutation.

mod log;
mod queue;
mod slot;

pub use log::ChatLog;
pub use queue::{OutboundQueue, PendingSet};
pub use slot::InputSlot;

use std::sync::Arc;

use crate::message::{Message, MessageIds};

/// Shared state for one chat session.
///
/// Constructed once by the supervisor and passed to each actor behind an
/// `Arc`. The id allocator is separately shared because the simulated
/// remote side also constructs messages and must draw from the same id
/// space.
#[derive(Debug, Default)]
pub struct ChatState {
    /// Message id allocator.
    pub ids: Arc<MessageIds>,
    /// Messages composed locally, not yet handed to the transport.
    pub outbound: OutboundQueue,
    /// Messages handed to the transport, awaiting acknowledgment.
    pub pending: PendingSet,
    /// Delivered history, append order = arrival order at the relay.
    pub log: ChatLog,
    /// Latest published in-progress input line.
    pub input: InputSlot,
}

impl ChatState {
    /// Create empty session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a consistent snapshot of everything the renderer displays.
    ///
    /// Locks are taken one structure at a time in a fixed order (log,
    /// pending, outbound, input), so a frame never shows a torn view of any
    /// single structure. Cross-structure skew is bounded by the relay's
    /// remove-before-append discipline: an id never shows up in both the
    /// log and the pending section of one snapshot.
    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            log: self.log.snapshot(),
            pending: self.pending.snapshot(),
            queued: self.outbound.snapshot(),
            input: self.input.snapshot(),
        }
    }
}

/// A single-instant view of the displayable state.
#[derive(Debug, Clone)]
pub struct ChatSnapshot {
    /// Delivered messages, in log order.
    pub log: Vec<Message>,
    /// Unacknowledged messages, in insertion order.
    pub pending: Vec<Message>,
    /// Messages still waiting in the outbound queue, in queue order.
    pub queued: Vec<Message>,
    /// The in-progress input line at snapshot time.
    pub input: String,
}
