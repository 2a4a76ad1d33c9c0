//! Relay Actor: the sole bridge between client intent and the transport.
//!
//! The relay owns the send/acknowledge protocol. Inbound, it drains the
//! transport outbox into the chat log, clearing pending entries whose echo
//! carries the local identity. Outbound, it moves composed messages from the
//! outbound queue onto the transport inbox, recording each as pending
//! *before* it goes on the wire so no message is ever in flight without a
//! pending record.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};

use super::WAKE_INTERVAL;
use crate::message::Message;
use crate::state::ChatState;

/// Relay actor bridging the client-side queues and the simulated wire.
#[derive(Debug)]
pub struct RelayActor {
    /// Handle to the relay thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl RelayActor {
    /// Spawn the relay actor thread.
    ///
    /// # Arguments
    ///
    /// * `state` - Shared session state (queues, pending set, log).
    /// * `username` - The local identity; echoes matching it are acks.
    /// * `inbox_tx` - Sending half of the transport inbox.
    /// * `outbox_rx` - Receiving half of the transport outbox.
    pub fn spawn(
        state: Arc<ChatState>,
        username: String,
        inbox_tx: Sender<Message>,
        outbox_rx: Receiver<Message>,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("chatloop-relay".to_string())
            .spawn(move || {
                Self::run_loop(&state, &username, &inbox_tx, &outbox_rx, &shutdown_clone);
            })
            .expect("Failed to spawn relay thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the relay thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the relay thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main relay loop.
    ///
    /// Blocks on the outbox with a short timeout rather than busy-polling;
    /// each wake also forwards anything waiting in the outbound queue, so
    /// outbound latency is bounded by [`WAKE_INTERVAL`].
    fn run_loop(
        state: &Arc<ChatState>,
        username: &str,
        inbox_tx: &Sender<Message>,
        outbox_rx: &Receiver<Message>,
        shutdown: &Arc<AtomicBool>,
    ) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Inbound: deliver remote traffic to the log.
            match outbox_rx.recv_timeout(WAKE_INTERVAL) {
                Ok(message) => {
                    Self::deliver(state, username, message);
                    // Drain any burst that arrived behind it.
                    while let Ok(message) = outbox_rx.try_recv() {
                        Self::deliver(state, username, message);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("transport outbox disconnected, relay stopping");
                    break;
                }
            }

            // Outbound: hand composed messages to the wire.
            while let Some(message) = state.outbound.pop() {
                // Pending record first: a message must never be in flight
                // without one.
                state.pending.insert(message.clone());
                trace!(id = message.id(), "forwarding to transport");
                if inbox_tx.send(message).is_err() {
                    warn!("transport inbox disconnected, relay stopping");
                    return;
                }
            }
        }
    }

    /// Deliver one message from the transport outbox.
    ///
    /// An echo of our own message is an acknowledgment: its pending entry is
    /// cleared *before* the log append, so no snapshot can observe the same
    /// id in both structures. Remote messages were never pending and are
    /// appended as-is.
    fn deliver(state: &Arc<ChatState>, username: &str, message: Message) {
        if message.sender() == username && state.pending.remove(message.id()) {
            debug!(id = message.id(), "acknowledged");
        }
        trace!(id = message.id(), sender = message.sender(), "delivered");
        state.log.append(message);
    }
}

impl Drop for RelayActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
