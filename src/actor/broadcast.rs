//! Broadcast Actor: simulated other participants.
//!
//! On a fixed period it invents a message from a random preset participant
//! and drops it straight onto the transport outbox. These messages were
//! never composed locally, so they bypass the inbox entirely and nothing
//! ever acknowledges them.

use crossbeam_channel::Sender;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

use super::interruptible_sleep;
use crate::message::{Message, MessageIds};

/// Broadcast actor injecting unsolicited remote messages.
#[derive(Debug)]
pub struct BroadcastActor {
    /// Handle to the broadcast thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl BroadcastActor {
    /// Spawn the broadcast actor thread.
    ///
    /// # Arguments
    ///
    /// * `outbox_tx` - Sending half of the transport outbox.
    /// * `ids` - Shared id allocator; broadcast messages get fresh ids.
    /// * `roster` - Non-empty table of participant names.
    /// * `banter` - Non-empty table of message bodies.
    /// * `period` - Time between broadcasts.
    /// * `rng` - Selection source; seed it in tests for determinism.
    pub fn spawn<R>(
        outbox_tx: Sender<Message>,
        ids: Arc<MessageIds>,
        roster: Vec<String>,
        banter: Vec<String>,
        period: Duration,
        rng: R,
    ) -> Self
    where
        R: Rng + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("chatloop-broadcast".to_string())
            .spawn(move || {
                Self::run_loop(&outbox_tx, &ids, &roster, &banter, period, rng, &shutdown_clone);
            })
            .expect("Failed to spawn broadcast thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the broadcast thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the broadcast thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main broadcast loop. Name and body are drawn independently each
    /// period; repeats across periods are allowed.
    fn run_loop<R: Rng>(
        outbox_tx: &Sender<Message>,
        ids: &Arc<MessageIds>,
        roster: &[String],
        banter: &[String],
        period: Duration,
        mut rng: R,
        shutdown: &Arc<AtomicBool>,
    ) {
        loop {
            if !interruptible_sleep(shutdown, period) {
                break;
            }

            let (Some(sender), Some(body)) = (roster.choose(&mut rng), banter.choose(&mut rng))
            else {
                // Empty tables are rejected at config validation; nothing
                // sensible to send without them.
                break;
            };

            let message = Message::new(ids, sender.clone(), body.clone());
            debug!(id = message.id(), sender = message.sender(), "broadcasting");
            if outbox_tx.send(message).is_err() {
                break;
            }
        }
    }
}

impl Drop for BroadcastActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Wire;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tables() -> (Vec<String>, Vec<String>) {
        (
            vec!["ada".into(), "brian".into(), "grace".into()],
            vec!["hello".into(), "how goes it".into()],
        )
    }

    #[test]
    fn test_broadcast_draws_from_preset_tables() {
        let (roster, banter) = tables();
        let ids = Arc::new(MessageIds::new());
        let wire = Wire::new();
        let actor = BroadcastActor::spawn(
            wire.outbox_tx.clone(),
            ids,
            roster.clone(),
            banter.clone(),
            Duration::from_millis(10),
            ChaCha8Rng::seed_from_u64(3),
        );

        let msg = wire.outbox_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(roster.iter().any(|n| n == msg.sender()));
        assert!(banter.iter().any(|b| b == msg.body()));

        actor.join();
    }

    #[test]
    fn test_broadcast_messages_get_fresh_ids() {
        let (roster, banter) = tables();
        let ids = Arc::new(MessageIds::new());
        let wire = Wire::new();
        let actor = BroadcastActor::spawn(
            wire.outbox_tx.clone(),
            ids,
            roster,
            banter,
            Duration::from_millis(10),
            ChaCha8Rng::seed_from_u64(9),
        );

        let a = wire.outbox_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let b = wire.outbox_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_ne!(a.id(), b.id());

        actor.join();
    }

    #[test]
    fn test_broadcast_shutdown_interrupts_period() {
        let (roster, banter) = tables();
        let ids = Arc::new(MessageIds::new());
        let wire = Wire::new();
        let actor = BroadcastActor::spawn(
            wire.outbox_tx.clone(),
            ids,
            roster,
            banter,
            Duration::from_secs(600),
            ChaCha8Rng::seed_from_u64(5),
        );

        thread::sleep(Duration::from_millis(30));
        let start = std::time::Instant::now();
        actor.join();
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
