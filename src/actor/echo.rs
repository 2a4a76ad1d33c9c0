//! Echo Actor: simulated remote acceptance of client-sent messages.
//!
//! Each message pulled from the transport inbox is assigned a uniformly
//! random delay in `[0, max]` and held in a small delay line until its
//! deadline passes, then reflected back onto the outbox unmodified. Because
//! every message gets an independent delay, two messages sent close together
//! may be echoed out of send order; the relay protocol tolerates that.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::trace;

use crate::message::Message;

/// Echo actor simulating remote delivery confirmation.
#[derive(Debug)]
pub struct EchoActor {
    /// Handle to the echo thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

/// Messages waiting out their simulated latency.
struct DelayLine {
    slots: Vec<(Instant, Message)>,
}

impl DelayLine {
    const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    fn hold(&mut self, deadline: Instant, message: Message) {
        self.slots.push((deadline, message));
    }

    /// Remove and return every message whose deadline has passed.
    fn due(&mut self, now: Instant) -> Vec<Message> {
        let mut released = Vec::new();
        let mut i = 0;
        while i < self.slots.len() {
            if self.slots[i].0 <= now {
                released.push(self.slots.swap_remove(i).1);
            } else {
                i += 1;
            }
        }
        released
    }

    fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl EchoActor {
    /// Spawn the echo actor thread.
    ///
    /// # Arguments
    ///
    /// * `inbox_rx` - Receiving half of the transport inbox.
    /// * `outbox_tx` - Sending half of the transport outbox.
    /// * `delay_max` - Inclusive upper bound of the per-message delay.
    /// * `rng` - Delay source; seed it in tests for determinism.
    pub fn spawn<R>(
        inbox_rx: Receiver<Message>,
        outbox_tx: Sender<Message>,
        delay_max: Duration,
        rng: R,
    ) -> Self
    where
        R: Rng + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("chatloop-echo".to_string())
            .spawn(move || {
                Self::run_loop(&inbox_rx, &outbox_tx, delay_max, rng, &shutdown_clone);
            })
            .expect("Failed to spawn echo thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the echo thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the echo thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main echo loop.
    ///
    /// Shutdown mid-delay drops whatever the delay line still holds; those
    /// messages simply never get echoed, which the client side must tolerate
    /// as an unacknowledged send.
    fn run_loop<R: Rng>(
        inbox_rx: &Receiver<Message>,
        outbox_tx: &Sender<Message>,
        delay_max: Duration,
        mut rng: R,
        shutdown: &Arc<AtomicBool>,
    ) {
        let max_ms = u64::try_from(delay_max.as_millis()).unwrap_or(u64::MAX);
        let mut line = DelayLine::new();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            match inbox_rx.recv_timeout(super::WAKE_INTERVAL) {
                Ok(message) => {
                    let delay_ms = rng.gen_range(0..=max_ms);
                    trace!(id = message.id(), delay_ms, "holding echo");
                    line.hold(Instant::now() + Duration::from_millis(delay_ms), message);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    // Wire gone; nothing more will arrive. Drain what is
                    // still held, then stop.
                    if line.is_empty() {
                        break;
                    }
                    thread::sleep(super::WAKE_INTERVAL);
                }
            }

            for message in line.due(Instant::now()) {
                trace!(id = message.id(), "echoing");
                if outbox_tx.send(message).is_err() {
                    return;
                }
            }
        }
    }
}

impl Drop for EchoActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
