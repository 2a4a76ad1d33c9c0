//! Actor model: one thread per concern, communicating only through queues.
//!
//! Five actors make up a chat session:
//! - **Input Actor**: polls keystrokes, assembles lines, enqueues messages
//! - **Relay Actor**: bridges the client queues and the simulated transport
//! - **Echo Actor**: simulated remote, reflects sent messages after a delay
//! - **Broadcast Actor**: simulated other participants on a fixed period
//! - **Render Actor**: paints a snapshot of the session every interval
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐  OutboundQueue  ┌───────────┐   inbox    ┌───────────┐
//! │   Input   │ ──────────────▶ │   Relay   │ ─────────▶ │   Echo    │
//! └───────────┘                 │           │            └─────┬─────┘
//!                    PendingSet │           │   outbox         │
//!                    ChatLog ◀──│           │ ◀────────────────┤
//!                               └───────────┘            ┌─────┴─────┐
//! ┌───────────┐  ChatState snapshot                      │ Broadcast │
//! │  Render   │ ◀── log + pending + queued + input       └───────────┘
//! └───────────┘
//! ```
//!
//! Every actor follows the same lifecycle: `spawn` starts a named thread,
//! `shutdown` raises a cooperative stop flag, `join` waits for the thread,
//! and `Drop` signals shutdown. No actor blocks on a peer; a stopped actor
//! leaves the rest of the session running in a degraded mode.

mod broadcast;
mod echo;
mod input;
mod relay;
mod render;

pub use broadcast::BroadcastActor;
pub use echo::EchoActor;
pub use input::{InputActor, InputNotice, LineBuffer};
pub use relay::RelayActor;
pub use render::{compose_frame, RenderActor};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How long blocking receives wait before re-checking the shutdown flag.
pub(crate) const WAKE_INTERVAL: Duration = Duration::from_millis(16);

/// Granularity of interruptible sleeps.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Sleep for `total`, waking early if `shutdown` is raised.
///
/// Returns `true` if the full duration elapsed, `false` if interrupted.
/// Suspended actors must never wait out a full delay during shutdown, so
/// all timed waits go through here.
pub(crate) fn interruptible_sleep(shutdown: &Arc<AtomicBool>, total: Duration) -> bool {
    let deadline = Instant::now() + total;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}
