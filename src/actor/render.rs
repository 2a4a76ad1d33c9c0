//! Render Actor: periodic repaint of the chat view.
//!
//! Every interval the actor takes one consistent snapshot of the session,
//! composes the full frame into a pre-allocated [`OutputBuffer`], and
//! flushes it to the sink in a single write. The actor is the sole owner of
//! the sink, which is what keeps frames from interleaving with other
//! output.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use super::interruptible_sleep;
use crate::state::{ChatSnapshot, ChatState};
use crate::terminal::OutputBuffer;

/// Suffix shown behind messages that are not yet confirmed delivered.
const SENDING_SUFFIX: &str = " [sending...]";

/// Compose one frame from a snapshot.
///
/// Layout: delivered history in log order, then unacknowledged messages in
/// insertion order, then still-queued messages in queue order (both with a
/// `[sending...]` suffix), then the prompt line rebuilt from the input
/// snapshot.
///
/// The prompt restoration is best-effort by design of the clear-and-reprint
/// approach: keystrokes that land between snapshot and flush only show up
/// one frame later, and the hardware cursor is parked after the *snapshot*
/// text, not the live buffer.
pub fn compose_frame(snapshot: &ChatSnapshot, out: &mut OutputBuffer) {
    out.clear();
    out.cursor_hide();
    out.cursor_home();
    out.clear_screen();

    for message in &snapshot.log {
        out.write_line(&message.to_string());
    }
    for message in &snapshot.pending {
        out.write_line(&format!("{message}{SENDING_SUFFIX}"));
    }
    for message in &snapshot.queued {
        out.write_line(&format!("{message}{SENDING_SUFFIX}"));
    }

    out.write_str("> ");
    out.write_str(&snapshot.input);

    let row = snapshot.log.len() + snapshot.pending.len() + snapshot.queued.len();
    let col = "> ".len() + UnicodeWidthStr::width(snapshot.input.as_str());
    out.cursor_move(
        u16::try_from(col).unwrap_or(u16::MAX),
        u16::try_from(row).unwrap_or(u16::MAX),
    );
    out.cursor_show();
}

/// Render actor repainting the chat view on a fixed interval.
#[derive(Debug)]
pub struct RenderActor {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl RenderActor {
    /// Spawn the render actor thread.
    ///
    /// # Arguments
    ///
    /// * `state` - Shared session state to snapshot each frame.
    /// * `interval` - Time between frames.
    /// * `sink` - Where frames are flushed; the actor owns it exclusively.
    pub fn spawn<W>(state: Arc<ChatState>, interval: Duration, sink: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("chatloop-render".to_string())
            .spawn(move || {
                Self::run_loop(&state, interval, sink, &shutdown_clone);
            })
            .expect("Failed to spawn render thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the render thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the render thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main render loop.
    fn run_loop<W: Write>(
        state: &Arc<ChatState>,
        interval: Duration,
        mut sink: W,
        shutdown: &Arc<AtomicBool>,
    ) {
        let mut out = OutputBuffer::new();

        loop {
            if !interruptible_sleep(shutdown, interval) {
                break;
            }

            let snapshot = state.snapshot();
            compose_frame(&snapshot, &mut out);
            if let Err(e) = out.flush_to(&mut sink) {
                warn!(error = %e, "render flush failed, render stopping");
                break;
            }
        }
    }
}

impl Drop for RenderActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
