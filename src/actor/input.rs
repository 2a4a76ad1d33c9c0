//! Input Actor: turns raw keystrokes into discrete messages.
//!
//! Runs crossterm's event polling on its own thread (the terminal must be
//! in raw mode). Characters accumulate in a [`LineBuffer`]; Enter on a
//! non-empty buffer composes a message onto the outbound queue. After every
//! processed event the buffer is published to the shared input slot so the
//! renderer can reconstruct the prompt line.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::message::Message;
use crate::state::ChatState;

/// Out-of-band notices from the input actor to its supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputNotice {
    /// The user asked to quit (Esc or Ctrl-C).
    Quit,
    /// The event stream failed; the input actor has stopped.
    Error(String),
}

/// A mutable line buffer assembling keystrokes into message bodies.
///
/// Pure data type, no I/O: the actor feeds it characters, tests feed it
/// directly. Deletion is grapheme-aware so one backspace removes one
/// user-perceived character.
#[derive(Debug, Default)]
pub struct LineBuffer {
    content: String,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current buffer contents.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Check whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Append one character.
    pub fn push_char(&mut self, c: char) {
        self.content.push(c);
    }

    /// Remove the last grapheme. No-op on an empty buffer.
    pub fn backspace(&mut self) {
        if let Some((boundary, _)) = self.content.grapheme_indices(true).last() {
            self.content.truncate(boundary);
        }
    }

    /// Complete the line: returns the contents and clears the buffer, or
    /// `None` if the buffer is empty (an empty line is not a message).
    pub fn take_line(&mut self) -> Option<String> {
        if self.content.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.content))
        }
    }

    /// Process one character of a raw input stream.
    ///
    /// Line terminators complete the line, the two recognized delete codes
    /// (DEL 0x7f and BS 0x08) erase, everything else is appended. Returns a
    /// completed line when one terminates here.
    pub fn feed(&mut self, c: char) -> Option<String> {
        match c {
            '\n' | '\r' => self.take_line(),
            '\u{7f}' | '\u{8}' => {
                self.backspace();
                None
            }
            _ => {
                self.push_char(c);
                None
            }
        }
    }
}

/// Input actor that polls terminal key events.
#[derive(Debug)]
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `state` - Shared session state (outbound queue, input slot).
    /// * `username` - Identity stamped on composed messages.
    /// * `notice_tx` - Channel for quit requests and input faults.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    pub fn spawn(
        state: Arc<ChatState>,
        username: String,
        notice_tx: Sender<InputNotice>,
        poll_timeout: Duration,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("chatloop-input".to_string())
            .spawn(move || {
                Self::run_loop(&state, &username, &notice_tx, poll_timeout, &shutdown_clone);
            })
            .expect("Failed to spawn input thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    ///
    /// An event-stream fault is reported and ends this actor only; messages
    /// already enqueued are unaffected.
    fn run_loop(
        state: &Arc<ChatState>,
        username: &str,
        notice_tx: &Sender<InputNotice>,
        poll_timeout: Duration,
        shutdown: &Arc<AtomicBool>,
    ) {
        let mut line = LineBuffer::new();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if Self::handle_key(key.code, key.modifiers, &mut line, state, username) {
                            let _ = notice_tx.send(InputNotice::Quit);
                            break;
                        }
                        state.input.publish(line.as_str());
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "input event read failed");
                        let _ = notice_tx.send(InputNotice::Error(e.to_string()));
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "input event poll failed");
                    let _ = notice_tx.send(InputNotice::Error(e.to_string()));
                    break;
                }
            }
        }
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    fn handle_key(
        code: KeyCode,
        modifiers: KeyModifiers,
        line: &mut LineBuffer,
        state: &Arc<ChatState>,
        username: &str,
    ) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Enter => {
                if let Some(body) = line.take_line() {
                    let message = Message::new(&state.ids, username, body);
                    debug!(id = message.id(), "composed message");
                    state.outbound.push(message);
                }
            }
            KeyCode::Backspace => line.backspace(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                // Some terminals deliver the delete codes as plain
                // characters; treat both the same as Backspace.
                line.feed(c);
            }
            _ => {}
        }
        false
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
