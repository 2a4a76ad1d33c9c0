//! `InputSlot`: best-effort view of the in-progress input line.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shared slot where the input actor publishes the current line buffer
/// after every keystroke, and the render actor reads it once per frame.
///
/// Single writer, single reader. Publication is advisory: it carries no
/// ordering guarantee relative to the message queues, it only keeps the
/// prompt line fresh between frames.
#[derive(Debug, Default)]
pub struct InputSlot {
    line: Mutex<String>,
}

impl InputSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.line.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish the latest buffer contents.
    pub fn publish(&self, line: &str) {
        let mut slot = self.lock();
        slot.clear();
        slot.push_str(line);
    }

    /// Read the latest published line.
    pub fn snapshot(&self) -> String {
        self.lock().clone()
    }
}
