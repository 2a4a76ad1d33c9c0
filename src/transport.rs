//! Simulated transport: the two unidirectional channels standing in for a
//! network socket.
//!
//! The inbox carries client → remote traffic, the outbox remote → client.
//! Both are unbounded crossbeam channels: FIFO per producer, every entry
//! consumed exactly once. The outbox deliberately has two producers (echo
//! and broadcast), so no global order holds across them, only each
//! producer's own insertion order.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::message::Message;

/// The simulated wire between the client and the remote side.
///
/// The relay holds `inbox_tx` and `outbox_rx`; the remote-side actors hold
/// the opposite ends. Dropping all senders of a channel disconnects it,
/// which the consumers treat as the wire going away.
#[derive(Debug, Clone)]
pub struct Wire {
    /// Client → remote, sending half.
    pub inbox_tx: Sender<Message>,
    /// Client → remote, receiving half.
    pub inbox_rx: Receiver<Message>,
    /// Remote → client, sending half.
    pub outbox_tx: Sender<Message>,
    /// Remote → client, receiving half.
    pub outbox_rx: Receiver<Message>,
}

impl Wire {
    /// Create a fresh, empty wire.
    pub fn new() -> Self {
        let (inbox_tx, inbox_rx) = unbounded();
        let (outbox_tx, outbox_rx) = unbounded();
        Self {
            inbox_tx,
            inbox_rx,
            outbox_tx,
            outbox_rx,
        }
    }
}

impl Default for Wire {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageIds;

    #[test]
    fn test_wire_fifo_per_producer() {
        let ids = MessageIds::new();
        let wire = Wire::new();
        wire.inbox_tx.send(Message::new(&ids, "me", "one")).unwrap();
        wire.inbox_tx.send(Message::new(&ids, "me", "two")).unwrap();

        assert_eq!(wire.inbox_rx.recv().unwrap().body(), "one");
        assert_eq!(wire.inbox_rx.recv().unwrap().body(), "two");
    }

    #[test]
    fn test_outbox_accepts_two_producers() {
        let ids = MessageIds::new();
        let wire = Wire::new();
        let echo_tx = wire.outbox_tx.clone();
        let broadcast_tx = wire.outbox_tx.clone();

        echo_tx.send(Message::new(&ids, "me", "echoed")).unwrap();
        broadcast_tx
            .send(Message::new(&ids, "other", "unsolicited"))
            .unwrap();

        let mut bodies: Vec<String> = wire
            .outbox_rx
            .try_iter()
            .map(|m| m.body().to_string())
            .collect();
        bodies.sort();
        assert_eq!(bodies, ["echoed", "unsolicited"]);
    }
}
