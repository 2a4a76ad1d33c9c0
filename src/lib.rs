//! # Chatloop
//!
//! A simulated real-time chat client: a local stand-in for a networked chat
//! app, used to exercise concurrency and UI-refresh behavior before a real
//! transport exists.
//!
//! ## Core Concepts
//!
//! - **Actor model**: one thread each for input, relay, echo, broadcast,
//!   and render, communicating only through shared queues
//! - **Send/acknowledge protocol**: locally composed messages stay visible
//!   as `[sending...]` until the simulated remote echoes them back
//! - **Simulated transport**: two in-process channels standing in for the
//!   socket, with randomized echo latency and periodic remote chatter
//! - **Snapshot rendering**: each frame is a single consistent read of the
//!   session, flushed in one write
//!
//! ## Example
//!
//! ```rust,no_run
//! use chatloop::{ChatClient, ChatConfig};
//!
//! let mut client = ChatClient::with_config(ChatConfig::new("jay"))?;
//! client.run_terminal()?;
//! # Ok::<(), std::io::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod client;
pub mod config;
pub mod message;
pub mod state;
pub mod terminal;
pub mod transport;

// Re-exports for convenience
pub use actor::{
    BroadcastActor, EchoActor, InputActor, InputNotice, LineBuffer, RelayActor, RenderActor,
};
pub use client::ChatClient;
pub use config::ChatConfig;
pub use message::{Message, MessageIds};
pub use state::{ChatLog, ChatSnapshot, ChatState, InputSlot, OutboundQueue, PendingSet};
pub use terminal::OutputBuffer;
pub use transport::Wire;
