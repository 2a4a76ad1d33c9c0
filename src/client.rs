//! `ChatClient`: supervisor that ties the actors together.
//!
//! The client is the entry point for applications. It owns the shared
//! session state and the simulated wire, spawns the simulation actors
//! (relay, echo, broadcast), and can additionally drive a real terminal
//! with the input and render actors. Shutdown is cooperative: every actor
//! is signalled, then joined; a sleeping actor wakes early instead of
//! finishing its wait.

use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::{cursor, execute, terminal};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, info};

use crate::actor::{BroadcastActor, EchoActor, InputActor, InputNotice, RelayActor, RenderActor};
use crate::config::ChatConfig;
use crate::message::Message;
use crate::state::ChatState;
use crate::transport::Wire;

/// The chat client supervisor.
///
/// Constructing one starts the message-flow engine (relay, echo,
/// broadcast). [`ChatClient::run_terminal`] additionally attaches the
/// terminal-facing actors. Dropping the client signals and joins
/// everything.
#[derive(Debug)]
pub struct ChatClient {
    /// Configuration, fixed at startup.
    config: ChatConfig,
    /// Shared session state.
    state: Arc<ChatState>,
    /// Relay actor handle.
    relay: Option<RelayActor>,
    /// Echo actor handle.
    echo: Option<EchoActor>,
    /// Broadcast actor handle.
    broadcast: Option<BroadcastActor>,
    /// Input actor handle (only while a terminal session runs).
    input: Option<InputActor>,
    /// Render actor handle (only while a terminal session runs).
    render: Option<RenderActor>,
    /// Notice channel, kept open for the input actor.
    notice_tx: Sender<InputNotice>,
    notice_rx: Receiver<InputNotice>,
}

impl ChatClient {
    /// Start a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new() -> io::Result<Self> {
        Self::with_config(ChatConfig::default())
    }

    /// Start a client with custom configuration.
    ///
    /// Spawns the relay, echo, and broadcast actors immediately; the
    /// session is live once this returns.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the configuration fails validation
    /// (empty username or preset tables).
    pub fn with_config(config: ChatConfig) -> io::Result<Self> {
        config
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let state = Arc::new(ChatState::new());
        let wire = Wire::new();
        let (notice_tx, notice_rx) = unbounded();

        let relay = RelayActor::spawn(
            state.clone(),
            config.username.clone(),
            wire.inbox_tx.clone(),
            wire.outbox_rx.clone(),
        );
        let echo = EchoActor::spawn(
            wire.inbox_rx.clone(),
            wire.outbox_tx.clone(),
            config.echo_delay_max,
            StdRng::from_entropy(),
        );
        let broadcast = BroadcastActor::spawn(
            wire.outbox_tx.clone(),
            state.ids.clone(),
            config.roster.clone(),
            config.banter.clone(),
            config.broadcast_period,
            StdRng::from_entropy(),
        );

        info!(username = %config.username, "chat session started");

        Ok(Self {
            config,
            state,
            relay: Some(relay),
            echo: Some(echo),
            broadcast: Some(broadcast),
            input: None,
            render: None,
            notice_tx,
            notice_rx,
        })
    }

    /// The local identity.
    pub fn username(&self) -> &str {
        &self.config.username
    }

    /// The shared session state, for observation.
    pub fn state(&self) -> &Arc<ChatState> {
        &self.state
    }

    /// Compose a message programmatically, as if the user typed it and
    /// pressed Enter. Empty bodies are ignored, like an empty input line.
    pub fn send(&self, body: impl Into<String>) {
        let body = body.into();
        if body.is_empty() {
            return;
        }
        let message = Message::new(&self.state.ids, self.config.username.clone(), body);
        debug!(id = message.id(), "composed message");
        self.state.outbound.push(message);
    }

    /// Run an interactive session on the real terminal.
    ///
    /// Enables raw mode, attaches the input and render actors, and blocks
    /// until the user quits (Esc or Ctrl-C) or the input stream fails. The
    /// terminal is restored before returning; the simulation actors keep
    /// running either way.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be toggled, or the error
    /// reported by a failed input stream.
    pub fn run_terminal(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        self.input = Some(InputActor::spawn(
            self.state.clone(),
            self.config.username.clone(),
            self.notice_tx.clone(),
            self.config.input_poll_timeout,
        ));
        self.render = Some(RenderActor::spawn(
            self.state.clone(),
            self.config.render_interval,
            io::stdout(),
        ));

        // Block until the input actor reports a reason to stop.
        let outcome = match self.notice_rx.recv() {
            Ok(InputNotice::Quit) | Err(_) => Ok(()),
            Ok(InputNotice::Error(e)) => Err(io::Error::new(io::ErrorKind::Other, e)),
        };

        if let Some(render) = self.render.take() {
            render.join();
        }
        if let Some(input) = self.input.take() {
            input.join();
        }

        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        let _ = writeln!(stdout);
        terminal::disable_raw_mode()?;

        info!("terminal session ended");
        outcome
    }

    /// Signal every actor and wait for all of them to finish.
    ///
    /// Actors are signalled first, then joined, so none waits out a full
    /// sleep while a peer holds the stop flag down.
    pub fn stop(&mut self) {
        if let Some(relay) = &self.relay {
            relay.shutdown();
        }
        if let Some(echo) = &self.echo {
            echo.shutdown();
        }
        if let Some(broadcast) = &self.broadcast {
            broadcast.shutdown();
        }
        if let Some(input) = &self.input {
            input.shutdown();
        }
        if let Some(render) = &self.render {
            render.shutdown();
        }

        if let Some(input) = self.input.take() {
            input.join();
        }
        if let Some(render) = self.render.take() {
            render.join();
        }
        if let Some(relay) = self.relay.take() {
            relay.join();
        }
        if let Some(echo) = self.echo.take() {
            echo.join();
        }
        if let Some(broadcast) = self.broadcast.take() {
            broadcast.join();
        }
    }
}

impl Drop for ChatClient {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    fn fast_config() -> ChatConfig {
        let mut config = ChatConfig::new("local");
        config.echo_delay_max = Duration::from_millis(20);
        config.broadcast_period = Duration::from_millis(25);
        config.roster = vec!["ada".into(), "brian".into()];
        config.banter = vec!["hi".into(), "hello there".into()];
        config
    }

    fn wait_until(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        done()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ChatConfig::new("local");
        config.roster.clear();
        let err = ChatClient::with_config(config).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_sent_message_is_echoed_into_log() {
        let client = ChatClient::with_config(fast_config()).unwrap();
        client.send("hello");

        let state = client.state().clone();
        assert!(wait_until(Duration::from_secs(2), || state
            .log
            .snapshot()
            .iter()
            .any(|m| m.sender() == "local" && m.body() == "hello")));
        assert!(wait_until(Duration::from_secs(1), || state.pending.is_empty()));
        assert!(state.outbound.is_empty());
    }

    #[test]
    fn test_broadcast_reaches_log_without_pending() {
        let client = ChatClient::with_config(fast_config()).unwrap();
        let state = client.state().clone();

        assert!(wait_until(Duration::from_secs(2), || !state.log.is_empty()));
        let log = state.log.snapshot();
        assert!(log.iter().all(|m| m.sender() != "local"));
        assert!(state.pending.is_empty());
    }

    #[test]
    fn test_empty_send_is_ignored() {
        let client = ChatClient::with_config(fast_config()).unwrap();
        client.send("");
        assert!(client.state().outbound.is_empty());
    }

    #[test]
    fn test_stop_is_prompt_despite_long_timers() {
        let mut config = fast_config();
        config.echo_delay_max = Duration::from_secs(300);
        config.broadcast_period = Duration::from_secs(300);
        let mut client = ChatClient::with_config(config).unwrap();
        client.send("will never be acked in time");

        thread::sleep(Duration::from_millis(50));
        let start = Instant::now();
        client.stop();
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
