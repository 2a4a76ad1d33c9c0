//! Configuration for a chat session.

use std::time::Duration;

/// Configuration for the chat client and its actors.
///
/// Timing and randomness bounds are parameters here rather than literals in
/// the actor bodies, so tests can shrink them to milliseconds. Defaults:
/// echo delay up to 3 s, a broadcast every 10 s, a repaint every second.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The local user's identity. Fixed at startup, immutable thereafter.
    pub username: String,
    /// Upper bound (inclusive) of the uniform random echo delay.
    pub echo_delay_max: Duration,
    /// Period between unsolicited broadcast messages.
    pub broadcast_period: Duration,
    /// Interval between rendered frames.
    pub render_interval: Duration,
    /// Input event poll timeout (how often the input actor checks shutdown).
    pub input_poll_timeout: Duration,
    /// Participant names the broadcast actor draws senders from.
    pub roster: Vec<String>,
    /// Message bodies the broadcast actor draws from.
    pub banter: Vec<String>,
}

impl ChatConfig {
    /// Configuration with default timings for the given local identity.
    ///
    /// The preset tables start with a single placeholder entry each; demos
    /// replace them with their own data. Both must stay non-empty.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            echo_delay_max: Duration::from_millis(3000),
            broadcast_period: Duration::from_secs(10),
            render_interval: Duration::from_secs(1),
            input_poll_timeout: Duration::from_millis(10),
            roster: vec![String::from("guest")],
            banter: vec![String::from("hello")],
        }
    }

    /// Check the invariants the actors rely on.
    ///
    /// Returns a description of the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.is_empty() {
            return Err("username must not be empty".into());
        }
        if self.roster.is_empty() {
            return Err("preset roster must not be empty".into());
        }
        if self.banter.is_empty() {
            return Err("preset banter table must not be empty".into());
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new("guest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = ChatConfig::default();
        assert_eq!(config.echo_delay_max, Duration::from_millis(3000));
        assert_eq!(config.broadcast_period, Duration::from_secs(10));
        assert_eq!(config.render_interval, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_tables() {
        let mut config = ChatConfig::new("me");
        config.roster.clear();
        assert!(config.validate().is_err());

        let mut config = ChatConfig::new("me");
        config.banter.clear();
        assert!(config.validate().is_err());

        let config = ChatConfig::new("");
        assert!(config.validate().is_err());
    }
}
