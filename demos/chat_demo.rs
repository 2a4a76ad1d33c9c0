//! Chat Demo: the full simulation on a real terminal.
//!
//! Type a line and press Enter to send it; the simulated remote echoes it
//! back after up to three seconds, and preset participants chime in every
//! ten seconds. Messages awaiting confirmation show a `[sending...]` tag.
//!
//! Press Esc or Ctrl-C to quit. Set `RUST_LOG=chatloop=debug` and redirect
//! stderr to a file to watch the actors work.

use chatloop::{ChatClient, ChatConfig};

/// Participants the simulated remote side speaks for.
const ROSTER: &[&str] = &["ada", "brian", "grace", "dennis", "barbara"];

/// What they have to say.
const BANTER: &[&str] = &[
    "anyone else seeing the build go red?",
    "just pushed a fix, pull before you start",
    "lunch at noon?",
    "the retro moved to thursday",
    "who owns the flaky integration test?",
    "demo in ten minutes, join when you can",
    "got the staging box back up",
    "reviews welcome on my open PR",
    "heads up, deploy window starts at four",
    "the new dashboards look great",
    "can someone rubber-duck a borrow checker fight with me?",
    "coffee machine on three is working again",
];

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = ChatConfig::new("jay");
    config.roster = ROSTER.iter().map(|s| (*s).to_string()).collect();
    config.banter = BANTER.iter().map(|s| (*s).to_string()).collect();

    let mut client = ChatClient::with_config(config)?;
    client.run_terminal()
}
