//! Outbound connection primitives.
//!
//! The bot never talks to the socket directly. Everything it sends goes
//! through an [`Outbound`] implementation supplied by the connection layer
//! (see `network`), which keeps dispatch testable without a server.

pub mod segment;

pub use segment::{Segments, chunk_budget, framing_len, segment};

use crate::error::OutboundError;

/// Commands the bot issues to the chat connection.
pub trait Outbound: Send + Sync {
    /// Send one already-segmented line of text.
    fn privmsg(&self, target: &str, text: &str) -> Result<(), OutboundError>;

    /// Request a topic change.
    fn topic(&self, channel: &str, topic: &str) -> Result<(), OutboundError>;

    fn join(&self, channel: &str) -> Result<(), OutboundError>;

    fn part(&self, channel: &str) -> Result<(), OutboundError>;
}

/// Send `text` to `target`, one PRIVMSG per line and per segment.
///
/// Empty lines are skipped since servers reject empty messages. Returns the
/// number of PRIVMSG lines issued.
pub fn say(
    outbound: &dyn Outbound,
    target: &str,
    text: &str,
    max_line_bytes: usize,
) -> Result<usize, OutboundError> {
    let mut sent = 0;
    for line in text.lines().filter(|l| !l.is_empty()) {
        for chunk in segment(target, line, max_line_bytes) {
            outbound.privmsg(target, chunk)?;
            sent += 1;
        }
    }
    crate::metrics::record_outbound_chunks(sent);
    Ok(sent)
}
