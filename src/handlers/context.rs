//! Per-message types handed through dispatch.
//!
//! - [`IncomingMessage`]: one inbound chat line, as delivered.
//! - [`Privilege`]: sender standing derived for that line.
//! - [`Responder`]: the reply path bound to the line's origin.
//! - [`MatchedMessage`]: what a handler receives for one listener match.

use crate::error::OutboundError;
use crate::outbound::{self, Outbound};
use chrono::{DateTime, Utc};
use regex::Captures;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// One inbound chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Channel name, or the sender's nick for a private message.
    pub channel: String,
    pub nick: String,
    pub text: String,
    /// Sent directly to the bot rather than to a channel.
    pub direct: bool,
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    /// A line said in `channel`.
    pub fn channel(
        channel: impl Into<String>,
        nick: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            nick: nick.into(),
            text: text.into(),
            direct: false,
            received_at: Utc::now(),
        }
    }

    /// A private message; its history and replies are keyed by the sender.
    pub fn direct(nick: impl Into<String>, text: impl Into<String>) -> Self {
        let nick = nick.into();
        Self {
            channel: nick.clone(),
            nick,
            text: text.into(),
            direct: true,
            received_at: Utc::now(),
        }
    }
}

/// Sender standing for one line. Derived per message, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Privilege {
    /// Sender holds channel operator status where the line was said.
    pub is_oper: bool,
    /// The line was said in an administrative channel.
    pub is_privileged_channel: bool,
}

/// Reply path for one inbound line.
#[derive(Clone)]
pub struct Responder {
    target: String,
    /// Nick prefixed to pinging replies; `None` for private messages.
    ping_nick: Option<String>,
    outbound: Arc<dyn Outbound>,
    max_line_bytes: usize,
}

impl Responder {
    /// Replies go to `channel`, pinging `nick` when asked to.
    pub fn channel(
        channel: impl Into<String>,
        nick: impl Into<String>,
        outbound: Arc<dyn Outbound>,
        max_line_bytes: usize,
    ) -> Self {
        Self {
            target: channel.into(),
            ping_nick: Some(nick.into()),
            outbound,
            max_line_bytes,
        }
    }

    /// Replies go privately to `nick`; pinging makes no sense there.
    pub fn direct(
        nick: impl Into<String>,
        outbound: Arc<dyn Outbound>,
        max_line_bytes: usize,
    ) -> Self {
        Self {
            target: nick.into(),
            ping_nick: None,
            outbound,
            max_line_bytes,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Say `text` back where the message came from.
    pub fn respond(&self, text: &str, ping: bool) -> Result<(), OutboundError> {
        let line = match (&self.ping_nick, ping) {
            (Some(nick), true) => Cow::Owned(format!("{nick}: {text}")),
            _ => Cow::Borrowed(text),
        };
        outbound::say(
            self.outbound.as_ref(),
            &self.target,
            &line,
            self.max_line_bytes,
        )?;
        Ok(())
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("target", &self.target)
            .field("ping_nick", &self.ping_nick)
            .field("max_line_bytes", &self.max_line_bytes)
            .finish_non_exhaustive()
    }
}

/// A message that matched a listener.
#[derive(Debug)]
pub struct MatchedMessage<'a> {
    /// Channel (or sender nick for private messages).
    pub channel: &'a str,
    /// Text the pattern was matched against: the bot mention is chopped off
    /// for mention-gated listeners.
    pub text: &'a str,
    /// The line exactly as received.
    pub raw_text: &'a str,
    pub captures: Captures<'a>,
    pub is_oper: bool,
    pub nick: &'a str,
    pub(crate) responder: &'a Responder,
}

impl<'a> MatchedMessage<'a> {
    /// Capture group `index` (0 is the whole match).
    pub fn group(&self, index: usize) -> Option<&'a str> {
        self.captures.get(index).map(|m| m.as_str())
    }

    /// Capture groups 1..n, `None` for groups that did not participate.
    pub fn groups(&self) -> Vec<Option<&'a str>> {
        (1..self.captures.len()).map(|i| self.group(i)).collect()
    }

    /// Reply in the originating channel, prefixed with the sender's nick when
    /// `ping` is set.
    pub fn respond(&self, text: &str, ping: bool) -> Result<(), OutboundError> {
        self.responder.respond(text, ping)
    }
}
