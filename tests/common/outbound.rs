//! Recording outbound connection and a static membership view.

use ocf_ircbot::error::OutboundError;
use ocf_ircbot::membership::ChannelMembership;
use ocf_ircbot::outbound::Outbound;
use std::collections::HashSet;
use std::sync::Mutex;

/// One command the bot issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Privmsg { target: String, text: String },
    Topic { channel: String, topic: String },
    Join(String),
    Part(String),
}

/// Outbound sink that remembers everything it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingOutbound {
    sent: Mutex<Vec<Sent>>,
}

#[allow(dead_code)]
impl RecordingOutbound {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Text of every PRIVMSG to `target`, in order.
    pub fn messages_to(&self, target: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Privmsg { target: t, text } if t == target => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn topics(&self) -> Vec<(String, String)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Topic { channel, topic } => Some((channel, topic)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    fn push(&self, sent: Sent) -> Result<(), OutboundError> {
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

impl Outbound for RecordingOutbound {
    fn privmsg(&self, target: &str, text: &str) -> Result<(), OutboundError> {
        self.push(Sent::Privmsg {
            target: target.to_string(),
            text: text.to_string(),
        })
    }

    fn topic(&self, channel: &str, topic: &str) -> Result<(), OutboundError> {
        self.push(Sent::Topic {
            channel: channel.to_string(),
            topic: topic.to_string(),
        })
    }

    fn join(&self, channel: &str) -> Result<(), OutboundError> {
        self.push(Sent::Join(channel.to_string()))
    }

    fn part(&self, channel: &str) -> Result<(), OutboundError> {
        self.push(Sent::Part(channel.to_string()))
    }
}

/// Fixed set of `(channel, nick)` operator pairs.
#[derive(Debug, Default, Clone)]
pub struct StaticMembership {
    opers: HashSet<(String, String)>,
}

#[allow(dead_code)]
impl StaticMembership {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn oper(channel: &str, nick: &str) -> Self {
        Self::default().with_oper(channel, nick)
    }

    pub fn with_oper(mut self, channel: &str, nick: &str) -> Self {
        self.opers.insert((channel.to_string(), nick.to_string()));
        self
    }
}

impl ChannelMembership for StaticMembership {
    fn is_oper(&self, channel: &str, nick: &str) -> bool {
        self.opers
            .contains(&(channel.to_string(), nick.to_string()))
    }
}
