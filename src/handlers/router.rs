//! Message routing: match one inbound line against every listener.
//!
//! Listeners are evaluated in registration order and every listener that
//! passes its gates and matches fires (fan-out); there is no first-match
//! short-circuit. A failing handler is contained and evaluation continues.

use super::context::{IncomingMessage, MatchedMessage, Privilege, Responder};
use super::isolation;
use super::registry::ListenerRegistry;
use crate::bot::Bot;
use tracing::{Instrument, debug, debug_span};

/// Whether a line opens by addressing the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention<'a> {
    pub mentioned: bool,
    /// Text after the mention token; the whole text when not mentioned.
    pub stripped: &'a str,
}

/// Detect a leading `"<nickname> "` or `"<nickname>:"` (ASCII
/// case-insensitive) and chop it off.
pub fn parse_mention<'a>(nickname: &str, text: &'a str) -> Mention<'a> {
    let n = nickname.len();
    let addressed = !nickname.is_empty()
        && text.len() > n
        && text.is_char_boundary(n)
        && text[..n].eq_ignore_ascii_case(nickname)
        && matches!(text.as_bytes()[n], b' ' | b':');

    if addressed {
        Mention {
            mentioned: true,
            stripped: text[n + 1..].trim_start_matches(' '),
        }
    } else {
        Mention {
            mentioned: false,
            stripped: text,
        }
    }
}

/// Counts from one dispatch, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Listeners whose gates passed and whose pattern matched.
    pub matched: usize,
    /// Matched listeners whose handler faulted.
    pub failed: usize,
}

/// Routes inbound lines to listeners and records channel history.
#[derive(Debug)]
pub struct Router {
    registry: ListenerRegistry,
    nickname: String,
    command_escape: char,
}

impl Router {
    pub fn new(
        registry: ListenerRegistry,
        nickname: impl Into<String>,
        command_escape: char,
    ) -> Self {
        Self {
            registry,
            nickname: nickname.into(),
            command_escape,
        }
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Dispatch one line.
    ///
    /// Private messages count as mentioned and carry no operator standing,
    /// whatever `privilege` says. After every listener was evaluated the line
    /// is appended to the channel history unless it starts with the command
    /// escape character.
    pub async fn dispatch(
        &self,
        bot: &Bot,
        message: &IncomingMessage,
        privilege: Privilege,
        responder: &Responder,
    ) -> DispatchSummary {
        let mention = if message.direct {
            Mention {
                mentioned: true,
                stripped: parse_mention(&self.nickname, &message.text).stripped,
            }
        } else {
            parse_mention(&self.nickname, &message.text)
        };
        let privilege = if message.direct {
            Privilege::default()
        } else {
            privilege
        };

        let span = debug_span!(
            "ircbot.dispatch",
            channel = %message.channel,
            nick = %message.nick,
            mentioned = mention.mentioned,
            oper = privilege.is_oper,
        );

        let summary = async {
            let mut summary = DispatchSummary::default();

            for listener in self.registry.listeners() {
                let gate = listener.gate();

                if gate.requires_mention() && !mention.mentioned {
                    continue;
                }
                if !gate.admits(privilege) {
                    continue;
                }

                let text = if gate.requires_mention() {
                    mention.stripped
                } else {
                    message.text.as_str()
                };

                let Some(captures) = listener.pattern().captures(text) else {
                    continue;
                };

                let matched = MatchedMessage {
                    channel: &message.channel,
                    text,
                    raw_text: &message.text,
                    captures,
                    is_oper: privilege.is_oper,
                    nick: &message.nick,
                    responder,
                };

                summary.matched += 1;
                if isolation::invoke(bot, listener, &matched).await.is_err() {
                    summary.failed += 1;
                }
            }

            summary
        }
        .instrument(span)
        .await;

        // Commands are kept out of history so replay plugins act on chat.
        if !message.text.starts_with(self.command_escape) {
            bot.history()
                .append(&message.channel, &message.nick, &message.text);
        }

        crate::metrics::record_dispatch();
        debug!(
            channel = %message.channel,
            matched = summary.matched,
            failed = summary.failed,
            "Dispatched message"
        );
        summary
    }
}
