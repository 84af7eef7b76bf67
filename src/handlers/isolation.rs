//! Crash isolation around listener handlers.
//!
//! A handler that returns an error or panics must not take the bot down or
//! stop later listeners from running. The fault is logged, announced in the
//! originating channel with one line, and handed to problem reporting.

use super::context::MatchedMessage;
use super::listener::Listener;
use crate::bot::Bot;
use crate::error::{HandlerError, panic_message};
use crate::outbound::{chunk_budget, segment};
use crate::report::ProblemReport;
use crate::telemetry::{ListenerTimer, spans};
use futures_util::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use tracing::{Instrument, error, warn};

/// How a handler invocation failed.
#[derive(Debug)]
pub enum Fault {
    Error(HandlerError),
    Panic(String),
}

impl Fault {
    /// Static label for metrics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Error(e) => e.error_code(),
            Self::Panic(_) => "panic",
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(e) => write!(f, "{e}"),
            Self::Panic(message) => write!(f, "panic: {message}"),
        }
    }
}

/// Run one listener's handler with faults contained.
///
/// Returns the fault after it was logged, announced and reported, so callers
/// only need it for bookkeeping.
pub async fn invoke(
    bot: &Bot,
    listener: &Listener,
    msg: &MatchedMessage<'_>,
) -> Result<(), Fault> {
    let span = spans::listener(listener.plugin(), listener.name(), msg.channel);
    let _timer = ListenerTimer::new(listener.plugin());
    crate::metrics::record_invocation(listener.plugin());

    let outcome = AssertUnwindSafe(listener.handler().handle(bot, msg))
        .catch_unwind()
        .instrument(span)
        .await;

    let fault = match outcome {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => Fault::Error(e),
        Err(payload) => Fault::Panic(panic_message(payload.as_ref())),
    };

    contain(bot, listener, msg, &fault).await;
    Err(fault)
}

/// The announced part of `summary`: its first line, cut to what fits in a
/// single PRIVMSG. The full text goes to the problem report.
fn notice_line<'a>(summary: &'a str, target: &str, max_line_bytes: usize) -> &'a str {
    let first = summary.lines().next().unwrap_or_default();
    segment(target, first, max_line_bytes)
        .next()
        .unwrap_or_default()
}

async fn contain(bot: &Bot, listener: &Listener, msg: &MatchedMessage<'_>, fault: &Fault) {
    let summary = format!(
        "ircbot exception in {}/{}: {}",
        listener.plugin(),
        listener.name(),
        fault
    );

    error!(
        plugin = listener.plugin(),
        handler = listener.name(),
        channel = %msg.channel,
        nick = %msg.nick,
        error = %fault,
        "Listener handler failed"
    );
    crate::metrics::record_handler_fault(listener.plugin(), fault.code());

    let notice = notice_line(
        &summary,
        msg.responder.target(),
        msg.responder.max_line_bytes(),
    );
    if let Err(e) = msg.respond(notice, false) {
        warn!(channel = %msg.channel, error = %e, "Failed to announce handler fault");
    }

    let detail = match fault {
        Fault::Error(HandlerError::Internal(e)) => format!("{e:?}"),
        other => other.to_string(),
    };

    let report = ProblemReport {
        plugin: Some(listener.plugin().to_string()),
        handler: Some(listener.name().to_string()),
        channel: Some(msg.channel.to_string()),
        nick: Some(msg.nick.to_string()),
        is_oper: Some(msg.is_oper),
        text: Some(msg.text.to_string()),
        raw_text: Some(msg.raw_text.to_string()),
        groups: msg
            .groups()
            .into_iter()
            .map(|g| g.map(str::to_string))
            .collect(),
        ..ProblemReport::new(summary)
    }
    .with_detail(detail);

    bot.reporting().handle_error(&report).await;
}
