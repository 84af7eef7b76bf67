//! Handlers for exercising dispatch.

use async_trait::async_trait;
use ocf_ircbot::error::{HandlerError, HandlerResult};
use ocf_ircbot::{Bot, Handler, MatchedMessage};
use std::sync::{Arc, Mutex};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub label: &'static str,
    pub channel: String,
    pub nick: String,
    pub text: String,
    pub raw_text: String,
    pub groups: Vec<Option<String>>,
    pub is_oper: bool,
}

/// Invocations shared by every handler of one test, in call order.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

#[allow(dead_code)]
impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.label).collect()
    }

    pub fn count(&self, label: &str) -> usize {
        self.calls().iter().filter(|c| c.label == label).count()
    }

    pub fn handler(&self, label: &'static str) -> RecordingHandler {
        RecordingHandler {
            label,
            log: self.clone(),
            reply: None,
        }
    }
}

/// Records each invocation, optionally replying with capture group 1.
pub struct RecordingHandler {
    label: &'static str,
    log: CallLog,
    reply: Option<bool>,
}

#[allow(dead_code)]
impl RecordingHandler {
    /// Also respond with group 1, pinging when `ping` is set.
    pub fn echoing(mut self, ping: bool) -> Self {
        self.reply = Some(ping);
        self
    }
}

#[async_trait]
impl Handler for RecordingHandler {
    async fn handle(&self, _bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        self.log.0.lock().unwrap().push(Call {
            label: self.label,
            channel: msg.channel.to_string(),
            nick: msg.nick.to_string(),
            text: msg.text.to_string(),
            raw_text: msg.raw_text.to_string(),
            groups: msg
                .groups()
                .into_iter()
                .map(|g| g.map(str::to_string))
                .collect(),
            is_oper: msg.is_oper,
        });
        if let (Some(ping), Some(text)) = (self.reply, msg.group(1)) {
            msg.respond(text, ping)?;
        }
        Ok(())
    }
}

/// Always fails with a plugin error.
pub struct FailingHandler;

#[async_trait]
impl Handler for FailingHandler {
    async fn handle(&self, _bot: &Bot, _msg: &MatchedMessage<'_>) -> HandlerResult {
        Err(HandlerError::Plugin("boom".to_string()))
    }
}

/// Always fails with the given plugin error text.
pub struct VerboseFailingHandler(pub String);

#[async_trait]
impl Handler for VerboseFailingHandler {
    async fn handle(&self, _bot: &Bot, _msg: &MatchedMessage<'_>) -> HandlerResult {
        Err(HandlerError::Plugin(self.0.clone()))
    }
}

/// Always panics.
pub struct PanickingHandler;

#[async_trait]
impl Handler for PanickingHandler {
    async fn handle(&self, _bot: &Bot, _msg: &MatchedMessage<'_>) -> HandlerResult {
        panic!("handler blew up");
    }
}
