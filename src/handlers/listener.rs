//! Listener definitions: pattern, handler and gating requirements.

use super::context::{MatchedMessage, Privilege};
use crate::bot::Bot;
use crate::error::HandlerResult;
use async_trait::async_trait;
use regex::Regex;
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

/// A plugin command handler.
///
/// Handlers have no return value beyond success or failure; everything they
/// say goes through [`MatchedMessage::respond`] or the [`Bot`] outbound
/// primitives. A handler that errors or panics is contained by the router.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult;
}

/// Gating requirements of a listener, combinable with `|`.
///
/// ```ignore
/// Gate::MENTION | Gate::PRIVILEGED_OPER
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gate(u8);

impl Gate {
    /// Fires on any matching line.
    pub const NONE: Gate = Gate(0);
    /// Only lines addressed to the bot; matched against the text after the
    /// mention.
    pub const MENTION: Gate = Gate(1);
    /// Sender must be a channel operator.
    pub const OPER: Gate = Gate(1 << 1);
    /// Sender must be a channel operator in a privileged channel.
    pub const PRIVILEGED_OPER: Gate = Gate(1 << 2);

    #[inline]
    pub const fn contains(self, other: Gate) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn requires_mention(self) -> bool {
        self.contains(Self::MENTION)
    }

    /// Whether a sender with `privilege` passes the operator gates.
    ///
    /// A privileged-oper listener never fires outside privileged channels:
    /// anyone can create a channel and op themselves there.
    pub fn admits(self, privilege: Privilege) -> bool {
        let needs_oper = self.contains(Self::OPER) || self.contains(Self::PRIVILEGED_OPER);
        if needs_oper && !privilege.is_oper {
            return false;
        }
        if self.contains(Self::PRIVILEGED_OPER) && !privilege.is_privileged_channel {
            return false;
        }
        true
    }
}

impl BitOr for Gate {
    type Output = Gate;

    fn bitor(self, rhs: Gate) -> Gate {
        Gate(self.0 | rhs.0)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (Self::MENTION, "mention"),
            (Self::OPER, "oper"),
            (Self::PRIVILEGED_OPER, "privileged-oper"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect();

        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("+"))
        }
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gate({self})")
    }
}

/// A registered (pattern, handler, gate) binding. Immutable once built.
#[derive(Clone)]
pub struct Listener {
    pub(super) pattern: Regex,
    pub(super) handler: Arc<dyn Handler>,
    pub(super) gate: Gate,
    pub(super) help: String,
    pub(super) plugin: &'static str,
    pub(super) name: &'static str,
}

impl Listener {
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Name of the plugin that registered this listener.
    pub fn plugin(&self) -> &'static str {
        self.plugin
    }

    /// Short type name of the handler.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("plugin", &self.plugin)
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("gate", &self.gate)
            .finish()
    }
}
