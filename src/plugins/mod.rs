//! Bundled plugins.
//!
//! Each plugin is one `register` function that populates the listener
//! registry. [`PLUGINS`] is the static manifest: adding a plugin means adding
//! a module and a line here.

pub mod channels;
pub mod help;
pub mod ping;
pub mod replace;
pub mod reverse;
pub mod scramble;
pub mod thanks;
pub mod theory_practice;
pub mod topic;
pub mod widetext;

use crate::bot::Bot;
use crate::error::RegistryError;
use crate::handlers::{ListenerRegistry, MatchedMessage, Registrar};
use tracing::info;

/// A plugin's registration entry point.
pub type RegisterFn = fn(&mut Registrar<'_>) -> Result<(), RegistryError>;

/// One manifest entry.
#[derive(Clone, Copy)]
pub struct Plugin {
    pub name: &'static str,
    pub register: RegisterFn,
}

/// Every bundled plugin, registered in this order.
pub const PLUGINS: &[Plugin] = &[
    Plugin {
        name: "channels",
        register: channels::register,
    },
    Plugin {
        name: "help",
        register: help::register,
    },
    Plugin {
        name: "ping",
        register: ping::register,
    },
    Plugin {
        name: "replace",
        register: replace::register,
    },
    Plugin {
        name: "reverse",
        register: reverse::register,
    },
    Plugin {
        name: "scramble",
        register: scramble::register,
    },
    Plugin {
        name: "thanks",
        register: thanks::register,
    },
    Plugin {
        name: "theory_practice",
        register: theory_practice::register,
    },
    Plugin {
        name: "topic",
        register: topic::register,
    },
    Plugin {
        name: "widetext",
        register: widetext::register,
    },
];

/// Register every plugin in [`PLUGINS`]. The first failure aborts.
pub fn register_all(registry: &mut ListenerRegistry) -> Result<(), RegistryError> {
    for plugin in PLUGINS {
        (plugin.register)(&mut registry.registrar(plugin.name))?;
    }
    info!(
        plugins = PLUGINS.len(),
        listeners = registry.len(),
        "Registered plugins"
    );
    Ok(())
}

/// Capture group 1, or the most recent line in the channel when the command
/// came without an argument.
pub(crate) fn argument_or_last_line(bot: &Bot, msg: &MatchedMessage<'_>) -> Option<String> {
    match msg.group(1) {
        Some(text) => Some(text.to_string()),
        None => bot.history().most_recent(msg.channel).map(|entry| entry.text),
    }
}
