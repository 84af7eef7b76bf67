//! Listener registry.
//!
//! Append-only: plugins register at startup, registration order is the order
//! listeners are evaluated in, and nothing is removed while the bot runs.

use super::listener::{Gate, Handler, Listener};
use crate::error::RegistryError;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Every listener the plugins registered, in registration order.
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and append a listener.
    ///
    /// Patterns use search semantics: they may match anywhere in the text
    /// unless anchored with `^`.
    pub fn register<H>(
        &mut self,
        plugin: &'static str,
        pattern: &str,
        handler: H,
        gate: Gate,
        help: &str,
    ) -> Result<(), RegistryError>
    where
        H: Handler + 'static,
    {
        let compiled = Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
            plugin,
            pattern: pattern.to_string(),
            source,
        })?;

        let name = short_type_name::<H>();
        debug!(plugin, handler = name, pattern, gate = %gate, "Registered listener");

        self.listeners.push(Listener {
            pattern: compiled,
            handler: Arc::new(handler),
            gate,
            help: help.to_string(),
            plugin,
            name,
        });
        Ok(())
    }

    /// A registration handle scoped to one plugin.
    pub fn registrar(&mut self, plugin: &'static str) -> Registrar<'_> {
        Registrar {
            plugin,
            registry: self,
        }
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Plugin names in first-registration order, without duplicates.
    pub fn plugins(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for listener in &self.listeners {
            if !names.contains(&listener.plugin) {
                names.push(listener.plugin);
            }
        }
        names
    }
}

/// What a plugin's `register` function receives.
pub struct Registrar<'a> {
    plugin: &'static str,
    registry: &'a mut ListenerRegistry,
}

impl Registrar<'_> {
    pub fn plugin(&self) -> &'static str {
        self.plugin
    }

    /// Register a listener on behalf of this plugin.
    pub fn listen<H>(
        &mut self,
        pattern: &str,
        handler: H,
        gate: Gate,
        help: &str,
    ) -> Result<(), RegistryError>
    where
        H: Handler + 'static,
    {
        self.registry
            .register(self.plugin, pattern, handler, gate, help)
    }
}

/// `ocf_ircbot::plugins::reverse::ReverseHandler` -> `ReverseHandler`.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
