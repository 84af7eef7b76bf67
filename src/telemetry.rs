//! Telemetry utilities for handler timing and dispatch spans.

use std::time::Instant;

/// Guard for timing a handler invocation.
///
/// Records latency for the plugin when dropped, including when the handler
/// faulted.
pub struct ListenerTimer {
    plugin: &'static str,
    start: Instant,
}

impl ListenerTimer {
    pub fn new(plugin: &'static str) -> Self {
        Self {
            plugin,
            start: Instant::now(),
        }
    }
}

impl Drop for ListenerTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_handler_latency(self.plugin, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, debug_span};

    /// Span for one handler invocation.
    pub fn listener(plugin: &str, handler: &str, channel: &str) -> Span {
        debug_span!("ircbot.listener", plugin = %plugin, handler = %handler, channel = %channel)
    }
}
