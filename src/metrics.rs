//! Prometheus metrics for the bot.
//!
//! Exposed over HTTP by [`crate::http`]. Every `record_*` helper is a no-op
//! until [`init`] has run, so library users and tests pay nothing.
//!
//! - `ircbot_messages_dispatched_total` - Lines routed through the listeners
//! - `ircbot_listener_invocations_total{plugin}` - Handler runs by plugin
//! - `ircbot_handler_faults_total{plugin,error}` - Contained handler faults
//! - `ircbot_handler_duration_seconds{plugin}` - Handler latency histogram
//! - `ircbot_topic_bumps_total` - Topic changes requested by the bump
//! - `ircbot_outbound_chunks_total` - PRIVMSG lines sent

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters
// ========================================================================

/// Inbound lines dispatched.
pub static MESSAGES_DISPATCHED: OnceLock<IntCounter> = OnceLock::new();

/// Handler invocations by plugin.
pub static LISTENER_INVOCATIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Handler faults by plugin and error kind.
pub static HANDLER_FAULTS: OnceLock<IntCounterVec> = OnceLock::new();

pub static TOPIC_BUMPS: OnceLock<IntCounter> = OnceLock::new();

/// Outbound PRIVMSG lines after segmentation.
pub static OUTBOUND_CHUNKS: OnceLock<IntCounter> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Handler latency by plugin.
pub static HANDLER_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at startup, before the HTTP endpoint is served.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                }
            }
        };
    }

    register!(MESSAGES_DISPATCHED, IntCounter::new("ircbot_messages_dispatched_total", "Inbound lines dispatched"));
    register!(LISTENER_INVOCATIONS, IntCounterVec::new(Opts::new("ircbot_listener_invocations_total", "Handler invocations by plugin"), &["plugin"]));
    register!(HANDLER_FAULTS, IntCounterVec::new(Opts::new("ircbot_handler_faults_total", "Contained handler faults"), &["plugin", "error"]));
    register!(TOPIC_BUMPS, IntCounter::new("ircbot_topic_bumps_total", "Topic changes requested by the daily bump"));
    register!(OUTBOUND_CHUNKS, IntCounter::new("ircbot_outbound_chunks_total", "PRIVMSG lines sent"));
    register!(HANDLER_LATENCY, HistogramVec::new(
        HistogramOpts::new("ircbot_handler_duration_seconds", "Handler latency by plugin")
            .buckets(vec![0.0001, 0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]),
        &["plugin"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Recording helpers
// ============================================================================

#[inline]
pub fn record_dispatch() {
    if let Some(c) = MESSAGES_DISPATCHED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_invocation(plugin: &str) {
    if let Some(c) = LISTENER_INVOCATIONS.get() {
        c.with_label_values(&[plugin]).inc();
    }
}

#[inline]
pub fn record_handler_fault(plugin: &str, error: &str) {
    if let Some(c) = HANDLER_FAULTS.get() {
        c.with_label_values(&[plugin, error]).inc();
    }
}

#[inline]
pub fn record_handler_latency(plugin: &str, duration_secs: f64) {
    if let Some(h) = HANDLER_LATENCY.get() {
        h.with_label_values(&[plugin]).observe(duration_secs);
    }
}

#[inline]
pub fn record_topic_bump() {
    if let Some(c) = TOPIC_BUMPS.get() {
        c.inc();
    }
}

#[inline]
pub fn record_outbound_chunks(count: usize) {
    if let Some(c) = OUTBOUND_CHUNKS.get() {
        c.inc_by(count as u64);
    }
}
