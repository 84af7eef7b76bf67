//! Unified error handling for the bot.
//!
//! Each concern gets its own error enum so callers can decide what is fatal
//! (registration, configuration) and what is contained (handler faults).

use thiserror::Error;

// ============================================================================
// Registration Errors (startup, fatal)
// ============================================================================

/// Errors raised while plugins populate the listener registry.
///
/// These abort startup: a listener whose pattern cannot compile would never
/// match, and silently skipping it hides a broken plugin.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("plugin {plugin}: invalid listener pattern {pattern:?}: {source}")]
    InvalidPattern {
        plugin: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ============================================================================
// Handler Errors (plugin faults, contained)
// ============================================================================

/// Errors a listener handler may return.
///
/// A handler fault never escapes dispatch; see [`crate::handlers::isolation`].
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("send error: {0}")]
    Outbound(#[from] OutboundError),

    #[error("{0}")]
    Plugin(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Outbound(_) => "outbound",
            Self::Plugin(_) => "plugin",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type for listener handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Outbound Errors (send path)
// ============================================================================

/// Failures of the outbound connection primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutboundError {
    #[error("connection closed")]
    Disconnected,

    #[error("failed to send to {target}: {reason}")]
    Send { target: String, reason: String },
}

// ============================================================================
// Reporting Errors (alerting sink)
// ============================================================================

/// Failures delivering a problem report to the external alerting sink.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report delivery failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("report endpoint returned status {0}")]
    Status(u16),
}

// ============================================================================
// Background Task Errors
// ============================================================================

/// How a supervised background task stopped.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    Failed(#[from] anyhow::Error),

    #[error("panicked: {0}")]
    Panicked(String),

    #[error("exited unexpectedly")]
    Exited,
}

/// Render a panic payload as text.
///
/// `panic!` payloads are almost always `&str` or `String`.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
