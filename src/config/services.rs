//! Configuration for the ambient services around the dispatch core.

use serde::Deserialize;

use super::defaults::{default_http_port, default_report_timeout, default_timer_interval};

/// Problem report delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Endpoint receiving JSON problem reports. Reports are only logged when
    /// unset or when `bot.testing` is enabled.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_report_timeout")]
    pub timeout_secs: u64,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: default_report_timeout(),
        }
    }
}

/// Help index and Prometheus endpoint.
///
/// Convention: `port = 0` disables the HTTP endpoint (used by tests).
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_http_port(),
        }
    }
}

/// Daily topic timer.
#[derive(Debug, Clone, Deserialize)]
pub struct TimerConfig {
    /// Seconds between date checks.
    #[serde(default = "default_timer_interval")]
    pub interval_secs: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_timer_interval(),
        }
    }
}
