//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Bot Defaults
// =============================================================================

pub fn default_command_escape() -> char {
    '!'
}

pub fn default_ignore_prefix() -> String {
    "create".to_string()
}

/// RFC 2812 allows 512 bytes per line, but clients (hexchat at least) start
/// cutting text off earlier than that.
pub fn default_max_line_bytes() -> usize {
    435
}

pub fn default_history_capacity() -> usize {
    10
}

// =============================================================================
// IRC Defaults
// =============================================================================

pub fn default_irc_host() -> String {
    "irc".to_string()
}

pub fn default_irc_port() -> u16 {
    6697
}

// =============================================================================
// Service Defaults
// =============================================================================

pub fn default_report_timeout() -> u64 {
    10
}

pub fn default_http_port() -> u16 {
    8888
}

pub fn default_timer_interval() -> u64 {
    60
}
