//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Smallest line budget that still leaves room for framing and text.
const MIN_LINE_BYTES: usize = 64;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bot.nickname is required")]
    MissingNickname,
    #[error("bot.nickname must not contain whitespace or ':', got '{0}'")]
    InvalidNickname(String),
    #[error("bot.history_capacity must be at least 1")]
    ZeroHistoryCapacity,
    #[error("bot.max_line_bytes must be at least 64, got {0}")]
    LineLimitTooSmall(usize),
    #[error("not a channel name: '{0}'")]
    InvalidChannel(String),
    #[error("timer.interval_secs must be at least 1")]
    ZeroTimerInterval,
}

fn is_channel_name(name: &str) -> bool {
    name.len() > 1 && (name.starts_with('#') || name.starts_with('&'))
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let nick = &config.bot.nickname;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNickname);
    } else if nick.chars().any(|c| c.is_whitespace() || c == ':') {
        errors.push(ValidationError::InvalidNickname(nick.clone()));
    }

    if config.bot.history_capacity == 0 {
        errors.push(ValidationError::ZeroHistoryCapacity);
    }

    if config.bot.max_line_bytes < MIN_LINE_BYTES {
        errors.push(ValidationError::LineLimitTooSmall(config.bot.max_line_bytes));
    }

    let channels = &config.channels;
    for channel in channels
        .privileged
        .iter()
        .chain(&channels.announce)
        .chain(&channels.extra)
        .chain(channels.alert.iter())
    {
        if !is_channel_name(channel) {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        }
    }

    if config.timer.interval_secs == 0 {
        errors.push(ValidationError::ZeroTimerInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
