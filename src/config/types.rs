//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::channels::ChannelsConfig;
use super::defaults::{
    default_command_escape, default_history_capacity, default_ignore_prefix, default_irc_host,
    default_irc_port, default_max_line_bytes, default_true,
};
use super::services::{HttpConfig, ReportingConfig, TimerConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bot identity and dispatch behaviour.
    pub bot: BotConfig,
    /// IRC server connection.
    #[serde(default)]
    pub irc: IrcConfig,
    /// Channel sets.
    #[serde(default)]
    pub channels: ChannelsConfig,
    /// Problem report delivery.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Help and metrics HTTP endpoint.
    #[serde(default)]
    pub http: HttpConfig,
    /// Daily topic timer.
    #[serde(default)]
    pub timer: TimerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Bot identity and dispatch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Nickname; messages starting with `"<nickname> "` or `"<nickname>:"`
    /// are addressed to the bot.
    pub nickname: String,
    /// Development deployment: problem reports are only logged locally.
    #[serde(default)]
    pub testing: bool,
    /// Lines starting with this character are commands and never recorded in
    /// channel history.
    #[serde(default = "default_command_escape")]
    pub command_escape: char,
    /// Senders whose nick starts with this prefix are ignored (other bots).
    #[serde(default = "default_ignore_prefix")]
    pub ignore_prefix: String,
    /// Link answered by the `help` plugin.
    #[serde(default)]
    pub help_url: Option<String>,
    /// Upper bound for a framed outbound line, in bytes.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
    /// Recent lines kept per channel.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

/// IRC server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IrcConfig {
    #[serde(default = "default_irc_host")]
    pub host: String,
    #[serde(default = "default_irc_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub use_tls: bool,
    /// Password sent to NickServ after connecting.
    #[serde(default)]
    pub nickserv_password: Option<String>,
}

impl Default for IrcConfig {
    fn default() -> Self {
        Self {
            host: default_irc_host(),
            port: default_irc_port(),
            use_tls: true,
            nickserv_password: None,
        }
    }
}
