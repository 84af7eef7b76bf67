//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, BotConfig, IrcConfig)
//! - [`channels`]: Channel sets (privileged, announce, extra, alert)
//! - [`services`]: Ambient services (reporting, HTTP endpoint, timer)
//! - [`defaults`]: Serde default value functions
//! - [`validation`]: Startup validation of a parsed config

mod channels;
mod defaults;
mod services;
mod types;
mod validation;

pub use channels::ChannelsConfig;
pub use services::{HttpConfig, ReportingConfig, TimerConfig};
pub use types::{BotConfig, Config, ConfigError, IrcConfig};
pub use validation::{ValidationError, validate};
