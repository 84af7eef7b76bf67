//! ocf-ircbot - chat bot dispatch engine.
//!
//! Plugins register regex listeners; every inbound line is matched against
//! all of them with mention and operator gating, and each matching handler
//! runs under crash isolation. The bot also keeps a short per-channel
//! history, a topic cache with a daily "days since" bump, and a UTF-8-safe
//! outbound segmenter.

pub mod bot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod membership;
pub mod metrics;
pub mod network;
pub mod outbound;
pub mod plugins;
pub mod report;
pub mod state;
pub mod tasks;
pub mod telemetry;
pub mod timer;

pub use bot::{Bot, BotParams, BotSettings};
pub use handlers::{Gate, Handler, ListenerRegistry, MatchedMessage};
