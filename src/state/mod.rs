//! Session state owned by the bot: recent history and cached topics.

pub mod history;
pub mod topic;

pub use history::{ChannelHistory, HistoryEntry};
pub use topic::{TopicCache, bump_text};

/// Lines remembered per channel unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
