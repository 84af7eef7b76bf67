//! Recent-message history per channel.
//!
//! Plugins such as `reverse` and `replace` act on "the last thing somebody
//! said", so the bot keeps a small ring buffer of lines per channel. Each
//! channel's buffer sits in its own `DashMap` shard entry, so the dispatch
//! loop and background tasks only contend when they touch the same channel.

use dashmap::DashMap;
use std::collections::VecDeque;

/// One remembered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub sender: String,
    pub text: String,
}

impl HistoryEntry {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// Bounded, newest-first history for every channel the bot has seen.
#[derive(Debug)]
pub struct ChannelHistory {
    capacity: usize,
    channels: DashMap<String, VecDeque<HistoryEntry>>,
}

impl ChannelHistory {
    /// `capacity` is clamped to at least one line.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            channels: DashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a line, evicting the oldest one once the buffer is full.
    pub fn append(&self, channel: &str, sender: &str, text: &str) {
        let mut lines = self
            .channels
            .entry(channel.to_string())
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        if lines.len() == self.capacity {
            lines.pop_back();
        }
        lines.push_front(HistoryEntry::new(sender, text));
    }

    /// The newest line in `channel`, if any.
    pub fn most_recent(&self, channel: &str) -> Option<HistoryEntry> {
        self.channels
            .get(channel)
            .and_then(|lines| lines.front().cloned())
    }

    /// Every remembered line in `channel`, newest first.
    pub fn recent(&self, channel: &str) -> Vec<HistoryEntry> {
        self.channels
            .get(channel)
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, channel: &str) -> usize {
        self.channels.get(channel).map_or(0, |lines| lines.len())
    }

    pub fn is_empty(&self, channel: &str) -> bool {
        self.len(channel) == 0
    }
}

impl Default for ChannelHistory {
    fn default() -> Self {
        Self::new(crate::state::DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel_has_nothing() {
        let history = ChannelHistory::new(10);
        assert_eq!(history.most_recent("#lab"), None);
        assert!(history.recent("#lab").is_empty());
        assert!(history.is_empty("#lab"));
    }

    #[test]
    fn newest_first() {
        let history = ChannelHistory::new(10);
        history.append("#lab", "alice", "one");
        history.append("#lab", "bob", "two");
        assert_eq!(history.most_recent("#lab"), Some(HistoryEntry::new("bob", "two")));
        assert_eq!(
            history.recent("#lab"),
            vec![HistoryEntry::new("bob", "two"), HistoryEntry::new("alice", "one")]
        );
    }

    #[test]
    fn eleventh_append_evicts_oldest() {
        let history = ChannelHistory::new(10);
        for i in 0..11 {
            history.append("#lab", "alice", &format!("line {i}"));
        }
        let recent = history.recent("#lab");
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].text, "line 10");
        assert_eq!(recent[9].text, "line 1");
        assert!(!recent.iter().any(|e| e.text == "line 0"));
    }

    #[test]
    fn channels_are_independent() {
        let history = ChannelHistory::new(2);
        history.append("#a", "alice", "in a");
        history.append("#b", "bob", "in b");
        assert_eq!(history.len("#a"), 1);
        assert_eq!(history.most_recent("#b").unwrap().sender, "bob");
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let history = ChannelHistory::new(0);
        history.append("#a", "alice", "x");
        history.append("#a", "alice", "y");
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.recent("#a"), vec![HistoryEntry::new("alice", "y")]);
    }
}
