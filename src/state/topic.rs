//! Cached channel topics and the "days since" counter bump.
//!
//! The cache is a local projection of the server's topics, refreshed from
//! RPL_TOPIC and TOPIC events. A bump computes the new topic from the cached
//! string; the cache itself is only updated when the server echoes the change.

use crate::error::OutboundError;
use crate::outbound::Outbound;
use dashmap::DashMap;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::{info, warn};

static DAYS_SINCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(days since.*?): (\d+)").expect("literal pattern"));

/// Increment every `days since ...: N` counter in `topic`.
///
/// Returns the topic unchanged (borrowed) when there is nothing to bump or
/// a counter would overflow.
pub fn bump_text(topic: &str) -> Cow<'_, str> {
    DAYS_SINCE.replace_all(topic, |caps: &Captures<'_>| {
        let label = &caps[1];
        match caps[2].parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
            Some(next) => format!("{label}: {next}"),
            None => caps[0].to_string(),
        }
    })
}

/// Last known topic for every channel.
#[derive(Debug, Default)]
pub struct TopicCache {
    topics: DashMap<String, String>,
}

impl TopicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the cached topic for `channel`.
    pub fn record(&self, channel: &str, topic: &str) {
        self.topics.insert(channel.to_string(), topic.to_string());
    }

    pub fn get(&self, channel: &str) -> Option<String> {
        self.topics.get(channel).map(|t| t.clone())
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Compute the bumped topic of every cached channel whose topic changes.
    pub fn pending_bumps(&self) -> Vec<(String, String)> {
        self.topics
            .iter()
            .filter_map(|entry| match bump_text(entry.value()) {
                Cow::Owned(new_topic) if new_topic != *entry.value() => {
                    Some((entry.key().clone(), new_topic))
                }
                _ => None,
            })
            .collect()
    }

    /// Request a topic change for every channel whose counter can be bumped.
    ///
    /// Channels without a counter are left alone. A failed request for one
    /// channel does not stop the others; the first failure is returned after
    /// all channels were attempted. Returns the channels that were bumped.
    pub fn bump_all(&self, outbound: &dyn Outbound) -> Result<Vec<String>, OutboundError> {
        // Collected first so no shard lock is held while talking to the server.
        let bumps = self.pending_bumps();
        let mut bumped = Vec::with_capacity(bumps.len());
        let mut first_error = None;

        for (channel, new_topic) in bumps {
            match outbound.topic(&channel, &new_topic) {
                Ok(()) => {
                    info!(channel = %channel, topic = %new_topic, "Bumped topic");
                    crate::metrics::record_topic_bump();
                    bumped.push(channel);
                }
                Err(e) => {
                    warn!(channel = %channel, error = %e, "Failed to bump topic");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(bumped),
        }
    }
}
