//! Channel set configuration.

use serde::Deserialize;

/// Channels the bot joins and how they are treated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelsConfig {
    /// Administrative channels. Privileged-oper listeners only fire here.
    #[serde(default)]
    pub privileged: Vec<String>,
    /// Channels that receive announcements; the bot refuses to leave them.
    #[serde(default)]
    pub announce: Vec<String>,
    /// Additional channels joined at startup.
    #[serde(default)]
    pub extra: Vec<String>,
    /// Where background task failures are posted. Defaults to the first
    /// privileged channel.
    #[serde(default)]
    pub alert: Option<String>,
}

impl ChannelsConfig {
    /// Every channel to join on connect, deduplicated, in config order.
    pub fn autojoin(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for channel in self
            .privileged
            .iter()
            .chain(&self.announce)
            .chain(&self.extra)
        {
            if !out.iter().any(|c| c.eq_ignore_ascii_case(channel)) {
                out.push(channel.clone());
            }
        }
        out
    }

    pub fn alert_channel(&self) -> Option<&str> {
        self.alert
            .as_deref()
            .or_else(|| self.privileged.first().map(String::as_str))
    }
}
