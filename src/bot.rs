//! The bot context.
//!
//! [`Bot`] owns everything dispatch needs: the router (and through it the
//! listener registry), per-channel history, the topic cache, the outbound
//! connection and problem reporting. It is built once at startup and shared
//! as `Arc<Bot>` between the connection loop and background tasks.

use crate::config::Config;
use crate::error::OutboundError;
use crate::handlers::{
    DispatchSummary, IncomingMessage, ListenerRegistry, Privilege, Responder, Router,
};
use crate::membership::ChannelMembership;
use crate::outbound::{self, Outbound};
use crate::report::Reporting;
use crate::state::{ChannelHistory, DEFAULT_HISTORY_CAPACITY, TopicCache};
use std::sync::Arc;
use tracing::{debug, info};

/// Static settings the bot and its plugins consult at runtime.
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub nickname: String,
    pub testing: bool,
    pub command_escape: char,
    pub ignore_prefix: String,
    pub help_url: Option<String>,
    pub max_line_bytes: usize,
    pub history_capacity: usize,
    pub privileged_channels: Vec<String>,
    pub announce_channels: Vec<String>,
    pub alert_channel: Option<String>,
}

impl BotSettings {
    /// Defaults for everything but the nickname.
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            testing: false,
            command_escape: '!',
            ignore_prefix: "create".to_string(),
            help_url: None,
            max_line_bytes: 435,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            privileged_channels: Vec::new(),
            announce_channels: Vec::new(),
            alert_channel: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            nickname: config.bot.nickname.clone(),
            testing: config.bot.testing,
            command_escape: config.bot.command_escape,
            ignore_prefix: config.bot.ignore_prefix.clone(),
            help_url: config.bot.help_url.clone(),
            max_line_bytes: config.bot.max_line_bytes,
            history_capacity: config.bot.history_capacity,
            privileged_channels: config.channels.privileged.clone(),
            announce_channels: config.channels.announce.clone(),
            alert_channel: config.channels.alert_channel().map(str::to_string),
        }
    }

    pub fn is_privileged_channel(&self, channel: &str) -> bool {
        self.privileged_channels
            .iter()
            .any(|c| c.eq_ignore_ascii_case(channel))
    }

    pub fn is_announce_channel(&self, channel: &str) -> bool {
        self.announce_channels
            .iter()
            .any(|c| c.eq_ignore_ascii_case(channel))
    }

    /// Senders the bot never reacts to.
    pub fn is_ignored(&self, nick: &str) -> bool {
        !self.ignore_prefix.is_empty() && nick.starts_with(&self.ignore_prefix)
    }
}

/// What [`Bot::new`] is built from.
pub struct BotParams {
    pub settings: BotSettings,
    pub registry: ListenerRegistry,
    pub outbound: Arc<dyn Outbound>,
    pub reporting: Reporting,
}

/// Explicit bot context threaded through dispatch and plugins.
pub struct Bot {
    settings: BotSettings,
    router: Router,
    history: ChannelHistory,
    topics: TopicCache,
    outbound: Arc<dyn Outbound>,
    reporting: Reporting,
}

impl Bot {
    pub fn new(params: BotParams) -> Self {
        let BotParams {
            settings,
            registry,
            outbound,
            reporting,
        } = params;

        info!(
            nickname = %settings.nickname,
            listeners = registry.len(),
            plugins = registry.plugins().len(),
            testing = settings.testing,
            "Bot initialized"
        );

        Self {
            router: Router::new(registry, settings.nickname.clone(), settings.command_escape),
            history: ChannelHistory::new(settings.history_capacity),
            topics: TopicCache::new(),
            settings,
            outbound,
            reporting,
        }
    }

    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    pub fn nickname(&self) -> &str {
        &self.settings.nickname
    }

    pub fn history(&self) -> &ChannelHistory {
        &self.history
    }

    pub fn topics(&self) -> &TopicCache {
        &self.topics
    }

    pub fn registry(&self) -> &ListenerRegistry {
        self.router.registry()
    }

    pub fn outbound(&self) -> &Arc<dyn Outbound> {
        &self.outbound
    }

    pub fn reporting(&self) -> &Reporting {
        &self.reporting
    }

    /// Route one line through every listener.
    pub async fn dispatch(
        &self,
        message: &IncomingMessage,
        privilege: Privilege,
        responder: &Responder,
    ) -> DispatchSummary {
        self.router
            .dispatch(self, message, privilege, responder)
            .await
    }

    /// A line said in a channel.
    ///
    /// Returns `None` when the sender is ignored.
    pub async fn on_pubmsg(
        &self,
        channel: &str,
        nick: &str,
        text: &str,
        membership: &dyn ChannelMembership,
    ) -> Option<DispatchSummary> {
        if self.settings.is_ignored(nick) {
            debug!(channel, nick, "Ignoring message from ignored sender");
            return None;
        }

        let privilege = Privilege {
            is_oper: membership.is_oper(channel, nick),
            is_privileged_channel: self.settings.is_privileged_channel(channel),
        };
        let message = IncomingMessage::channel(channel, nick, text);
        let responder = Responder::channel(
            channel,
            nick,
            Arc::clone(&self.outbound),
            self.settings.max_line_bytes,
        );
        Some(self.dispatch(&message, privilege, &responder).await)
    }

    /// A private message to the bot. The ignore prefix does not apply here.
    pub async fn on_privmsg(&self, nick: &str, text: &str) -> DispatchSummary {
        let message = IncomingMessage::direct(nick, text);
        let responder = Responder::direct(
            nick,
            Arc::clone(&self.outbound),
            self.settings.max_line_bytes,
        );
        self.dispatch(&message, Privilege::default(), &responder)
            .await
    }

    /// The server reported a channel topic, on join or on change.
    pub fn on_topic(&self, channel: &str, topic: &str) {
        debug!(channel, topic, "Topic observed");
        self.topics.record(channel, topic);
    }

    /// Someone invited the bot somewhere.
    pub fn on_invite(&self, channel: &str) -> Result<(), OutboundError> {
        info!(channel, "Joining channel on invite");
        self.outbound.join(channel)
    }

    /// Say `text` in `target`, segmenting as needed.
    pub fn say(&self, target: &str, text: &str) -> Result<usize, OutboundError> {
        outbound::say(
            self.outbound.as_ref(),
            target,
            text,
            self.settings.max_line_bytes,
        )
    }

    pub fn join(&self, channel: &str) -> Result<(), OutboundError> {
        info!(channel, "Joining channel");
        self.outbound.join(channel)
    }

    pub fn part(&self, channel: &str) -> Result<(), OutboundError> {
        info!(channel, "Leaving channel");
        self.outbound.part(channel)
    }

    /// Increment every cached "days since ...: N" counter.
    ///
    /// Returns the channels a topic change was requested for.
    pub fn bump_topic(&self) -> Result<Vec<String>, OutboundError> {
        self.topics.bump_all(self.outbound.as_ref())
    }
}
