//! Connection layer: binds the bot to an IRC server through the `irc` crate.
//!
//! - [`IrcOutbound`] implements [`Outbound`] over the client's sender.
//! - `irc::client::Client` implements [`ChannelMembership`] from its tracked
//!   channel user lists (operator = `+o`).
//! - [`run`] maps server events onto the [`Bot`] entry points.

use crate::bot::Bot;
use crate::config::Config;
use crate::error::OutboundError;
use crate::membership::ChannelMembership;
use crate::outbound::Outbound;
use futures_util::StreamExt;
use irc::client::Client;
use irc::client::data::AccessLevel;
use irc::proto::{ChannelExt, Command, Message, Response};
use tracing::{debug, info, warn};

/// Build the `irc` client configuration.
///
/// Channels are joined by the client itself once registration completes, and
/// NickServ identification uses `nick_password`.
pub fn client_config(config: &Config) -> irc::client::data::Config {
    irc::client::data::Config {
        nickname: Some(config.bot.nickname.clone()),
        username: Some(config.bot.nickname.clone()),
        realname: Some(config.bot.nickname.clone()),
        nick_password: config.irc.nickserv_password.clone(),
        server: Some(config.irc.host.clone()),
        port: Some(config.irc.port),
        use_tls: Some(config.irc.use_tls),
        channels: config.channels.autojoin(),
        ..irc::client::data::Config::default()
    }
}

/// Outbound primitives over an `irc` client sender.
#[derive(Clone)]
pub struct IrcOutbound {
    sender: irc::client::Sender,
}

impl IrcOutbound {
    pub fn new(sender: irc::client::Sender) -> Self {
        Self { sender }
    }
}

fn send_error(target: &str, e: irc::error::Error) -> OutboundError {
    OutboundError::Send {
        target: target.to_string(),
        reason: e.to_string(),
    }
}

impl Outbound for IrcOutbound {
    fn privmsg(&self, target: &str, text: &str) -> Result<(), OutboundError> {
        self.sender
            .send_privmsg(target, text)
            .map_err(|e| send_error(target, e))
    }

    fn topic(&self, channel: &str, topic: &str) -> Result<(), OutboundError> {
        self.sender
            .send_topic(channel, topic)
            .map_err(|e| send_error(channel, e))
    }

    fn join(&self, channel: &str) -> Result<(), OutboundError> {
        self.sender
            .send_join(channel)
            .map_err(|e| send_error(channel, e))
    }

    fn part(&self, channel: &str) -> Result<(), OutboundError> {
        self.sender
            .send_part(channel)
            .map_err(|e| send_error(channel, e))
    }
}

impl ChannelMembership for Client {
    fn is_oper(&self, channel: &str, nick: &str) -> bool {
        self.list_users(channel)
            .map(|users| {
                users.iter().any(|user| {
                    user.get_nickname().eq_ignore_ascii_case(nick)
                        && user
                            .access_levels()
                            .iter()
                            .any(|level| matches!(level, AccessLevel::Oper))
                })
            })
            .unwrap_or(false)
    }
}

/// Process server events until the connection ends.
///
/// Messages are dispatched one at a time, in arrival order. Always returns an
/// error: a closed connection is a failure for a bot meant to run forever.
pub async fn run(bot: &Bot, mut client: Client) -> anyhow::Result<()> {
    let mut stream = client.stream()?;
    info!(nickname = %bot.nickname(), "Connected, processing events");

    while let Some(message) = stream.next().await {
        let message = message?;
        handle_message(bot, &client, &message).await;
    }

    anyhow::bail!("IRC connection closed")
}

/// Map one server message onto the bot. Operator status comes from
/// `membership`, which is the client itself in production.
pub(crate) async fn handle_message(
    bot: &Bot,
    membership: &dyn ChannelMembership,
    message: &Message,
) {
    match &message.command {
        Command::PRIVMSG(target, text) => {
            let Some(nick) = message.source_nickname() else {
                return;
            };
            if target.is_channel_name() {
                bot.on_pubmsg(target, nick, text, membership).await;
            } else {
                bot.on_privmsg(nick, text).await;
            }
        }
        Command::Response(Response::RPL_TOPIC, args) => {
            if let [_, channel, topic] = args.as_slice() {
                bot.on_topic(channel, topic);
            }
        }
        Command::TOPIC(channel, Some(topic)) => bot.on_topic(channel, topic),
        Command::INVITE(_, channel) => {
            if let Err(e) = bot.on_invite(channel) {
                warn!(channel = %channel, error = %e, "Failed to join on invite");
            }
        }
        Command::JOIN(channel, ..) if message.source_nickname() == Some(bot.nickname()) => {
            info!(channel = %channel, "Joined channel");
        }
        _ => debug!(message = %message.to_string().trim_end(), "Unhandled message"),
    }
}
