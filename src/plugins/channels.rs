//! `channels`: join and leave channels on request.
//!
//! Mostly for bridged users who cannot `/invite`; invites are handled by the
//! connection layer.

use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^join (#[a-zA-Z0-9\-_#]+)$",
        JoinHandler,
        Gate::MENTION,
        "join a new channel",
    )?;
    r.listen(r"^leave$", LeaveHandler, Gate::MENTION, "leave the current channel")
}

pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    async fn handle(&self, bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        if let Some(channel) = msg.group(1) {
            bot.join(channel)?;
        }
        Ok(())
    }
}

pub struct LeaveHandler;

#[async_trait]
impl Handler for LeaveHandler {
    async fn handle(&self, bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        let settings = bot.settings();
        if settings.is_privileged_channel(msg.channel)
            || settings.is_announce_channel(msg.channel)
        {
            msg.respond(&format!("can't leave {}!", msg.channel), true)?;
        } else {
            bot.part(msg.channel)?;
        }
        Ok(())
    }
}
