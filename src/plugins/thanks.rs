//! `thanks`: show your appreciation.

use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;
use rand::seq::SliceRandom;

const REPLIES: &[&str] = &[
    "you're welcome",
    "you are most welcome",
    "any time",
    "sure thing boss",
];

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^thanks",
        ThanksHandler,
        Gate::MENTION,
        "thank the bot for being helpful",
    )?;
    r.listen(
        r"^thank (.*)$",
        ThankSomeoneHandler,
        Gate::MENTION,
        "have the bot thank somebody on your behalf",
    )
}

pub struct ThanksHandler;

#[async_trait]
impl Handler for ThanksHandler {
    async fn handle(&self, _bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        let reply = REPLIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("any time");
        msg.respond(reply, true)?;
        Ok(())
    }
}

pub struct ThankSomeoneHandler;

#[async_trait]
impl Handler for ThankSomeoneHandler {
    async fn handle(&self, _bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        let who = msg.group(1).unwrap_or_default();
        msg.respond(&format!("thanks, {who}!"), false)?;
        Ok(())
    }
}
