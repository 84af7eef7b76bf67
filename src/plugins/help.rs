//! `help`: point people at the documentation.

use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^help$",
        HelpHandler,
        Gate::MENTION,
        "link to the help page, or list the loaded plugins",
    )
}

pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        let reply = match &bot.settings().help_url {
            Some(url) => url.clone(),
            None => format!("plugins: {}", bot.registry().plugins().join(", ")),
        };
        msg.respond(&reply, true)?;
        Ok(())
    }
}
