//! `topic`: bump the "days since" counters on request.

use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^newday$",
        NewDayHandler,
        Gate::MENTION | Gate::OPER,
        "bump the topic as if it's a new day",
    )
}

pub struct NewDayHandler;

#[async_trait]
impl Handler for NewDayHandler {
    async fn handle(&self, bot: &Bot, _msg: &MatchedMessage<'_>) -> HandlerResult {
        bot.bump_topic()?;
        Ok(())
    }
}
