//! `theory_practice`: everything is broken.

use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;

/// A sign in the lab. `\x1f` underlines, `\x02` bolds.
const SIGN: &[&str] = &[
    "\x1fTheory\x1f is when you know everything but nothing works.",
    "\x1fPractice\x1f is when everything works but nobody knows why.",
    "At the OCF, \x1ftheory and practice\x1f are \x02combined\x02: nothing works and nobody knows why.",
];

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^why (doesn't anything work|isn't anything working)$",
        TheoryPracticeHandler,
        Gate::MENTION,
        "",
    )
}

pub struct TheoryPracticeHandler;

#[async_trait]
impl Handler for TheoryPracticeHandler {
    async fn handle(&self, _bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        for line in SIGN {
            msg.respond(line, false)?;
        }
        Ok(())
    }
}
