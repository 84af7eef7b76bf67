//! `ping`: check your connection.

use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;
use rand::Rng;

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^[Pp]+[Ii]+[Nn]+[Gg]+$",
        PingHandler,
        Gate::MENTION,
        "pong, keeping your capitalization",
    )
}

/// `ping` -> `pong`, `PiiiNG` -> `PoooNG`.
pub fn pong(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'i' => 'o',
            'I' => 'O',
            other => other,
        })
        .collect()
}

pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, _bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        // One in a hundred the bot is busy.
        let pleased = rand::thread_rng().gen_range(0..100) != 0;
        let reply = if pleased {
            pong(msg.text)
        } else {
            "not now, please.".to_string()
        };
        msg.respond(&reply, false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_vowels() {
        assert_eq!(pong("ping"), "pong");
        assert_eq!(pong("PiiiNG"), "PoooNG");
        assert_eq!(pong("ppIInngg"), "ppOOnngg");
    }
}
