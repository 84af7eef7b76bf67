//! `reverse`: esrever.

use super::argument_or_last_line;
use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^!reverse(?: (.*))?",
        ReverseHandler,
        Gate::NONE,
        "reverse the given text, or the last line said",
    )
}

pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

pub struct ReverseHandler;

#[async_trait]
impl Handler for ReverseHandler {
    async fn handle(&self, bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        if let Some(text) = argument_or_last_line(bot, msg) {
            msg.respond(&reverse(&text), false)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_by_char() {
        assert_eq!(reverse("hello world"), "dlrow olleh");
        assert_eq!(reverse("añb😀"), "😀bña");
        assert_eq!(reverse(""), "");
    }
}
