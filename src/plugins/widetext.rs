//! `widetext`: ｆｕｌｌ－ｗｉｄｔｈ　ｔｅｘｔ.

use super::argument_or_last_line;
use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;

/// Ideographic space, the full-width counterpart of `' '`.
const WIDE_SPACE: char = '\u{3000}';

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^!widetext(?: (.*))?",
        WideTextHandler { width: 1 },
        Gate::NONE,
        "ｗｅｌｃｏｍｅ　ｔｏ　ｔｈｅ　ｏｃｆ",
    )?;
    r.listen(
        r"^!evenwidertext(?: (.*))?",
        WideTextHandler { width: 2 },
        Gate::NONE,
        "ｅ　ｖ　ｅ　ｎ　　　ｗ　ｉ　ｄ　ｅ　ｒ",
    )?;
    r.listen(
        r"^!superwidetext(?: (.*))?",
        WideTextHandler { width: 3 },
        Gate::NONE,
        "ｏ　　ｍ　　ｇ",
    )
}

fn widen(c: char) -> char {
    match c {
        '\u{21}'..='\u{7E}' => char::from_u32(c as u32 + 0xFEE0).unwrap_or(c),
        _ => c,
    }
}

/// Translate printable ASCII to full width. Each character is followed by
/// `width - 1` wide spaces and words are joined by `width` of them.
pub fn widetextify(text: &str, width: usize) -> String {
    let width = width.max(1);
    let pad: String = std::iter::repeat_n(WIDE_SPACE, width - 1).collect();
    let separator: String = std::iter::repeat_n(WIDE_SPACE, width).collect();

    text.split_whitespace()
        .map(|word| {
            word.chars()
                .flat_map(|c| std::iter::once(widen(c)).chain(pad.chars()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(&separator)
}

pub struct WideTextHandler {
    width: usize,
}

#[async_trait]
impl Handler for WideTextHandler {
    async fn handle(&self, bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        let Some(text) = argument_or_last_line(bot, msg) else {
            return Ok(());
        };
        if !text.is_empty() {
            msg.respond(&widetextify(&text, self.width), false)?;
        }
        Ok(())
    }
}
