//! `replace`: sed-style `s/old/new/` against recent channel history.
//!
//! The delimiter can be any of ``!@"#$%&'*./:;=?\^_`|~``. `old` is a regular
//! expression, `new` is inserted literally and bolded. Only the newest line
//! that actually changes is corrected, and lines that are themselves
//! substitutions are skipped.

use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use tracing::debug;

const DELIMITERS: &str = "!@\"#$%&'*./:;=?\\^_`|~";

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r##"(?:^| )s[!@"#$%&'*./:;=?\\^_`|~]"##,
        ReplaceHandler,
        Gate::NONE,
        "s/old/new/ corrects the last matching line",
    )
}

/// A parsed `s<d>old<d>new[<d>][g]` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution<'a> {
    pub old: &'a str,
    pub new: &'a str,
}

/// Find the first substitution command in `text`.
///
/// The command starts the line or follows a space. `old` is non-empty and
/// runs to the next delimiter; `new` is the rest of the line minus an
/// optional closing delimiter and `g` flag.
pub fn parse_substitution(text: &str) -> Option<Substitution<'_>> {
    text.char_indices()
        .filter(|&(i, c)| c == 's' && (i == 0 || text[..i].ends_with(' ')))
        .find_map(|(i, _)| parse_at(&text[i + 1..]))
}

fn parse_at(rest: &str) -> Option<Substitution<'_>> {
    let delim = rest.chars().next().filter(|c| DELIMITERS.contains(*c))?;
    let body = &rest[delim.len_utf8()..];

    // `old` needs at least one character, even if that character is the
    // delimiter itself.
    let first = body.chars().next()?;
    let end = first.len_utf8() + body[first.len_utf8()..].find(delim)?;
    let old = &body[..end];
    let tail = &body[end + delim.len_utf8()..];

    // A trailing `g` is a flag even without the closing delimiter.
    let tail = tail.strip_suffix('g').unwrap_or(tail);
    let new = tail.strip_suffix(delim).unwrap_or(tail);

    Some(Substitution { old, new })
}

/// Apply `sub` to `line`; `None` when the pattern is invalid or nothing
/// changed.
pub fn apply(sub: &Substitution<'_>, line: &str) -> Option<String> {
    let pattern = Regex::new(sub.old).ok()?;
    let bolded = format!("\x02{}\x02", sub.new);
    match pattern.replace_all(line, NoExpand(&bolded)) {
        Cow::Owned(changed) if changed != line => Some(changed),
        _ => None,
    }
}

pub struct ReplaceHandler;

#[async_trait]
impl Handler for ReplaceHandler {
    async fn handle(&self, bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        let Some(sub) = parse_substitution(msg.raw_text) else {
            return Ok(());
        };
        if Regex::new(sub.old).is_err() {
            debug!(pattern = sub.old, "Ignoring substitution with invalid pattern");
            return Ok(());
        }

        for entry in bot.history().recent(msg.channel) {
            if parse_substitution(&entry.text).is_some() {
                continue;
            }
            if let Some(changed) = apply(&sub, &entry.text) {
                msg.respond(&format!("<{}> {}", entry.sender, changed), false)?;
                break;
            }
        }
        Ok(())
    }
}
