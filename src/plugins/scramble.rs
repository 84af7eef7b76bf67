//! `scramble`: Sblmraec yruo setenecn.
//!
//! Every word keeps its first letter; the rest are shuffled. Words are split
//! on whitespace and ASCII punctuation, which stay in place.

use super::argument_or_last_line;
use crate::bot::Bot;
use crate::error::{HandlerResult, RegistryError};
use crate::handlers::{Gate, Handler, MatchedMessage, Registrar};
use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;

pub fn register(r: &mut Registrar<'_>) -> Result<(), RegistryError> {
    r.listen(
        r"^!scramble(?: (.*))?",
        ScrambleHandler,
        Gate::NONE,
        "shuffle the letters of each word, or of the last line said",
    )
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation()
}

fn scramble_word<R: Rng + ?Sized>(word: &[char], rng: &mut R, out: &mut String) {
    let Some((first, rest)) = word.split_first() else {
        return;
    };
    let mut rest = rest.to_vec();
    rest.shuffle(rng);
    out.push(*first);
    out.extend(rest);
}

pub fn scramble_sentence<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word: Vec<char> = Vec::new();
    for c in text.chars() {
        if is_separator(c) {
            scramble_word(&word, rng, &mut out);
            word.clear();
            out.push(c);
        } else {
            word.push(c);
        }
    }
    scramble_word(&word, rng, &mut out);
    out
}

pub struct ScrambleHandler;

#[async_trait]
impl Handler for ScrambleHandler {
    async fn handle(&self, bot: &Bot, msg: &MatchedMessage<'_>) -> HandlerResult {
        if let Some(text) = argument_or_last_line(bot, msg) {
            let scrambled = scramble_sentence(&text, &mut rand::thread_rng());
            msg.respond(&scrambled, false)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted(word: &str) -> Vec<char> {
        let mut chars: Vec<char> = word.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn keeps_first_letters_and_separators() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = "scramble your sentence, please!";
        let output = scramble_sentence(input, &mut rng);

        assert_eq!(output.chars().count(), input.chars().count());
        let words_in: Vec<&str> = input.split(is_separator).collect();
        let words_out: Vec<&str> = output.split(is_separator).collect();
        assert_eq!(words_in.len(), words_out.len());
        for (a, b) in words_in.iter().zip(&words_out) {
            assert_eq!(a.chars().next(), b.chars().next());
            assert_eq!(sorted(a), sorted(b));
        }
        assert!(output.ends_with('!'));
        assert_eq!(output.find(','), input.find(','));
    }

    #[test]
    fn short_words_are_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(scramble_sentence("a an I", &mut rng), "a an I");
        assert_eq!(scramble_sentence("", &mut rng), "");
    }
}
