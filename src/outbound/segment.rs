//! Outbound line segmentation.
//!
//! A PRIVMSG travels as `PRIVMSG <target> :<text>\r\n`; the whole framed line
//! has to stay under the configured byte limit, so oversized text is cut
//! into several chunks. Cuts never land inside a UTF-8 codepoint.

/// `PRIVMSG ` + ` :` + `\r\n`.
const FRAMING_OVERHEAD: usize = "PRIVMSG ".len() + " :".len() + "\r\n".len();

/// A chunk must be able to hold any single codepoint or we could not advance.
const MIN_CHUNK_BYTES: usize = 4;

/// Bytes of framing around the text of a PRIVMSG to `target`.
#[inline]
pub fn framing_len(target: &str) -> usize {
    FRAMING_OVERHEAD + target.len()
}

/// Text bytes available per chunk for `target` under `max_line_bytes`.
#[inline]
pub fn chunk_budget(target: &str, max_line_bytes: usize) -> usize {
    max_line_bytes
        .saturating_sub(framing_len(target))
        .max(MIN_CHUNK_BYTES)
}

/// Split `text` into chunks that fit, framed, in `max_line_bytes`.
///
/// Lazy, finite and lossless: concatenating every chunk yields `text`.
/// Text that already fits comes back as exactly one chunk, including the
/// empty string.
pub fn segment<'a>(target: &str, text: &'a str, max_line_bytes: usize) -> Segments<'a> {
    Segments::new(text, chunk_budget(target, max_line_bytes))
}

/// Iterator over the chunks of an outbound line.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    remaining: &'a str,
    budget: usize,
    done: bool,
}

impl<'a> Segments<'a> {
    /// Chunks of at most `budget` bytes (never less than one codepoint).
    pub fn new(text: &'a str, budget: usize) -> Self {
        Self {
            remaining: text,
            budget: budget.max(MIN_CHUNK_BYTES),
            done: false,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        if self.remaining.len() <= self.budget {
            self.done = true;
            return Some(self.remaining);
        }

        // Walk back off UTF-8 continuation bytes (0b10xx_xxxx).
        let bytes = self.remaining.as_bytes();
        let mut cut = self.budget;
        while cut > 0 && (bytes[cut] & 0xC0) == 0x80 {
            cut -= 1;
        }

        let (chunk, rest) = self.remaining.split_at(cut);
        self.remaining = rest;
        Some(chunk)
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks: Vec<_> = segment("#rebuild", "hello world", 435).collect();
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn empty_text_is_one_empty_chunk() {
        let chunks: Vec<_> = segment("#rebuild", "", 435).collect();
        assert_eq!(chunks, vec![""]);
    }

    #[test]
    fn framed_chunks_fit_limit() {
        let text = "a".repeat(2000);
        let limit = 435;
        let chunks: Vec<_> = segment("#rebuild", &text, limit).collect();
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(framing_len("#rebuild") + chunk.len() <= limit);
        }
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn exact_fit_is_not_split() {
        let budget = chunk_budget("#c", 100);
        let text = "x".repeat(budget);
        assert_eq!(segment("#c", &text, 100).count(), 1);
        let text = "x".repeat(budget + 1);
        assert_eq!(segment("#c", &text, 100).count(), 2);
    }

    #[test]
    fn four_byte_codepoint_straddling_cut_stays_whole() {
        // budget 10: "abcdefgh" + "😀" (4 bytes) puts the naive cut inside the emoji
        let text = "abcdefgh😀ijk";
        let chunks: Vec<_> = Segments::new(text, 10).collect();
        assert_eq!(chunks, vec!["abcdefgh", "😀ijk"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn multibyte_text_round_trips() {
        let text = "ｗｅｌｃｏｍｅ　ｔｏ　ｔｈｅ　ｏｃｆ ünïcödé 🦀🦀🦀 ".repeat(40);
        for budget in [4, 5, 7, 13, 64, 100] {
            let chunks: Vec<_> = Segments::new(&text, budget).collect();
            for chunk in &chunks {
                assert!(chunk.len() <= budget);
                assert!(!chunk.is_empty());
            }
            assert_eq!(chunks.concat(), text);
        }
    }

    #[test]
    fn huge_target_still_makes_progress() {
        let target = format!("#{}", "x".repeat(500));
        assert_eq!(chunk_budget(&target, 435), MIN_CHUNK_BYTES);
        let chunks: Vec<_> = segment(&target, "🦀🦀", 435).collect();
        assert_eq!(chunks, vec!["🦀", "🦀"]);
    }
}
