//! Anchored-match primitives the recursive-descent parsers are built from.
//!
//! A [`Cursor`] is a cheap, `Copy` view into the remaining input. Every parse
//! step either consumes a prefix of the cursor's remaining text or fails
//! without touching it; the [`alt`] combinator relies on that to retry a
//! second parser against the cursor's original position.

use regex::Regex;

use crate::error::ExpandError;

/// A position within the original abbreviation, used for error reporting.
pub type Pos = usize;

/// A `Copy`able cursor over the remaining input.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    full: &'a str,
    pos: Pos,
}

impl<'a> Cursor<'a> {
    /// Build a cursor over the whole of `input`.
    pub fn new(input: &'a str) -> Self {
        Cursor { full: input, pos: 0 }
    }

    /// The text from the current position to the end of input.
    pub fn rest(&self) -> &'a str {
        &self.full[self.pos..]
    }

    /// Current byte offset into the original input.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Whether there is no remaining input.
    pub fn is_empty(&self) -> bool {
        self.rest().is_empty()
    }

    /// Advance the cursor by `n` bytes of the remaining text.
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Peek at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Match `re` at the current position. `re`'s pattern must begin with `^`
    /// so that it only ever matches a prefix of the remaining text, never a
    /// later occurrence — this is the anchoring invariant the whole grammar
    /// depends on.
    ///
    /// On success, returns the match and advances the cursor past it.
    pub fn matches(&mut self, re: &Regex) -> Option<regex::Match<'a>> {
        let rest = self.rest();
        let m = re.find(rest)?;
        debug_assert_eq!(m.start(), 0, "scanner patterns must be anchored with ^");
        self.advance(m.end());
        Some(m)
    }

    /// Like [`Cursor::matches`] but returns captures instead of a whole match.
    pub fn captures(&mut self, re: &Regex) -> Option<regex::Captures<'a>> {
        let rest = self.rest();
        let caps = re.captures(rest)?;
        let m = caps.get(0)?;
        if m.start() != 0 {
            return None;
        }
        let end = m.end();
        self.advance(end);
        Some(caps)
    }

    /// Match `re` or fail with a `Parse` error carrying `expected`.
    pub fn expect(
        &mut self,
        re: &Regex,
        expected: &str,
    ) -> Result<regex::Match<'a>, ExpandError> {
        self.matches(re)
            .ok_or_else(|| ExpandError::parse_at(format!("expected {expected}"), self.pos))
    }

    /// Consume exactly one literal character, if present.
    pub fn eat_char(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.advance(c.len_utf8());
            true
        } else {
            false
        }
    }
}

/// Try `first`; if it fails, rewind `cursor` to its original position and try
/// `second`. Both closures receive a mutable reference to the same cursor
/// variable, so a failed attempt must not be assumed to have left partial
/// output behind — only the cursor position is guaranteed restored.
pub fn alt<'a, T>(
    cursor: &mut Cursor<'a>,
    first: impl FnOnce(&mut Cursor<'a>) -> Result<T, ExpandError>,
    second: impl FnOnce(&mut Cursor<'a>) -> Result<T, ExpandError>,
) -> Result<T, ExpandError> {
    let checkpoint = *cursor;
    match first(cursor) {
        Ok(v) => Ok(v),
        Err(_) => {
            *cursor = checkpoint;
            second(cursor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_advances_and_restores_on_alt() {
        let re_digits = Regex::new(r"^[0-9]+").unwrap();
        let re_word = Regex::new(r"^[a-z]+").unwrap();
        let mut c = Cursor::new("abc123");
        let m = alt(
            &mut c,
            |c| {
                c.expect(&re_digits, "digits")
                    .map(|m| m.as_str().to_string())
            },
            |c| c.expect(&re_word, "word").map(|m| m.as_str().to_string()),
        )
        .unwrap();
        assert_eq!(m, "abc");
        assert_eq!(c.rest(), "123");
    }

    #[test]
    fn failed_match_does_not_advance() {
        let re = Regex::new(r"^[0-9]+").unwrap();
        let mut c = Cursor::new("abc");
        assert!(c.matches(&re).is_none());
        assert_eq!(c.rest(), "abc");
    }
}
