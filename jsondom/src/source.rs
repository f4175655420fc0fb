// SPDX-License-Identifier: Apache-2.0

//! Input abstraction for the notation reader.

use core::str::Chars;

/// A peekable cursor over a stream of characters.
///
/// The reader is generic over this trait so alternative input encodings can
/// be plugged in; the codec never needs more than one character of lookahead.
pub trait CharSource {
    /// Look at the next character without consuming it.
    fn peek(&mut self) -> Option<char>;

    /// Consume and return the next character.
    fn next(&mut self) -> Option<char>;
}

/// A [`CharSource`] over a UTF-8 string slice.
pub struct StrSource<'a> {
    chars: Chars<'a>,
    lookahead: Option<char>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        StrSource {
            chars: text.chars(),
            lookahead: None,
        }
    }
}

impl CharSource for StrSource<'_> {
    fn peek(&mut self) -> Option<char> {
        if self.lookahead.is_none() {
            self.lookahead = self.chars.next();
        }
        self.lookahead
    }

    fn next(&mut self) -> Option<char> {
        match self.lookahead.take() {
            Some(c) => Some(c),
            None => self.chars.next(),
        }
    }
}

/// JSON whitespace: space, tab, carriage return, line feed.
pub(crate) fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
