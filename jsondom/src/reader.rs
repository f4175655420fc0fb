// SPDX-License-Identifier: Apache-2.0

//! Streaming tokenizer and notation reader.
//!
//! The tokenizer lexes raw tokens (punctuation, strings, numbers, literals)
//! out of a [`CharSource`] while tracking a 1-based line and in-line
//! character position. The notation reader layers a container-kind stack on
//! top to enforce the comma/colon grammar and maps each raw token to the
//! abstract [`Notation`] it produces. The first error encountered is sticky:
//! every later `read_next` call reports the same terminal error.

use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, trace};

use crate::error::{Error, ErrorKind};
use crate::source::{is_json_whitespace, CharSource, StrSource};

/// Raw lexical tokens, before grammar enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Comma,
    Colon,
    CurlyOpen,
    CurlyClose,
    SquareOpen,
    SquareClose,
    Str,
    Number,
    True,
    False,
    Null,
}

/// The abstract token categories the reader exposes to consumers.
///
/// Scalar notations carry their decoded value; the member name a notation
/// was read under is available from [`NotationReader::identifier`]. Failure
/// is the `Err` arm of `read_next`, a clean end of stream is `Ok(None)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Notation {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// Numeric literal sub-states. Anything other than a digit, `.`, `e`/`E` or
/// an exponent sign ends the token; whether that end is accepted depends on
/// the state it happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Num {
    Start,
    Sign,
    LeadingZero,
    Digits,
    Point,
    Fraction,
    ExponentMark,
    ExponentSign,
    ExponentDigits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    scope: Scope,
    /// Whether at least one member or element has been read in this scope.
    any: bool,
}

/// Pulls [`Notation`]s out of a character source.
pub struct NotationReader<S: CharSource> {
    source: S,
    stack: Vec<Frame>,
    /// Member name the most recent value notation was read under; empty for
    /// array elements and the root.
    identifier: String,
    string_value: String,
    number_value: f64,
    scratch: String,
    line: u32,
    ch: u32,
    root_read: bool,
    allow_scalar_root: bool,
    error: Option<Error>,
}

impl<'a> NotationReader<StrSource<'a>> {
    /// Reader over a string slice; the root must be an object or array.
    pub fn from_str(text: &'a str) -> Self {
        Self::new(StrSource::new(text))
    }
}

impl<S: CharSource> NotationReader<S> {
    /// Reader over an arbitrary source; the root must be an object or array.
    pub fn new(source: S) -> Self {
        Self::with_root_mode(source, false)
    }

    /// Reader that additionally accepts any single scalar as the root value.
    pub fn with_scalar_root(source: S) -> Self {
        Self::with_root_mode(source, true)
    }

    fn with_root_mode(source: S, allow_scalar_root: bool) -> Self {
        NotationReader {
            source,
            stack: Vec::new(),
            identifier: String::new(),
            string_value: String::new(),
            number_value: 0.0,
            scratch: String::new(),
            line: 1,
            ch: 0,
            root_read: false,
            allow_scalar_root,
            error: None,
        }
    }

    /// The member name the last value notation was read under. Empty for
    /// array elements and the root value.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Current (line, in-line character) position, 1-based lines.
    pub fn position(&self) -> (u32, u32) {
        (self.line, self.ch)
    }

    /// Read the next notation.
    ///
    /// Returns `Ok(None)` once the stream is cleanly exhausted after a
    /// complete root value. The first error is sticky: all later calls
    /// return it again without reading further.
    pub fn read_next(&mut self) -> Result<Option<Notation>, Error> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        match self.read_next_inner() {
            Ok(notation) => {
                trace!("notation: {:?}", notation);
                Ok(notation)
            }
            Err(err) => {
                debug!("parse failed: {err}");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn read_next_inner(&mut self) -> Result<Option<Notation>, Error> {
        if self.root_read {
            // Only whitespace may follow the completed root value.
            self.skip_whitespace();
            return match self.source.peek() {
                None => Ok(None),
                Some(_) => Err(self.error_here(ErrorKind::TrailingData)),
            };
        }
        let scope = match self.stack.last() {
            None => return self.read_root(),
            Some(frame) => frame.scope,
        };
        match scope {
            Scope::Object => self.read_object_member(),
            Scope::Array => self.read_array_element(),
        }
    }

    fn read_root(&mut self) -> Result<Option<Notation>, Error> {
        self.identifier.clear();
        let token = self.require_token()?;
        match token {
            Token::CurlyOpen => {
                self.push_scope(Scope::Object);
                Ok(Some(Notation::ObjectStart))
            }
            Token::SquareOpen => {
                self.push_scope(Scope::Array);
                Ok(Some(Notation::ArrayStart))
            }
            _ if self.allow_scalar_root => {
                let notation = self.value_notation(token)?;
                self.root_read = true;
                Ok(Some(notation))
            }
            _ => Err(self.error_here(ErrorKind::ExpectedRootContainer)),
        }
    }

    fn read_object_member(&mut self) -> Result<Option<Notation>, Error> {
        let first = !self.current_has_any();
        let mut token = self.require_token()?;
        if token == Token::CurlyClose {
            return Ok(Some(self.finish_scope()));
        }
        if !first {
            if token != Token::Comma {
                return Err(self.error_here(ErrorKind::ExpectedComma));
            }
            token = self.require_token()?;
        }
        if token != Token::Str {
            return Err(self.error_here(ErrorKind::ExpectedKey));
        }
        self.identifier.clear();
        core::mem::swap(&mut self.identifier, &mut self.string_value);
        if self.require_token()? != Token::Colon {
            return Err(self.error_here(ErrorKind::ExpectedColon));
        }
        let value = self.require_token()?;
        self.mark_member();
        self.value_notation(value).map(Some)
    }

    fn read_array_element(&mut self) -> Result<Option<Notation>, Error> {
        let first = !self.current_has_any();
        let mut token = self.require_token()?;
        if token == Token::SquareClose {
            return Ok(Some(self.finish_scope()));
        }
        if !first {
            if token != Token::Comma {
                return Err(self.error_here(ErrorKind::ExpectedComma));
            }
            token = self.require_token()?;
        }
        self.identifier.clear();
        self.mark_member();
        self.value_notation(token).map(Some)
    }

    /// Map a raw token in value position to the notation it produces,
    /// pushing a scope for container starts.
    fn value_notation(&mut self, token: Token) -> Result<Notation, Error> {
        match token {
            Token::CurlyOpen => {
                self.push_scope(Scope::Object);
                Ok(Notation::ObjectStart)
            }
            Token::SquareOpen => {
                self.push_scope(Scope::Array);
                Ok(Notation::ArrayStart)
            }
            Token::Str => Ok(Notation::String(core::mem::take(&mut self.string_value))),
            Token::Number => Ok(Notation::Number(self.number_value)),
            Token::True => Ok(Notation::Boolean(true)),
            Token::False => Ok(Notation::Boolean(false)),
            Token::Null => Ok(Notation::Null),
            Token::CurlyClose | Token::SquareClose => {
                Err(self.error_here(ErrorKind::UnexpectedClosing))
            }
            Token::Comma | Token::Colon => Err(self.error_here(ErrorKind::UnexpectedToken)),
        }
    }

    fn push_scope(&mut self, scope: Scope) {
        self.stack.push(Frame { scope, any: false });
    }

    fn finish_scope(&mut self) -> Notation {
        let frame = self.stack.pop();
        if self.stack.is_empty() {
            self.root_read = true;
        }
        match frame.map(|f| f.scope) {
            Some(Scope::Array) => Notation::ArrayEnd,
            _ => Notation::ObjectEnd,
        }
    }

    fn current_has_any(&self) -> bool {
        self.stack.last().is_some_and(|frame| frame.any)
    }

    fn mark_member(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.any = true;
        }
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.line, self.ch)
    }

    /// Next raw token, treating end of stream as a premature-end error.
    fn require_token(&mut self) -> Result<Token, Error> {
        match self.next_token()? {
            Some(token) => Ok(token),
            None => Err(self.error_here(ErrorKind::PrematureEnd)),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        self.skip_whitespace();
        let c = match self.source.peek() {
            None => return Ok(None),
            Some(c) => c,
        };
        let token = match c {
            '{' => {
                self.bump();
                Token::CurlyOpen
            }
            '}' => {
                self.bump();
                Token::CurlyClose
            }
            '[' => {
                self.bump();
                Token::SquareOpen
            }
            ']' => {
                self.bump();
                Token::SquareClose
            }
            ',' => {
                self.bump();
                Token::Comma
            }
            ':' => {
                self.bump();
                Token::Colon
            }
            '"' => {
                self.bump();
                self.read_string()?;
                Token::Str
            }
            '-' | '0'..='9' => {
                self.read_number()?;
                Token::Number
            }
            c if c.is_ascii_alphabetic() => self.read_literal()?,
            _ => {
                self.bump();
                return Err(self.error_here(ErrorKind::InvalidLiteral));
            }
        };
        trace!("token {:?} at line {} ch {}", token, self.line, self.ch);
        Ok(Some(token))
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.source.peek() {
            if !is_json_whitespace(c) {
                break;
            }
            self.bump();
        }
    }

    /// Consume one character, maintaining line and column counters.
    fn bump(&mut self) -> Option<char> {
        let c = self.source.next();
        match c {
            Some('\n') => {
                self.line += 1;
                self.ch = 0;
            }
            Some(_) => self.ch += 1,
            None => {}
        }
        c
    }

    /// Decode a string token. The opening quote has been consumed.
    fn read_string(&mut self) -> Result<(), Error> {
        self.string_value.clear();
        loop {
            let c = match self.bump() {
                None => return Err(self.error_here(ErrorKind::UnterminatedString)),
                Some(c) => c,
            };
            match c {
                '"' => return Ok(()),
                '\\' => {
                    let escape = match self.bump() {
                        None => return Err(self.error_here(ErrorKind::UnterminatedString)),
                        Some(e) => e,
                    };
                    let decoded = match escape {
                        '"' => '"',
                        '\\' => '\\',
                        '/' => '/',
                        'f' => '\u{0c}',
                        'r' => '\r',
                        'n' => '\n',
                        'b' => '\u{08}',
                        't' => '\t',
                        'u' => self.read_unicode_escape()?,
                        other => return Err(self.error_here(ErrorKind::InvalidEscape(other))),
                    };
                    self.string_value.push(decoded);
                }
                c => self.string_value.push(c),
            }
        }
    }

    /// Decode the `XXXX` of a `\uXXXX` escape: exactly four hex digits.
    fn read_unicode_escape(&mut self) -> Result<char, Error> {
        let mut code: u32 = 0;
        for _ in 0..4 {
            let digit = match self.bump() {
                None => return Err(self.error_here(ErrorKind::UnterminatedString)),
                Some(h) => match h.to_digit(16) {
                    None => return Err(self.error_here(ErrorKind::InvalidUnicodeHex)),
                    Some(d) => d,
                },
            };
            code = code * 16 + digit;
        }
        // Lone surrogates are not scalar values.
        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Lex a number token with the strict grammar
    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
    ///
    /// The character that ends the number stays unconsumed for the next
    /// token. Ending in a non-accepting state (a lone `-`, a trailing `.`,
    /// an empty exponent) is a malformed-number error.
    fn read_number(&mut self) -> Result<(), Error> {
        self.scratch.clear();
        let mut state = Num::Start;
        loop {
            let next = match (state, self.source.peek()) {
                (Num::Start, Some('-')) => Num::Sign,
                (Num::Start, Some('0')) => Num::LeadingZero,
                (Num::Start, Some('1'..='9')) => Num::Digits,
                (Num::Sign, Some('0')) => Num::LeadingZero,
                (Num::Sign, Some('1'..='9')) => Num::Digits,
                (Num::LeadingZero, Some('.')) => Num::Point,
                (Num::LeadingZero, Some('e' | 'E')) => Num::ExponentMark,
                (Num::Digits, Some('0'..='9')) => Num::Digits,
                (Num::Digits, Some('.')) => Num::Point,
                (Num::Digits, Some('e' | 'E')) => Num::ExponentMark,
                (Num::Point, Some('0'..='9')) => Num::Fraction,
                (Num::Fraction, Some('0'..='9')) => Num::Fraction,
                (Num::Fraction, Some('e' | 'E')) => Num::ExponentMark,
                (Num::ExponentMark, Some('+' | '-')) => Num::ExponentSign,
                (Num::ExponentMark, Some('0'..='9')) => Num::ExponentDigits,
                (Num::ExponentSign, Some('0'..='9')) => Num::ExponentDigits,
                (Num::ExponentDigits, Some('0'..='9')) => Num::ExponentDigits,
                // Accepting states: the token ends before this character.
                (Num::LeadingZero | Num::Digits | Num::Fraction | Num::ExponentDigits, _) => {
                    break
                }
                _ => return Err(self.error_here(ErrorKind::InvalidNumber)),
            };
            if let Some(c) = self.bump() {
                self.scratch.push(c);
            }
            state = next;
        }
        self.number_value = self
            .scratch
            .parse()
            .map_err(|_| self.error_here(ErrorKind::InvalidNumber))?;
        Ok(())
    }

    /// Greedily consume a run of ASCII letters and match it against the
    /// `true`/`false`/`null` literals, ignoring case.
    fn read_literal(&mut self) -> Result<Token, Error> {
        self.scratch.clear();
        while let Some(c) = self.source.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            self.bump();
            self.scratch.push(c);
        }
        if self.scratch.eq_ignore_ascii_case("true") {
            Ok(Token::True)
        } else if self.scratch.eq_ignore_ascii_case("false") {
            Ok(Token::False)
        } else if self.scratch.eq_ignore_ascii_case("null") {
            Ok(Token::Null)
        } else {
            Err(self.error_here(ErrorKind::InvalidLiteral))
        }
    }
}
