// SPDX-License-Identifier: Apache-2.0

//! Error types for the reader and writer sides of the codec.

use core::fmt;

/// The failure categories a parse can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The root token was not `{` or `[`.
    ExpectedRootContainer,
    /// A number token violated the strict numeric grammar.
    InvalidNumber,
    /// End of stream inside a string token.
    UnterminatedString,
    /// A `\u` escape contained a non-hex digit.
    InvalidUnicodeHex,
    /// Unknown character after a backslash inside a string.
    InvalidEscape(char),
    /// A run of letters that is not `true`, `false` or `null`, or a
    /// character that cannot start any token.
    InvalidLiteral,
    /// Missing comma between object members or array elements.
    ExpectedComma,
    /// Missing colon after an object member name.
    ExpectedColon,
    /// Object member name was not a string.
    ExpectedKey,
    /// A closing brace or bracket where a value was required.
    UnexpectedClosing,
    /// A comma or colon where a value was required.
    UnexpectedToken,
    /// End of stream before the root value was complete.
    PrematureEnd,
    /// Non-whitespace input after the root value completed.
    TrailingData,
    /// The parsed root was not the shape the caller requested.
    WrongRootShape,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ExpectedRootContainer => {
                f.write_str("Open Curly or Square Brace token expected")
            }
            ErrorKind::InvalidNumber => f.write_str("Poorly formed Json Number token"),
            ErrorKind::UnterminatedString => f.write_str("String token abruptly ended"),
            ErrorKind::InvalidUnicodeHex => {
                f.write_str("Invalid hexadecimal digit in \\u escape sequence")
            }
            ErrorKind::InvalidEscape(c) => write!(f, "Unknown escape character '{c}'"),
            ErrorKind::InvalidLiteral => f.write_str(
                "Invalid Json Token. Check that your member names have quotes around them!",
            ),
            ErrorKind::ExpectedComma => f.write_str("Comma token expected, but not found"),
            ErrorKind::ExpectedColon => f.write_str("Colon token expected, but not found"),
            ErrorKind::ExpectedKey => {
                f.write_str("String token expected as object member name")
            }
            ErrorKind::UnexpectedClosing => {
                f.write_str("Unexpected closing token while reading a value")
            }
            ErrorKind::UnexpectedToken => f.write_str("Unexpected token while reading a value"),
            ErrorKind::PrematureEnd => {
                f.write_str("Stream ended before the root value was closed")
            }
            ErrorKind::TrailingData => {
                f.write_str("Unexpected additional input after the root value")
            }
            ErrorKind::WrongRootShape => f.write_str("Root value was not of the expected type"),
        }
    }
}

/// A parse failure with the 1-based line and in-line character position at
/// which it was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub line: u32,
    pub ch: u32,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, line: u32, ch: u32) -> Self {
        Error { kind, line, ch }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. Line: {} Ch: {}", self.kind, self.line, self.ch)
    }
}

impl core::error::Error for Error {}

/// Misuse or finalization failures on the writer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    /// An identifier was supplied for an array element or the root value.
    UnexpectedIdentifier,
    /// A value was written inside an object without an identifier.
    MissingIdentifier,
    /// A close call did not match the innermost open container.
    UnbalancedClose,
    /// A second root value was written after the first completed.
    WriterDone,
    /// `close` was called while containers were still open.
    UnclosedScopes,
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::UnexpectedIdentifier => {
                f.write_str("identifier supplied outside of an object scope")
            }
            WriteError::MissingIdentifier => {
                f.write_str("object members must be written with an identifier")
            }
            WriteError::UnbalancedClose => {
                f.write_str("close call does not match the open container")
            }
            WriteError::WriterDone => f.write_str("the root value has already been written"),
            WriteError::UnclosedScopes => {
                f.write_str("writer closed while containers were still open")
            }
        }
    }
}

impl core::error::Error for WriteError {}
