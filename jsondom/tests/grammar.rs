// SPDX-License-Identifier: Apache-2.0

//! Grammar conformance at the document level: inputs that must parse and
//! inputs that must fail, with the error category and reported position.

use jsondom::{from_str, ErrorKind};
use test_log::test;

fn accepts(text: &str) {
    assert!(from_str(text).is_ok(), "should parse: {text}");
}

fn rejects(text: &str) -> jsondom::Error {
    match from_str(text) {
        Ok(value) => panic!("should fail: {text} (got {value:?})"),
        Err(err) => err,
    }
}

#[test]
fn y_documents() {
    accepts("{}");
    accepts("[]");
    accepts(r#"{"a":{"b":{"c":[]}}}"#);
    accepts("[0, -0, 1.5e10, -3.25E-7, 100, 0.001]");
    accepts(r#"["", "A", "\\", "\/"]"#);
    accepts(" \t\r\n [ null ] \t\r\n ");
}

#[test]
fn n_numbers() {
    for text in ["[1.]", "[1e]", "[1e+]", "[-]", "[--1]"] {
        let err = rejects(text);
        assert_eq!(err.kind, ErrorKind::InvalidNumber, "input: {text}");
    }
    // A leading `+` or `.` cannot start any token at all.
    assert_eq!(rejects("[+1]").kind, ErrorKind::InvalidLiteral);
    assert_eq!(rejects("[.5]").kind, ErrorKind::InvalidLiteral);
    // A leading zero ends the token, so the stray digit surfaces as a
    // missing comma rather than a malformed number.
    assert_eq!(rejects("[01]").kind, ErrorKind::ExpectedComma);
}

#[test]
fn n_roots() {
    assert_eq!(rejects("42").kind, ErrorKind::ExpectedRootContainer);
    assert_eq!(rejects("\"text\"").kind, ErrorKind::ExpectedRootContainer);
    assert_eq!(rejects("true").kind, ErrorKind::ExpectedRootContainer);
    assert_eq!(rejects("").kind, ErrorKind::PrematureEnd);
}

#[test]
fn n_unterminated_containers() {
    for text in ["{", "[", r#"{"a":1"#, "[1, 2", r#"{"a":"#] {
        let err = rejects(text);
        assert_eq!(err.kind, ErrorKind::PrematureEnd, "input: {text}");
    }
}

#[test]
fn n_trailing_data() {
    assert_eq!(rejects(r#"{"a":1} garbage"#).kind, ErrorKind::TrailingData);
    assert_eq!(rejects("[] []").kind, ErrorKind::TrailingData);
    // Trailing whitespace is not trailing data.
    accepts("{} \t\r\n");
}

#[test]
fn n_member_names() {
    let err = rejects("{a:1}");
    assert_eq!(err.kind, ErrorKind::InvalidLiteral);
    assert_eq!(rejects("{1:2}").kind, ErrorKind::ExpectedKey);
    assert_eq!(rejects("{null:1}").kind, ErrorKind::ExpectedKey);
}

#[test]
fn n_separators() {
    assert_eq!(rejects(r#"{"a":1 "b":2}"#).kind, ErrorKind::ExpectedComma);
    assert_eq!(rejects(r#"{"a" 1}"#).kind, ErrorKind::ExpectedColon);
    assert_eq!(rejects("[1 2]").kind, ErrorKind::ExpectedComma);
    assert_eq!(rejects("[1,]").kind, ErrorKind::UnexpectedClosing);
    assert_eq!(rejects("[,]").kind, ErrorKind::UnexpectedToken);
    assert_eq!(rejects("[}").kind, ErrorKind::UnexpectedClosing);
    assert_eq!(rejects("{]").kind, ErrorKind::ExpectedKey);
}

#[test]
fn error_messages_carry_position() {
    let err = rejects("42");
    assert_eq!(
        err.to_string(),
        "Open Curly or Square Brace token expected. Line: 1 Ch: 2"
    );

    let err = rejects("{\n\t1: 2\n}");
    assert_eq!(err.kind, ErrorKind::ExpectedKey);
    assert_eq!((err.line, err.ch), (2, 2));
}

#[test]
fn member_name_message_mentions_quotes() {
    let err = rejects("{a:1}");
    assert!(
        err.to_string()
            .starts_with("Invalid Json Token. Check that your member names have quotes around them!"),
        "message was: {err}"
    );
}
