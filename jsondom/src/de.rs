// SPDX-License-Identifier: Apache-2.0

//! Assembles a [`Value`] tree from a notation stream.
//!
//! The deserializer keeps an explicit stack of in-progress containers, so
//! nesting depth is limited by memory rather than the call stack. On any
//! reader error the whole parse fails; no partial tree is returned.

use alloc::string::String;
use alloc::vec::Vec;

use log::trace;

use crate::error::{Error, ErrorKind};
use crate::reader::{Notation, NotationReader};
use crate::source::{CharSource, StrSource};
use crate::value::{Members, Value};

/// One in-progress container awaiting its closing notation. `identifier` is
/// the member name the finalized container attaches under in its parent;
/// empty for array elements and the root.
enum Frame {
    Object { identifier: String, members: Members },
    Array { identifier: String, items: Vec<Value> },
}

/// Read a complete root value from `reader`.
///
/// The reader's construction decides which root shapes are accepted; this
/// function consumes notations until the clean end of the stream.
pub fn deserialize<S: CharSource>(reader: &mut NotationReader<S>) -> Result<Value, Error> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;
    while let Some(notation) = reader.read_next()? {
        match notation {
            Notation::ObjectStart => stack.push(Frame::Object {
                identifier: String::from(reader.identifier()),
                members: Members::new(),
            }),
            Notation::ArrayStart => stack.push(Frame::Array {
                identifier: String::from(reader.identifier()),
                items: Vec::new(),
            }),
            Notation::ObjectEnd | Notation::ArrayEnd => {
                let (identifier, value) = match stack.pop() {
                    Some(Frame::Object { identifier, members }) => {
                        (identifier, Value::Object(members))
                    }
                    Some(Frame::Array { identifier, items }) => {
                        (identifier, Value::Array(items))
                    }
                    // The reader only emits an end notation for a container
                    // it opened.
                    None => {
                        let (line, ch) = reader.position();
                        return Err(Error::new(ErrorKind::UnexpectedClosing, line, ch));
                    }
                };
                attach(&mut stack, &mut root, &identifier, value);
            }
            Notation::String(s) => {
                attach(&mut stack, &mut root, reader.identifier(), Value::String(s));
            }
            Notation::Number(n) => {
                attach(&mut stack, &mut root, reader.identifier(), Value::Number(n));
            }
            Notation::Boolean(b) => {
                attach(&mut stack, &mut root, reader.identifier(), Value::Boolean(b));
            }
            Notation::Null => {
                attach(&mut stack, &mut root, reader.identifier(), Value::Null);
            }
        }
    }
    match root {
        Some(value) => {
            trace!("deserialized a {} root", value.type_name());
            Ok(value)
        }
        None => {
            let (line, ch) = reader.position();
            Err(Error::new(ErrorKind::PrematureEnd, line, ch))
        }
    }
}

fn attach(stack: &mut Vec<Frame>, root: &mut Option<Value>, identifier: &str, value: Value) {
    match stack.last_mut() {
        Some(Frame::Object { members, .. }) => members.insert(identifier, value),
        Some(Frame::Array { items, .. }) => items.push(value),
        None => *root = Some(value),
    }
}

/// Parse a document whose root is an object or array.
pub fn from_str(text: &str) -> Result<Value, Error> {
    let mut reader = NotationReader::from_str(text);
    deserialize(&mut reader)
}

/// Parse a document accepting any single value as the root.
pub fn value_from_str(text: &str) -> Result<Value, Error> {
    let mut reader = NotationReader::with_scalar_root(StrSource::new(text));
    deserialize(&mut reader)
}

/// Parse a document whose root must be an object.
pub fn object_from_str(text: &str) -> Result<Members, Error> {
    let mut reader = NotationReader::from_str(text);
    let mut root = deserialize(&mut reader)?;
    match &mut root {
        Value::Object(members) => Ok(core::mem::take(members)),
        _ => {
            let (line, ch) = reader.position();
            Err(Error::new(ErrorKind::WrongRootShape, line, ch))
        }
    }
}

/// Parse a document whose root must be an array.
pub fn array_from_str(text: &str) -> Result<Vec<Value>, Error> {
    let mut reader = NotationReader::from_str(text);
    let mut root = deserialize(&mut reader)?;
    match &mut root {
        Value::Array(items) => Ok(core::mem::take(items)),
        _ => {
            let (line, ch) = reader.position();
            Err(Error::new(ErrorKind::WrongRootShape, line, ch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use test_log::test;

    #[test]
    fn object_root() {
        let value = from_str(r#"{"a":1,"b":"two"}"#).unwrap();
        assert_eq!(value.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(value.get("b"), Some(&Value::String("two".to_string())));
    }

    #[test]
    fn array_root() {
        let value = from_str("[1,[2],{}]").unwrap();
        assert_eq!(value.get_index(0), Some(&Value::Number(1.0)));
        assert_eq!(
            value.get_index(1).and_then(|v| v.get_index(0)),
            Some(&Value::Number(2.0))
        );
        assert!(value.get_index(2).is_some_and(Value::is_object));
    }

    #[test]
    fn nested_containers_attach_under_their_identifiers() {
        let value = from_str(r#"{"outer":{"inner":[null]}}"#).unwrap();
        let inner = value.get("outer").and_then(|v| v.get("inner")).unwrap();
        assert_eq!(inner.get_index(0), Some(&Value::Null));
    }

    #[test]
    fn duplicate_member_names_last_write_wins() {
        let value = from_str(r#"{"a":1,"a":2}"#).unwrap();
        let members = value.as_object().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members.get("a"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn scalar_roots() {
        assert_eq!(value_from_str("true").unwrap(), Value::Boolean(true));
        assert_eq!(value_from_str("null").unwrap(), Value::Null);
        assert_eq!(value_from_str("-12.5").unwrap(), Value::Number(-12.5));
        assert_eq!(
            value_from_str(r#""text""#).unwrap(),
            Value::String("text".to_string())
        );
        // The lenient reader still takes containers.
        assert!(value_from_str("[1]").unwrap().is_array());
    }

    #[test]
    fn shape_checked_entry_points() {
        assert!(object_from_str("{}").is_ok());
        assert!(array_from_str("[]").is_ok());
        assert_eq!(
            object_from_str("[1]").unwrap_err().kind,
            ErrorKind::WrongRootShape
        );
        assert_eq!(
            array_from_str("{}").unwrap_err().kind,
            ErrorKind::WrongRootShape
        );
    }

    #[test]
    fn failure_propagates_without_partial_tree() {
        let err = from_str(r#"{"a":1,"b":[1,2"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::PrematureEnd);
    }
}
