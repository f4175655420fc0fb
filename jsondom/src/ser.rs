// SPDX-License-Identifier: Apache-2.0

//! Value-tree serialization under a pluggable print policy.
//!
//! [`JsonWriter`] is the output surface: callers (or [`serialize`]) emit a
//! document as a sequence of start/value/end calls and the writer handles
//! comma and identifier bookkeeping with its own scope stack. The print
//! policy is a zero-sized type parameter chosen at construction and controls
//! only whitespace, never value text.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;
use core::marker::PhantomData;

use crate::error::WriteError;
use crate::value::Value;

/// Whitespace strategy for a [`JsonWriter`].
pub trait PrintPolicy {
    /// Whitespace before an element written at `depth`.
    fn line_start(out: &mut String, depth: usize);

    /// Whitespace between a member name's colon and its value.
    fn space(out: &mut String);
}

/// Emits no whitespace at all.
pub struct CondensedPrint;

impl PrintPolicy for CondensedPrint {
    fn line_start(_out: &mut String, _depth: usize) {}

    fn space(_out: &mut String) {}
}

/// One element per line, tab-indented to its nesting depth.
pub struct PrettyPrint;

impl PrintPolicy for PrettyPrint {
    fn line_start(out: &mut String, depth: usize) {
        out.push('\n');
        for _ in 0..depth {
            out.push('\t');
        }
    }

    fn space(out: &mut String) {
        out.push(' ');
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Object,
    Array,
}

struct Scope {
    kind: ScopeKind,
    children: usize,
}

/// Emits one JSON document into an owned string.
///
/// Inside an object every write must carry an identifier; inside an array
/// none may. [`JsonWriter::close`] finalizes the document and hands the text
/// back; it must be called exactly once, after the root value completed.
pub struct JsonWriter<P: PrintPolicy = CondensedPrint> {
    out: String,
    stack: Vec<Scope>,
    root_written: bool,
    _policy: PhantomData<P>,
}

impl<P: PrintPolicy> Default for JsonWriter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PrintPolicy> JsonWriter<P> {
    pub fn new() -> Self {
        JsonWriter {
            out: String::new(),
            stack: Vec::new(),
            root_written: false,
            _policy: PhantomData,
        }
    }

    pub fn write_object_start(&mut self, identifier: Option<&str>) -> Result<(), WriteError> {
        self.begin_element(identifier)?;
        self.out.push('{');
        self.stack.push(Scope {
            kind: ScopeKind::Object,
            children: 0,
        });
        Ok(())
    }

    pub fn write_object_end(&mut self) -> Result<(), WriteError> {
        self.end_scope(ScopeKind::Object, '}')
    }

    pub fn write_array_start(&mut self, identifier: Option<&str>) -> Result<(), WriteError> {
        self.begin_element(identifier)?;
        self.out.push('[');
        self.stack.push(Scope {
            kind: ScopeKind::Array,
            children: 0,
        });
        Ok(())
    }

    pub fn write_array_end(&mut self) -> Result<(), WriteError> {
        self.end_scope(ScopeKind::Array, ']')
    }

    pub fn write_string(&mut self, identifier: Option<&str>, value: &str) -> Result<(), WriteError> {
        self.begin_element(identifier)?;
        write_escaped(&mut self.out, value);
        Ok(())
    }

    pub fn write_number(&mut self, identifier: Option<&str>, value: f64) -> Result<(), WriteError> {
        self.begin_element(identifier)?;
        write_number_text(&mut self.out, value);
        Ok(())
    }

    pub fn write_bool(&mut self, identifier: Option<&str>, value: bool) -> Result<(), WriteError> {
        self.begin_element(identifier)?;
        self.out.push_str(if value { "true" } else { "false" });
        Ok(())
    }

    pub fn write_null(&mut self, identifier: Option<&str>) -> Result<(), WriteError> {
        self.begin_element(identifier)?;
        self.out.push_str("null");
        Ok(())
    }

    /// Finalize the document and return the text.
    pub fn close(self) -> Result<String, WriteError> {
        if !self.stack.is_empty() {
            return Err(WriteError::UnclosedScopes);
        }
        Ok(self.out)
    }

    /// Comma/identifier bookkeeping shared by every write call.
    fn begin_element(&mut self, identifier: Option<&str>) -> Result<(), WriteError> {
        let depth = self.stack.len();
        match self.stack.last_mut() {
            Some(scope) => {
                match scope.kind {
                    ScopeKind::Object if identifier.is_none() => {
                        return Err(WriteError::MissingIdentifier)
                    }
                    ScopeKind::Array if identifier.is_some() => {
                        return Err(WriteError::UnexpectedIdentifier)
                    }
                    _ => {}
                }
                if scope.children > 0 {
                    self.out.push(',');
                }
                scope.children += 1;
                P::line_start(&mut self.out, depth);
            }
            None => {
                if self.root_written {
                    return Err(WriteError::WriterDone);
                }
                if identifier.is_some() {
                    return Err(WriteError::UnexpectedIdentifier);
                }
                self.root_written = true;
            }
        }
        if let Some(name) = identifier {
            write_escaped(&mut self.out, name);
            self.out.push(':');
            P::space(&mut self.out);
        }
        Ok(())
    }

    fn end_scope(&mut self, kind: ScopeKind, closing: char) -> Result<(), WriteError> {
        let scope = self.stack.pop().ok_or(WriteError::UnbalancedClose)?;
        if scope.kind != kind {
            return Err(WriteError::UnbalancedClose);
        }
        if scope.children > 0 {
            P::line_start(&mut self.out, self.stack.len());
        }
        self.out.push(closing);
        Ok(())
    }
}

/// Serializer work-stack entry: a value, the member name it is written
/// under, and whether its opening visit already happened.
#[derive(Clone, Copy)]
struct Element<'a> {
    identifier: Option<&'a str>,
    value: &'a Value,
    processed: bool,
}

/// Serialize a complete value tree into `writer`.
///
/// Containers are visited twice: the first visit emits the opening token and
/// pushes the children (in reverse, so they pop in order) together with the
/// element itself marked processed; the second visit emits the closing
/// token. No recursion, so nesting depth is not bounded by the call stack.
pub fn serialize<P: PrintPolicy>(root: &Value, writer: &mut JsonWriter<P>) -> Result<(), WriteError> {
    let mut stack: Vec<Element<'_>> = Vec::new();
    stack.push(Element {
        identifier: None,
        value: root,
        processed: false,
    });
    while let Some(element) = stack.pop() {
        match element.value {
            Value::Object(members) => {
                if element.processed {
                    writer.write_object_end()?;
                } else {
                    writer.write_object_start(element.identifier)?;
                    stack.push(Element {
                        processed: true,
                        ..element
                    });
                    for (name, value) in members.iter().rev() {
                        stack.push(Element {
                            identifier: Some(name),
                            value,
                            processed: false,
                        });
                    }
                }
            }
            Value::Array(items) => {
                if element.processed {
                    writer.write_array_end()?;
                } else {
                    writer.write_array_start(element.identifier)?;
                    stack.push(Element {
                        processed: true,
                        ..element
                    });
                    for value in items.iter().rev() {
                        stack.push(Element {
                            identifier: None,
                            value,
                            processed: false,
                        });
                    }
                }
            }
            Value::String(s) => writer.write_string(element.identifier, s)?,
            Value::Number(n) => writer.write_number(element.identifier, *n)?,
            Value::Boolean(b) => writer.write_bool(element.identifier, *b)?,
            Value::Null => writer.write_null(element.identifier)?,
        }
    }
    Ok(())
}

/// Serialize with the condensed policy.
pub fn to_string(root: &Value) -> Result<String, WriteError> {
    let mut writer = JsonWriter::<CondensedPrint>::new();
    serialize(root, &mut writer)?;
    writer.close()
}

/// Serialize with the pretty policy.
pub fn to_string_pretty(root: &Value) -> Result<String, WriteError> {
    let mut writer = JsonWriter::<PrettyPrint>::new();
    serialize(root, &mut writer)?;
    writer.close()
}

fn write_escaped(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Number text uses the shortest representation that parses back to the
/// same `f64`. Non-finite numbers have no JSON spelling and come out as
/// `null`.
fn write_number_text(out: &mut String, value: f64) {
    if value.is_finite() {
        let _ = write!(out, "{value}");
    } else {
        out.push_str("null");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Members;
    use alloc::string::ToString;
    use alloc::vec;
    use test_log::test;

    #[test]
    fn number_text() {
        let mut out = String::new();
        write_number_text(&mut out, 1.0);
        assert_eq!(out, "1");
        out.clear();
        write_number_text(&mut out, -0.5);
        assert_eq!(out, "-0.5");
        out.clear();
        write_number_text(&mut out, f64::NAN);
        assert_eq!(out, "null");
        out.clear();
        write_number_text(&mut out, f64::INFINITY);
        assert_eq!(out, "null");
    }

    #[test]
    fn string_escaping() {
        let mut out = String::new();
        write_escaped(&mut out, "a\"b\\c\nd\u{01}");
        assert_eq!(out, r#""a\"b\\c\nd\u0001""#);
    }

    #[test]
    fn condensed_document() {
        let mut members = Members::new();
        members.insert("a", Value::Number(1.0));
        members.insert(
            "b",
            Value::Array(vec![
                Value::Boolean(true),
                Value::Boolean(false),
                Value::Null,
            ]),
        );
        let text = to_string(&Value::Object(members)).unwrap();
        assert_eq!(text, r#"{"a":1,"b":[true,false,null]}"#);
    }

    #[test]
    fn pretty_document() {
        let mut members = Members::new();
        members.insert("a", Value::Number(1.0));
        members.insert("b", Value::Array(vec![Value::Boolean(true)]));
        let text = to_string_pretty(&Value::Object(members)).unwrap();
        assert_eq!(text, "{\n\t\"a\": 1,\n\t\"b\": [\n\t\ttrue\n\t]\n}");
    }

    #[test]
    fn empty_containers_stay_inline() {
        let mut members = Members::new();
        members.insert("a", Value::Object(Members::new()));
        members.insert("b", Value::Array(Vec::new()));
        let text = to_string_pretty(&Value::Object(members)).unwrap();
        assert_eq!(text, "{\n\t\"a\": {},\n\t\"b\": []\n}");
    }

    #[test]
    fn scalar_root_documents() {
        assert_eq!(to_string(&Value::Null).unwrap(), "null");
        assert_eq!(to_string(&Value::from("x")).unwrap(), "\"x\"");
    }

    #[test]
    fn manual_composition() {
        let mut writer = JsonWriter::<CondensedPrint>::new();
        writer.write_object_start(None).unwrap();
        writer.write_string(Some("name"), "demo").unwrap();
        writer.write_array_start(Some("items")).unwrap();
        writer.write_number(None, 2.5).unwrap();
        writer.write_null(None).unwrap();
        writer.write_array_end().unwrap();
        writer.write_object_end().unwrap();
        assert_eq!(
            writer.close().unwrap(),
            r#"{"name":"demo","items":[2.5,null]}"#
        );
    }

    #[test]
    fn identifier_rules() {
        let mut writer = JsonWriter::<CondensedPrint>::new();
        writer.write_object_start(None).unwrap();
        assert_eq!(
            writer.write_number(None, 1.0),
            Err(WriteError::MissingIdentifier)
        );

        let mut writer = JsonWriter::<CondensedPrint>::new();
        writer.write_array_start(None).unwrap();
        assert_eq!(
            writer.write_number(Some("a"), 1.0),
            Err(WriteError::UnexpectedIdentifier)
        );

        let mut writer = JsonWriter::<CondensedPrint>::new();
        assert_eq!(
            writer.write_number(Some("a"), 1.0),
            Err(WriteError::UnexpectedIdentifier)
        );
    }

    #[test]
    fn unbalanced_close() {
        let mut writer = JsonWriter::<CondensedPrint>::new();
        writer.write_object_start(None).unwrap();
        assert_eq!(writer.write_array_end(), Err(WriteError::UnbalancedClose));

        let mut writer = JsonWriter::<CondensedPrint>::new();
        assert_eq!(writer.write_object_end(), Err(WriteError::UnbalancedClose));
    }

    #[test]
    fn close_with_open_scope() {
        let mut writer = JsonWriter::<CondensedPrint>::new();
        writer.write_array_start(None).unwrap();
        assert_eq!(writer.close(), Err(WriteError::UnclosedScopes));
    }

    #[test]
    fn second_root_is_rejected() {
        let mut writer = JsonWriter::<CondensedPrint>::new();
        writer.write_null(None).unwrap();
        assert_eq!(writer.write_null(None), Err(WriteError::WriterDone));
    }

    #[test]
    fn member_names_are_escaped() {
        let mut members = Members::new();
        members.insert("a\"b".to_string(), Value::Null);
        assert_eq!(
            to_string(&Value::Object(members)).unwrap(),
            r#"{"a\"b":null}"#
        );
    }
}
