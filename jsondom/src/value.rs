// SPDX-License-Identifier: Apache-2.0

//! The JSON value tree.

use alloc::string::String;
use alloc::vec::Vec;

/// An object's members: a map from member name to value that preserves
/// insertion order.
///
/// Order only matters for round-trip text stability; equality ignores it.
/// Member names are unique, with the last write winning.
#[derive(Debug, Clone, Default)]
pub struct Members {
    entries: Vec<(String, Value)>,
}

impl Members {
    pub fn new() -> Self {
        Members {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set a member. An existing member of the same name is replaced in
    /// place, keeping its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Value)> + ExactSizeIterator {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Equality compares the key set and values, not insertion order.
impl PartialEq for Members {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl FromIterator<(String, Value)> for Members {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut members = Members::new();
        for (name, value) in iter {
            members.insert(name, value);
        }
        members
    }
}

/// A parsed JSON document: a tagged union over the six JSON value kinds.
///
/// The tree is a plain owning structure: every container exclusively owns
/// its children, and discarding the root discards the whole tree. Numbers
/// are stored as `f64`; there is no separate integer kind. Clone, equality
/// and teardown all walk the tree with explicit stacks, so none of them is
/// depth-limited by the call stack.
#[derive(Debug, Default)]
pub enum Value {
    Object(Members),
    Array(Vec<Value>),
    String(String),
    Number(f64),
    Boolean(bool),
    #[default]
    Null,
}

impl Value {
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Members> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Members> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Object member by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|members| members.get(name))
    }

    /// Array element by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// The value kind's name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
        }
    }
}

/// One container being rebuilt during a clone: the source entries, a cursor
/// over them, and the partially built copy.
enum CloneFrame<'a> {
    Object {
        src: &'a [(String, Value)],
        next: usize,
        dst: Vec<(String, Value)>,
    },
    Array {
        src: &'a [Value],
        next: usize,
        dst: Vec<Value>,
    },
}

impl<'a> CloneFrame<'a> {
    /// A frame for a container, or `Err` with the finished copy of a scalar.
    fn open(value: &'a Value) -> Result<Self, Value> {
        match value {
            Value::Object(members) => Ok(CloneFrame::Object {
                src: &members.entries,
                next: 0,
                dst: Vec::with_capacity(members.entries.len()),
            }),
            Value::Array(items) => Ok(CloneFrame::Array {
                src: items,
                next: 0,
                dst: Vec::with_capacity(items.len()),
            }),
            Value::String(s) => Err(Value::String(s.clone())),
            Value::Number(n) => Err(Value::Number(*n)),
            Value::Boolean(b) => Err(Value::Boolean(*b)),
            Value::Null => Err(Value::Null),
        }
    }

    /// The next child still awaiting its copy, if any.
    fn next_child(&self) -> Option<&'a Value> {
        match self {
            CloneFrame::Object { src, next, .. } => {
                let entries = *src;
                entries.get(*next).map(|(_, value)| value)
            }
            CloneFrame::Array { src, next, .. } => {
                let items = *src;
                items.get(*next)
            }
        }
    }

    /// Store the copy of the current child and advance the cursor.
    fn accept(&mut self, value: Value) {
        match self {
            CloneFrame::Object { src, next, dst } => {
                dst.push((src[*next].0.clone(), value));
                *next += 1;
            }
            CloneFrame::Array { next, dst, .. } => {
                dst.push(value);
                *next += 1;
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            CloneFrame::Object { dst, .. } => Value::Object(Members { entries: dst }),
            CloneFrame::Array { dst, .. } => Value::Array(dst),
        }
    }
}

// Cloning runs on an explicit frame stack for the same reason parsing and
// serialization do: a deeply nested tree must not recurse down the call
// stack.
impl Clone for Value {
    fn clone(&self) -> Self {
        let mut stack: Vec<CloneFrame<'_>> = Vec::new();
        match CloneFrame::open(self) {
            Ok(frame) => stack.push(frame),
            Err(scalar) => return scalar,
        }
        while let Some(frame) = stack.last_mut() {
            match frame.next_child() {
                Some(child) => match CloneFrame::open(child) {
                    Ok(opened) => stack.push(opened),
                    Err(scalar) => frame.accept(scalar),
                },
                None => {
                    let closed = match stack.pop() {
                        Some(done) => done.finish(),
                        None => break,
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.accept(closed),
                        None => return closed,
                    }
                }
            }
        }
        // The root frame always returns above.
        Value::Null
    }
}

/// Equality compares structurally, with objects order-insensitive; the
/// pending comparisons live on an explicit stack.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Value, &Value)> = Vec::new();
        pending.push((self, other));
        while let Some(pair) = pending.pop() {
            match pair {
                (Value::Object(a), Value::Object(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    for (name, left) in a.iter() {
                        match b.get(name) {
                            Some(right) => pending.push((left, right)),
                            None => return false,
                        }
                    }
                }
                (Value::Array(a), Value::Array(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    pending.extend(a.iter().zip(b.iter()));
                }
                (Value::String(a), Value::String(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Value::Number(a), Value::Number(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Value::Boolean(a), Value::Boolean(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Value::Null, Value::Null) => {}
                _ => return false,
            }
        }
        true
    }
}

// Teardown is iterative for the same reason parsing and serialization are:
// a deeply nested tree must not recurse down the call stack.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending: Vec<Value> = match self {
            Value::Object(members) if !members.is_empty() => members
                .entries
                .drain(..)
                .map(|(_, child)| child)
                .collect(),
            Value::Array(items) if !items.is_empty() => core::mem::take(items),
            _ => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Object(members) => {
                    pending.extend(members.entries.drain(..).map(|(_, child)| child));
                }
                Value::Array(items) => pending.append(items),
                _ => {}
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Members> for Value {
    fn from(value: Members) -> Self {
        Value::Object(value)
    }
}
