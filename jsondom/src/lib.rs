// SPDX-License-Identifier: Apache-2.0

//! A DOM-building JSON reader and writer.
//!
//! Reading happens in two layers. [`NotationReader`] turns a character
//! source into a stream of structural notations, tracking nesting with an
//! explicit stack so depth is never limited by the call stack.
//! [`deserialize`] (and the `*_from_str` helpers) consumes that stream into
//! an owned [`Value`] tree with insertion-ordered objects.
//!
//! Writing mirrors it: [`JsonWriter`] emits a document call by call under a
//! [`PrintPolicy`], and [`serialize`] walks a [`Value`] tree into one.
//!
//! ```
//! let value = jsondom::from_str(r#"{"a":1,"b":[true,false,null]}"#)?;
//! assert_eq!(value.get("a").and_then(|v| v.as_f64()), Some(1.0));
//! let text = jsondom::to_string(&value)?;
//! assert_eq!(text, r#"{"a":1,"b":[true,false,null]}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod de;
mod error;
mod reader;
mod ser;
mod source;
mod value;

pub use de::{array_from_str, deserialize, from_str, object_from_str, value_from_str};
pub use error::{Error, ErrorKind, WriteError};
pub use reader::{Notation, NotationReader};
pub use ser::{
    serialize, to_string, to_string_pretty, CondensedPrint, JsonWriter, PrettyPrint, PrintPolicy,
};
pub use source::{CharSource, StrSource};
pub use value::{Members, Value};
