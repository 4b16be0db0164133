//! Runtime values shared by the stack, memory and instructions.

use std::fmt;

use serde::{Deserialize, Serialize};

mod escape;

pub use escape::{quote, unquote};


/// A scalar stored on the stack or in memory.
///
/// There is no implicit conversion between the two variants; instructions that
/// need a specific kind match on it and fail with a type mismatch otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Str(String),
}

/// Stack and memory cell contents. `None` is the undefined marker produced by
/// reading an address that was never written.
pub type Slot = Option<Value>;

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Str(_) => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Int(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Int(if value { 1 } else { 0 })
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

pub const UNDEFINED: &str = "undefined";

/// Type name of a slot, `"undefined"` for the undefined marker.
pub fn slot_type_name(slot: &Slot) -> &'static str {
    slot.as_ref().map_or(UNDEFINED, Value::type_name)
}

/// Textual form of a slot as written by the `out` instruction.
pub fn render_slot(slot: &Slot) -> String {
    match slot {
        Some(value) => value.to_string(),
        None => UNDEFINED.to_string(),
    }
}
