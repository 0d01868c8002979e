use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::AccessError;
use crate::parsing::error::ParseError;

mod eq;
mod from;
mod index;
mod pointer;

/// The member storage of [`Value::Object`].
///
/// Keys are unique and iterate in insertion order, but the order carries no meaning: equality
/// ignores it and serialization sorts the members by key.
pub type Map = IndexMap<String, Value>;

/// A JSON value.
///
/// A `Value` owns its whole subtree. `clone()` deep-copies it, a move transfers it and
/// [`take`](Value::take) moves it out leaving `Null` behind.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    // integers and floats are unified, integers above 2^53 lose precision
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// The variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Parses a JSON text with the default [`Limits`](crate::Limits).
    ///
    /// Same as [`from_str`](crate::from_str).
    pub fn parse(text: &str) -> Result<Value, ParseError> {
        crate::from_str(text)
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // The typed accessors never coerce, as_f64() on "1" is a TypeMismatch not 1.0
    pub fn as_bool(&self) -> Result<bool, AccessError> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(ValueType::Bool)),
        }
    }

    pub fn as_f64(&self) -> Result<f64, AccessError> {
        match self {
            Value::Number(num) => Ok(*num),
            _ => Err(self.mismatch(ValueType::Number)),
        }
    }

    pub fn as_str(&self) -> Result<&str, AccessError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    pub fn as_string_mut(&mut self) -> Result<&mut String, AccessError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    pub fn as_array(&self) -> Result<&Vec<Value>, AccessError> {
        match self {
            Value::Array(values) => Ok(values),
            _ => Err(self.mismatch(ValueType::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>, AccessError> {
        match self {
            Value::Array(values) => Ok(values),
            _ => Err(self.mismatch(ValueType::Array)),
        }
    }

    pub fn as_object(&self) -> Result<&Map, AccessError> {
        match self {
            Value::Object(map) => Ok(map),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Map, AccessError> {
        match self {
            Value::Object(map) => Ok(map),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    /// Returns the number of code points of a string, the number of elements of an array or the
    /// number of members of an object. Every other variant has a length of 0.
    pub fn len(&self) -> usize {
        match self {
            Value::String(s) => s.chars().count(),
            Value::Array(values) => values.len(),
            Value::Object(map) => map.len(),
            Value::Null | Value::Bool(_) | Value::Number(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves the value out, leaving `Null` in its place.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Serializes the value into its canonical compact text. Object members are sorted by key.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Writes the canonical text of the value to `writer`.
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        write!(writer, "{self}")
    }

    fn mismatch(&self, expected: ValueType) -> AccessError {
        AccessError::TypeMismatch {
            expected,
            found: self.value_type(),
        }
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        crate::from_str(text)
    }
}
