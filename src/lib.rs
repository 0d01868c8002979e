//! An in-memory JSON document model.
//!
//! JSON text is parsed into a [`Value`] tree, inspected and mutated through type-checked accessors
//! and serialized back into canonical compact text.
//!
//! ```
//! use jsondom::{json, Value};
//!
//! let mut val = jsondom::from_str(r#"{"name": "jsondom", "tags": ["json"]}"#)?;
//! val["tags"].as_array_mut()?.push(Value::from("dom"));
//! val["version"] = json!(1);
//!
//! assert_eq!(val.serialize(), r#"{"name":"jsondom","tags":["json","dom"],"version":1}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Parsing never panics, malformed input is reported as a [`ParseError`] carrying the position of
//! the violation. Accessing a value as something it is not is an [`AccessError`].

mod error;
mod macros;
mod parsing;
mod serializer;
mod value;

pub use error::{AccessError, PointerError, PointerErrorKind};
pub use parsing::error::{NumericErrorKind, ParseError, ParseErrorKind, StringErrorKind};
pub use parsing::limits::{DEFAULT_NESTING_DEPTH_LIMIT, Limits};
pub use value::{Map, Value, ValueType};

/// Parses a JSON text with the default [`Limits`].
pub fn from_str(text: &str) -> Result<Value, ParseError> {
    from_slice(text.as_bytes())
}

/// Parses a JSON text from raw bytes with the default [`Limits`].
///
/// The input must be UTF-8, a leading byte order mark is skipped.
pub fn from_slice(buffer: &[u8]) -> Result<Value, ParseError> {
    from_slice_with_limits(buffer, Limits::default())
}

pub fn from_str_with_limits(text: &str, limits: Limits) -> Result<Value, ParseError> {
    from_slice_with_limits(text.as_bytes(), limits)
}

pub fn from_slice_with_limits(buffer: &[u8], limits: Limits) -> Result<Value, ParseError> {
    parsing::parse(buffer, limits)
}

/// Serializes `val` into its canonical compact text, same as [`Value::serialize`].
pub fn to_string(val: &Value) -> String {
    val.serialize()
}
