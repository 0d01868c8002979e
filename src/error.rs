use thiserror::Error;

use crate::value::ValueType;

/// Returned when a [`Value`](crate::Value) is accessed as something it is not.
///
/// These are programmer errors: the accessor fails at the point of misuse and the value is left
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("type mismatch, expected {expected} but found {found}")]
    TypeMismatch { expected: ValueType, found: ValueType },
    #[error("index {index} is out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("key {key:?} not found")]
    KeyNotFound { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerErrorKind {
    #[error("pointer must be empty or start with '/'")]
    InvalidPointerSyntax,
    // ~ unpaired or followed by anything other than 0 or 1
    #[error("'~' must be followed by '0' or '1'")]
    InvalidEscape,
    #[error("{message}")]
    InvalidIndex { message: &'static str },
}

/// Returned when a JSON Pointer (RFC 6901) is malformed. `pos` is the byte offset into the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at index {pos}")]
pub struct PointerError {
    kind: PointerErrorKind,
    pos: usize,
}

impl PointerError {
    pub(crate) fn new(kind: PointerErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    pub fn kind(&self) -> &PointerErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> usize {
        self.pos
    }
}
