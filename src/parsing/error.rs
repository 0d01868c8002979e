use std::fmt;
use thiserror::Error;

use super::utf8::Utf8Error;

/// The reason a string literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StringErrorKind {
    #[error("unterminated string")]
    UnexpectedEof,
    #[error("invalid {len} byte utf-8 sequence")]
    InvalidByteSequence { len: u8 },
    #[error("invalid surrogate pair")]
    InvalidSurrogate,
    // the byte might be part of an utf8 sequence, it is rendered as hex when not printable
    #[error("unknown escape character {}", Printable(.byte))]
    UnknownEscapedCharacter { byte: u8 },
    #[error("invalid hex digit {} in unicode escape", Printable(.digit))]
    InvalidUnicodeSequence { digit: u8 },
    #[error("invalid control character {}", Printable(.byte))]
    InvalidControlCharacter { byte: u8 },
}

/// The reason a number literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericErrorKind {
    #[error("leading zeros are not allowed")]
    LeadingZeros,
    #[error("{message}")]
    InvalidSign { message: &'static str },
    #[error("{message}")]
    InvalidDecimal { message: &'static str },
    #[error("{message}")]
    InvalidScientific { message: &'static str },
    #[error("number out of range")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character {}", Printable(.byte))]
    UnexpectedCharacter { byte: u8 },
    #[error("unexpected token{}", Expected(.expected))]
    UnexpectedToken { expected: Option<&'static str> },
    #[error("invalid number, {0}")]
    InvalidNumber(NumericErrorKind),
    #[error("malformed string, {0}")]
    MalformedString(StringErrorKind),
    #[error("nesting depth exceeded limit of {depth}")]
    NestingDepthLimitExceeded { depth: usize },
    #[error("input size exceeded limit of {len} bytes")]
    InputBufferLimitExceeded { len: usize },
    #[error("string length exceeded limit of {len} bytes")]
    StringLengthLimitExceeded { len: usize },
}

/// Returned when the input is not a valid JSON text.
///
/// `pos` is the byte offset where the violation was detected; for truncated input it is the length
/// of the input. `line` and `column` are 1-based, the column is counted in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    kind: ParseErrorKind,
    pos: usize,
    line: usize,
    column: usize,
}

impl ParseError {
    pub(super) fn new(kind: ParseErrorKind, pos: usize) -> Self {
        Self {
            kind,
            pos,
            line: 1,
            column: pos + 1,
        }
    }

    // positions are tracked as byte offsets while parsing, line/column are only computed once when
    // the error leaves the parser
    pub(super) fn locate(mut self, buffer: &[u8]) -> Self {
        let end = self.pos.min(buffer.len());
        let prefix = &buffer[..end];

        self.line = memchr::memchr_iter(b'\n', prefix).count() + 1;
        self.column = match memchr::memrchr(b'\n', prefix) {
            Some(i) => end - i,
            None => end + 1,
        };
        self
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(super) struct StringError {
    pub(super) kind: StringErrorKind,
    pub(super) pos: usize,
}

impl From<Utf8Error> for StringError {
    fn from(err: Utf8Error) -> Self {
        StringError {
            kind: StringErrorKind::InvalidByteSequence { len: err.len },
            pos: err.pos,
        }
    }
}

impl From<StringError> for ParseError {
    fn from(err: StringError) -> Self {
        ParseError::new(ParseErrorKind::MalformedString(err.kind), err.pos)
    }
}

// renders a byte as a character when it has a text representation, as hex otherwise
struct Printable<'a>(&'a u8);

impl fmt::Display for Printable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = *self.0;
        if byte.is_ascii_graphic() {
            write!(f, "'{}'", byte as char)
        } else {
            write!(f, "(0x{byte:02X})")
        }
    }
}

struct Expected<'a>(&'a Option<&'static str>);

impl fmt::Display for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(expected) => write!(f, ", expected {expected}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_first_line() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEof, 3).locate(b"[1,");

        assert_eq!(err.line(), 1);
        assert_eq!(err.column(), 4);
    }

    #[test]
    fn locate_after_newlines() {
        let buffer = b"{\n  \"a\": 1,\n  ?\n}";
        // '?' is at index 14
        let err = ParseError::new(ParseErrorKind::UnexpectedCharacter { byte: b'?' }, 14).locate(buffer);

        assert_eq!(err.pos(), 14);
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 3);
    }

    #[test]
    fn display_messages() {
        let err = ParseError::new(ParseErrorKind::UnexpectedToken { expected: Some("colon ':'") }, 8);
        assert_eq!(err.to_string(), "unexpected token, expected colon ':' at line 1, column 9");

        let err = ParseError::new(ParseErrorKind::UnexpectedToken { expected: None }, 0);
        assert_eq!(err.to_string(), "unexpected token at line 1, column 1");

        let err = ParseError::new(
            ParseErrorKind::MalformedString(StringErrorKind::InvalidControlCharacter { byte: b'\n' }),
            2,
        );
        assert_eq!(err.to_string(), "malformed string, invalid control character (0x0A) at line 1, column 3");

        let err = ParseError::new(ParseErrorKind::InvalidNumber(NumericErrorKind::LeadingZeros), 0);
        assert_eq!(err.to_string(), "invalid number, leading zeros are not allowed at line 1, column 1");
    }
}
