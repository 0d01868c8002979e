//! Resource limits applied while parsing.
//!
//! The parser is recursive, so the nesting depth must always be bounded; the other limits are
//! opt-in and default to unlimited.

/// Default maximum nesting depth of arrays/objects.
pub const DEFAULT_NESTING_DEPTH_LIMIT: usize = 128;

// implementation limits: https://www.ibm.com/docs/en/datapower-gateway/10.6.0?topic=20-json-parser-limits
const STRICT_INPUT_BUFFER_LIMIT: usize = 5_242_880;
const STRICT_STRING_LENGTH_LIMIT: usize = 8192;

/// Limits enforced by [`from_slice_with_limits`](crate::from_slice_with_limits) and friends.
///
/// Exceeding any of them makes the parse fail with a [`ParseError`](crate::ParseError); it never
/// aborts the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth of arrays and objects. `[[]]` has a depth of 2.
    pub max_nesting_depth: usize,
    /// Maximum size of the input in bytes.
    pub max_input_size: usize,
    /// Maximum length of a string value or object key in bytes, after unescaping.
    pub max_string_length: usize,
}

impl Limits {
    /// Limits suitable for untrusted input: 5 MiB of input, depth 128 and 8 KiB strings.
    pub const fn strict() -> Self {
        Self {
            max_nesting_depth: DEFAULT_NESTING_DEPTH_LIMIT,
            max_input_size: STRICT_INPUT_BUFFER_LIMIT,
            max_string_length: STRICT_STRING_LENGTH_LIMIT,
        }
    }

    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub const fn with_max_input_size(mut self, len: usize) -> Self {
        self.max_input_size = len;
        self
    }

    pub const fn with_max_string_length(mut self, len: usize) -> Self {
        self.max_string_length = len;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_NESTING_DEPTH_LIMIT,
            max_input_size: usize::MAX,
            max_string_length: usize::MAX,
        }
    }
}
