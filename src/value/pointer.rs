use super::Value;
use crate::error::{PointerError, PointerErrorKind};

// when we split the pointer to create tokens, apart from the value we also need to know where the
// token started for better error messaging
//
// ~0 and ~1 are replaced while building the token, RefTokens own their data rather than
// referencing slices of the pointer
struct RefToken {
    val: String,
    pos: usize,
}

struct Pointer<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> Pointer<'a> {
    // pointer is non-empty
    fn new(pointer: &'a str) -> Result<Self, PointerError> {
        let buffer = pointer.as_bytes();
        if buffer[0] != b'/' {
            return Err(PointerError::new(PointerErrorKind::InvalidPointerSyntax, 0));
        }
        // pos always points past the '/' that precedes the next token
        Ok(Self { buffer, pos: 1 })
    }

    //  When we encounter '/' we treat it as a delimiter and finalize the current token. If we have
    //  '/' as part of a key name it has to be escaped, ~1 -> /. The same applies for `~`, ~0 -> ~
    //
    //  The order matters; if we replaced first and then split, /foo~1bar -> /foo/bar would evaluate
    //  to the tokens foo, bar instead of foo/bar. We process the input in a single pass, the '/'
    //  produced by ~1 becomes part of the token's content and is never mistaken for a delimiter.
    //  "~01" is "~0" followed by '1' and evaluates to "~1"
    fn next_token(&mut self) -> Result<Option<RefToken>, PointerError> {
        let len = self.buffer.len();
        if self.pos > len {
            return Ok(None);
        }

        let start = self.pos;
        let mut token = Vec::new();
        while self.pos < len && self.buffer[self.pos] != b'/' {
            match self.buffer[self.pos] {
                b'~' => {
                    let ch = match self.buffer.get(self.pos + 1) {
                        Some(b'0') => b'~',
                        Some(b'1') => b'/',
                        _ => return Err(PointerError::new(PointerErrorKind::InvalidEscape, self.pos)),
                    };
                    token.push(ch);
                    self.pos += 2;
                }
                // the pointer is a &str, any multi-byte sequence is copied byte by byte and stays valid
                byte => {
                    token.push(byte);
                    self.pos += 1;
                }
            }
        }
        // move past '/', or past the end of the buffer if this was the last token
        self.pos += 1;

        // only ASCII bytes are ever replaced so the token is valid utf8
        let val = String::from_utf8(token).unwrap_or_default();
        Ok(Some(RefToken { val, pos: start }))
    }
}

// "0", "12" are array indices, "-" refers to the (nonexistent) element after the last one.
// Anything else on an array is an error, except for indices too large for usize; no array can
// hold them, they are treated as not found
fn array_index(token: &RefToken) -> Result<Option<usize>, PointerError> {
    let bytes = token.val.as_bytes();
    let invalid = |message| PointerError::new(PointerErrorKind::InvalidIndex { message }, token.pos);

    match bytes {
        [b'-'] => return Ok(None),
        [b'+' | b'-', b'0'..=b'9', ..] => return Err(invalid("index can not be prefixed with a sign")),
        [b'0', b'0'..=b'9', ..] => return Err(invalid("leading zeros are not allowed")),
        _ if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) => {
            return Err(invalid("invalid array index"));
        }
        _ => (),
    }
    Ok(token.val.parse::<usize>().ok())
}

fn step<'v>(current: &'v Value, token: &RefToken) -> Result<Option<&'v Value>, PointerError> {
    match current {
        Value::Object(map) => Ok(map.get(&token.val)),
        Value::Array(values) => Ok(array_index(token)?.and_then(|index| values.get(index))),
        _ => Ok(None),
    }
}

fn step_mut<'v>(current: &'v mut Value, token: &RefToken) -> Result<Option<&'v mut Value>, PointerError> {
    match current {
        Value::Object(map) => Ok(map.get_mut(&token.val)),
        Value::Array(values) => Ok(array_index(token)?.and_then(|index| values.get_mut(index))),
        _ => Ok(None),
    }
}

impl Value {
    /// Looks up a value by JSON Pointer (RFC 6901).
    ///
    /// The empty pointer refers to the whole document. Missing keys, out of range indices and
    /// traversing into a scalar resolve to `None`; a malformed pointer is an error.
    ///
    /// ```
    /// # use jsondom::json;
    /// let val = json!({"users": [{"name": "Alice"}, {"name": "Bob"}]});
    ///
    /// assert_eq!(val.pointer("/users/1/name"), Ok(Some(&json!("Bob"))));
    /// assert_eq!(val.pointer("/users/2"), Ok(None));
    /// ```
    //
    // In a path /foo/bar/1 we don't know if 1 is an index or a key. If the current value is an
    // object it is treated as a key, if an array as an index. Tokens are generated one at a time
    // and checked against the current value, we stop at the first one that does not match.
    pub fn pointer(&self, pointer: &str) -> Result<Option<&Value>, PointerError> {
        if pointer.is_empty() {
            return Ok(Some(self));
        }

        let mut ptr = Pointer::new(pointer)?;
        let mut current = self;
        while let Some(token) = ptr.next_token()? {
            current = match step(current, &token)? {
                Some(val) => val,
                None => return Ok(None),
            };
        }
        Ok(Some(current))
    }

    /// Same as [`pointer`](Value::pointer) but returns a mutable reference.
    pub fn pointer_mut(&mut self, pointer: &str) -> Result<Option<&mut Value>, PointerError> {
        if pointer.is_empty() {
            return Ok(Some(self));
        }

        let mut ptr = Pointer::new(pointer)?;
        let mut current = self;
        while let Some(token) = ptr.next_token()? {
            current = match step_mut(current, &token)? {
                Some(val) => val,
                None => return Ok(None),
            };
        }
        Ok(Some(current))
    }
}
