use super::error::{StringError, StringErrorKind};
use super::number;

// the characters that may follow a '\' in a json string
pub(super) fn is_escape_character(byte: u8) -> bool {
    matches!(byte, b'\\' | b'"' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' | b'u')
}

// Decodes the escape sequence starting at buffer[pos] ('\') and returns the character together with
// the length of the sequence in bytes: 2 for the short escapes, 6 for \uXXXX and 12 for a surrogate
// pair. `end` is the index of the closing quotation mark of the string the sequence is part of.
//
// The lexer already verified that '\' is followed by one of the escape characters, what is left to
// check is the hex digits and the surrogate pairing of Unicode sequences.
pub(super) fn decode(buffer: &[u8], pos: usize, end: usize) -> Result<(char, usize), StringError> {
    let ch = match buffer[pos + 1] {
        b'\\' => '\\',
        b'"' => '"',
        b'/' => '/',
        b'b' => '\x08',
        b'f' => '\x0C',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        b'u' => return decode_unicode(buffer, pos, end),
        byte => {
            return Err(StringError {
                kind: StringErrorKind::UnknownEscapedCharacter { byte },
                pos: pos + 1,
            });
        }
    };
    Ok((ch, 2))
}

fn decode_unicode(buffer: &[u8], pos: usize, end: usize) -> Result<(char, usize), StringError> {
    let invalid_surrogate = StringError {
        kind: StringErrorKind::InvalidSurrogate,
        pos,
    };
    let code_unit = read_hex(buffer, pos + 2, end)?;

    if is_low_surrogate(code_unit) {
        // surrogate pairs do not start with low surrogate, it's always high-low
        return Err(invalid_surrogate);
    }
    if !is_high_surrogate(code_unit) {
        return char::from_u32(u32::from(code_unit))
            .map(|ch| (ch, 6))
            .ok_or(invalid_surrogate);
    }

    // a high surrogate must be immediately followed by \u and a low surrogate
    let next = pos + 6;
    if next + 1 >= end || buffer[next] != b'\\' || buffer[next + 1] != b'u' {
        return Err(invalid_surrogate);
    }
    let low = read_hex(buffer, next + 2, end)?;
    if !is_low_surrogate(low) {
        return Err(invalid_surrogate);
    }

    char::from_u32(decode_surrogate_pair(code_unit, low))
        .map(|ch| (ch, 12))
        .ok_or(invalid_surrogate)
}

// pos is at the 1st of the 4 hex digits
fn read_hex(buffer: &[u8], pos: usize, end: usize) -> Result<u16, StringError> {
    let stop = (pos + 4).min(end);
    let val = number::hex_to_u16(&buffer[pos..stop]).map_err(|err| StringError {
        kind: StringErrorKind::InvalidUnicodeSequence { digit: err.digit },
        pos: pos + err.pos,
    })?;

    // "\u12" the string ended before we read 4 digits, the closing quotation mark is the offending digit
    if stop < pos + 4 {
        return Err(StringError {
            kind: StringErrorKind::InvalidUnicodeSequence { digit: buffer[end] },
            pos: end,
        });
    }
    Ok(val)
}

fn is_high_surrogate(val: u16) -> bool {
    matches!(val, 0xD800..=0xDBFF)
}

fn is_low_surrogate(val: u16) -> bool {
    matches!(val, 0xDC00..=0xDFFF)
}

// https://en.wikipedia.org/wiki/UTF-16#U+D800_to_U+DFFF_(surrogates)
fn decode_surrogate_pair(high: u16, low: u16) -> u32 {
    (u32::from(high) - 0xD800) * 0x400 + (u32::from(low) - 0xDC00) + 0x10000
}
