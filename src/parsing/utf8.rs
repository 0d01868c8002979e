// Returns the number of bytes in an utf8 sequence based on the value of the leading byte
// https://en.wikipedia.org/wiki/UTF-8
//
// Index 0-127 (0x00-0x7F): ASCII = 1 byte
// Index 128-191 (0x80-0xBF): Continuation bytes = 0 (invalid as first byte)
// Index 192-223 (0xC0-0xDF): 2-byte sequence starters = 2, C0-C1 are invalid (0)
// Index 224-239 (0xE0-0xEF): 3-byte sequence starters = 3
// Index 240-244 (0xF0-0xF4): 4-byte sequence starters = 4
// Index 245-255 (0xF5-0xFF): Invalid = 0
const UTF8_CHAR_WIDTH: [u8; 256] = [
    // 1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 1
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 2
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 3
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 4
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 5
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 6
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 7
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 8
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 9
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // A
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // B
    0, 0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, // C
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, // D
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, // E
    4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // F
];

// only 1 kind of Utf8Error, an invalid byte sequence of `len` bytes starting at `pos`
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Utf8Error {
    pub(super) len: u8,
    pub(super) pos: usize,
}

// Validates the sequence starting at buffer[pos] and returns its width
//
// https://datatracker.ietf.org/doc/html/rfc3629
//
//  UTF8-2      = %xC2-DF UTF8-tail
//  UTF8-3      = %xE0 %xA0-BF UTF8-tail / %xE1-EC 2( UTF8-tail ) /
//                %xED %x80-9F UTF8-tail / %xEE-EF 2( UTF8-tail )
//  UTF8-4      = %xF0 %x90-BF 2( UTF8-tail ) / %xF1-F3 3( UTF8-tail ) /
//                %xF4 %x80-8F 2( UTF8-tail )
//  UTF8-tail   = %x80-BF
//
// The second byte carries the range restrictions that exclude overlong encodings, surrogates
// (ED A0..BF) and code points above U+10FFFF; every byte after it is a plain tail byte.
pub(super) fn check_utf8_sequence(buffer: &[u8], pos: usize) -> Result<usize, Utf8Error> {
    let first = buffer[pos];
    let width = UTF8_CHAR_WIDTH[first as usize];
    let err = Utf8Error { len: width.max(1), pos };

    if width < 2 {
        return Err(err);
    }
    let width = width as usize;
    if pos + width > buffer.len() {
        return Err(err);
    }

    let second = buffer[pos + 1];
    let valid_second = matches!(
        (first, second),
        (0xC2..=0xDF, 0x80..=0xBF)
        | (0xE0, 0xA0..=0xBF)
        | (0xE1..=0xEC, 0x80..=0xBF)
        | (0xED, 0x80..=0x9F)
        | (0xEE..=0xEF, 0x80..=0xBF)
        | (0xF0, 0x90..=0xBF)
        | (0xF1..=0xF3, 0x80..=0xBF)
        | (0xF4, 0x80..=0x8F)
    );
    if !valid_second {
        return Err(err);
    }

    // A valid utf8 tail byte is in the range 0x80-0xBF (128-191). Cast to i8 that is -128..=-65,
    // anything greater than or equal to -64 is not a tail byte
    if buffer[pos + 2..pos + width].iter().any(|&b| b as i8 >= -64) {
        return Err(err);
    }
    Ok(width)
}

pub(super) fn is_bom_present(buffer: &[u8]) -> bool {
    buffer.len() >= 3 && (buffer[0], buffer[1], buffer[2]) == (0xEF, 0xBB, 0xBF)
}
