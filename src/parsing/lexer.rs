use super::error::{ParseError, ParseErrorKind, StringError, StringErrorKind};
use super::{escapes, number, skip_whitespaces, utf8};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(super) enum TokenKind {
    LCurlyBracket,
    RCurlyBracket,
    LSquareBracket,
    RSquareBracket,
    Colon,
    Comma,
    Number,
    String,
    Boolean,
    Null,
}

// a token never owns its text, it is the byte range [start, end) of the input buffer
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(super) struct Token {
    start: usize,
    end: usize,
    pub(super) kind: TokenKind, // type is reserved
}

impl Token {
    fn new(start: usize, end: usize, kind: TokenKind) -> Self {
        Self { start, end, kind }
    }

    pub(super) fn start(&self) -> usize {
        self.start
    }

    pub(super) fn end(&self) -> usize {
        self.end
    }
}

pub(super) struct Lexer<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(super) fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    pub(super) fn advance_by(&mut self, n: usize) {
        self.pos += n;
    }

    // Returns the next token and moves past it, or None when only whitespaces are left
    pub(super) fn lex(&mut self) -> Result<Option<Token>, ParseError> {
        skip_whitespaces(self.buffer, &mut self.pos);
        if self.pos >= self.buffer.len() {
            return Ok(None);
        }

        let start = self.pos;
        let current = self.buffer[start];
        let kind = match current {
            b'{' => TokenKind::LCurlyBracket,
            b'}' => TokenKind::RCurlyBracket,
            b'[' => TokenKind::LSquareBracket,
            b']' => TokenKind::RSquareBracket,
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            b'-' | b'+' | b'0'..=b'9' => {
                self.pos = number::read(self.buffer, start)?;
                return Ok(Some(Token::new(start, self.pos, TokenKind::Number)));
            }
            b'"' => {
                self.pos = self.read_string()?;
                return Ok(Some(Token::new(start, self.pos, TokenKind::String)));
            }
            b't' => {
                self.read_literal(b"true")?;
                return Ok(Some(Token::new(start, self.pos, TokenKind::Boolean)));
            }
            b'f' => {
                self.read_literal(b"false")?;
                return Ok(Some(Token::new(start, self.pos, TokenKind::Boolean)));
            }
            b'n' => {
                self.read_literal(b"null")?;
                return Ok(Some(Token::new(start, self.pos, TokenKind::Null)));
            }
            // a non-ASCII byte is only allowed as part of a string
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCharacter { byte: current },
                    start,
                ));
            }
        };
        self.pos += 1;
        Ok(Some(Token::new(start, self.pos, kind)))
    }

    // Validates the string starting at the opening quotation mark self.buffer[self.pos] and returns
    // the index past the closing one. Escapes are only checked to the point where we know how many
    // bytes to skip; decoding them is the parser's job.
    //
    // memchr2() jumps to the next '"' or '\'; everything in between is plain text that is only
    // checked for raw control characters and malformed utf8
    fn read_string(&mut self) -> Result<usize, StringError> {
        let len = self.buffer.len();
        let mut i = self.pos + 1; // skip opening "

        loop {
            let stop = memchr::memchr2(b'"', b'\\', &self.buffer[i..]).map_or(len, |p| i + p);
            check_text(self.buffer, i, stop)?;
            if stop == len {
                // "abc
                return Err(StringError {
                    kind: StringErrorKind::UnexpectedEof,
                    pos: len,
                });
            }
            if self.buffer[stop] == b'"' {
                return Ok(stop + 1);
            }

            // '\' at stop
            match self.buffer.get(stop + 1) {
                Some(&byte) if escapes::is_escape_character(byte) => i = stop + 2,
                Some(&byte) => {
                    return Err(StringError {
                        kind: StringErrorKind::UnknownEscapedCharacter { byte },
                        pos: stop + 1,
                    });
                }
                None => {
                    return Err(StringError {
                        kind: StringErrorKind::UnexpectedEof,
                        pos: len,
                    });
                }
            }
        }
    }

    // an approach with starts_with() could work but in the case of mismatch we won't know the index
    fn read_literal(&mut self, target: &[u8]) -> Result<(), ParseError> {
        for &byte in target {
            match self.buffer.get(self.pos) {
                Some(&current) if current == byte => self.pos += 1,
                Some(&current) => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedCharacter { byte: current },
                        self.pos,
                    ));
                }
                None => return Err(ParseError::new(ParseErrorKind::UnexpectedEof, self.pos)),
            }
        }
        Ok(())
    }
}

// raw control characters are not allowed
// [34, 10, 34] is invalid - the control character is passed as raw byte, and it is unescaped
// but [34, 92, 110, 34] should be considered valid as a new line character
fn check_text(buffer: &[u8], start: usize, end: usize) -> Result<(), StringError> {
    let mut i = start;
    while i < end {
        let current = buffer[i];
        match current {
            0x00..=0x1F => {
                return Err(StringError {
                    kind: StringErrorKind::InvalidControlCharacter { byte: current },
                    pos: i,
                });
            }
            c if c.is_ascii() => i += 1,
            _ => i += utf8::check_utf8_sequence(buffer, i)?,
        }
    }
    Ok(())
}
