use super::error::{ParseError, ParseErrorKind, StringError, StringErrorKind};
use super::lexer::{Lexer, Token, TokenKind};
use super::limits::Limits;
use super::{escapes, number, utf8};
use crate::value::{Map, Value};

enum Action {
    Continue,
    Break,
}

pub(super) struct Parser<'a> {
    buffer: &'a [u8],
    lexer: Lexer<'a>,
    depth: usize,
    peeked: Option<Token>,
    limits: Limits,
}

impl<'a> Parser<'a> {
    pub(super) fn new(buffer: &'a [u8], limits: Limits) -> Self {
        Self {
            buffer,
            lexer: Lexer::new(buffer),
            depth: 0,
            peeked: None,
            limits,
        }
    }

    pub(super) fn parse(&mut self) -> Result<Value, ParseError> {
        if self.buffer.len() > self.limits.max_input_size {
            return Err(ParseError::new(
                ParseErrorKind::InputBufferLimitExceeded {
                    len: self.limits.max_input_size,
                },
                0,
            ));
        }
        // https://www.rfc-editor.org/rfc/rfc8259#section-8.1
        if utf8::is_bom_present(self.buffer) {
            self.lexer.advance_by(3);
        }

        // empty input or only whitespaces, JsonText = ws value ws, a value is mandatory
        let val = self.parse_value()?;
        if let Some(token) = self.peek()? {
            // after successfully parsing a value we can't have leftover tokens
            // false5, "abc"123, {}  null,
            // note that this could return a different error, {}001 -> leading zeros are not allowed
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken { expected: None },
                token.start(),
            ));
        }
        Ok(val)
    }

    // parse_value() consumes the token that starts the value and dispatches on its kind. Scalars are
    // a single token, the value is read from the buffer using the token's range. parse_object() and
    // parse_array() are called with the opening bracket already consumed and they are responsible
    // for consuming everything up to and including the closing bracket.
    //
    // After parsing a value, peek() references the next token after it
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let Some(token) = self.next()? else {
            return Err(self.eof());
        };

        let val = match token.kind {
            TokenKind::LCurlyBracket => Value::Object(self.parse_object(token)?),
            TokenKind::LSquareBracket => Value::Array(self.parse_array(token)?),
            TokenKind::Number => Value::Number(self.parse_number(token)?),
            TokenKind::String => Value::String(self.parse_string(token)?),
            TokenKind::Boolean => Value::Bool(self.buffer[token.start()] == b't'),
            TokenKind::Null => Value::Null,
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken {
                        expected: Some("json value"),
                    },
                    token.start(),
                ));
            }
        };
        Ok(val)
    }

    // read parse_value()
    fn parse_object(&mut self, open: Token) -> Result<Map, ParseError> {
        self.check_depth(open)?;
        self.depth += 1;
        let mut map = Map::new();

        // Case: empty object {}
        match self.peek()? {
            Some(token) if token.kind == TokenKind::RCurlyBracket => {
                self.next()?;
                self.depth -= 1;
                return Ok(map);
            }
            Some(_) => (),
            None => return Err(self.eof()),
        }

        // We don't know how many tokens are part of the current object, the moment we encounter '}'
        // we break
        loop {
            let Some(token) = self.next()? else {
                return Err(self.eof());
            };
            if token.kind != TokenKind::String {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken {
                        expected: Some("object name"),
                    },
                    token.start(),
                ));
            }

            let name = self.parse_string(token)?;
            self.expect_colon()?;
            // {"key": false, "key": true} the last value wins, the key keeps its original position
            map.insert(name, self.parse_value()?);

            // expect Comma to separate key-value pairs or '}' to end current object
            match self.expect_comma_or_end("string key", TokenKind::RCurlyBracket)? {
                Action::Continue => (),
                Action::Break => break,
            }
        }
        Ok(map)
    }

    // read parse_value()
    fn parse_array(&mut self, open: Token) -> Result<Vec<Value>, ParseError> {
        self.check_depth(open)?;
        self.depth += 1;
        let mut arr = Vec::new();

        // Case: empty array []
        match self.peek()? {
            Some(token) if token.kind == TokenKind::RSquareBracket => {
                self.next()?;
                self.depth -= 1;
                return Ok(arr);
            }
            Some(_) => (),
            None => return Err(self.eof()),
        }

        // when we encounter ']' we break
        loop {
            arr.push(self.parse_value()?);
            match self.expect_comma_or_end("json value", TokenKind::RSquareBracket)? {
                Action::Continue => (),
                Action::Break => break,
            }
        }
        Ok(arr)
    }

    // The lexer already validated the string; what is left is to copy the plain chunks and decode
    // the escape sequences. memchr() finds the next '\', everything before it is copied as is.
    fn parse_string(&self, token: Token) -> Result<String, ParseError> {
        let end = token.end() - 1; // closing "
        let mut val = String::with_capacity(end - token.start() - 1);
        let mut i = token.start() + 1;

        while i < end {
            let stop = memchr::memchr(b'\\', &self.buffer[i..end]).map_or(end, |p| i + p);
            if stop > i {
                let chunk = std::str::from_utf8(&self.buffer[i..stop]).map_err(|err| StringError {
                    kind: StringErrorKind::InvalidByteSequence {
                        len: err.error_len().map_or(1, |len| len as u8),
                    },
                    pos: i + err.valid_up_to(),
                })?;
                val.push_str(chunk);
            }
            if stop == end {
                break;
            }

            let (ch, len) = escapes::decode(self.buffer, stop, end)?;
            val.push(ch);
            i = stop + len;
        }

        if val.len() > self.limits.max_string_length {
            return Err(ParseError::new(
                ParseErrorKind::StringLengthLimitExceeded {
                    len: self.limits.max_string_length,
                },
                token.start(),
            ));
        }
        Ok(val)
    }

    fn parse_number(&self, token: Token) -> Result<f64, ParseError> {
        let slice = &self.buffer[token.start()..token.end()];
        Ok(number::to_f64(slice, token.start())?)
    }

    fn expect_colon(&mut self) -> Result<(), ParseError> {
        match self.peek()? {
            Some(token) if token.kind == TokenKind::Colon => {
                self.next()?;
                Ok(())
            }
            // mismatch
            Some(token) => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: Some("colon ':'"),
                },
                token.start(),
            )),
            None => Err(self.eof()),
        }
    }

    // the error points to the bracket that would go one level too deep
    fn check_depth(&self, open: Token) -> Result<(), ParseError> {
        if self.depth + 1 > self.limits.max_nesting_depth {
            return Err(ParseError::new(
                ParseErrorKind::NestingDepthLimitExceeded {
                    depth: self.limits.max_nesting_depth,
                },
                open.start(),
            ));
        }
        Ok(())
    }

    fn expect_comma_or_end(&mut self, expected: &'static str, bracket: TokenKind) -> Result<Action, ParseError> {
        let Some(token) = self.peek()? else {
            return Err(self.eof());
        };

        match token.kind {
            TokenKind::Comma => {
                self.next()?;
                if let Some(next) = self.peek()? {
                    // Case: {"foo": "bar",}
                    if next.kind == bracket {
                        return Err(ParseError::new(
                            ParseErrorKind::UnexpectedToken {
                                expected: Some(expected),
                            },
                            next.start(),
                        ));
                    }
                }
                // if we don't encounter a closing bracket or peek() returned None, continue and let
                // the caller handle it
                Ok(Action::Continue)
            }
            kind if kind == bracket => {
                self.next()?; // Consume '}' or ']'
                self.depth -= 1;
                Ok(Action::Break)
            }
            // mismatch
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: Some("',' or closing bracket"),
                },
                token.start(),
            )),
        }
    }

    fn eof(&self) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedEof, self.buffer.len())
    }

    fn peek(&mut self) -> Result<Option<Token>, ParseError> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.lex()?;
        }
        Ok(self.peeked)
    }

    fn next(&mut self) -> Result<Option<Token>, ParseError> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.lexer.lex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;
    use crate::parsing::error::NumericErrorKind;

    fn parse(buffer: &[u8]) -> Result<Value, ParseError> {
        Parser::new(buffer, Limits::default()).parse()
    }

    fn invalid_objects() -> Vec<(&'static [u8], ParseError)> {
        vec![
            (b"{", ParseError::new(ParseErrorKind::UnexpectedEof, 1)),
            (
                b"{ null : 1 }",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: Some("object name") }, 2),
            ),
            (b"{ \"foo\": 5,", ParseError::new(ParseErrorKind::UnexpectedEof, 11)),
            (b"{ \"foo\": 5", ParseError::new(ParseErrorKind::UnexpectedEof, 10)),
            (
                b"{ \"foo\": 5,}",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: Some("string key") }, 11),
            ),
            (
                b"{ \"foo\": 5 null",
                ParseError::new(
                    ParseErrorKind::UnexpectedToken { expected: Some("',' or closing bracket") },
                    11,
                ),
            ),
            (b"{ \"foo\"", ParseError::new(ParseErrorKind::UnexpectedEof, 7)),
            (
                b"{ \"foo\" 3",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: Some("colon ':'") }, 8),
            ),
            (
                b"{ \"foo\": \"value\" } 123",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: None }, 19),
            ),
            (
                b"{\"a\":1,}",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: Some("string key") }, 7),
            ),
        ]
    }

    fn invalid_arrays() -> Vec<(&'static [u8], ParseError)> {
        vec![
            (b"[", ParseError::new(ParseErrorKind::UnexpectedEof, 1)),
            (b"[1,", ParseError::new(ParseErrorKind::UnexpectedEof, 3)),
            (
                b"[1,]",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: Some("json value") }, 3),
            ),
            (
                b"[1 2]",
                ParseError::new(
                    ParseErrorKind::UnexpectedToken { expected: Some("',' or closing bracket") },
                    3,
                ),
            ),
            (
                b"[,1]",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: Some("json value") }, 1),
            ),
            (
                b"[1}",
                ParseError::new(
                    ParseErrorKind::UnexpectedToken { expected: Some("',' or closing bracket") },
                    2,
                ),
            ),
            (
                b"[] []",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: None }, 3),
            ),
        ]
    }

    fn invalid_scalars() -> Vec<(&'static [u8], ParseError)> {
        vec![
            (b"", ParseError::new(ParseErrorKind::UnexpectedEof, 0)),
            (b" \n\t", ParseError::new(ParseErrorKind::UnexpectedEof, 3)),
            (
                b"01",
                ParseError::new(ParseErrorKind::InvalidNumber(NumericErrorKind::LeadingZeros), 0),
            ),
            (
                b"1e400",
                ParseError::new(ParseErrorKind::InvalidNumber(NumericErrorKind::OutOfRange), 0),
            ),
            (
                b"\"\\uDE00\"",
                ParseError::new(ParseErrorKind::MalformedString(StringErrorKind::InvalidSurrogate), 1),
            ),
            (
                b"\"\\uD83Dx\"",
                ParseError::new(ParseErrorKind::MalformedString(StringErrorKind::InvalidSurrogate), 1),
            ),
            (
                b":",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: Some("json value") }, 0),
            ),
            (
                b"true false",
                ParseError::new(ParseErrorKind::UnexpectedToken { expected: None }, 5),
            ),
        ]
    }

    #[test]
    fn test_invalid_objects() {
        for (buffer, error) in invalid_objects() {
            assert_eq!(parse(buffer), Err(error), "failed to reject: {buffer:?}");
        }
    }

    #[test]
    fn test_invalid_arrays() {
        for (buffer, error) in invalid_arrays() {
            assert_eq!(parse(buffer), Err(error), "failed to reject: {buffer:?}");
        }
    }

    #[test]
    fn test_invalid_scalars() {
        for (buffer, error) in invalid_scalars() {
            assert_eq!(parse(buffer), Err(error), "failed to reject: {buffer:?}");
        }
    }

    #[test]
    fn parse_scalars() {
        assert_eq!(parse(b"null"), Ok(Value::Null));
        assert_eq!(parse(b" true "), Ok(Value::Bool(true)));
        assert_eq!(parse(b"false"), Ok(Value::Bool(false)));
        assert_eq!(parse(b"-12.5e1"), Ok(Value::Number(-125.0)));
        assert_eq!(parse(b"\"abc\""), Ok(Value::String("abc".to_string())));
    }

    #[test]
    fn parse_nested() {
        let buffer = br#"{"a": [1, {"b": null}], "c": {"d": "e"}, "f": []}"#;
        let expected = json!({
            "a": [1, {"b": null}],
            "c": {"d": "e"},
            "f": []
        });

        assert_eq!(parse(buffer), Ok(expected));
    }

    #[test]
    fn parse_escaped_strings() {
        let buffer = br#""a\"b\\c\nd\u00e9\/""#;

        assert_eq!(parse(buffer), Ok(Value::String("a\"b\\c\nd\u{e9}/".to_string())));
    }

    #[test]
    fn parse_surrogate_pair() {
        let val = parse(b"\"\\uD83D\\uDE00\"").unwrap();

        assert_eq!(val, Value::String("\u{1F600}".to_string()));
        assert_eq!(val.len(), 1);
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let val = parse(br#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let map = val.as_object().unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], Value::Number(3.0));
        // the overwritten key keeps its place
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn skip_bom() {
        assert_eq!(parse(b"\xEF\xBB\xBF[1]"), Ok(json!([1])));
    }

    #[test]
    fn nesting_depth_limit_exceeded() {
        let buffer = "[".repeat(257);

        assert_eq!(
            parse(buffer.as_bytes()),
            Err(ParseError::new(ParseErrorKind::NestingDepthLimitExceeded { depth: 128 }, 128))
        );
    }

    #[test]
    fn nesting_depth_at_limit() {
        let buffer = format!("{}{}", "[".repeat(128), "]".repeat(128));

        assert!(parse(buffer.as_bytes()).is_ok());
    }

    #[test]
    fn deep_objects_count_towards_depth() {
        let limits = Limits::default().with_max_nesting_depth(2);
        let mut parser = Parser::new(br#"{"a": [{"b": 1}]}"#, limits);

        assert_eq!(
            parser.parse(),
            Err(ParseError::new(ParseErrorKind::NestingDepthLimitExceeded { depth: 2 }, 7))
        );
    }

    #[test]
    fn input_buffer_limit_exceeded() {
        let limits = Limits::default().with_max_input_size(4);
        let mut parser = Parser::new(b"[1, 2]", limits);

        assert_eq!(
            parser.parse(),
            Err(ParseError::new(ParseErrorKind::InputBufferLimitExceeded { len: 4 }, 0))
        );
    }

    #[test]
    fn string_length_limit_exceeded() {
        let limits = Limits::default().with_max_string_length(3);

        let mut parser = Parser::new(br#"["abc", "abcd"]"#, limits);
        assert_eq!(
            parser.parse(),
            Err(ParseError::new(ParseErrorKind::StringLengthLimitExceeded { len: 3 }, 8))
        );

        // the limit applies to the unescaped text, \u00e9 is 2 bytes
        let mut parser = Parser::new(br#""\u00e9a""#, limits);
        assert_eq!(parser.parse(), Ok(Value::String("\u{e9}a".to_string())));

        // keys are strings too
        let mut parser = Parser::new(br#"{"abcd": 1}"#, limits);
        assert_eq!(
            parser.parse(),
            Err(ParseError::new(ParseErrorKind::StringLengthLimitExceeded { len: 3 }, 1))
        );
    }
}
