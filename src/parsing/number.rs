use super::error::{NumericErrorKind, ParseError, ParseErrorKind};

// much better approach than passing boolean flags around, foo(true, true, false) is hard to understand
struct NumberState {
    decimal_point: bool,
    scientific_notation: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub(super) struct NumericError {
    pub(super) kind: NumericErrorKind,
    pub(super) pos: usize,
}

impl From<NumericError> for ParseError {
    fn from(err: NumericError) -> Self {
        ParseError::new(ParseErrorKind::InvalidNumber(err.kind), err.pos)
    }
}

// https://www.rfc-editor.org/rfc/rfc8259#section-6
//
//  number = [ minus ] int [ frac ] [ exp ]
//  int = zero / ( digit1-9 *DIGIT )
//  frac = decimal-point 1*DIGIT
//  exp = e [ minus / plus ] 1*DIGIT
//
// buffer[pos] is '-', '+' or a digit. Returns the index of the 1st byte after the number.
pub(super) fn read(buffer: &[u8], pos: usize) -> Result<usize, NumericError> {
    let len = buffer.len();
    let mut i = pos;

    // +9
    if buffer[i] == b'+' {
        return Err(NumericError {
            kind: NumericErrorKind::InvalidSign {
                message: "json specification prohibits numbers from being prefixed with a plus sign",
            },
            pos,
        });
    }
    if buffer[i] == b'-' {
        i += 1;
        // '-' or -a, -0 is valid
        if i >= len || !buffer[i].is_ascii_digit() {
            return Err(NumericError {
                kind: NumericErrorKind::InvalidSign {
                    message: "a valid numeric value requires a digit (0-9) after the minus sign",
                },
                pos,
            });
        }
    }

    if buffer[i] == b'0' {
        // 05 not allowed
        if i + 1 < len && buffer[i + 1].is_ascii_digit() {
            return Err(NumericError {
                kind: NumericErrorKind::LeadingZeros,
                pos: i,
            });
        }
        i += 1;
    } else {
        i = skip_digits(buffer, i);
    }

    let mut state = NumberState {
        decimal_point: false,
        scientific_notation: false,
    };

    if i < len && buffer[i] == b'.' {
        // 1. or 2.g
        if i + 1 >= len || !buffer[i + 1].is_ascii_digit() {
            return Err(NumericError {
                kind: NumericErrorKind::InvalidDecimal {
                    message: "decimal point must be followed by a digit",
                },
                pos: i,
            });
        }
        state.decimal_point = true;
        i = skip_digits(buffer, i + 1);
    }

    if i < len && matches!(buffer[i], b'e' | b'E') {
        let e = i;
        i += 1;
        if i < len && matches!(buffer[i], b'+' | b'-') {
            // 1E+g
            if i + 1 >= len || !buffer[i + 1].is_ascii_digit() {
                return Err(NumericError {
                    kind: NumericErrorKind::InvalidScientific {
                        message: "exponential notation must be followed by a digit",
                    },
                    pos: i,
                });
            }
            i += 1;
        } else if i >= len || !buffer[i].is_ascii_digit() {
            // 1e or 1eg
            return Err(NumericError {
                kind: NumericErrorKind::InvalidScientific {
                    message: "exponential notation must be followed by a digit or a sign",
                },
                pos: e,
            });
        }
        // Leading zeros are allowed on the exponent 1e005 evaluates to 100000
        state.scientific_notation = true;
        i = skip_digits(buffer, i);
    }

    if i < len {
        check_trailing(buffer[i], i, &state)?;
    }
    Ok(i)
}

// The number is complete at this point, but some characters right after it are almost certainly a
// malformed number rather than the start of the next token; report them as such for a better error
// than "unexpected character"
fn check_trailing(byte: u8, pos: usize, state: &NumberState) -> Result<(), NumericError> {
    let kind = match byte {
        // 1.2.3
        b'.' if state.scientific_notation => NumericErrorKind::InvalidDecimal {
            message: "decimal point is not allowed after exponential notation",
        },
        b'.' if state.decimal_point => NumericErrorKind::InvalidDecimal {
            message: "double decimal point found",
        },
        // 1e2E3
        b'e' | b'E' => NumericErrorKind::InvalidScientific {
            message: "double exponential notation('e' or 'E') found",
        },
        // 1+2
        b'+' | b'-' => NumericErrorKind::InvalidScientific {
            message: "sign ('+' or '-') is only allowed as part of exponential notation",
        },
        _ => return Ok(()),
    };
    Err(NumericError { kind, pos })
}

fn skip_digits(buffer: &[u8], mut pos: usize) -> usize {
    while pos < buffer.len() && buffer[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

// Overflow: Parsing a number that exceeds f64::MAX/MIN will cause parse::<f64>() to return inf/-inf
// Since infinity and nan are not supported in the json rfc we can safely say that the number is
// out of range. Underflow rounds towards zero, 1e-400 is 0.
//
// `slice` must have been accepted by read()
pub(super) fn to_f64(slice: &[u8], pos: usize) -> Result<f64, NumericError> {
    let out_of_range = NumericError {
        kind: NumericErrorKind::OutOfRange,
        pos,
    };
    let val = std::str::from_utf8(slice)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or(out_of_range)?;

    if val.is_infinite() {
        return Err(NumericError {
            kind: NumericErrorKind::OutOfRange,
            pos,
        });
    }
    Ok(val)
}

#[derive(Debug, PartialEq, Eq)]
pub(super) struct HexError {
    pub(super) digit: u8,
    pub(super) pos: usize,
}

// We return u16 because the valid range for the Unicode sequences are 0x0000-0xFFFF(0-65535)
pub(super) fn hex_to_u16(buffer: &[u8]) -> Result<u16, HexError> {
    let mut val: u16 = 0;

    // digit - b'a' returns a value in the [0,25] range but in base 16 a/A is 10 not 0, b/B is 11
    // + 10 brings into that range
    for (index, &byte) in buffer.iter().enumerate() {
        let hex_val = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => return Err(HexError { digit: byte, pos: index }),
        };
        val = val * 16 + u16::from(hex_val);
    }
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_numbers() -> Vec<(&'static [u8], usize)> {
        vec![
            (b"0", 1),
            (b"-0", 2),
            (b"123", 3),
            (b"-45", 3),
            (b"123.45", 6),
            (b"1e10", 4),
            (b"1E+2", 4),
            (b"-0.1e-2", 7),
            // leading zeros in the exponent are fine
            (b"1e005", 5),
            // the number ends before the delimiter
            (b"12,", 2),
            (b"0]", 1),
        ]
    }

    fn invalid_numbers() -> Vec<(&'static [u8], NumericError)> {
        vec![
            (b"+9", NumericError {
                kind: NumericErrorKind::InvalidSign {
                    message: "json specification prohibits numbers from being prefixed with a plus sign",
                },
                pos: 0,
            }),
            (b"-", NumericError {
                kind: NumericErrorKind::InvalidSign {
                    message: "a valid numeric value requires a digit (0-9) after the minus sign",
                },
                pos: 0,
            }),
            (b"-a", NumericError {
                kind: NumericErrorKind::InvalidSign {
                    message: "a valid numeric value requires a digit (0-9) after the minus sign",
                },
                pos: 0,
            }),
            (b"01", NumericError {
                kind: NumericErrorKind::LeadingZeros,
                pos: 0,
            }),
            (b"-06", NumericError {
                kind: NumericErrorKind::LeadingZeros,
                pos: 1,
            }),
            (b"1.2.3", NumericError {
                kind: NumericErrorKind::InvalidDecimal {
                    message: "double decimal point found",
                },
                pos: 3,
            }),
            (b"1.", NumericError {
                kind: NumericErrorKind::InvalidDecimal {
                    message: "decimal point must be followed by a digit",
                },
                pos: 1,
            }),
            (b"1.a", NumericError {
                kind: NumericErrorKind::InvalidDecimal {
                    message: "decimal point must be followed by a digit",
                },
                pos: 1,
            }),
            (b"4e5.1", NumericError {
                kind: NumericErrorKind::InvalidDecimal {
                    message: "decimal point is not allowed after exponential notation",
                },
                pos: 3,
            }),
            (b"1e2e5", NumericError {
                kind: NumericErrorKind::InvalidScientific {
                    message: "double exponential notation('e' or 'E') found",
                },
                pos: 3,
            }),
            (b"1e", NumericError {
                kind: NumericErrorKind::InvalidScientific {
                    message: "exponential notation must be followed by a digit or a sign",
                },
                pos: 1,
            }),
            (b"246Ef", NumericError {
                kind: NumericErrorKind::InvalidScientific {
                    message: "exponential notation must be followed by a digit or a sign",
                },
                pos: 3,
            }),
            (b"83+1", NumericError {
                kind: NumericErrorKind::InvalidScientific {
                    message: "sign ('+' or '-') is only allowed as part of exponential notation",
                },
                pos: 2,
            }),
            (b"1e+", NumericError {
                kind: NumericErrorKind::InvalidScientific {
                    message: "exponential notation must be followed by a digit",
                },
                pos: 2,
            }),
            (b"1e+f", NumericError {
                kind: NumericErrorKind::InvalidScientific {
                    message: "exponential notation must be followed by a digit",
                },
                pos: 2,
            }),
        ]
    }

    #[test]
    fn test_valid_numbers() {
        for (buffer, end) in valid_numbers() {
            assert_eq!(read(buffer, 0), Ok(end), "failed to read: {buffer:?}");
        }
    }

    #[test]
    fn test_invalid_numbers() {
        for (buffer, error) in invalid_numbers() {
            assert_eq!(read(buffer, 0), Err(error), "failed to reject: {buffer:?}");
        }
    }

    #[test]
    fn convert_to_f64() {
        assert_eq!(to_f64(b"-0.1e-2", 0), Ok(-0.001));
        assert_eq!(to_f64(b"9007199254740993", 0), Ok(9_007_199_254_740_992.0));
        assert_eq!(to_f64(b"1e-400", 0), Ok(0.0));
    }

    #[test]
    fn out_of_range_f64() {
        for buffer in [b"1.8e308".as_slice(), b"-1e400"] {
            assert_eq!(
                to_f64(buffer, 4),
                Err(NumericError { kind: NumericErrorKind::OutOfRange, pos: 4 }),
                "failed to reject: {buffer:?}"
            );
        }
    }

    #[test]
    fn convert_to_u16() {
        assert_eq!(hex_to_u16(b"00E9"), Ok(0xE9));
        assert_eq!(hex_to_u16(b"d83d"), Ok(0xD83D));
    }

    #[test]
    fn invalid_hex_digit() {
        assert_eq!(hex_to_u16(b"00G9"), Err(HexError { digit: b'G', pos: 2 }));
    }
}
