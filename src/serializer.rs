use std::fmt::{self, Write};

use tracing::debug;

use crate::value::Value;

impl fmt::Display for Value {
    /// Writes the canonical compact text, `{:#}` is not supported and produces the same output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self)
    }
}

// Any fmt::Write can be a sink: a String, a fmt::Formatter or an adapter over io::Write
fn write_value<W: Write>(out: &mut W, val: &Value) -> fmt::Result {
    match val {
        Value::Null => out.write_str("null"),
        Value::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
        Value::Number(num) => write_number(out, *num),
        Value::String(s) => write_string(out, s),
        Value::Array(values) => {
            out.write_char('[')?;
            for (i, val) in values.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, val)?;
            }
            out.write_char(']')
        }
        Value::Object(map) => {
            // the storage order is insertion order, output order must not depend on it
            let mut members: Vec<_> = map.iter().collect();
            members.sort_unstable_by(|a, b| a.0.cmp(b.0));

            out.write_char('{')?;
            for (i, (key, val)) in members.into_iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_string(out, key)?;
                out.write_char(':')?;
                write_value(out, val)?;
            }
            out.write_char('}')
        }
    }
}

// https://tc39.es/ecma262/#sec-numeric-types-number-tostring
//
// Rust's {:e} formatting gives us the shortest digits that round trip, d.ddde±x. What is left is
// the layout: with k significant digits and the decimal point after n digits (n = exponent + 1)
//
//  k <= n <= 21    digits followed by n - k zeros           1e20 -> 100000000000000000000
//  0 < n <= 21     decimal point inside the digits          1.5
//  -6 < n <= 0     0. followed by -n zeros and the digits   1e-6 -> 0.000001
//  otherwise       exponential notation                     1e21 -> 1e+21, 1.5e-7
//
// -0.0 is written as -0 so that it survives a round trip. NaN and infinity have no json
// representation and are written as null
fn write_number<W: Write>(out: &mut W, num: f64) -> fmt::Result {
    if !num.is_finite() {
        debug!(number = %num, "non-finite number serialized as null");
        return out.write_str("null");
    }
    if num == 0.0 {
        return out.write_str(if num.is_sign_negative() { "-0" } else { "0" });
    }
    if num < 0.0 {
        out.write_char('-')?;
    }

    let repr = format!("{:e}", num.abs());
    let Some((mantissa, exp)) = repr.split_once('e') else {
        return Err(fmt::Error);
    };
    let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
    let digits: String = mantissa.chars().filter(|&c| c != '.').collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    if k <= n && n <= 21 {
        out.write_str(&digits)?;
        for _ in 0..n - k {
            out.write_char('0')?;
        }
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        write!(out, "{int}.{frac}")?;
    } else if -6 < n && n <= 0 {
        out.write_str("0.")?;
        for _ in 0..-n {
            out.write_char('0')?;
        }
        out.write_str(&digits)?;
    } else {
        let (first, rest) = digits.split_at(1);
        out.write_str(first)?;
        if !rest.is_empty() {
            write!(out, ".{rest}")?;
        }
        let sign = if n - 1 < 0 { '-' } else { '+' };
        write!(out, "e{sign}{}", (n - 1).abs())?;
    }
    Ok(())
}

// '"', '\' and the control characters U+0000..U+001F are escaped, everything else including '/',
// DEL and non-ASCII is written as is.
//
// Every byte that needs escaping is ASCII, slicing right before and after it always lands on a char
// boundary, the text between escapes is written in one go.
fn write_string<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    let mut start = 0;
    for (i, byte) in s.bytes().enumerate() {
        let escape = match byte {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\x08' => "\\b",
            b'\x0C' => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };

        out.write_str(&s[start..i])?;
        if escape.is_empty() {
            write!(out, "\\u{byte:04x}")?;
        } else {
            out.write_str(escape)?;
        }
        start = i + 1;
    }
    out.write_str(&s[start..])?;
    out.write_char('"')
}
