use tracing::{debug, trace};

use crate::parsing::{error::ParseError, limits::Limits, parser::Parser};
use crate::value::Value;

pub(super) mod error;
mod escapes;
mod lexer;
pub(super) mod limits;
mod number;
mod parser;
mod utf8;

pub(super) fn parse(buffer: &[u8], limits: Limits) -> Result<Value, ParseError> {
    trace!(len = buffer.len(), ?limits, "parsing json text");

    Parser::new(buffer, limits).parse().map_err(|err| {
        // byte offsets are cheap to track, line/column are only computed for the error we return
        let err = err.locate(buffer);
        debug!(error = %err.kind(), pos = err.pos(), line = err.line(), column = err.column(), "rejected json text");
        err
    })
}

fn is_rfc_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\r' | b' ')
}

fn skip_whitespaces(buffer: &[u8], pos: &mut usize) {
    while *pos < buffer.len() && is_rfc_whitespace(buffer[*pos]) {
        *pos += 1;
    }
}
