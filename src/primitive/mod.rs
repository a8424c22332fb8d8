//! Primitive parsers: numbers, booleans, null, and strings. Each function
//! assumes the cursor already sits on the value it is asked to parse —
//! routing which primitive to call is the job of the schema description
//! and the class/array parsers.

pub mod number;
pub mod string;

pub use number::Number;

use crate::cursor::Cursor;
use crate::error::{Error, Reason, Result};

/// Matches exactly `true` or `false`.
pub fn parse_bool(cursor: &mut Cursor) -> Result<bool> {
    let start = cursor.offset();
    if cursor.consume_literal(b"true").is_ok() {
        return Ok(true);
    }
    cursor.set_offset(start);
    if cursor.consume_literal(b"false").is_ok() {
        return Ok(false);
    }
    Err(Error::new(Reason::InvalidLiteral, start))
}

/// Matches exactly `null`.
pub fn parse_null(cursor: &mut Cursor) -> Result<()> {
    cursor.consume_literal(b"null")
}

/// Advances past a `true`/`false`/`null` literal without distinguishing
/// which one (used by C4 when skipping a value it doesn't need to inspect).
pub fn skip_literal(cursor: &mut Cursor) -> Result<()> {
    let start = cursor.offset();
    for lit in [&b"true"[..], b"false", b"null"] {
        if cursor.document()[cursor.offset()..].starts_with(lit) {
            cursor.advance(lit.len());
            return Ok(());
        }
    }
    Err(Error::new(Reason::InvalidLiteral, start))
}
