//! Structural skip: advance the cursor past whatever value it sits on,
//! without materializing it. Used by the out-of-order class parser to
//! discard unwanted members, and by the path navigator to step over
//! siblings that don't match the requested path segment.

use crate::cursor::Cursor;
use crate::error::{Error, Reason, Result};
use crate::primitive::{number, skip_literal, string};

/// Skips the value the cursor currently sits on. On success the cursor rests
/// on the byte immediately after the value; whitespace following it is not
/// consumed.
pub fn skip_value(cursor: &mut Cursor) -> Result<()> {
    match cursor.require_peek()? {
        b'{' => skip_object(cursor),
        b'[' => skip_array(cursor),
        b'"' => string::skip(cursor),
        b't' | b'f' | b'n' => skip_literal(cursor),
        b'-' | b'0'..=b'9' => number::skip(cursor),
        _ => Err(Error::new(Reason::InvalidLiteral, cursor.offset())),
    }
}

/// Skips a `{...}` value, respecting nested strings (which may contain
/// unbalanced-looking brackets) and the active comment dialect.
pub fn skip_object(cursor: &mut Cursor) -> Result<()> {
    cursor.consume(b'{')?;
    cursor.skip_whitespace()?;
    if cursor.peek() == Some(b'}') {
        cursor.advance(1);
        return Ok(());
    }
    loop {
        cursor.skip_whitespace()?;
        string::skip(cursor)?;
        cursor.skip_whitespace()?;
        cursor.consume(b':')?;
        cursor.skip_whitespace()?;
        skip_value(cursor)?;
        cursor.skip_whitespace()?;
        match cursor.require_peek()? {
            b',' => {
                cursor.advance(1);
            }
            b'}' => {
                cursor.advance(1);
                return Ok(());
            }
            _ => return Err(Error::new(Reason::ExpectedToken(b'}'), cursor.offset())),
        }
    }
}

/// Skips a `[...]` value.
pub fn skip_array(cursor: &mut Cursor) -> Result<()> {
    cursor.consume(b'[')?;
    cursor.skip_whitespace()?;
    if cursor.peek() == Some(b']') {
        cursor.advance(1);
        return Ok(());
    }
    loop {
        cursor.skip_whitespace()?;
        skip_value(cursor)?;
        cursor.skip_whitespace()?;
        match cursor.require_peek()? {
            b',' => {
                cursor.advance(1);
            }
            b']' => {
                cursor.advance(1);
                return Ok(());
            }
            _ => return Err(Error::new(Reason::ExpectedToken(b']'), cursor.offset())),
        }
    }
}
