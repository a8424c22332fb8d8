//! String primitive parsing: an escaped-and-copied scanner for
//! `String` schema nodes, and a zero-copy raw-view scanner for `StringRaw`
//! nodes and for object member names.

use crate::cursor::Cursor;
use crate::error::{Error, Reason, Result};
use crate::policy::AllowEscapedNames;
use std::borrow::Cow;

/// Consumes an escaped JSON string starting at the cursor's `"`, expanding
/// all recognized escapes. Returns a borrowed `&str` when the string
/// contained no escapes (the common case for structured payloads), and an
/// owned `String` only when escape expansion actually changed the bytes.
pub fn parse_escaped<'i>(cursor: &mut Cursor<'i>) -> Result<Cow<'i, str>> {
    let quote_offset = cursor.offset();
    cursor.consume(b'"')?;
    let body_start = cursor.offset();

    // Fast scan for the common escape-free case: find the closing quote
    // without copying, then fall back to a copying scan only if an escape
    // (or a disallowed control byte) appears before it.
    let mut i = body_start;
    loop {
        match cursor.document().get(i) {
            None => return Err(Error::new(Reason::UnexpectedEndOfData, quote_offset)),
            Some(b'"') => {
                let s = std::str::from_utf8(&cursor.document()[body_start..i])
                    .map_err(|_| Error::new(Reason::InvalidString, body_start))?;
                cursor.set_offset(i + 1);
                return Ok(Cow::Borrowed(s));
            }
            Some(b'\\') => break,
            Some(&b) if b < 0x20 && cursor.policy().is_checked() => {
                return Err(Error::new(Reason::InvalidString, i));
            }
            Some(_) => i += 1,
        }
    }

    // Slow path: copy bytes up to `i`, then expand escapes one at a time.
    let mut out = String::with_capacity(i - body_start + 8);
    out.push_str(
        std::str::from_utf8(&cursor.document()[body_start..i])
            .map_err(|_| Error::new(Reason::InvalidString, body_start))?,
    );
    cursor.set_offset(i);

    loop {
        match cursor.peek() {
            None => return Err(Error::new(Reason::UnexpectedEndOfData, quote_offset)),
            Some(b'"') => {
                cursor.advance(1);
                return Ok(Cow::Owned(out));
            }
            Some(b'\\') => {
                let esc_offset = cursor.offset();
                cursor.advance(1);
                match cursor.peek() {
                    Some(b'"') => {
                        out.push('"');
                        cursor.advance(1);
                    }
                    Some(b'\\') => {
                        out.push('\\');
                        cursor.advance(1);
                    }
                    Some(b'/') => {
                        out.push('/');
                        cursor.advance(1);
                    }
                    Some(b'b') => {
                        out.push('\u{8}');
                        cursor.advance(1);
                    }
                    Some(b'f') => {
                        out.push('\u{c}');
                        cursor.advance(1);
                    }
                    Some(b'n') => {
                        out.push('\n');
                        cursor.advance(1);
                    }
                    Some(b'r') => {
                        out.push('\r');
                        cursor.advance(1);
                    }
                    Some(b't') => {
                        out.push('\t');
                        cursor.advance(1);
                    }
                    Some(b'u') => {
                        cursor.advance(1);
                        let cp = parse_hex4(cursor, esc_offset)?;
                        let scalar = if (0xD800..=0xDBFF).contains(&cp) {
                            // High surrogate: require a matching low surrogate next.
                            if cursor.peek() != Some(b'\\') || cursor.peek_at(1) != Some(b'u') {
                                return Err(Error::new(Reason::InvalidString, esc_offset));
                            }
                            cursor.advance(2);
                            let lo = parse_hex4(cursor, esc_offset)?;
                            if !(0xDC00..=0xDFFF).contains(&lo) {
                                return Err(Error::new(Reason::InvalidString, esc_offset));
                            }
                            0x10000 + ((cp - 0xD800) << 10) + (lo - 0xDC00)
                        } else if (0xDC00..=0xDFFF).contains(&cp) {
                            return Err(Error::new(Reason::InvalidString, esc_offset));
                        } else {
                            cp
                        };
                        match char::from_u32(scalar) {
                            Some(c) => out.push(c),
                            None => return Err(Error::new(Reason::InvalidString, esc_offset)),
                        }
                    }
                    _ => return Err(Error::new(Reason::InvalidString, esc_offset)),
                }
            }
            Some(b) if b < 0x20 && cursor.policy().is_checked() => {
                return Err(Error::new(Reason::InvalidString, cursor.offset()));
            }
            Some(b) => {
                // Copy one UTF-8 code point's worth of raw bytes verbatim.
                let start = cursor.offset();
                let width = utf8_width(b);
                let end = (start + width).min(cursor.document().len());
                let chunk = std::str::from_utf8(&cursor.document()[start..end])
                    .map_err(|_| Error::new(Reason::InvalidString, start))?;
                out.push_str(chunk);
                cursor.set_offset(end);
            }
        }
    }
}

fn utf8_width(lead: u8) -> usize {
    if lead < 0x80 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else {
        4
    }
}

fn parse_hex4(cursor: &mut Cursor, esc_offset: usize) -> Result<u32> {
    let mut v: u32 = 0;
    for _ in 0..4 {
        let d = match cursor.peek() {
            Some(b @ b'0'..=b'9') => (b - b'0') as u32,
            Some(b @ b'a'..=b'f') => (b - b'a' + 10) as u32,
            Some(b @ b'A'..=b'F') => (b - b'A' + 10) as u32,
            _ => return Err(Error::new(Reason::InvalidString, esc_offset)),
        };
        v = v * 16 + d;
        cursor.advance(1);
    }
    Ok(v)
}

/// Locates an opening `"` and scans forward for the matching unescaped `"`,
/// returning a borrowed view `[start, end)` of the string body without
/// copying or expanding escapes. When `AllowEscapedNames::No` is in effect
/// the caller is asserting the bytes are escape-free, so the scan uses a
/// plain byte search rather than tracking a trailing-backslash parity.
pub fn scan_raw<'i>(cursor: &mut Cursor<'i>) -> Result<&'i str> {
    let quote_offset = cursor.offset();
    cursor.consume(b'"')?;
    let body_start = cursor.offset();
    let doc = cursor.document();

    let end = if cursor.policy().allow_escaped_names() == AllowEscapedNames::No {
        memchr_quote(&doc[body_start..])
            .map(|i| body_start + i)
            .ok_or(())
    } else {
        scan_skipping_escapes(&doc[body_start..])
            .map(|i| body_start + i)
            .ok_or(())
    }
    .map_err(|_| Error::new(Reason::UnexpectedEndOfData, quote_offset))?;

    let view = std::str::from_utf8(&doc[body_start..end])
        .map_err(|_| Error::new(Reason::InvalidString, body_start))?;
    cursor.set_offset(end + 1);
    Ok(view)
}

fn memchr_quote(haystack: &[u8]) -> Option<usize> {
    haystack.iter().position(|&b| b == b'"')
}

fn scan_skipping_escapes(haystack: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < haystack.len() {
        match haystack[i] {
            b'"' => return Some(i),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    None
}

/// Skips a string value without materializing it (used by C4). Equivalent to
/// `scan_raw` but discards the view; escape-awareness always follows
/// `AllowEscapedNames`, consistent with how the raw scanner treats it.
pub fn skip(cursor: &mut Cursor) -> Result<()> {
    scan_raw(cursor).map(|_| ())
}
