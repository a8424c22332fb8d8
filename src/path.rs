//! Path navigator: resolves a dotted/bracketed selector directly over
//! the raw document bytes, skipping every sibling that doesn't match rather
//! than materializing intermediate values. `foo.3` and `foo[3]` are
//! deliberately different selectors — a dot always introduces a property
//! name (even one that looks like a number), only `[...]` introduces an
//! array index.

use crate::cursor::Cursor;
use crate::error::{Error, Reason, Result};
use crate::policy::Policy;
use crate::primitive::string;
use crate::schema::Schema;
use crate::skip;

/// One segment of a parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'s> {
    Property(&'s str),
    Index(usize),
}

/// Splits a selector string like `foo.bar[3].4` into tokens. `.4` parses as
/// `Property("4")`, not `Index(4)` — only a bracketed segment is an index.
pub fn parse_selector(path: &str) -> Result<Vec<Token<'_>>> {
    let bytes = path.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                i += 1;
                let start = i;
                while i < bytes.len() && bytes[i] != b'.' && bytes[i] != b'[' {
                    i += 1;
                }
                if i == start {
                    return Err(Error::new(Reason::InvalidLiteral, start));
                }
                tokens.push(Token::Property(&path[start..i]));
            }
            b'[' => {
                i += 1;
                let start = i;
                while i < bytes.len() && bytes[i] != b']' {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Err(Error::new(Reason::UnexpectedEndOfData, start));
                }
                let index = path[start..i]
                    .parse::<usize>()
                    .map_err(|_| Error::new(Reason::InvalidLiteral, start))?;
                tokens.push(Token::Index(index));
                i += 1;
            }
            _ => {
                let start = i;
                while i < bytes.len() && bytes[i] != b'.' && bytes[i] != b'[' {
                    i += 1;
                }
                tokens.push(Token::Property(&path[start..i]));
            }
        }
    }
    Ok(tokens)
}

/// Advances `cursor` to the start of the value selected by `tokens`,
/// skipping every member or element it doesn't match along the way.
pub fn navigate<'i>(cursor: &mut Cursor<'i>, tokens: &[Token]) -> Result<()> {
    for token in tokens {
        cursor.skip_whitespace()?;
        match token {
            Token::Property(name) => navigate_into_property(cursor, name)?,
            Token::Index(index) => navigate_into_index(cursor, *index)?,
        }
    }
    Ok(())
}

fn navigate_into_property<'i>(cursor: &mut Cursor<'i>, target: &str) -> Result<()> {
    cursor.consume(b'{')?;
    cursor.skip_whitespace()?;
    if cursor.peek() == Some(b'}') {
        return Err(Error::new(Reason::MissingMemberName, cursor.offset()));
    }
    loop {
        cursor.skip_whitespace()?;
        let name = string::scan_raw(cursor)?;
        cursor.skip_whitespace()?;
        cursor.consume(b':')?;
        cursor.skip_whitespace()?;
        if name == target {
            return Ok(());
        }
        skip::skip_value(cursor)?;
        cursor.skip_whitespace()?;
        match cursor.require_peek()? {
            b',' => cursor.advance(1),
            b'}' => return Err(Error::new(Reason::MissingMemberName, cursor.offset())),
            _ => return Err(Error::new(Reason::ExpectedToken(b'}'), cursor.offset())),
        }
    }
}

fn navigate_into_index<'i>(cursor: &mut Cursor<'i>, target: usize) -> Result<()> {
    cursor.consume(b'[')?;
    cursor.skip_whitespace()?;
    if cursor.peek() == Some(b']') {
        return Err(Error::new(Reason::UnexpectedEndOfData, cursor.offset()));
    }
    let mut index = 0usize;
    loop {
        cursor.skip_whitespace()?;
        if index == target {
            return Ok(());
        }
        skip::skip_value(cursor)?;
        index += 1;
        cursor.skip_whitespace()?;
        match cursor.require_peek()? {
            b',' => cursor.advance(1),
            b']' => return Err(Error::new(Reason::UnexpectedEndOfData, cursor.offset())),
            _ => return Err(Error::new(Reason::ExpectedToken(b']'), cursor.offset())),
        }
    }
}

/// Parses `path`, navigates `document` to the selected value under `policy`,
/// and parses it as `T`. The common entry point for callers that just want
/// "the value at this path" without juggling a `Cursor` themselves.
pub fn get<'i, T: Schema<'i>>(document: &'i [u8], path: &str, policy: Policy) -> Result<T> {
    let tokens = parse_selector(path)?;
    let mut cursor = Cursor::new(document, policy);
    cursor.skip_whitespace()?;
    navigate(&mut cursor, &tokens)?;
    T::parse(&mut cursor)
}
