//! Event walker: a SAX-style driver that pushes parse events at a `Walker`
//! implementation without ever materializing a tree. Used directly for
//! streaming consumers, and internally by the path locator to reconstruct
//! a path stack up to a target byte offset.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::primitive::{number, parse_bool, parse_null, string};

/// Receives parse events from `walk`. Every method defaults to continuing
/// the walk; override the ones a consumer cares about and return `false`
/// from any of them to abort early (e.g. once a consumer has found what it
/// was looking for).
pub trait Walker {
    fn on_class_start(&mut self) -> bool {
        true
    }
    fn on_member_name(&mut self, _name: &str) -> bool {
        true
    }
    fn on_class_end(&mut self) -> bool {
        true
    }
    fn on_array_start(&mut self) -> bool {
        true
    }
    fn on_index(&mut self, _index: usize) -> bool {
        true
    }
    fn on_array_end(&mut self) -> bool {
        true
    }
    fn on_string(&mut self, _value: &str) -> bool {
        true
    }
    fn on_number(&mut self, _value: number::Number) -> bool {
        true
    }
    fn on_bool(&mut self, _value: bool) -> bool {
        true
    }
    fn on_null(&mut self) -> bool {
        true
    }

    /// Reports the byte span `[start, end)` a just-completed value occupied.
    /// Defaulted to a no-op; the path locator is the one consumer that
    /// overrides it, to decide which branch of a class or array a target
    /// offset fell into.
    fn on_value_span(&mut self, _start: usize, _end: usize) -> bool {
        true
    }
}

/// Whether the walk should keep descending or unwind immediately because a
/// `Walker` callback returned `false`. Kept private: from the outside, an
/// abort just looks like `walk` returning `Ok(())` earlier than EOF.
enum Flow {
    Continue,
    Abort,
}

/// Drives `walker` over the single value at the cursor. Returns `Ok(())`
/// whether the walk reached the end of the value or a callback aborted it
/// early; only a malformed document produces an `Err`.
pub fn walk<W: Walker>(cursor: &mut Cursor, walker: &mut W) -> Result<()> {
    walk_value(cursor, walker).map(|_| ())
}

fn walk_value<W: Walker>(cursor: &mut Cursor, walker: &mut W) -> Result<Flow> {
    cursor.skip_whitespace()?;
    let start = cursor.offset();
    let flow = match cursor.require_peek()? {
        b'{' => walk_class(cursor, walker)?,
        b'[' => walk_array(cursor, walker)?,
        b'"' => {
            let mut probe = *cursor;
            let s = string::parse_escaped(&mut probe)?;
            cursor.set_offset(probe.offset());
            cont(walker.on_string(&s))
        }
        b't' | b'f' => cont(walker.on_bool(parse_bool(cursor)?)),
        b'n' => {
            parse_null(cursor)?;
            cont(walker.on_null())
        }
        b'-' | b'0'..=b'9' => {
            let (num_start, num_end, is_float) = number::scan_span(cursor)?;
            let text = std::str::from_utf8(&cursor.document()[num_start..num_end]).unwrap();
            let n = if is_float {
                number::Number::Float(text.parse().unwrap_or(f64::NAN))
            } else if text.starts_with('-') {
                number::Number::Signed(text.parse().unwrap_or_default())
            } else {
                number::Number::Unsigned(text.parse().unwrap_or_default())
            };
            cont(walker.on_number(n))
        }
        _ => {
            return Err(crate::error::Error::new(
                crate::error::Reason::InvalidLiteral,
                cursor.offset(),
            ))
        }
    };
    Ok(match flow {
        Flow::Abort => Flow::Abort,
        Flow::Continue => cont(walker.on_value_span(start, cursor.offset())),
    })
}

fn cont(keep_going: bool) -> Flow {
    if keep_going {
        Flow::Continue
    } else {
        Flow::Abort
    }
}

fn walk_class<W: Walker>(cursor: &mut Cursor, walker: &mut W) -> Result<Flow> {
    cursor.consume(b'{')?;
    if !walker.on_class_start() {
        return Ok(Flow::Abort);
    }
    cursor.skip_whitespace()?;
    if cursor.peek() == Some(b'}') {
        cursor.advance(1);
        return Ok(cont(walker.on_class_end()));
    }
    loop {
        cursor.skip_whitespace()?;
        let name = string::scan_raw(cursor)?;
        if !walker.on_member_name(name) {
            return Ok(Flow::Abort);
        }
        cursor.skip_whitespace()?;
        cursor.consume(b':')?;
        cursor.skip_whitespace()?;
        if let Flow::Abort = walk_value(cursor, walker)? {
            return Ok(Flow::Abort);
        }
        cursor.skip_whitespace()?;
        match cursor.require_peek()? {
            b',' => cursor.advance(1),
            b'}' => {
                cursor.advance(1);
                return Ok(cont(walker.on_class_end()));
            }
            _ => {
                return Err(crate::error::Error::new(
                    crate::error::Reason::ExpectedToken(b'}'),
                    cursor.offset(),
                ))
            }
        }
    }
}

fn walk_array<W: Walker>(cursor: &mut Cursor, walker: &mut W) -> Result<Flow> {
    cursor.consume(b'[')?;
    if !walker.on_array_start() {
        return Ok(Flow::Abort);
    }
    cursor.skip_whitespace()?;
    if cursor.peek() == Some(b']') {
        cursor.advance(1);
        return Ok(cont(walker.on_array_end()));
    }
    let mut index = 0usize;
    loop {
        cursor.skip_whitespace()?;
        if !walker.on_index(index) {
            return Ok(Flow::Abort);
        }
        if let Flow::Abort = walk_value(cursor, walker)? {
            return Ok(Flow::Abort);
        }
        index += 1;
        cursor.skip_whitespace()?;
        match cursor.require_peek()? {
            b',' => cursor.advance(1),
            b']' => {
                cursor.advance(1);
                return Ok(cont(walker.on_array_end()));
            }
            _ => {
                return Err(crate::error::Error::new(
                    crate::error::Reason::ExpectedToken(b']'),
                    cursor.offset(),
                ))
            }
        }
    }
}
