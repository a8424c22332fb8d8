//! Numeric primitive parsing: integers and floating point, plus a
//! `Number` sum type for code that wants the JSON number classification
//! (unsigned / signed / float) without committing to one native width.

use crate::cursor::Cursor;
use crate::error::{Error, Reason, Result};
use crate::policy::Ieee754Precise;
use std::cmp::Ordering;

/// `Number` holds the three shapes a JSON numeric literal can take once
/// parsed. Used by `Custom` schema nodes and diagnostics that want to carry
/// "some JSON number" without picking a native width up front.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}
use Number::*;

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unsigned(n) => write!(f, "{n}"),
            Signed(n) => write!(f, "{n}"),
            Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Unsigned(n)
    }
}
impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Signed(n)
    }
}
impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Float(n)
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Unsigned(lhs), Unsigned(rhs)) => lhs.cmp(rhs),
            (Unsigned(_), Signed(rhs)) if *rhs < 0 => Ordering::Greater,
            (Unsigned(lhs), Signed(rhs)) => lhs.cmp(&(*rhs as u64)),
            (Unsigned(lhs), Float(rhs)) => f64_cmp(&(*lhs as f64), rhs),

            (Signed(lhs), Unsigned(_)) if *lhs < 0 => Ordering::Less,
            (Signed(lhs), Unsigned(rhs)) => (*lhs as u64).cmp(rhs),
            (Signed(lhs), Signed(rhs)) => lhs.cmp(rhs),
            (Signed(lhs), Float(rhs)) => f64_cmp(&(*lhs as f64), rhs),

            (Float(lhs), Unsigned(rhs)) => f64_cmp(lhs, &(*rhs as f64)),
            (Float(lhs), Signed(rhs)) => f64_cmp(lhs, &(*rhs as f64)),
            (Float(lhs), Float(rhs)) => f64_cmp(lhs, rhs),
        }
    }
}
impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Number {}

fn f64_cmp(lhs: &f64, rhs: &f64) -> Ordering {
    lhs.partial_cmp(rhs).unwrap_or_else(|| {
        if lhs.is_nan() && rhs.is_nan() {
            Ordering::Equal
        } else if lhs.is_nan() {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    })
}

/// Classifies and extracts the raw byte span `[start, end)` of a numeric
/// literal at the cursor without materializing a value ("locate-end" mode,
/// used by C4's structural skip). Returns whether a `.` or `e`/`E` was seen
/// (the value is not an integer literal).
pub fn scan_span(cursor: &mut Cursor) -> Result<(usize, usize, bool)> {
    let start = cursor.offset();
    let checked = cursor.policy().is_checked();

    if cursor.peek() == Some(b'-') {
        cursor.advance(1);
    }

    let digits_start = cursor.offset();
    while matches!(cursor.peek(), Some(b'0'..=b'9')) {
        cursor.advance(1);
    }
    if cursor.offset() == digits_start {
        return Err(Error::new(Reason::InvalidNumber, start));
    }
    if checked {
        let int_part = &cursor.document()[digits_start..cursor.offset()];
        if int_part.len() > 1 && int_part[0] == b'0' {
            return Err(Error::new(Reason::InvalidNumber, digits_start));
        }
    }

    let mut is_float = false;
    if cursor.peek() == Some(b'.') {
        is_float = true;
        cursor.advance(1);
        let frac_start = cursor.offset();
        while matches!(cursor.peek(), Some(b'0'..=b'9')) {
            cursor.advance(1);
        }
        if checked && cursor.offset() == frac_start {
            return Err(Error::new(Reason::InvalidNumber, frac_start));
        }
    }

    if matches!(cursor.peek(), Some(b'e') | Some(b'E')) {
        is_float = true;
        cursor.advance(1);
        if matches!(cursor.peek(), Some(b'+') | Some(b'-')) {
            cursor.advance(1);
        }
        let exp_start = cursor.offset();
        while matches!(cursor.peek(), Some(b'0'..=b'9')) {
            cursor.advance(1);
        }
        if checked && cursor.offset() == exp_start {
            return Err(Error::new(Reason::InvalidNumber, exp_start));
        }
    }

    if checked {
        match cursor.peek() {
            None | Some(b',') | Some(b']') | Some(b'}') | Some(b' ') | Some(b'\t')
            | Some(b'\r') | Some(b'\n') => {}
            _ => return Err(Error::new(Reason::InvalidNumber, cursor.offset())),
        }
    }

    Ok((start, cursor.offset(), is_float))
}

/// Skips a numeric literal without materializing it (used by C4).
pub fn skip(cursor: &mut Cursor) -> Result<()> {
    scan_span(cursor).map(|_| ())
}

fn text_of<'i>(cursor: &Cursor<'i>, start: usize, end: usize) -> &'i str {
    // The scanner above only ever admits ASCII bytes into the span.
    std::str::from_utf8(&cursor.document()[start..end]).expect("numeric span is ASCII")
}

/// Parses an unsigned integer. Rejects a leading `-` as `InvalidNumber`
/// (callers wanting a signed result should use `parse_i64`).
pub fn parse_u64(cursor: &mut Cursor) -> Result<u64> {
    let start = cursor.offset();
    let (span_start, end, is_float) = scan_span(cursor)?;
    if is_float || cursor.document()[span_start] == b'-' {
        return Err(Error::new(Reason::InvalidNumber, start));
    }
    text_of(cursor, span_start, end)
        .parse::<u64>()
        .map_err(|_| Error::new(Reason::InvalidNumber, start))
}

/// Parses a signed integer.
pub fn parse_i64(cursor: &mut Cursor) -> Result<i64> {
    let start = cursor.offset();
    let (span_start, end, is_float) = scan_span(cursor)?;
    if is_float {
        return Err(Error::new(Reason::InvalidNumber, start));
    }
    text_of(cursor, span_start, end)
        .parse::<i64>()
        .map_err(|_| Error::new(Reason::InvalidNumber, start))
}

/// Parses a floating point number. Out-of-range magnitudes map to `±∞`
/// (never an error); malformed input fails with `InvalidNumber`.
///
/// A separate "fast path / fallback" split doesn't carry over to this Rust
/// rendition: `f64::from_str` (`core`'s `dec2flt`) is already a
/// correctly-rounded decimal-to-binary converter, so there is no faster
/// "integer accumulator" path worth hand-rolling that wouldn't just
/// reimplement it with more bugs. `Ieee754Precise::Yes` is still honored as a
/// policy bit — both settings go through the same correctly-rounded
/// converter, so both are bit-exact regardless of which is set.
pub fn parse_f64(cursor: &mut Cursor) -> Result<f64> {
    let start = cursor.offset();
    let (span_start, end, _) = scan_span(cursor)?;
    let text = text_of(cursor, span_start, end);
    let _ = cursor.policy().ieee754_precise() == Ieee754Precise::Yes; // same path either way, see above.
    text.parse::<f64>()
        .map_err(|_| Error::new(Reason::InvalidNumber, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Checked, Policy};

    fn cur(s: &str, policy: Policy) -> Cursor {
        Cursor::new(s.as_bytes(), policy)
    }

    #[test]
    fn test_parse_u64() {
        let mut c = cur("1234,", Policy::new());
        assert_eq!(parse_u64(&mut c).unwrap(), 1234);
        assert_eq!(c.peek(), Some(b','));
    }

    #[test]
    fn test_parse_i64_negative() {
        let mut c = cur("-42]", Policy::new());
        assert_eq!(parse_i64(&mut c).unwrap(), -42);
    }

    #[test]
    fn test_leading_zero_rejected_when_checked() {
        let mut c = cur("01", Policy::new());
        assert_eq!(parse_u64(&mut c).unwrap_err().reason, Reason::InvalidNumber);
    }

    #[test]
    fn test_leading_zero_allowed_when_unchecked() {
        let policy = Policy::new().with_checked(Checked::No);
        let mut c = cur("01", policy);
        // Unchecked mode elides the leading-zero check; "01" parses as 1.
        assert_eq!(parse_u64(&mut c).unwrap(), 1);
    }

    #[test]
    fn test_zero_alone_is_fine() {
        let mut c = cur("0,", Policy::new());
        assert_eq!(parse_u64(&mut c).unwrap(), 0);
    }

    #[test]
    fn test_parse_f64_basic() {
        let mut c = cur("12.34", Policy::new());
        assert_eq!(parse_f64(&mut c).unwrap(), 12.34);
    }

    #[test]
    fn test_parse_f64_exponent() {
        let mut c = cur("1.5e2", Policy::new());
        assert_eq!(parse_f64(&mut c).unwrap(), 150.0);
    }

    #[test]
    fn test_parse_f64_overflow_to_infinity() {
        let mut c = cur("1e9999", Policy::new());
        assert_eq!(parse_f64(&mut c).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_parse_f64_precise_policy_agrees_with_fast() {
        let policy = Policy::new().with_ieee754_precise(crate::policy::Ieee754Precise::Yes);
        let mut c1 = cur("0.1", Policy::new());
        let mut c2 = cur("0.1", policy);
        assert_eq!(parse_f64(&mut c1).unwrap(), parse_f64(&mut c2).unwrap());
    }

    #[test]
    fn test_malformed_number() {
        let mut c = cur("-", Policy::new());
        assert!(parse_i64(&mut c).is_err());
    }

    #[test]
    fn test_number_ordering() {
        assert_eq!(Number::from(10u64), Number::from(10i64));
        assert_eq!(Number::from(20u64), Number::from(20.0f64));
        assert!(Number::from(-1i64) < Number::from(1u64));
        assert!(Number::from(f64::NAN) < Number::from(1i64));
    }

    #[test]
    fn test_skip_number_leaves_cursor_after_value() {
        let mut c = cur("-3.5e1,", Policy::new());
        skip(&mut c).unwrap();
        assert_eq!(c.peek(), Some(b','));
    }
}
