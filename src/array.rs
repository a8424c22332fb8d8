//! Array parser: eager `Vec<T>` collection, plus a lazy forward
//! iterator for callers that want to process elements one at a time without
//! building the whole collection.

use crate::cursor::Cursor;
use crate::error::{Error, Reason, Result};
use crate::schema::Schema;

/// Eagerly parses a `[...]` value into a `Vec<T>`.
pub fn parse_vec<'i, T: Schema<'i>>(cursor: &mut Cursor<'i>) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for item in iter::<T>(cursor)? {
        out.push(item?);
    }
    Ok(out)
}

/// Returns a lazy, forward-only iterator over the elements of the `[...]`
/// value at the cursor. Consumes the opening `[` (and the closing `]`, once
/// exhausted) directly from `cursor`, which the iterator borrows for its
/// whole lifetime — nothing else may read from it until the iterator is
/// dropped or run to completion.
pub fn iter<'i, 'c, T: Schema<'i>>(cursor: &'c mut Cursor<'i>) -> Result<ArrayIter<'i, 'c, T>> {
    cursor.consume(b'[')?;
    cursor.skip_whitespace()?;
    let done = cursor.peek() == Some(b']');
    if done {
        cursor.advance(1);
    }
    Ok(ArrayIter {
        cursor,
        done,
        first: true,
        _marker: std::marker::PhantomData,
    })
}

/// Forward-only iterator over an array's elements. Yields `Err` and then
/// stops (subsequent calls return `None`) on the first parse failure.
pub struct ArrayIter<'i, 'c, T> {
    cursor: &'c mut Cursor<'i>,
    done: bool,
    first: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<'i, 'c, T: Schema<'i>> Iterator for ArrayIter<'i, 'c, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if self.done {
            return None;
        }
        if !self.first {
            if let Err(e) = self.cursor.skip_whitespace() {
                self.done = true;
                return Some(Err(e));
            }
            match self.cursor.require_peek() {
                Ok(b',') => self.cursor.advance(1),
                Ok(b']') => {
                    self.cursor.advance(1);
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    self.done = true;
                    return Some(Err(Error::new(Reason::ExpectedToken(b']'), self.cursor.offset())));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.first = false;
        if let Err(e) = self.cursor.skip_whitespace() {
            self.done = true;
            return Some(Err(e));
        }
        match T::parse(self.cursor) {
            Ok(v) => Some(Ok(v)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    #[test]
    fn test_parse_vec_of_integers() {
        let mut c = Cursor::new(b"[1,2,3]", Policy::new());
        let v: Vec<i64> = parse_vec(&mut c).unwrap();
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_vec_empty() {
        let mut c = Cursor::new(b"[]", Policy::new());
        let v: Vec<i64> = parse_vec(&mut c).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_parse_vec_of_strings_with_whitespace() {
        let mut c = Cursor::new(b"[ \"a\" , \"b\" ]", Policy::new());
        let v: Vec<String> = parse_vec(&mut c).unwrap();
        assert_eq!(v, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_lazy_iterator_stops_after_error() {
        let mut c = Cursor::new(b"[1,\"oops\",3]", Policy::new());
        let results: Vec<Result<i64>> = iter::<i64>(&mut c).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_lazy_iterator_leaves_cursor_after_closing_bracket() {
        let mut c = Cursor::new(b"[1,2]rest", Policy::new());
        let v: Vec<i64> = iter::<i64>(&mut c).unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(v, vec![1, 2]);
        assert_eq!(c.remaining(), b"rest");
    }

    #[test]
    fn test_array_of_nested_arrays() {
        let mut c = Cursor::new(b"[[1,2],[3,4]]", Policy::new());
        let v: Vec<Vec<i64>> = parse_vec(&mut c).unwrap();
        assert_eq!(v, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_trailing_comma_is_rejected() {
        let mut c = Cursor::new(b"[1,2,]", Policy::new());
        let err = parse_vec::<i64>(&mut c).unwrap_err();
        assert_eq!(err.reason, Reason::InvalidNumber);
    }
}
