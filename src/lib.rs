//! Schema-directed, zero-copy JSON parsing and serialization: a value's
//! Rust type drives which bytes get read, rather than building a generic
//! tree and converting it afterward.

pub mod array;
pub mod class;
pub mod cursor;
pub mod error;
pub mod locate;
pub mod location;
pub mod path;
pub mod policy;
pub mod primitive;
pub mod schema;
pub mod serialize;
pub mod skip;
pub mod walker;

pub use cursor::Cursor;
pub use error::{Error, Located, Reason, Result};
pub use location::{format_path, PathFrame};
pub use policy::Policy;
pub use schema::{ClassSchema, Member, Nullable, Schema};
pub use serialize::{Serialize, SerializeClass, Sink};
pub use walker::{walk as walk_document, Walker};

/// Parses `document` as `T` under `policy`. The common entry point:
/// `T::parse` drives the whole call, dispatching through whichever of the
/// class, array, or primitive parsers `T`'s `Schema` impl routes to.
#[tracing::instrument(level = "trace", skip(document))]
pub fn parse<'i, T: Schema<'i>>(document: &'i [u8], policy: Policy) -> Result<T> {
    let mut cursor = Cursor::new(document, policy);
    cursor.skip_whitespace()?;
    let value = T::parse(&mut cursor)?;
    cursor.skip_whitespace()?;
    if !cursor.is_at_end() {
        return Err(Error::new(Reason::InvalidLiteral, cursor.offset()));
    }
    Ok(value)
}

/// Parses `document` at `path` as `T` under `policy`, navigating directly to
/// the selected value instead of materializing everything in between.
#[tracing::instrument(level = "trace", skip(document))]
pub fn parse_at<'i, T: Schema<'i>>(document: &'i [u8], path: &str, policy: Policy) -> Result<T> {
    path::get(document, path, policy)
}

/// Returns a lazy, forward-only iterator over a top-level `[...]` array.
#[tracing::instrument(level = "trace", skip(cursor))]
pub fn parse_array<'i, 'c, T: Schema<'i>>(
    cursor: &'c mut Cursor<'i>,
) -> Result<array::ArrayIter<'i, 'c, T>> {
    array::iter(cursor)
}

/// Serializes `value` to a freshly allocated `String`.
pub fn serialize<T: Serialize>(value: &T) -> String {
    serialize::to_string(value)
}

/// Drives `walker` over `document`'s top-level value.
#[tracing::instrument(level = "trace", skip(document, walker))]
pub fn walk<W: Walker>(document: &[u8], walker: &mut W) -> Result<()> {
    let mut cursor = Cursor::new(document, Policy::new());
    walker::walk(&mut cursor, walker)
}

/// Resolves a byte offset into `document` into its enclosing path stack.
pub fn locate(document: &[u8], offset: usize) -> Vec<PathFrame> {
    locate::locate(document, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_level_scalar() {
        let v: u32 = parse(b"42", Policy::new()).unwrap();
        assert_eq!(v, 42);
    }

    #[test]
    fn test_parse_rejects_trailing_garbage() {
        let result: Result<u32> = parse(b"42 x", Policy::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_at_path() {
        let doc = br#"{"a":{"b":1}}"#;
        let v: i64 = parse_at(doc, "a.b", Policy::new()).unwrap();
        assert_eq!(v, 1);
    }

    #[test]
    fn test_round_trip_via_serialize_and_parse() {
        let v: Vec<u32> = vec![1, 2, 3];
        let text = serialize(&v);
        let back: Vec<u32> = parse(text.as_bytes(), Policy::new()).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn test_locate_reports_error_path() {
        let doc = br#"{"a":[1,"x",3]}"#;
        let err: Result<Vec<i64>> = parse_at(doc, "a", Policy::new());
        let err = err.unwrap_err();
        let located = err.with_path(doc);
        assert_eq!(located.path(), ".a[1]");
    }
}
