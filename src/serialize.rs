//! Serializer: schema-directed emission through an output-byte sink.
//! Any `std::fmt::Write` implementation (a `String`, a buffered file
//! writer adapter, ...) can be a sink; nothing here allocates on behalf of
//! the output besides the small stack buffers numeric formatting uses.

use crate::schema::{Member, Nullable};
use std::fmt::Write as _;

/// An output-byte sink. Blanket-implemented for every `std::fmt::Write`, so
/// a plain `String` already qualifies.
pub trait Sink: std::fmt::Write {}
impl<W: std::fmt::Write + ?Sized> Sink for W {}

/// A value that knows how to write its own JSON representation.
pub trait Serialize {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result;
}

macro_rules! impl_serialize_display {
    ($($t:ty),*) => {
        $(impl Serialize for $t {
            fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
                write!(sink, "{self}")
            }
        })*
    };
}
impl_serialize_display!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, bool);

impl Serialize for f64 {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        if self.is_finite() {
            write!(sink, "{self}")
        } else {
            // JSON has no literal for infinities/NaN; emit `null` rather
            // than producing invalid output.
            sink.write_str("null")
        }
    }
}
impl Serialize for f32 {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        (*self as f64).serialize(sink)
    }
}

impl Serialize for str {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        write_escaped_str(sink, self)
    }
}
impl Serialize for String {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        write_escaped_str(sink, self)
    }
}
impl<'a> Serialize for std::borrow::Cow<'a, str> {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        write_escaped_str(sink, self)
    }
}

/// Escapes `"`, `\`, and control bytes (`\n`, `\t`, `\r`, `\b`, `\f`, or a
/// generic `\u00XX` for anything else below 0x20). Everything else —
/// including non-ASCII UTF-8 — passes through verbatim.
fn write_escaped_str<W: Sink + ?Sized>(sink: &mut W, s: &str) -> std::fmt::Result {
    sink.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => sink.write_str("\\\"")?,
            '\\' => sink.write_str("\\\\")?,
            '\n' => sink.write_str("\\n")?,
            '\t' => sink.write_str("\\t")?,
            '\r' => sink.write_str("\\r")?,
            '\u{8}' => sink.write_str("\\b")?,
            '\u{c}' => sink.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(sink, "\\u{:04x}", c as u32)?,
            c => sink.write_char(c)?,
        }
    }
    sink.write_char('"')
}

impl<T: Serialize> Serialize for Vec<T> {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        sink.write_char('[')?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                sink.write_char(',')?;
            }
            item.serialize(sink)?;
        }
        sink.write_char(']')
    }
}

impl<T: Serialize> Serialize for [T] {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        sink.write_char('[')?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                sink.write_char(',')?;
            }
            item.serialize(sink)?;
        }
        sink.write_char(']')
    }
}

/// `Option<T>` serializes to `null` when empty and to its inner value
/// otherwise. A class's serializer (below) special-cases this to *omit* the
/// member entirely instead, unless told to always include it.
impl<T: Serialize> Serialize for Option<T> {
    fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        match self {
            Some(v) => v.serialize(sink),
            None => sink.write_str("null"),
        }
    }
}

/// Counterpart to `ClassSchema` (schema.rs) for emission: describes how to
/// serialize one member at a time and whether it should be emitted at all
/// (the hook nullable members use to omit themselves when empty).
pub trait SerializeClass {
    const MEMBERS: &'static [Member];

    /// Writes member `index`'s value. Only called when `member_present`
    /// returns `true` for that index.
    fn serialize_member<W: Sink + ?Sized>(&self, index: usize, sink: &mut W) -> std::fmt::Result;

    /// Whether member `index` should appear in the output at all. The
    /// default always includes it; a nullable member overrides this to
    /// return `false` while empty, unless marked always-include.
    fn member_present(&self, _index: usize) -> bool {
        true
    }
}

/// Emits `{"name":value,...}` for any `SerializeClass`, in declaration
/// order, skipping members `member_present` says to omit. There is
/// deliberately no blanket `impl<C: SerializeClass> Serialize for C` here:
/// it would conflict with the concrete primitive impls above (rustc can't
/// rule out some foreign type later implementing both `SerializeClass` and,
/// say, being `u8`). A `SerializeClass` implementation earns its `Serialize`
/// impl with one line:
///
/// ```ignore
/// impl Serialize for MyClass {
///     fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
///         serialize_class(self, sink)
///     }
/// }
/// ```
pub fn serialize_class<C: SerializeClass, W: Sink + ?Sized>(value: &C, sink: &mut W) -> std::fmt::Result {
    sink.write_char('{')?;
    let mut first = true;
    for (i, member) in C::MEMBERS.iter().enumerate() {
        if !value.member_present(i) {
            continue;
        }
        if !first {
            sink.write_char(',')?;
        }
        first = false;
        write_escaped_str(sink, member.name)?;
        sink.write_char(':')?;
        value.serialize_member(i, sink)?;
    }
    sink.write_char('}')
}

/// Whether `value` (seen through its `Nullable` binding) should be emitted:
/// helper for a `SerializeClass::member_present` impl backing a nullable
/// member that wants the default omit-when-empty behavior.
pub fn nullable_present<N: Nullable>(value: &N) -> bool {
    value.has_value()
}

/// Serializes any `Serialize` value into a freshly allocated `String`. Most
/// callers with a reusable buffer should prefer `value.serialize(&mut buf)`
/// directly to avoid the allocation this convenience wrapper makes.
pub fn to_string<T: Serialize>(value: &T) -> String {
    let mut out = String::new();
    // A `Serialize` impl only ever returns an error from a `std::fmt::Write`
    // sink's own I/O, which a `String` target never produces.
    value.serialize(&mut out).expect("String sink is infallible");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_primitives() {
        assert_eq!(to_string(&42u64), "42");
        assert_eq!(to_string(&true), "true");
        assert_eq!(to_string(&"hi\nthere".to_string()), "\"hi\\nthere\"");
    }

    #[test]
    fn test_serialize_vec() {
        assert_eq!(to_string(&vec![1u32, 2, 3]), "[1,2,3]");
    }

    #[test]
    fn test_serialize_option_standalone() {
        let some: Option<u32> = Some(7);
        let none: Option<u32> = None;
        assert_eq!(to_string(&some), "7");
        assert_eq!(to_string(&none), "null");
    }

    #[test]
    fn test_serialize_float_non_finite_becomes_null() {
        assert_eq!(to_string(&f64::NAN), "null");
        assert_eq!(to_string(&f64::INFINITY), "null");
    }

    struct Point {
        x: i64,
        y: Option<i64>,
    }
    impl SerializeClass for Point {
        const MEMBERS: &'static [Member] = &[Member::new("x"), Member::new("y")];
        fn serialize_member<W: Sink + ?Sized>(&self, index: usize, sink: &mut W) -> std::fmt::Result {
            match index {
                0 => self.x.serialize(sink),
                1 => self.y.serialize(sink),
                _ => unreachable!(),
            }
        }
        fn member_present(&self, index: usize) -> bool {
            match index {
                1 => nullable_present(&self.y),
                _ => true,
            }
        }
    }
    impl Serialize for Point {
        fn serialize<W: Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
            serialize_class(self, sink)
        }
    }

    #[test]
    fn test_serialize_class_omits_empty_nullable_member() {
        let p = Point { x: 1, y: None };
        assert_eq!(to_string(&p), "{\"x\":1}");
    }

    #[test]
    fn test_serialize_class_includes_present_nullable_member() {
        let p = Point { x: 1, y: Some(2) };
        assert_eq!(to_string(&p), "{\"x\":1,\"y\":2}");
    }
}
