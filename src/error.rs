//! The closed taxonomy of parse/serialize failures, plus path enrichment.

use crate::locate::locate;

/// Closed set of reasons a parse (or, for `DuplicateJSONTag`, a schema) can fail.
///
/// `Unknown` exists so that `Reason` can be constructed generically by code that
/// doesn't have a more specific reason at hand; a clean input must never produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Reason {
    UnexpectedEndOfData,
    ExpectedToken(u8),
    InvalidNumber,
    InvalidLiteral,
    InvalidString,
    MissingMemberName,
    DuplicateJSONTag,
    Unknown,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::UnexpectedEndOfData => write!(f, "unexpected end of data"),
            Reason::ExpectedToken(b) => write!(f, "expected token '{}'", *b as char),
            Reason::InvalidNumber => write!(f, "invalid number"),
            Reason::InvalidLiteral => write!(f, "invalid literal"),
            Reason::InvalidString => write!(f, "invalid string"),
            Reason::MissingMemberName => write!(f, "missing member"),
            Reason::DuplicateJSONTag => write!(f, "duplicate JSON tag"),
            Reason::Unknown => write!(f, "unknown error"),
        }
    }
}

/// `Error` is `{reason, byte_offset}`, exactly as specified. It never stores a
/// borrow of the input: offsets are cheap to carry across error-handling
/// boundaries and can be resolved into a path lazily, only when a caller asks.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[error("{reason} at offset {offset}")]
pub struct Error {
    pub reason: Reason,
    pub offset: usize,
}

impl Error {
    pub fn new(reason: Reason, offset: usize) -> Error {
        tracing::trace!(?reason, offset, "parse error");
        Error { reason, offset }
    }

    /// Re-walks `document` to recover the JSON-path stack leading to this
    /// error's offset, and returns a `Located` error bundling both.
    ///
    /// The path locator tolerates the walk re-hitting the same parse
    /// failure (or any other): it returns whatever stack it assembled before
    /// giving up, rather than propagating a second error.
    pub fn with_path(self, document: &[u8]) -> Located {
        let stack = locate(document, self.offset);
        Located { error: self, stack }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// An `Error` enriched with the path stack leading to its offset, and a
/// `(line, column)` pair. Constructed via `Error::with_path`.
#[derive(Debug, Clone)]
pub struct Located {
    pub error: Error,
    pub stack: Vec<crate::location::PathFrame>,
}

impl Located {
    pub fn path(&self) -> String {
        crate::location::format_path(&self.stack)
    }

    pub fn line_column(&self, document: &[u8]) -> (usize, usize) {
        offset_to_line_column(document, self.error.offset)
    }
}

impl std::fmt::Display for Located {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at {})", self.error, self.path())
    }
}

/// Converts a byte offset into a 1-based `(line, column)` pair by scanning
/// for `\n` occurrences from the document start. `column` counts bytes, not
/// Unicode scalar values, since the parser itself operates on bytes.
pub fn offset_to_line_column(document: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(document.len());
    let mut line = 1usize;
    let mut col = 1usize;
    for &b in &document[..offset] {
        if b == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
