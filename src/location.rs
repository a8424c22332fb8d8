//! Owned path frames, produced by the path locator while walking a document
//! toward a byte offset, and rendered back into the dotted/bracketed text
//! form a path navigator selector would accept.

use std::fmt::Write as _;

/// One step of a located path: either a named member or an array index.
/// Frames here are owned rather than borrowed from the document — the
/// locator assembles a `Vec<PathFrame>` as it walks, and that walk is
/// already done by the time anyone asks for the path, so there is no
/// borrow worth preserving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFrame {
    Property(String),
    Index(usize),
}

/// Renders a path stack the way a selector string would be written:
/// `.foo.bar[3]`. The root (empty stack) renders as the empty string; every
/// member name is dot-prefixed, including the first, so a path's leading
/// separator marks where the root's own (unnamed) value ends.
pub fn format_path(stack: &[PathFrame]) -> String {
    let mut out = String::new();
    for frame in stack {
        match frame {
            PathFrame::Property(name) => {
                out.push('.');
                out.push_str(name);
            }
            PathFrame::Index(idx) => {
                let _ = write!(out, "[{idx}]");
            }
        }
    }
    out
}
