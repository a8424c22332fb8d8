//! Path locator: reconstructs the JSON-path stack leading to a byte
//! offset by driving the event walker over the document from the root and
//! keeping whichever branch's span contains the offset. Used by
//! `Error::with_path` to turn a bare byte offset into something a human can
//! read.

use crate::cursor::Cursor;
use crate::location::PathFrame;
use crate::policy::Policy;
use crate::walker::{self, Walker};

/// Walks `document` from the root toward `offset`, returning the stack of
/// member names and array indices passed through along the way. Tolerates
/// the walk itself failing (a malformed document, or an `offset` that lands
/// outside any well-formed structure): whatever stack was assembled before
/// the failure is returned rather than propagating a second error.
pub fn locate(document: &[u8], offset: usize) -> Vec<PathFrame> {
    let mut cursor = Cursor::new(document, Policy::new());
    let mut locator = Locator {
        target: offset,
        stack: Vec::new(),
    };
    let _ = walker::walk(&mut cursor, &mut locator);
    locator.stack
}

/// A `Walker` that maintains a path-frame stack as it descends, keeping a
/// member/index frame only as long as the value it names turns out to
/// contain `target`. By the time the walk finishes (or fails), whatever is
/// left on the stack is the chain of frames whose spans all contain it.
struct Locator {
    target: usize,
    stack: Vec<PathFrame>,
}

impl Walker for Locator {
    fn on_member_name(&mut self, name: &str) -> bool {
        self.stack.push(PathFrame::Property(name.to_string()));
        true
    }

    fn on_index(&mut self, index: usize) -> bool {
        self.stack.push(PathFrame::Index(index));
        true
    }

    fn on_value_span(&mut self, start: usize, end: usize) -> bool {
        if !(start <= self.target && self.target < end) {
            self.stack.pop();
        }
        true
    }
}
