//! Parse state: a cursor advancing over a borrowed byte range, policy-aware.

use crate::error::{Error, Reason, Result};
use crate::policy::{Comments, Policy};

/// A cursor over `[first, last)` of the input, plus the policy that
/// specializes how it scans. `Cursor` never copies the input; everything it
/// returns either advances `pos` or borrows a sub-slice of `bytes`.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'i> {
    bytes: &'i [u8],
    pos: usize,
    policy: Policy,
}

impl<'i> Cursor<'i> {
    pub fn new(bytes: &'i [u8], policy: Policy) -> Cursor<'i> {
        Cursor {
            bytes,
            pos: 0,
            policy,
        }
    }

    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    #[inline]
    pub fn document(&self) -> &'i [u8] {
        self.bytes
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_offset(&mut self, offset: usize) {
        self.pos = offset;
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub fn remaining(&self) -> &'i [u8] {
        &self.bytes[self.pos..]
    }

    /// Byte at the cursor, or `None` past the end. `ZeroTerminated` callers
    /// may instead rely on the documented sentinel and skip this check, but
    /// this core always performs it: the elided-bounds-check fast path is a
    /// platform/codegen optimization this crate does not implement.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    pub fn peek_at(&self, delta: usize) -> Option<u8> {
        self.bytes.get(self.pos + delta).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn require_peek(&self) -> Result<u8> {
        self.peek()
            .ok_or_else(|| Error::new(Reason::UnexpectedEndOfData, self.pos))
    }

    /// Consumes `ch` at the cursor, failing with `ExpectedToken` on mismatch
    /// (including end-of-data, which is reported as `ExpectedToken` too,
    /// since both mean a specific structural byte was required and absent).
    pub fn consume(&mut self, ch: u8) -> Result<()> {
        match self.peek() {
            Some(b) if b == ch => {
                self.advance(1);
                Ok(())
            }
            _ => Err(Error::new(Reason::ExpectedToken(ch), self.pos)),
        }
    }

    pub fn consume_literal(&mut self, literal: &[u8]) -> Result<()> {
        if self.bytes[self.pos..].starts_with(literal) {
            self.advance(literal.len());
            Ok(())
        } else {
            Err(Error::new(Reason::InvalidLiteral, self.pos))
        }
    }

    /// Advances past spaces, tabs, CR, LF, and (if enabled by policy) a
    /// comment. This is the only call site in the crate allowed to interpret
    /// `//`, `/*`, or `#` as a comment opener — the string scanners own
    /// the cursor exclusively while inside a string body, so a comment marker
    /// inside a JSON string can never be misread as a real comment.
    pub fn skip_whitespace(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.advance(1);
                }
                Some(b'/') if self.policy.comments() == Comments::Cpp => {
                    self.skip_cpp_comment()?;
                }
                Some(b'#') if self.policy.comments() == Comments::Hash => {
                    self.advance(1);
                    self.skip_to_line_end();
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_cpp_comment(&mut self) -> Result<()> {
        match self.peek_at(1) {
            Some(b'/') => {
                self.advance(2);
                self.skip_to_line_end();
                Ok(())
            }
            Some(b'*') => {
                let start = self.pos;
                self.advance(2);
                loop {
                    match self.peek() {
                        None => {
                            if self.policy.is_checked() {
                                return Err(Error::new(Reason::UnexpectedEndOfData, start));
                            }
                            return Ok(());
                        }
                        Some(b'*') if self.peek_at(1) == Some(b'/') => {
                            self.advance(2);
                            return Ok(());
                        }
                        _ => self.advance(1),
                    }
                }
            }
            _ => Ok(()), // A lone '/' is not whitespace; leave it for the caller to reject.
        }
    }

    fn skip_to_line_end(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                self.advance(1);
                return;
            }
            self.advance(1);
        }
    }

    pub fn at_class_start(&self) -> bool {
        self.peek() == Some(b'{')
    }

    pub fn at_array_start(&self) -> bool {
        self.peek() == Some(b'[')
    }

    pub fn at_string_start(&self) -> bool {
        self.peek() == Some(b'"')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    #[test]
    fn test_skip_whitespace_plain() {
        let mut c = Cursor::new(b"   \t\r\n  x", Policy::new());
        c.skip_whitespace().unwrap();
        assert_eq!(c.peek(), Some(b'x'));
    }

    #[test]
    fn test_skip_cpp_comment_line() {
        let policy = Policy::new().with_comments(Comments::Cpp);
        let mut c = Cursor::new(b"// hi\n{\"a\":1}", policy);
        c.skip_whitespace().unwrap();
        assert_eq!(c.peek(), Some(b'{'));
    }

    #[test]
    fn test_skip_cpp_comment_block() {
        let policy = Policy::new().with_comments(Comments::Cpp);
        let mut c = Cursor::new(b"/* block \n comment */ 1", policy);
        c.skip_whitespace().unwrap();
        assert_eq!(c.peek(), Some(b'1'));
    }

    #[test]
    fn test_skip_hash_comment() {
        let policy = Policy::new().with_comments(Comments::Hash);
        let mut c = Cursor::new(b"# hi\n1", policy);
        c.skip_whitespace().unwrap();
        assert_eq!(c.peek(), Some(b'1'));
    }

    #[test]
    fn test_comments_rejected_by_default() {
        let mut c = Cursor::new(b"// hi\n{\"a\":1}", Policy::new());
        c.skip_whitespace().unwrap();
        // `/` is not whitespace when comments are disabled; the caller sees it.
        assert_eq!(c.peek(), Some(b'/'));
    }

    #[test]
    fn test_consume_mismatch() {
        let mut c = Cursor::new(b"}", Policy::new());
        let err = c.consume(b':').unwrap_err();
        assert_eq!(err.reason, Reason::ExpectedToken(b':'));
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_unterminated_block_comment_checked() {
        let policy = Policy::new().with_comments(Comments::Cpp);
        let mut c = Cursor::new(b"/* never closes", policy);
        let err = c.skip_whitespace().unwrap_err();
        assert_eq!(err.reason, Reason::UnexpectedEndOfData);
    }
}
