//! Cursor over the raw input, in either of two modes.
//!
//! - `Slice`: a borrowed, immutable view of contiguous code units. The
//!   buffer owns nothing and slicing between two cursor positions is always
//!   zero-copy for the caller-supplied lifetime.
//! - `Stream`: an owned, growable staging region filled on demand from a
//!   [`UnitSource`]. The staging region retains every unit pulled so far for
//!   the lifetime of the parse, so slices over staged data are never
//!   invalidated by a later refill; the cost is memory proportional to the
//!   consumed input, released when the reader is dropped. Borrowed slices
//!   tied to the input lifetime exist only in `Slice` mode — stream-mode
//!   callers get owned copies.
//!
//! Invariant: `pos ∈ [0, valid_len]` and is monotonically non-decreasing.
//! `pos == valid_len` with an exhausted source means end of input.

use alloc::{boxed::Box, string::ToString, vec::Vec};
use core::ops::Range;

use crate::{
    error::{ErrorKind, JsonError, Result},
    source::UnitSource,
    symbol::Symbol,
};

pub(crate) enum ReadBuffer<'a, S: Symbol> {
    Slice {
        data: &'a [S::Unit],
        pos: usize,
    },
    Stream {
        source: Box<dyn UnitSource<S::Unit> + 'a>,
        staged: Vec<S::Unit>,
        pos: usize,
        exhausted: bool,
    },
}

impl<'a, S: Symbol> ReadBuffer<'a, S> {
    pub(crate) fn from_slice(data: &'a [S::Unit]) -> Self {
        ReadBuffer::Slice { data, pos: 0 }
    }

    pub(crate) fn from_source(source: impl UnitSource<S::Unit> + 'a) -> Self {
        ReadBuffer::Stream {
            source: Box::new(source),
            staged: Vec::new(),
            pos: 0,
            exhausted: false,
        }
    }

    /// Code units consumed from the start of input.
    pub(crate) fn position(&self) -> usize {
        match self {
            ReadBuffer::Slice { pos, .. } | ReadBuffer::Stream { pos, .. } => *pos,
        }
    }

    /// Ensures at least `needed` units are staged (stream mode) or confirms
    /// availability (slice mode), refilling as required.
    fn fill_to(&mut self, needed: usize) -> Result<()> {
        if let ReadBuffer::Stream {
            source,
            staged,
            pos,
            exhausted,
        } = self
        {
            while staged.len() < needed && !*exhausted {
                let appended = source
                    .read_units(staged)
                    .map_err(|e| JsonError::new(ErrorKind::Source(e.to_string()), *pos))?;
                if appended == 0 {
                    *exhausted = true;
                }
            }
        }
        Ok(())
    }

    /// The unit at the cursor, without advancing. `None` at end of input.
    pub(crate) fn peek(&mut self) -> Result<Option<S::Unit>> {
        self.peek_at(0)
    }

    /// The unit `offset` positions ahead of the cursor, without advancing.
    /// In stream mode this stages data through the requested offset.
    pub(crate) fn peek_at(&mut self, offset: usize) -> Result<Option<S::Unit>> {
        match self {
            ReadBuffer::Slice { data, pos } => Ok(data.get(*pos + offset).copied()),
            ReadBuffer::Stream { .. } => {
                let needed = self.position() + offset + 1;
                self.fill_to(needed)?;
                let ReadBuffer::Stream { staged, pos, .. } = self else {
                    unreachable!();
                };
                Ok(staged.get(*pos + offset).copied())
            }
        }
    }

    /// Moves the cursor forward by one unit.
    pub(crate) fn advance(&mut self) -> Result<()> {
        if self.peek()?.is_none() {
            return Err(self.error(ErrorKind::UnexpectedEndOfInput));
        }
        self.bump(1);
        Ok(())
    }

    /// Moves the cursor forward by `n` units. The caller must have already
    /// established (by peeking) that `n` units are available.
    pub(crate) fn bump(&mut self, n: usize) {
        match self {
            ReadBuffer::Slice { data, pos } => {
                debug_assert!(*pos + n <= data.len());
                *pos += n;
            }
            ReadBuffer::Stream { staged, pos, .. } => {
                debug_assert!(*pos + n <= staged.len());
                *pos += n;
            }
        }
    }

    /// A view of already-available units. The range must have been staged by
    /// a prior peek; valid for local inspection only.
    pub(crate) fn units(&self, range: Range<usize>) -> &[S::Unit] {
        match self {
            ReadBuffer::Slice { data, .. } => &data[range],
            ReadBuffer::Stream { staged, .. } => &staged[range],
        }
    }

    /// A zero-copy slice tied to the caller-supplied input lifetime.
    /// `None` in stream mode: staged data cannot outlive the buffer.
    pub(crate) fn try_borrowed(&self, range: Range<usize>) -> Option<&'a [S::Unit]> {
        match self {
            ReadBuffer::Slice { data, .. } => {
                let data: &'a [S::Unit] = data;
                data.get(range)
            }
            ReadBuffer::Stream { .. } => None,
        }
    }

    /// An error of `kind` at the current cursor position.
    pub(crate) fn error(&self, kind: ErrorKind) -> JsonError {
        JsonError::new(kind, self.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{source::TextSource, symbol::Utf8};

    #[test]
    fn slice_cursor_boundaries() {
        let mut buf = ReadBuffer::<Utf8>::from_slice(b"ab");
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.peek().unwrap(), Some(b'a'));
        buf.advance().unwrap();
        assert_eq!(buf.peek().unwrap(), Some(b'b'));
        buf.advance().unwrap();
        assert_eq!(buf.position(), 2);
        assert_eq!(buf.peek().unwrap(), None);
        let err = buf.advance().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn stream_refills_on_lookahead() {
        let src = TextSource::with_chunk_size("null".chars(), 1);
        let mut buf = ReadBuffer::<Utf8>::from_source(src);
        // Lookahead past the first chunk forces repeated refills.
        assert_eq!(buf.peek_at(3).unwrap(), Some(b'l'));
        assert_eq!(buf.units(0..4), b"null");
        assert_eq!(buf.peek_at(4).unwrap(), None);
    }

    #[test]
    fn stream_never_borrows() {
        let src = TextSource::new("true".chars());
        let mut buf = ReadBuffer::<Utf8>::from_source(src);
        assert_eq!(buf.peek_at(3).unwrap(), Some(b'e'));
        assert!(buf.try_borrowed(0..4).is_none());
    }

    #[test]
    fn slice_borrows_zero_copy() {
        let data = b"\"hi\"";
        let buf = ReadBuffer::<Utf8>::from_slice(data);
        let slice = buf.try_borrowed(1..3).unwrap();
        assert_eq!(slice, b"hi");
        // Same memory, not a copy.
        assert!(core::ptr::eq(slice.as_ptr(), data[1..].as_ptr()));
    }
}
