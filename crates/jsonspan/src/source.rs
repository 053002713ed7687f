//! Pull-based input sources for the streaming reader variant.
//!
//! A [`UnitSource`] feeds code units into the reader's staging buffer on
//! demand. Refills are blocking: the reader calls [`UnitSource::read_units`]
//! when its cursor nears the staged boundary and waits for the source to
//! produce more data or report exhaustion.
//!
//! Two adapters are provided: [`IoSource`] wraps any `std::io::Read` as a
//! byte source, and [`TextSource`] wraps an already-decoded character
//! iterator as a source of either code-unit width.

use alloc::{string::String, vec::Vec};
use thiserror::Error;

/// Failure of an underlying streaming source during a refill.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SourceError(String);

impl SourceError {
    /// Wraps a source-specific failure message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A blocking producer of code units.
///
/// `read_units` appends at least one unit to `out` unless the source is
/// exhausted; `Ok(0)` means no more data will ever arrive. There is no
/// requirement on chunk size, so implementations may hand over a single unit
/// at a time.
pub trait UnitSource<U> {
    /// Pulls the next chunk of units, appending to `out`. Returns the number
    /// of units appended.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying source. The reader converts this into a
    /// fatal [`ErrorKind::Source`](crate::ErrorKind::Source) parse error.
    fn read_units(&mut self, out: &mut Vec<U>) -> Result<usize, SourceError>;
}

/// Adapts an already-decoded character stream into a unit source.
///
/// This is the "pull-based text source" construction variant: the characters
/// are re-encoded into whichever code-unit width the reader was parameterized
/// with.
#[derive(Debug)]
pub struct TextSource<I> {
    chars: I,
    chunk: usize,
}

const TEXT_CHUNK: usize = 1024;

impl<I: Iterator<Item = char>> TextSource<I> {
    /// Wraps a character iterator, delivering up to 1024 characters per
    /// refill.
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            chunk: TEXT_CHUNK,
        }
    }

    /// Wraps a character iterator with an explicit refill granularity.
    /// Mostly useful in tests to force tokens across refill boundaries.
    ///
    /// # Panics
    ///
    /// If `chunk` is zero.
    pub fn with_chunk_size(chars: I, chunk: usize) -> Self {
        assert!(chunk > 0, "chunk size must be non-zero");
        Self { chars, chunk }
    }
}

impl<I: Iterator<Item = char>> UnitSource<u8> for TextSource<I> {
    fn read_units(&mut self, out: &mut Vec<u8>) -> Result<usize, SourceError> {
        let start = out.len();
        let mut buf = [0u8; 4];
        for ch in self.chars.by_ref().take(self.chunk) {
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        Ok(out.len() - start)
    }
}

impl<I: Iterator<Item = char>> UnitSource<u16> for TextSource<I> {
    fn read_units(&mut self, out: &mut Vec<u16>) -> Result<usize, SourceError> {
        let start = out.len();
        let mut buf = [0u16; 2];
        for ch in self.chars.by_ref().take(self.chunk) {
            out.extend_from_slice(ch.encode_utf16(&mut buf));
        }
        Ok(out.len() - start)
    }
}

/// Adapts a blocking `std::io::Read` into a byte source.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoSource<R> {
    /// Wraps a reader. Bytes are pulled in 4 KiB chunks.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> UnitSource<u8> for IoSource<R> {
    fn read_units(&mut self, out: &mut Vec<u8>) -> Result<usize, SourceError> {
        use alloc::string::ToString;

        let mut buf = [0u8; 4096];
        loop {
            match self.inner.read(&mut buf) {
                Ok(n) => {
                    out.extend_from_slice(&buf[..n]);
                    return Ok(n);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(SourceError::new(e.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn text_source_respects_chunk_size() {
        let mut src = TextSource::with_chunk_size("abcdef".chars(), 2);
        let mut out: Vec<u8> = vec![];
        assert_eq!(src.read_units(&mut out).unwrap(), 2);
        assert_eq!(out, b"ab");
        assert_eq!(src.read_units(&mut out).unwrap(), 2);
        assert_eq!(src.read_units(&mut out).unwrap(), 2);
        assert_eq!(src.read_units(&mut out).unwrap(), 0);
        assert_eq!(out, b"abcdef");
    }

    #[test]
    fn text_source_encodes_utf16_pairs() {
        let mut src = TextSource::new("😀".chars());
        let mut out: Vec<u16> = vec![];
        assert_eq!(src.read_units(&mut out).unwrap(), 2);
        assert_eq!(out, vec![0xD83D, 0xDE00]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn io_source_reads_until_empty() {
        let mut src = IoSource::new(&b"{}"[..]);
        let mut out: Vec<u8> = vec![];
        assert_eq!(src.read_units(&mut out).unwrap(), 2);
        assert_eq!(src.read_units(&mut out).unwrap(), 0);
        assert_eq!(out, b"{}");
    }
}
