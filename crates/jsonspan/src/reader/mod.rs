//! The encoding-generic JSON reader.
//!
//! Why this exists
//! - One set of grammar operations has to serve two physically different
//!   code-unit widths (UTF-8 bytes and UTF-16 units) without duplicating
//!   every call site. [`JsonReader`] is generic over [`Symbol`] and is
//!   monomorphized per width; the width is chosen once at construction.
//! - Borrowing vs owning is a performance tradeoff: when the input is a
//!   contiguous slice and a string has no escapes, span operations return
//!   borrowed slices of the caller's memory. Streamed input and escaped
//!   strings fall back to owned results.
//!
//! What it does
//! - Structural reads (`read_begin_object`, the end-or-separator loop
//!   headers), literal matching, escape-decoding string reads, number
//!   boundary detection, token classification, dynamic value construction,
//!   and the recursive-shape skip used to discard unwanted members.
//!
//! Invariants
//! - Every operation either completes and leaves the cursor after the
//!   consumed token, or fails with a [`JsonError`] and aborts the parse; the
//!   cursor is then unspecified. The only non-advancing miss is
//!   [`JsonReader::read_is_null`], which leaves the cursor untouched when
//!   the next value is not `null`.
//! - Scanning always stages lookahead before committing to a span, so spans
//!   handed out are never invalidated by a refill.

mod buffer;
mod escape;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::ops::Range;

use buffer::ReadBuffer;

use crate::{
    error::{ErrorKind, JsonError, Result},
    source::UnitSource,
    symbol::{Symbol, Utf8, Utf16},
    token::JsonToken,
    value::Value,
};

/// Maximum structural depth [`JsonReader::read_dynamic`] will descend into
/// before failing with [`ErrorKind::NestingLimitExceeded`].
pub const NESTING_LIMIT: usize = 256;

/// A reader over UTF-8 input.
pub type Utf8Reader<'a> = JsonReader<'a, Utf8>;
/// A reader over UTF-16 input.
pub type Utf16Reader<'a> = JsonReader<'a, Utf16>;

/// Classification of a single looked-at code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Peeked {
    /// No more input.
    Eof,
    /// A unit outside the ASCII range.
    NonAscii,
    /// An ASCII unit, narrowed.
    Ascii(u8),
}

/// Extent of a scanned string, exclusive of its quotes.
struct StringExtent {
    start: usize,
    len: usize,
    has_escape: bool,
}

/// The unified call surface over both code-unit widths.
///
/// A reader is created once per top-level parse operation, from either a
/// borrowed contiguous slice (pure zero-copy, no intermediate allocation) or
/// a pull-based [`UnitSource`] (one growable staging region, refilled on
/// demand). It is single-threaded, synchronous, and non-reentrant; dropping
/// it releases the staging region.
pub struct JsonReader<'a, S: Symbol> {
    buffer: ReadBuffer<'a, S>,
}

impl<'a, S: Symbol> JsonReader<'a, S> {
    /// Creates a reader over a borrowed contiguous view. Span operations are
    /// zero-copy for escape-free payloads.
    #[must_use]
    pub fn from_slice(input: &'a [S::Unit]) -> Self {
        Self {
            buffer: ReadBuffer::from_slice(input),
        }
    }

    /// Creates a reader over a streaming source. Payloads are staged
    /// incrementally; span operations return owned copies.
    pub fn from_source(source: impl UnitSource<S::Unit> + 'a) -> Self {
        Self {
            buffer: ReadBuffer::from_source(source),
        }
    }

    /// Code units consumed from the start of input, in this reader's own
    /// unit. Monotonically non-decreasing.
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    /// Constructs an error of `kind` at the current position. The seam for
    /// mapping-layer errors such as
    /// [`InvalidEnumValue`](ErrorKind::InvalidEnumValue).
    #[must_use]
    pub fn error(&self, kind: ErrorKind) -> JsonError {
        self.buffer.error(kind)
    }

    // ---- unit-level helpers ------------------------------------------------

    fn peeked_at(&mut self, offset: usize) -> Result<Peeked> {
        Ok(match self.buffer.peek_at(offset)? {
            None => Peeked::Eof,
            Some(u) => match S::unit_to_ascii(u) {
                Some(b) => Peeked::Ascii(b),
                None => Peeked::NonAscii,
            },
        })
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Peeked::Ascii(b' ' | b'\t' | b'\n' | b'\r') = self.peeked_at(0)? {
            self.buffer.bump(1);
        }
        Ok(())
    }

    /// Consumes one expected ASCII structural unit, after whitespace.
    fn expect_ascii(&mut self, expected: u8) -> Result<()> {
        self.skip_whitespace()?;
        match self.peeked_at(0)? {
            Peeked::Ascii(b) if b == expected => {
                self.buffer.bump(1);
                Ok(())
            }
            Peeked::Eof => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            _ => Err(self.error(ErrorKind::UnexpectedToken)),
        }
    }

    /// Consumes a fixed ASCII literal starting at the cursor.
    fn consume_literal(&mut self, literal: &[u8]) -> Result<()> {
        for (i, &b) in literal.iter().enumerate() {
            match self.peeked_at(i)? {
                Peeked::Ascii(u) if u == b => {}
                Peeked::Eof => {
                    return Err(JsonError::new(
                        ErrorKind::UnexpectedEndOfInput,
                        self.position() + i,
                    ));
                }
                _ => {
                    return Err(JsonError::new(
                        ErrorKind::InvalidSymbol,
                        self.position() + i,
                    ));
                }
            }
        }
        self.buffer.bump(literal.len());
        Ok(())
    }

    fn span(&self, range: Range<usize>) -> Cow<'a, [S::Unit]> {
        match self.buffer.try_borrowed(range.clone()) {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.buffer.units(range).to_vec()),
        }
    }

    // ---- structural reads --------------------------------------------------

    /// Consumes the `[` opening an array.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedToken`] if the next significant unit is not
    /// `[`; [`ErrorKind::UnexpectedEndOfInput`] if input is exhausted.
    pub fn read_begin_array(&mut self) -> Result<()> {
        self.expect_ascii(b'[')
    }

    /// Consumes the `{` opening an object.
    ///
    /// # Errors
    ///
    /// As [`JsonReader::read_begin_array`], for `{`.
    pub fn read_begin_object(&mut self) -> Result<()> {
        self.expect_ascii(b'{')
    }

    /// Loop header for array reads: returns `true` (consuming `]`) when the
    /// array is complete, `false` when another element follows. The first
    /// iteration expects no separator; later iterations consume the `,` and
    /// increment `count`.
    ///
    /// ```
    /// use jsonspan::Utf8Reader;
    ///
    /// let mut reader = Utf8Reader::from_slice(b"[1, 2]");
    /// reader.read_begin_array()?;
    /// let mut count = 0;
    /// let mut sum = 0.0f64;
    /// while !reader.try_read_is_end_array_or_value_separator(&mut count)? {
    ///     let _ = reader.read_number_span()?;
    ///     sum += 1.0;
    /// }
    /// assert_eq!(count, 2);
    /// # Ok::<(), jsonspan::JsonError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedToken`] when neither closer nor separator is
    /// found where one is required.
    pub fn try_read_is_end_array_or_value_separator(&mut self, count: &mut usize) -> Result<bool> {
        self.try_read_is_end_or_value_separator(b']', count)
    }

    /// Object twin of
    /// [`JsonReader::try_read_is_end_array_or_value_separator`], matching
    /// `}`.
    ///
    /// # Errors
    ///
    /// As the array form.
    pub fn try_read_is_end_object_or_value_separator(&mut self, count: &mut usize) -> Result<bool> {
        self.try_read_is_end_or_value_separator(b'}', count)
    }

    fn try_read_is_end_or_value_separator(&mut self, closer: u8, count: &mut usize) -> Result<bool> {
        self.skip_whitespace()?;
        match self.peeked_at(0)? {
            Peeked::Ascii(b) if b == closer => {
                self.buffer.bump(1);
                Ok(true)
            }
            Peeked::Eof => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            _ => {
                *count += 1;
                if *count > 1 {
                    match self.peeked_at(0)? {
                        Peeked::Ascii(b',') => {
                            self.buffer.bump(1);
                            Ok(false)
                        }
                        _ => Err(self.error(ErrorKind::UnexpectedToken)),
                    }
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Verifies that only whitespace remains after a complete top-level
    /// value.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EndOfDataExpected`] on any trailing significant unit.
    pub fn read_end_of_input(&mut self) -> Result<()> {
        self.skip_whitespace()?;
        match self.buffer.peek()? {
            None => Ok(()),
            Some(_) => Err(self.error(ErrorKind::EndOfDataExpected)),
        }
    }

    // ---- literals ----------------------------------------------------------

    /// Peeks for the `null` literal. If present it is consumed and `true` is
    /// returned; otherwise the cursor is left untouched, so the caller can
    /// proceed to read the typed value it expects.
    ///
    /// # Errors
    ///
    /// Only source failures; a missing or partial literal is a `false`, not
    /// an error.
    pub fn read_is_null(&mut self) -> Result<bool> {
        self.skip_whitespace()?;
        for (i, &b) in b"null".iter().enumerate() {
            match self.peeked_at(i)? {
                Peeked::Ascii(u) if u == b => {}
                _ => return Ok(false),
            }
        }
        self.buffer.bump(4);
        Ok(true)
    }

    /// Reads the `true` or `false` literal.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidSymbol`] for anything else;
    /// [`ErrorKind::UnexpectedEndOfInput`] mid-literal.
    pub fn read_boolean(&mut self) -> Result<bool> {
        self.skip_whitespace()?;
        match self.peeked_at(0)? {
            Peeked::Ascii(b't') => {
                self.consume_literal(b"true")?;
                Ok(true)
            }
            Peeked::Ascii(b'f') => {
                self.consume_literal(b"false")?;
                Ok(false)
            }
            Peeked::Eof => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            _ => Err(self.error(ErrorKind::InvalidSymbol)),
        }
    }

    // ---- strings -----------------------------------------------------------

    /// Scans a quoted string from the unit after the opening quote, staging
    /// the whole extent, without consuming. Escape *shapes* are validated
    /// during decode; here a backslash only pairs with its next unit so a
    /// `\"` never terminates the scan.
    fn scan_string_extent(&mut self) -> Result<StringExtent> {
        let start = self.position();
        let mut i = 0;
        let mut has_escape = false;
        let len = loop {
            match self.peeked_at(i)? {
                Peeked::Eof => {
                    return Err(JsonError::new(ErrorKind::UnexpectedEndOfInput, start + i));
                }
                Peeked::Ascii(b'"') => break i,
                Peeked::Ascii(b'\\') => {
                    has_escape = true;
                    if matches!(self.peeked_at(i + 1)?, Peeked::Eof) {
                        return Err(JsonError::new(
                            ErrorKind::UnexpectedEndOfInput,
                            start + i + 1,
                        ));
                    }
                    i += 2;
                }
                Peeked::Ascii(b) if b < 0x20 => {
                    return Err(JsonError::new(ErrorKind::InvalidSymbol, start + i));
                }
                _ => i += 1,
            }
        };
        Ok(StringExtent {
            start,
            len,
            has_escape,
        })
    }

    fn begin_string(&mut self) -> Result<StringExtent> {
        self.expect_ascii(b'"')?;
        self.scan_string_extent()
    }

    /// Reads a string value, decoding all escapes into the canonical UTF-8
    /// `String` representation.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedToken`] if no string starts here;
    /// [`ErrorKind::InvalidSymbol`] for malformed escapes, unescaped control
    /// characters, or ill-formed unit sequences.
    pub fn read_string(&mut self) -> Result<String> {
        let extent = self.begin_string()?;
        let range = extent.start..extent.start + extent.len;
        let decoded = if extent.has_escape {
            decode_escaped::<S>(self.buffer.units(range), extent.start)?
        } else {
            let mut out = String::with_capacity(extent.len);
            S::decode_units(self.buffer.units(range), &mut out)
                .map_err(|kind| JsonError::new(kind, extent.start))?;
            out
        };
        self.buffer.bump(extent.len + 1);
        Ok(decoded)
    }

    /// Reads a string value as raw code units. Escape-free contiguous input
    /// yields a zero-copy borrowed span; otherwise the decoded content is
    /// returned as an owned unit vector.
    ///
    /// # Errors
    ///
    /// As [`JsonReader::read_string`].
    pub fn read_string_span(&mut self) -> Result<Cow<'a, [S::Unit]>> {
        let extent = self.begin_string()?;
        let range = extent.start..extent.start + extent.len;
        let span = if extent.has_escape {
            let decoded = decode_escaped::<S>(self.buffer.units(range), extent.start)?;
            let mut units = Vec::with_capacity(decoded.len());
            S::encode_str(&decoded, &mut units);
            Cow::Owned(units)
        } else {
            self.span(range)
        };
        self.buffer.bump(extent.len + 1);
        Ok(span)
    }

    /// Reads an object member name, decoded, consuming the trailing `:`.
    ///
    /// # Errors
    ///
    /// As [`JsonReader::read_string`], plus
    /// [`ErrorKind::UnexpectedToken`] for a missing name separator.
    pub fn read_escaped_name(&mut self) -> Result<String> {
        let name = self.read_string()?;
        self.expect_ascii(b':')?;
        Ok(name)
    }

    /// Span form of [`JsonReader::read_escaped_name`]: zero-copy when the
    /// name has no escapes and the input is contiguous.
    ///
    /// # Errors
    ///
    /// As [`JsonReader::read_escaped_name`].
    pub fn read_name_span(&mut self) -> Result<Cow<'a, [S::Unit]>> {
        let span = self.read_string_span()?;
        self.expect_ascii(b':')?;
        Ok(span)
    }

    // ---- numbers -----------------------------------------------------------

    /// Validates a number against the RFC 8259 grammar by lookahead,
    /// returning its length in units. Does not consume.
    fn scan_number(&mut self) -> Result<usize> {
        let start = self.position();
        let mut i = 0;
        if matches!(self.peeked_at(i)?, Peeked::Ascii(b'-')) {
            i += 1;
        }
        match self.peeked_at(i)? {
            Peeked::Ascii(b'0') => {
                i += 1;
                // No leading zeros before a nonzero digit.
                if matches!(self.peeked_at(i)?, Peeked::Ascii(b'0'..=b'9')) {
                    return Err(JsonError::new(ErrorKind::InvalidSymbol, start + i));
                }
            }
            Peeked::Ascii(b'1'..=b'9') => {
                i += 1;
                while matches!(self.peeked_at(i)?, Peeked::Ascii(b'0'..=b'9')) {
                    i += 1;
                }
            }
            Peeked::Eof => {
                return Err(JsonError::new(ErrorKind::UnexpectedEndOfInput, start + i));
            }
            _ => return Err(JsonError::new(ErrorKind::InvalidSymbol, start + i)),
        }
        if matches!(self.peeked_at(i)?, Peeked::Ascii(b'.')) {
            i += 1;
            i = self.scan_digits(start, i)?;
        }
        if matches!(self.peeked_at(i)?, Peeked::Ascii(b'e' | b'E')) {
            i += 1;
            if matches!(self.peeked_at(i)?, Peeked::Ascii(b'+' | b'-')) {
                i += 1;
            }
            i = self.scan_digits(start, i)?;
        }
        Ok(i)
    }

    /// At least one digit, then as many as follow.
    fn scan_digits(&mut self, start: usize, mut i: usize) -> Result<usize> {
        match self.peeked_at(i)? {
            Peeked::Ascii(b'0'..=b'9') => i += 1,
            Peeked::Eof => {
                return Err(JsonError::new(ErrorKind::UnexpectedEndOfInput, start + i));
            }
            _ => return Err(JsonError::new(ErrorKind::InvalidSymbol, start + i)),
        }
        while matches!(self.peeked_at(i)?, Peeked::Ascii(b'0'..=b'9')) {
            i += 1;
        }
        Ok(i)
    }

    /// Locates a number and returns its unparsed span for the caller to
    /// convert; the reader never interprets the numeric value itself.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidSymbol`] for grammar violations (leading zeros, a
    /// bare `-`, a fraction or exponent without digits);
    /// [`ErrorKind::UnexpectedEndOfInput`] when input ends mid-number.
    pub fn read_number_span(&mut self) -> Result<Cow<'a, [S::Unit]>> {
        self.skip_whitespace()?;
        let start = self.position();
        let len = self.scan_number()?;
        let span = self.span(start..start + len);
        self.buffer.bump(len);
        Ok(span)
    }

    /// Number read decoded to its ASCII text, for in-crate numeric
    /// conversion.
    pub(crate) fn read_number_str(&mut self) -> Result<String> {
        self.skip_whitespace()?;
        let start = self.position();
        let len = self.scan_number()?;
        let mut out = String::with_capacity(len);
        S::decode_units(self.buffer.units(start..start + len), &mut out)
            .map_err(|kind| JsonError::new(kind, start))?;
        self.buffer.bump(len);
        Ok(out)
    }

    // ---- token classification and shape-driven reads -----------------------

    /// Skips whitespace, then classifies the next significant unit without
    /// consuming it.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidSymbol`] if the unit cannot begin any JSON token.
    pub fn read_next_token(&mut self) -> Result<JsonToken> {
        self.skip_whitespace()?;
        match self.peeked_at(0)? {
            Peeked::Eof => Ok(JsonToken::EndOfInput),
            Peeked::Ascii(b'{') => Ok(JsonToken::BeginObject),
            Peeked::Ascii(b'}') => Ok(JsonToken::EndObject),
            Peeked::Ascii(b'[') => Ok(JsonToken::BeginArray),
            Peeked::Ascii(b']') => Ok(JsonToken::EndArray),
            Peeked::Ascii(b',') => Ok(JsonToken::ValueSeparator),
            Peeked::Ascii(b':') => Ok(JsonToken::NameSeparator),
            Peeked::Ascii(b'"') => Ok(JsonToken::String),
            Peeked::Ascii(b't') => Ok(JsonToken::True),
            Peeked::Ascii(b'f') => Ok(JsonToken::False),
            Peeked::Ascii(b'n') => Ok(JsonToken::Null),
            Peeked::Ascii(b'-' | b'0'..=b'9') => Ok(JsonToken::Number),
            _ => Err(self.error(ErrorKind::InvalidSymbol)),
        }
    }

    /// Discards one complete JSON value — scalar or arbitrarily nested
    /// object/array — without materializing it, leaving the cursor at the
    /// start of the next sibling token. Strings are skipped with escape
    /// awareness, so structural characters inside string literals never
    /// perturb the depth count.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedEndOfInput`] for a truncated value;
    /// [`ErrorKind::UnexpectedToken`] when the cursor is not at the start of
    /// a value.
    pub fn skip_next_segment(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            let token = self.read_next_token()?;
            match token {
                JsonToken::BeginObject | JsonToken::BeginArray => {
                    self.buffer.bump(1);
                    depth += 1;
                }
                JsonToken::EndObject | JsonToken::EndArray => {
                    if depth == 0 {
                        return Err(self.error(ErrorKind::UnexpectedToken));
                    }
                    self.buffer.bump(1);
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                JsonToken::NameSeparator | JsonToken::ValueSeparator => {
                    if depth == 0 {
                        return Err(self.error(ErrorKind::UnexpectedToken));
                    }
                    self.buffer.bump(1);
                }
                JsonToken::String => {
                    self.skip_string()?;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                JsonToken::Number => {
                    let len = self.scan_number()?;
                    self.buffer.bump(len);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                JsonToken::True | JsonToken::False | JsonToken::Null => {
                    let literal: &[u8] = match token {
                        JsonToken::True => b"true",
                        JsonToken::False => b"false",
                        _ => b"null",
                    };
                    self.consume_literal(literal)?;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                JsonToken::EndOfInput => {
                    return Err(self.error(ErrorKind::UnexpectedEndOfInput));
                }
            }
        }
    }

    /// Consumes a whole string without validating or materializing its
    /// content; only the escape pairing matters for finding the closer.
    fn skip_string(&mut self) -> Result<()> {
        // Opening quote.
        self.buffer.bump(1);
        loop {
            let Some(u) = self.buffer.peek()? else {
                return Err(self.error(ErrorKind::UnexpectedEndOfInput));
            };
            self.buffer.bump(1);
            match S::unit_to_ascii(u) {
                Some(b'"') => return Ok(()),
                Some(b'\\') => self.buffer.advance()?,
                _ => {}
            }
        }
    }

    /// Reads one value of unknown shape into a dynamic [`Value`] by
    /// token-driven recursive descent, bounded by [`NESTING_LIMIT`].
    ///
    /// # Errors
    ///
    /// Grammar errors as for the typed reads, plus
    /// [`ErrorKind::NestingLimitExceeded`] on adversarially deep documents.
    pub fn read_dynamic(&mut self) -> Result<Value> {
        self.read_dynamic_at(0)
    }

    fn read_dynamic_at(&mut self, depth: usize) -> Result<Value> {
        match self.read_next_token()? {
            JsonToken::Null => {
                self.consume_literal(b"null")?;
                Ok(Value::Null)
            }
            JsonToken::True => {
                self.consume_literal(b"true")?;
                Ok(Value::Boolean(true))
            }
            JsonToken::False => {
                self.consume_literal(b"false")?;
                Ok(Value::Boolean(false))
            }
            JsonToken::String => Ok(Value::String(self.read_string()?)),
            JsonToken::Number => {
                let text = self.read_number_str()?;
                text.parse::<f64>()
                    .map(Value::Number)
                    .map_err(|_| self.error(ErrorKind::InvalidSymbol))
            }
            JsonToken::BeginArray => {
                if depth == NESTING_LIMIT {
                    return Err(self.error(ErrorKind::NestingLimitExceeded(NESTING_LIMIT)));
                }
                self.buffer.bump(1);
                let mut items = Vec::new();
                let mut count = 0;
                while !self.try_read_is_end_array_or_value_separator(&mut count)? {
                    items.push(self.read_dynamic_at(depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            JsonToken::BeginObject => {
                if depth == NESTING_LIMIT {
                    return Err(self.error(ErrorKind::NestingLimitExceeded(NESTING_LIMIT)));
                }
                self.buffer.bump(1);
                let mut members = crate::value::Map::new();
                let mut count = 0;
                while !self.try_read_is_end_object_or_value_separator(&mut count)? {
                    let name = self.read_escaped_name()?;
                    let value = self.read_dynamic_at(depth + 1)?;
                    members.insert(name, value);
                }
                Ok(Value::Object(members))
            }
            JsonToken::EndOfInput => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            JsonToken::EndObject
            | JsonToken::EndArray
            | JsonToken::NameSeparator
            | JsonToken::ValueSeparator => Err(self.error(ErrorKind::UnexpectedToken)),
        }
    }
}

impl<'a> JsonReader<'a, Utf8> {
    /// Creates a UTF-8 reader borrowing a string slice.
    #[must_use]
    pub fn from_text(input: &'a str) -> Self {
        Self::from_slice(input.as_bytes())
    }

    /// Creates a UTF-8 reader over a blocking byte stream.
    #[cfg(feature = "std")]
    pub fn from_reader(reader: impl std::io::Read + 'a) -> Self {
        Self::from_source(crate::source::IoSource::new(reader))
    }
}

/// Decodes the content of a string extent that contains at least one escape.
/// `base` is the absolute position of `units[0]`, for diagnostics.
fn decode_escaped<S: Symbol>(units: &[S::Unit], base: usize) -> Result<String> {
    let mut out = String::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let run_start = i;
        while i < units.len() && S::unit_to_ascii(units[i]) != Some(b'\\') {
            i += 1;
        }
        if i > run_start {
            S::decode_units(&units[run_start..i], &mut out)
                .map_err(|kind| JsonError::new(kind, base + run_start))?;
        }
        if i == units.len() {
            break;
        }
        let esc_pos = i;
        // The extent scan pairs every backslash with a following unit.
        i += 1;
        let esc = S::unit_to_ascii(units[i]);
        i += 1;
        match esc {
            Some(b'u') => {
                let high = read_hex4::<S>(units, &mut i, base)?;
                if escape::is_low_surrogate(high) {
                    return Err(JsonError::new(ErrorKind::InvalidSymbol, base + esc_pos));
                }
                if escape::is_high_surrogate(high) {
                    let next_is_unicode_escape = matches!(
                        (units.get(i), units.get(i + 1)),
                        (Some(&a), Some(&b))
                            if S::unit_to_ascii(a) == Some(b'\\')
                                && S::unit_to_ascii(b) == Some(b'u')
                    );
                    if !next_is_unicode_escape {
                        return Err(JsonError::new(ErrorKind::InvalidSymbol, base + i));
                    }
                    i += 2;
                    let low = read_hex4::<S>(units, &mut i, base)?;
                    if !escape::is_low_surrogate(low) {
                        return Err(JsonError::new(ErrorKind::InvalidSymbol, base + esc_pos));
                    }
                    match escape::combine_surrogates(high, low) {
                        Some(ch) => out.push(ch),
                        None => {
                            return Err(JsonError::new(ErrorKind::InvalidSymbol, base + esc_pos));
                        }
                    }
                } else {
                    match char::from_u32(u32::from(high)) {
                        Some(ch) => out.push(ch),
                        None => {
                            return Err(JsonError::new(ErrorKind::InvalidSymbol, base + esc_pos));
                        }
                    }
                }
            }
            Some(b) => match escape::simple_escape(b) {
                Some(ch) => out.push(ch),
                None => return Err(JsonError::new(ErrorKind::InvalidSymbol, base + esc_pos)),
            },
            None => return Err(JsonError::new(ErrorKind::InvalidSymbol, base + esc_pos)),
        }
    }
    Ok(out)
}

/// Accumulates exactly four hex digits from `units` into one UTF-16 code
/// unit, advancing `i`.
fn read_hex4<S: Symbol>(units: &[S::Unit], i: &mut usize, base: usize) -> Result<u16> {
    let mut acc = 0u16;
    for _ in 0..4 {
        let digit = units
            .get(*i)
            .copied()
            .and_then(S::unit_to_ascii)
            .and_then(escape::hex_val)
            .ok_or_else(|| JsonError::new(ErrorKind::InvalidSymbol, base + *i))?;
        acc = (acc << 4) | digit;
        *i += 1;
    }
    Ok(acc)
}
