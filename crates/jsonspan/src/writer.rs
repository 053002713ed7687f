//! The writing side, enough to close the round trip.
//!
//! [`JsonWriter`] is the symmetric collaborator of [`crate::JsonReader`]: it
//! accumulates code units of either width and emits standard JSON — the same
//! grammar the reader accepts, so `read(write(v)) == v` holds for every
//! supported shape. It is deliberately small: compact output only, no
//! pretty-printing.

use alloc::{string::String, vec::Vec};

use crate::symbol::{Symbol, Utf16, Utf8};

/// Output configuration consulted by the mapping layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriterOptions {
    /// Whether struct-like serializers should emit the literal `null` for
    /// absent optional fields instead of omitting the member entirely.
    ///
    /// # Default
    ///
    /// `false`
    pub include_nulls: bool,
}

/// Accumulates JSON output as code units of width `S`.
pub struct JsonWriter<S: Symbol> {
    out: Vec<S::Unit>,
    options: WriterOptions,
}

impl<S: Symbol> Default for JsonWriter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> JsonWriter<S> {
    /// An empty writer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    /// An empty writer with explicit options.
    #[must_use]
    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            out: Vec::new(),
            options,
        }
    }

    /// The options this writer was configured with.
    #[must_use]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    #[inline]
    fn push_ascii(&mut self, byte: u8) {
        self.out.push(S::unit_from_ascii(byte));
    }

    fn push_str(&mut self, s: &str) {
        S::encode_str(s, &mut self.out);
    }

    /// Writes `{`.
    pub fn write_begin_object(&mut self) {
        self.push_ascii(b'{');
    }

    /// Writes `}`.
    pub fn write_end_object(&mut self) {
        self.push_ascii(b'}');
    }

    /// Writes `[`.
    pub fn write_begin_array(&mut self) {
        self.push_ascii(b'[');
    }

    /// Writes `]`.
    pub fn write_end_array(&mut self) {
        self.push_ascii(b']');
    }

    /// Writes `,`.
    pub fn write_value_separator(&mut self) {
        self.push_ascii(b',');
    }

    /// Writes an object member name: the quoted, escaped `name` followed by
    /// `:`.
    pub fn write_name(&mut self, name: &str) {
        self.write_string(name);
        self.push_ascii(b':');
    }

    /// Writes a quoted string, escaping `"`, `\`, and control characters.
    pub fn write_string(&mut self, value: &str) {
        self.push_ascii(b'"');
        for ch in value.chars() {
            match ch {
                '"' => self.push_str("\\\""),
                '\\' => self.push_str("\\\\"),
                '\u{0008}' => self.push_str("\\b"),
                '\u{000C}' => self.push_str("\\f"),
                '\n' => self.push_str("\\n"),
                '\r' => self.push_str("\\r"),
                '\t' => self.push_str("\\t"),
                ch if (ch as u32) < 0x20 => {
                    self.push_str("\\u00");
                    let code = ch as u32;
                    self.push_ascii(hex_digit((code >> 4) as u8));
                    self.push_ascii(hex_digit((code & 0xF) as u8));
                }
                ch => S::encode_char(ch, &mut self.out),
            }
        }
        self.push_ascii(b'"');
    }

    /// Writes `null`.
    pub fn write_null(&mut self) {
        self.push_str("null");
    }

    /// Writes `true` or `false`.
    pub fn write_boolean(&mut self, value: bool) {
        self.push_str(if value { "true" } else { "false" });
    }

    /// Writes a finite floating-point number. Non-finite values have no JSON
    /// representation and are emitted as `null`.
    pub fn write_f64(&mut self, value: f64) {
        if value.is_finite() {
            self.push_str(&alloc::format!("{value}"));
        } else {
            self.write_null();
        }
    }

    /// Writes a signed integer.
    pub fn write_i64(&mut self, value: i64) {
        self.push_str(&alloc::format!("{value}"));
    }

    /// Writes an unsigned integer.
    pub fn write_u64(&mut self, value: u64) {
        self.push_str(&alloc::format!("{value}"));
    }

    /// The accumulated output units.
    #[must_use]
    pub fn into_inner(self) -> Vec<S::Unit> {
        self.out
    }
}

impl JsonWriter<Utf8> {
    /// The accumulated output as a `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        // The writer only ever emits complete UTF-8 sequences.
        String::from_utf8(self.out).expect("writer emits well-formed UTF-8")
    }
}

impl JsonWriter<Utf16> {
    /// The accumulated output decoded to a `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        // The writer only ever emits paired surrogates.
        char::decode_utf16(self.out)
            .collect::<Result<String, _>>()
            .expect("writer emits well-formed UTF-16")
    }
}

fn hex_digit(nibble: u8) -> u8 {
    match nibble {
        0..=9 => b'0' + nibble,
        _ => b'a' + (nibble - 10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_controls() {
        let mut w = JsonWriter::<Utf8>::new();
        w.write_string("a\"b\\c\n\u{0001}");
        assert_eq!(w.into_string(), "\"a\\\"b\\\\c\\n\\u0001\"");
    }

    #[test]
    fn structural_sequence() {
        let mut w = JsonWriter::<Utf8>::new();
        w.write_begin_object();
        w.write_name("n");
        w.write_i64(-3);
        w.write_value_separator();
        w.write_name("ok");
        w.write_boolean(true);
        w.write_end_object();
        assert_eq!(w.into_string(), r#"{"n":-3,"ok":true}"#);
    }

    #[test]
    fn utf16_output_round_trips_wide_chars() {
        let mut w = JsonWriter::<Utf16>::new();
        w.write_string("😀");
        assert_eq!(w.into_string(), "\"😀\"");
    }

    #[test]
    fn f64_formats_integral_values_bare() {
        let mut w = JsonWriter::<Utf8>::new();
        w.write_f64(1.0);
        w.write_value_separator();
        w.write_f64(1.25);
        assert_eq!(w.into_string(), "1,1.25");
    }

    #[test]
    fn non_finite_becomes_null() {
        let mut w = JsonWriter::<Utf8>::new();
        w.write_f64(f64::NAN);
        assert_eq!(w.into_string(), "null");
    }
}
