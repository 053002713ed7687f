//! Code-unit width dispatch.
//!
//! The grammar logic in [`crate::reader`] is written once, generic over a
//! [`Symbol`] implementation, and monomorphized per code-unit width. The width
//! is fixed when a reader is constructed; there is no online encoding
//! detection and no per-call branching.
//!
//! Canonical string representation
//! - Decoded strings are always Rust `String`s (UTF-8). The 8-bit scanner
//!   validates its input and passes it through unchanged; the 16-bit scanner
//!   converts UTF-16 to UTF-8, rejecting unpaired surrogates. This is the one
//!   conversion boundary in the crate.
//!
//! All JSON structural characters, whitespace, literals, and escape
//! introducers are ASCII, so they occupy exactly one code unit in both widths
//! and the generic scanner can compare them through [`Symbol::unit_to_ascii`].

use alloc::{string::String, vec::Vec};

use crate::error::ErrorKind;

mod private {
    pub trait Sealed {}
    impl Sealed for super::Utf8 {}
    impl Sealed for super::Utf16 {}
}

/// A code-unit width the reading engine can operate over.
///
/// Sealed: the two implementations, [`Utf8`] and [`Utf16`], are the only
/// encodings the engine supports.
pub trait Symbol: private::Sealed + 'static {
    /// The fixed-width atom of this encoding.
    type Unit: Copy + Eq + core::fmt::Debug + 'static;

    /// Widens an ASCII byte into one code unit.
    fn unit_from_ascii(byte: u8) -> Self::Unit;

    /// Narrows a code unit back to ASCII, or `None` if it is outside the
    /// ASCII range.
    fn unit_to_ascii(unit: Self::Unit) -> Option<u8>;

    /// Decodes a run of code units into the canonical `String`
    /// representation, appending to `dst`.
    ///
    /// # Errors
    ///
    /// `ErrorKind::InvalidSymbol` if the run is not well-formed in this
    /// encoding (invalid UTF-8, or an unpaired UTF-16 surrogate).
    fn decode_units(units: &[Self::Unit], dst: &mut String) -> Result<(), ErrorKind>;

    /// Encodes one scalar value as code units, appending to `dst`.
    fn encode_char(ch: char, dst: &mut Vec<Self::Unit>);

    /// Encodes a string as code units, appending to `dst`.
    fn encode_str(s: &str, dst: &mut Vec<Self::Unit>) {
        for ch in s.chars() {
            Self::encode_char(ch, dst);
        }
    }
}

/// 8-bit code units: the input is UTF-8 bytes.
#[derive(Debug)]
pub enum Utf8 {}

/// 16-bit code units: the input is UTF-16, host-order.
#[derive(Debug)]
pub enum Utf16 {}

impl Symbol for Utf8 {
    type Unit = u8;

    #[inline]
    fn unit_from_ascii(byte: u8) -> u8 {
        byte
    }

    #[inline]
    fn unit_to_ascii(unit: u8) -> Option<u8> {
        (unit < 0x80).then_some(unit)
    }

    fn decode_units(units: &[u8], dst: &mut String) -> Result<(), ErrorKind> {
        let mut rest = units;
        while !rest.is_empty() {
            let (ch, len) = bstr::decode_utf8(rest);
            match ch {
                Some(ch) => dst.push(ch),
                None => return Err(ErrorKind::InvalidSymbol),
            }
            rest = &rest[len..];
        }
        Ok(())
    }

    fn encode_char(ch: char, dst: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        dst.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }

    fn encode_str(s: &str, dst: &mut Vec<u8>) {
        dst.extend_from_slice(s.as_bytes());
    }
}

impl Symbol for Utf16 {
    type Unit = u16;

    #[inline]
    fn unit_from_ascii(byte: u8) -> u16 {
        u16::from(byte)
    }

    #[inline]
    fn unit_to_ascii(unit: u16) -> Option<u8> {
        (unit < 0x80).then_some(unit as u8)
    }

    fn decode_units(units: &[u16], dst: &mut String) -> Result<(), ErrorKind> {
        for ch in char::decode_utf16(units.iter().copied()) {
            match ch {
                Ok(ch) => dst.push(ch),
                Err(_) => return Err(ErrorKind::InvalidSymbol),
            }
        }
        Ok(())
    }

    fn encode_char(ch: char, dst: &mut Vec<u16>) {
        let mut buf = [0u16; 2];
        dst.extend_from_slice(ch.encode_utf16(&mut buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn utf8_passes_multibyte_through() {
        let mut s = String::new();
        Utf8::decode_units("héllo😀".as_bytes(), &mut s).unwrap();
        assert_eq!(s, "héllo😀");
    }

    #[test]
    fn utf8_rejects_invalid_sequences() {
        let mut s = String::new();
        assert_eq!(
            Utf8::decode_units(&[0xFF, 0xFE], &mut s),
            Err(ErrorKind::InvalidSymbol)
        );
    }

    #[test]
    fn utf16_converts_surrogate_pairs() {
        let units: Vec<u16> = "a😀b".encode_utf16().collect();
        let mut s = String::new();
        Utf16::decode_units(&units, &mut s).unwrap();
        assert_eq!(s, "a😀b");
    }

    #[test]
    fn utf16_rejects_unpaired_surrogate() {
        let mut s = String::new();
        assert_eq!(
            Utf16::decode_units(&[0xD800, 0x0041], &mut s),
            Err(ErrorKind::InvalidSymbol)
        );
    }

    #[test]
    fn ascii_round_trips_in_both_widths() {
        for b in 0u8..0x80 {
            assert_eq!(Utf8::unit_to_ascii(Utf8::unit_from_ascii(b)), Some(b));
            assert_eq!(Utf16::unit_to_ascii(Utf16::unit_from_ascii(b)), Some(b));
        }
        assert_eq!(Utf8::unit_to_ascii(0x80), None);
        assert_eq!(Utf16::unit_to_ascii(0x2028), None);
    }

    #[test]
    fn encode_char_utf16_wide() {
        let mut out = vec![];
        Utf16::encode_char('😀', &mut out);
        assert_eq!(out, vec![0xD83D, 0xDE00]);
    }
}
