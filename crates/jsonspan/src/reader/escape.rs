//! String escape decoding helpers.
//!
//! JSON strings carry two escape forms: the single-character escapes
//! (`\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t`) and four-hex-digit
//! Unicode escapes (`\uXXXX`). A `\uXXXX` escape yields one UTF-16 code
//! unit; scalar values outside the BMP appear as a high/low surrogate pair
//! of two consecutive escapes, which the scanner combines here.

/// Maps the character after a backslash to its decoded form, for the
/// single-character escapes. `u` is handled separately.
pub(crate) fn simple_escape(byte: u8) -> Option<char> {
    match byte {
        b'"' => Some('"'),
        b'\\' => Some('\\'),
        b'/' => Some('/'),
        b'b' => Some('\u{0008}'),
        b'f' => Some('\u{000C}'),
        b'n' => Some('\n'),
        b'r' => Some('\r'),
        b't' => Some('\t'),
        _ => None,
    }
}

/// Value of one ASCII hex digit.
pub(crate) fn hex_val(byte: u8) -> Option<u16> {
    match byte {
        b'0'..=b'9' => Some(u16::from(byte - b'0')),
        b'a'..=b'f' => Some(u16::from(byte - b'a') + 10),
        b'A'..=b'F' => Some(u16::from(byte - b'A') + 10),
        _ => None,
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Combines a high/low surrogate pair into the scalar value it encodes.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    debug_assert!(is_high_surrogate(high) && is_low_surrogate(low));
    let code =
        0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code)
}
