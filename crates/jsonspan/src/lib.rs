//! A dual-encoding, zero-copy JSON reading engine.
//!
//! `jsonspan` converts a raw input — a contiguous in-memory buffer, a
//! streaming byte source, or a streaming text source — into a sequence of
//! JSON structural and scalar tokens with minimal or zero copying. Two
//! code-unit widths are supported through one call surface: 8-bit units
//! (UTF-8 bytes) and 16-bit units (UTF-16), selected once at reader
//! construction and monomorphized at compile time.
//!
//! # Reading
//!
//! ```
//! use jsonspan::Utf8Reader;
//!
//! let mut reader = Utf8Reader::from_text(r#"{"name":"ok","ignored":[1,{"x":"}"}],"n":3}"#);
//! reader.read_begin_object()?;
//! let mut count = 0;
//! let mut n = None;
//! while !reader.try_read_is_end_object_or_value_separator(&mut count)? {
//!     match reader.read_escaped_name()?.as_str() {
//!         "n" => {
//!             let span = reader.read_number_span()?;
//!             n = Some(span.into_owned());
//!         }
//!         // Unrecognized members are discarded without materializing them,
//!         // escape-aware: the "}" inside the string above is data, not
//!         // structure.
//!         _ => reader.skip_next_segment()?,
//!     }
//! }
//! reader.read_end_of_input()?;
//! assert_eq!(n.as_deref(), Some(&b"3"[..]));
//! # Ok::<(), jsonspan::JsonError>(())
//! ```
//!
//! # Mapping
//!
//! The [`ser`] and [`de`] modules carry a small trait layer over the reader
//! and writer for scalars, options, sequences, and maps; `examples` of
//! hand-written struct and enum impls live in the crate tests.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod reader;
mod source;
mod symbol;
mod token;
mod value;
mod writer;

pub mod de;
pub mod ser;

pub use de::{JsonDeserialize, from_text, from_utf8_slice, from_utf16_units};
pub use error::{ErrorKind, JsonError, Result};
pub use reader::{JsonReader, NESTING_LIMIT, Utf8Reader, Utf16Reader};
pub use ser::{
    JsonSerialize, to_string, to_string_with, to_utf8_vec, to_utf8_vec_with, to_utf16_units,
    to_utf16_units_with,
};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::{SourceError, TextSource, UnitSource};
pub use symbol::{Symbol, Utf8, Utf16};
pub use token::JsonToken;
pub use value::{Array, Map, Value};
pub use writer::{JsonWriter, WriterOptions};
