//! Deserialization driven by [`JsonReader`].
//!
//! The counterpart of [`crate::ser`]: trait impls that pull typed values out
//! of the reader, and the top-level entry points that construct a reader,
//! materialize one value, and verify nothing but whitespace trails it.
//!
//! User types implementing [`JsonDeserialize`] are the "object-mapping layer"
//! of the reading engine: they are expected to call
//! [`skip_next_segment`](JsonReader::skip_next_segment) for member names they
//! do not recognize, and to reject unmapped enum names with
//! [`ErrorKind::InvalidEnumValue`] rather than defaulting.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::{
    error::{ErrorKind, Result},
    reader::JsonReader,
    source::UnitSource,
    symbol::{Symbol, Utf16, Utf8},
    value::Value,
};

/// A value that can read itself from JSON, at either code-unit width.
pub trait JsonDeserialize: Sized {
    /// Materializes one value from `reader`, leaving the cursor after it.
    ///
    /// # Errors
    ///
    /// Any [`JsonError`](crate::JsonError) raised by the reader, or a
    /// mapping-layer classification error such as
    /// [`ErrorKind::InvalidEnumValue`].
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self>;
}

impl JsonDeserialize for bool {
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
        reader.read_boolean()
    }
}

impl JsonDeserialize for String {
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
        reader.read_string()
    }
}

macro_rules! number_impls {
    ($($t:ty)*) => {$(
        impl JsonDeserialize for $t {
            fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
                let text = reader.read_number_str()?;
                text.parse::<$t>()
                    .map_err(|_| reader.error(ErrorKind::InvalidSymbol).with_target::<$t>())
            }
        }
    )*};
}

// Integer impls reject fractions and out-of-range magnitudes at parse time;
// the grammar scan has already bounded the span.
number_impls!(i8 i16 i32 i64 u8 u16 u32 u64 f32 f64);

impl<T: JsonDeserialize> JsonDeserialize for Option<T> {
    /// Null short-circuit: a `null` yields `None` without the caller ever
    /// naming the payload type; anything else is read as `T`.
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
        if reader.read_is_null()? {
            Ok(None)
        } else {
            T::deserialize(reader).map(Some)
        }
    }
}

impl<T: JsonDeserialize> JsonDeserialize for Vec<T> {
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
        reader.read_begin_array()?;
        let mut items = Vec::new();
        let mut count = 0;
        while !reader.try_read_is_end_array_or_value_separator(&mut count)? {
            items.push(T::deserialize(reader)?);
        }
        Ok(items)
    }
}

impl<T: JsonDeserialize> JsonDeserialize for BTreeMap<String, T> {
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
        reader.read_begin_object()?;
        let mut members = BTreeMap::new();
        let mut count = 0;
        while !reader.try_read_is_end_object_or_value_separator(&mut count)? {
            let name = reader.read_escaped_name()?;
            members.insert(name, T::deserialize(reader)?);
        }
        Ok(members)
    }
}

impl JsonDeserialize for Value {
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
        reader.read_dynamic()
    }
}

fn read_one<S: Symbol, T: JsonDeserialize>(reader: &mut JsonReader<'_, S>) -> Result<T> {
    let value = T::deserialize(reader)?;
    reader.read_end_of_input()?;
    Ok(value)
}

/// Deserializes one complete value from UTF-8 bytes.
///
/// # Errors
///
/// Any parse failure, including [`ErrorKind::EndOfDataExpected`] for
/// trailing input.
pub fn from_utf8_slice<T: JsonDeserialize>(input: &[u8]) -> Result<T> {
    read_one(&mut JsonReader::<Utf8>::from_slice(input))
}

/// Deserializes one complete value from a string slice.
///
/// # Errors
///
/// As [`from_utf8_slice`].
pub fn from_text<T: JsonDeserialize>(input: &str) -> Result<T> {
    from_utf8_slice(input.as_bytes())
}

/// Deserializes one complete value from UTF-16 code units.
///
/// # Errors
///
/// As [`from_utf8_slice`].
pub fn from_utf16_units<T: JsonDeserialize>(input: &[u16]) -> Result<T> {
    read_one(&mut JsonReader::<Utf16>::from_slice(input))
}

/// Deserializes one complete value from a streaming byte source.
///
/// # Errors
///
/// As [`from_utf8_slice`], plus [`ErrorKind::Source`] on refill failure.
pub fn from_utf8_source<T: JsonDeserialize>(source: impl UnitSource<u8>) -> Result<T> {
    read_one(&mut JsonReader::<Utf8>::from_source(source))
}

/// Deserializes one complete value from a streaming 16-bit unit source.
///
/// # Errors
///
/// As [`from_utf8_source`].
pub fn from_utf16_source<T: JsonDeserialize>(source: impl UnitSource<u16>) -> Result<T> {
    read_one(&mut JsonReader::<Utf16>::from_source(source))
}

/// Deserializes one complete value from a blocking byte stream.
///
/// # Errors
///
/// As [`from_utf8_source`].
#[cfg(feature = "std")]
pub fn from_reader<T: JsonDeserialize>(reader: impl std::io::Read) -> Result<T> {
    from_utf8_source(crate::source::IoSource::new(reader))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(from_text::<bool>("true").unwrap(), true);
        assert_eq!(from_text::<i64>(" -42 ").unwrap(), -42);
        assert_eq!(from_text::<f64>("2.5e1").unwrap(), 25.0);
        assert_eq!(from_text::<String>(r#""a\nb""#).unwrap(), "a\nb");
    }

    #[test]
    fn integer_rejects_fraction_with_target() {
        let err = from_text::<i32>("1.5").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidSymbol);
        assert_eq!(err.target(), Some("i32"));
    }

    #[test]
    fn option_null_short_circuit() {
        assert_eq!(from_text::<Option<i32>>("null").unwrap(), None);
        assert_eq!(from_text::<Option<i32>>("3").unwrap(), Some(3));
    }

    #[test]
    fn nested_collections() {
        let v: Vec<Vec<u8>> = from_text("[[1],[2,3],[]]").unwrap();
        assert_eq!(v, vec![vec![1], vec![2, 3], vec![]]);
        let m: BTreeMap<String, bool> = from_text(r#"{"a":true,"b":false}"#).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m["a"], true);
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let err = from_text::<bool>("true x").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EndOfDataExpected);
        assert_eq!(err.position(), 5);
    }
}
