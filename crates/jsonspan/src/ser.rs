//! Serialization onto [`JsonWriter`].
//!
//! A deliberately small mapping layer: enough trait machinery to drive the
//! writer for scalars, options, sequences, and maps, and to give user types a
//! seam for custom member handling (enum renames, null-field policy). The
//! heavy schema-driven resolution the full serializer stack performs lives
//! outside this crate.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::{
    symbol::{Symbol, Utf16, Utf8},
    value::Value,
    writer::{JsonWriter, WriterOptions},
};

/// A value that can write itself as JSON, at either code-unit width.
pub trait JsonSerialize {
    /// Appends this value's JSON representation to `writer`.
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>);
}

impl JsonSerialize for bool {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        writer.write_boolean(*self);
    }
}

impl JsonSerialize for String {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        writer.write_string(self);
    }
}

impl JsonSerialize for &str {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        writer.write_string(self);
    }
}

impl JsonSerialize for f64 {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        writer.write_f64(*self);
    }
}

impl JsonSerialize for f32 {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        writer.write_f64(f64::from(*self));
    }
}

macro_rules! signed_impls {
    ($($t:ty)*) => {$(
        impl JsonSerialize for $t {
            fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
                writer.write_i64(i64::from(*self));
            }
        }
    )*};
}

macro_rules! unsigned_impls {
    ($($t:ty)*) => {$(
        impl JsonSerialize for $t {
            fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
                writer.write_u64(u64::from(*self));
            }
        }
    )*};
}

signed_impls!(i8 i16 i32 i64);
unsigned_impls!(u8 u16 u32 u64);

impl<T: JsonSerialize> JsonSerialize for Option<T> {
    /// `None` serializes as the literal `null`. Whether an absent field is
    /// written at all is the enclosing struct's decision, driven by
    /// [`WriterOptions::include_nulls`].
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        match self {
            Some(v) => v.serialize(writer),
            None => writer.write_null(),
        }
    }
}

impl<T: JsonSerialize> JsonSerialize for Vec<T> {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        self.as_slice().serialize(writer);
    }
}

impl<T: JsonSerialize> JsonSerialize for [T] {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        writer.write_begin_array();
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                writer.write_value_separator();
            }
            item.serialize(writer);
        }
        writer.write_end_array();
    }
}

impl<T: JsonSerialize> JsonSerialize for BTreeMap<String, T> {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        writer.write_begin_object();
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                writer.write_value_separator();
            }
            writer.write_name(name);
            value.serialize(writer);
        }
        writer.write_end_object();
    }
}

impl JsonSerialize for Value {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        match self {
            Value::Null => writer.write_null(),
            Value::Boolean(b) => writer.write_boolean(*b),
            Value::Number(n) => writer.write_f64(*n),
            Value::String(s) => writer.write_string(s),
            Value::Array(items) => items.serialize(writer),
            Value::Object(members) => members.serialize(writer),
        }
    }
}

fn write_with<S: Symbol, T: JsonSerialize + ?Sized>(
    value: &T,
    options: WriterOptions,
) -> JsonWriter<S> {
    let mut writer = JsonWriter::with_options(options);
    value.serialize(&mut writer);
    writer
}

/// Serializes `value` to a UTF-8 JSON string.
pub fn to_string<T: JsonSerialize + ?Sized>(value: &T) -> String {
    to_string_with(value, WriterOptions::default())
}

/// [`to_string`] with explicit writer options.
pub fn to_string_with<T: JsonSerialize + ?Sized>(value: &T, options: WriterOptions) -> String {
    write_with::<Utf8, T>(value, options).into_string()
}

/// Serializes `value` to UTF-8 JSON bytes.
pub fn to_utf8_vec<T: JsonSerialize + ?Sized>(value: &T) -> Vec<u8> {
    to_utf8_vec_with(value, WriterOptions::default())
}

/// [`to_utf8_vec`] with explicit writer options.
pub fn to_utf8_vec_with<T: JsonSerialize + ?Sized>(value: &T, options: WriterOptions) -> Vec<u8> {
    write_with::<Utf8, T>(value, options).into_inner()
}

/// Serializes `value` to UTF-16 JSON code units.
pub fn to_utf16_units<T: JsonSerialize + ?Sized>(value: &T) -> Vec<u16> {
    to_utf16_units_with(value, WriterOptions::default())
}

/// [`to_utf16_units`] with explicit writer options.
pub fn to_utf16_units_with<T: JsonSerialize + ?Sized>(
    value: &T,
    options: WriterOptions,
) -> Vec<u16> {
    write_with::<Utf16, T>(value, options).into_inner()
}
