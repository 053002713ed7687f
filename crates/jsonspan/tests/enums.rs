#![allow(missing_docs)]

//! Hand-written enum and struct mappings over the reader/writer pair: wire
//! renames, unknown-name rejection, optional members under both null
//! policies, and unknown-member skipping. Everything runs at both code-unit
//! widths.

use jsonspan::{
    ErrorKind, JsonDeserialize, JsonReader, JsonSerialize, JsonWriter, Result, Symbol,
    WriterOptions, from_text, from_utf16_units, to_string, to_string_with, to_utf16_units,
    to_utf16_units_with,
};
use rstest::rstest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Hello,
    World,
    // Serialized under a different wire name.
    Renamed,
    Universe,
}

impl Decision {
    fn wire_name(self) -> &'static str {
        match self {
            Self::Hello => "Hello",
            Self::World => "World",
            Self::Renamed => "SolarSystem",
            Self::Universe => "Universe",
        }
    }
}

impl JsonSerialize for Decision {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        writer.write_string(self.wire_name());
    }
}

impl JsonDeserialize for Decision {
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
        let name = reader.read_string()?;
        match name.as_str() {
            "Hello" => Ok(Self::Hello),
            "World" => Ok(Self::World),
            "SolarSystem" => Ok(Self::Renamed),
            "Universe" => Ok(Self::Universe),
            _ => Err(reader
                .error(ErrorKind::InvalidEnumValue)
                .with_target::<Self>()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Envelope {
    value: Option<Decision>,
    another_value: Option<i32>,
}

impl JsonSerialize for Envelope {
    fn serialize<S: Symbol>(&self, writer: &mut JsonWriter<S>) {
        let include_nulls = writer.options().include_nulls;
        writer.write_begin_object();
        let mut wrote = false;
        if self.value.is_some() || include_nulls {
            writer.write_name("Value");
            self.value.serialize(writer);
            wrote = true;
        }
        if self.another_value.is_some() || include_nulls {
            if wrote {
                writer.write_value_separator();
            }
            writer.write_name("AnotherValue");
            self.another_value.serialize(writer);
        }
        writer.write_end_object();
    }
}

impl JsonDeserialize for Envelope {
    fn deserialize<S: Symbol>(reader: &mut JsonReader<'_, S>) -> Result<Self> {
        reader.read_begin_object()?;
        let mut value = None;
        let mut another_value = None;
        let mut count = 0;
        while !reader.try_read_is_end_object_or_value_separator(&mut count)? {
            match reader.read_escaped_name()?.as_str() {
                "Value" => value = Option::<Decision>::deserialize(reader)?,
                "AnotherValue" => another_value = Option::<i32>::deserialize(reader)?,
                _ => reader.skip_next_segment()?,
            }
        }
        Ok(Self {
            value,
            another_value,
        })
    }
}

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[rstest]
#[case(Decision::Hello, r#""Hello""#)]
#[case(Decision::World, r#""World""#)]
#[case(Decision::Renamed, r#""SolarSystem""#)]
#[case(Decision::Universe, r#""Universe""#)]
fn enum_round_trips_at_both_widths(#[case] value: Decision, #[case] text: &str) {
    assert_eq!(to_string(&value), text);
    assert_eq!(from_text::<Decision>(text).unwrap(), value);

    let units = to_utf16_units(&value);
    assert_eq!(units, utf16(text));
    assert_eq!(from_utf16_units::<Decision>(&units).unwrap(), value);
}

#[test]
fn renamed_variant_never_appears_under_its_rust_name() {
    let err = from_text::<Decision>(r#""Renamed""#).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidEnumValue);
}

#[test]
fn unknown_enum_name_is_rejected_not_defaulted() {
    let doc = r#"{"Value":"Unused","AnotherValue":1}"#;

    let err = from_text::<Envelope>(doc).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidEnumValue);
    assert!(err.target().is_some_and(|t| t.ends_with("Decision")));

    let units = utf16(doc);
    let err = from_utf16_units::<Envelope>(&units).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidEnumValue);
}

#[test]
fn absent_members_are_omitted_by_default() {
    let half = Envelope {
        value: Some(Decision::Hello),
        another_value: None,
    };
    assert_eq!(to_string(&half), r#"{"Value":"Hello"}"#);
    assert_eq!(to_string(&Envelope::default()), "{}");
}

#[test]
fn include_nulls_round_trips_empty_envelope() {
    let options = WriterOptions {
        include_nulls: true,
    };
    let original = Envelope::default();

    let text = to_string_with(&original, options);
    assert_eq!(text, r#"{"Value":null,"AnotherValue":null}"#);
    assert_eq!(from_text::<Envelope>(&text).unwrap(), original);

    let units = to_utf16_units_with(&original, options);
    assert_eq!(from_utf16_units::<Envelope>(&units).unwrap(), original);
}

#[rstest]
#[case(Envelope { value: Some(Decision::Renamed), another_value: Some(-7) })]
#[case(Envelope { value: None, another_value: Some(0) })]
#[case(Envelope { value: Some(Decision::Universe), another_value: None })]
#[case(Envelope::default())]
fn envelope_round_trips_under_both_null_policies(#[case] original: Envelope) {
    for options in [
        WriterOptions::default(),
        WriterOptions {
            include_nulls: true,
        },
    ] {
        let text = to_string_with(&original, options);
        assert_eq!(from_text::<Envelope>(&text).unwrap(), original);

        let units = to_utf16_units_with(&original, options);
        assert_eq!(from_utf16_units::<Envelope>(&units).unwrap(), original);
    }
}

#[test]
fn unknown_members_are_skipped_structurally() {
    // The junk member hides structural characters inside strings; skipping
    // must not mistake them for real structure.
    let doc = r#"{"Ignored":[{"x":"}"},[1,2]],"Value":"World","Junk":"][,:","AnotherValue":3}"#;
    let parsed = from_text::<Envelope>(doc).unwrap();
    assert_eq!(parsed.value, Some(Decision::World));
    assert_eq!(parsed.another_value, Some(3));

    let units = utf16(doc);
    assert_eq!(from_utf16_units::<Envelope>(&units).unwrap(), parsed);
}
