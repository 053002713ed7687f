#![allow(missing_docs)]

//! Writer/reader symmetry: anything the writer emits, the reader accepts and
//! reconstructs, at both code-unit widths.

use jsonspan::{
    Map, Value, WriterOptions, from_text, from_utf8_slice, from_utf16_units, to_string,
    to_string_with, to_utf8_vec, to_utf8_vec_with, to_utf16_units, to_utf16_units_with,
};
use rstest::rstest;

fn sample_tree() -> Value {
    let mut inner = Map::new();
    inner.insert("id".into(), Value::Number(17.0));
    inner.insert("label".into(), Value::String("héllo 😀 \"quoted\"".into()));
    inner.insert("flags".into(), Value::Array(vec![
        Value::Boolean(true),
        Value::Boolean(false),
        Value::Null,
    ]));

    let mut root = Map::new();
    root.insert("item".into(), Value::Object(inner));
    root.insert("empty_array".into(), Value::Array(vec![]));
    root.insert("empty_object".into(), Value::Object(Map::new()));
    root.insert("ratio".into(), Value::Number(-0.125));
    Value::Object(root)
}

#[test]
fn value_tree_round_trips_utf8() {
    let original = sample_tree();
    let bytes = to_utf8_vec(&original);
    assert_eq!(from_utf8_slice::<Value>(&bytes).unwrap(), original);
}

#[test]
fn value_tree_round_trips_utf16() {
    let original = sample_tree();
    let units = to_utf16_units(&original);
    assert_eq!(from_utf16_units::<Value>(&units).unwrap(), original);
}

#[test]
fn both_widths_agree_on_text() {
    let original = sample_tree();
    let text = to_string(&original);
    let units = to_utf16_units(&original);
    let expected: Vec<u16> = text.encode_utf16().collect();
    assert_eq!(units, expected);
}

#[rstest]
#[case("control and escape \u{0001}\t\n\\ \"")]
#[case("plain ascii")]
#[case("")]
#[case("wide 😀 and accented é")]
fn strings_survive_the_trip(#[case] s: &str) {
    let text = to_string(&s);
    assert_eq!(from_text::<String>(&text).unwrap(), s);

    let units = to_utf16_units(&s);
    assert_eq!(from_utf16_units::<String>(&units).unwrap(), s);
}

#[rstest]
#[case(0.0)]
#[case(-0.125)]
#[case(1e300)]
#[case(-2.5e-7)]
#[case(9_007_199_254_740_991.0)]
fn f64_survives_the_trip(#[case] n: f64) {
    let text = to_string(&n);
    assert_eq!(from_text::<f64>(&text).unwrap(), n);
}

#[test]
fn integer_collections_survive_the_trip() {
    let original = vec![i64::MIN, -1, 0, 1, i64::MAX];
    let text = to_string(&original);
    assert_eq!(from_text::<Vec<i64>>(&text).unwrap(), original);

    let units = to_utf16_units(&original);
    assert_eq!(from_utf16_units::<Vec<i64>>(&units).unwrap(), original);
}

#[test]
fn option_nesting_survives_the_trip() {
    // Note the lossy corner: Some(None) flattens to null and comes back as
    // None; only the outer layers that carry data survive.
    let some: Option<Vec<Option<bool>>> = Some(vec![Some(true), None, Some(false)]);
    let text = to_string(&some);
    assert_eq!(text, "[true,null,false]");
    assert_eq!(
        from_text::<Option<Vec<Option<bool>>>>(&text).unwrap(),
        some
    );

    assert_eq!(from_text::<Option<bool>>("null").unwrap(), None);
}

#[test]
fn options_carrying_entry_points_agree_with_the_plain_forms() {
    // `Value` serialization ignores the null policy, so the `_with` forms
    // must produce exactly what the options-less forms do.
    let original = sample_tree();
    let options = WriterOptions {
        include_nulls: true,
    };
    assert_eq!(to_string_with(&original, options), to_string(&original));
    assert_eq!(to_utf8_vec_with(&original, options), to_utf8_vec(&original));
    assert_eq!(
        to_utf16_units_with(&original, options),
        to_utf16_units(&original)
    );
}

#[test]
fn map_ordering_is_stable() {
    let mut m = std::collections::BTreeMap::new();
    m.insert("b".to_string(), 2u32);
    m.insert("a".to_string(), 1u32);
    let text = to_string(&m);
    assert_eq!(text, r#"{"a":1,"b":2}"#);
    assert_eq!(from_text::<std::collections::BTreeMap<String, u32>>(&text).unwrap(), m);
}
