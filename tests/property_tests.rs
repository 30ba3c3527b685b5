//! Property-based tests - pragmatic approach testing encoding guarantees
//!
//! These tests complement the integration tests by verifying structural
//! properties of the output across a wide range of generated inputs.

use proptest::prelude::*;
use std::time::Duration;
use urlform::{escape, Field, FormMap, Record, Value};

/// Every output byte must come from the form alphabet: unreserved
/// characters, the spared `*`/`-`/`.`/`_`, `+` for space, `%` escapes, and
/// the structural `&`/`=`.
fn is_form_alphabet(text: &str) -> bool {
    text.bytes().all(|b| {
        b.is_ascii_alphanumeric()
            || matches!(b, b'*' | b'-' | b'.' | b'_' | b'+' | b'%' | b'&' | b'=')
    })
}

fn unescape(text: &str) -> String {
    let spaced = text.replace('+', " ");
    percent_encoding::percent_decode_str(&spaced)
        .decode_utf8_lossy()
        .into_owned()
}

proptest! {
    #[test]
    fn prop_escape_output_stays_in_form_alphabet(s in ".*") {
        prop_assert!(is_form_alphabet(&escape(&s)));
    }

    #[test]
    fn prop_escape_is_reversible(s in ".*") {
        prop_assert_eq!(unescape(&escape(&s)), s);
    }

    #[test]
    fn prop_record_output_stays_in_form_alphabet(
        key in "[a-zA-Z][a-zA-Z0-9_]{0,15}",
        value in ".*",
    ) {
        let record = Record::builder().field(Field::new(&key, value)).build();
        prop_assert!(is_form_alphabet(&Value::Record(record).encode()));
    }

    #[test]
    fn prop_record_never_emits_trailing_separator(
        entries in prop::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}"), 1..8),
    ) {
        let mut builder = Record::builder();
        for (key, value) in &entries {
            builder = builder.field(Field::new(key, value.as_str()));
        }
        let encoded = Value::Record(builder.build()).encode();
        prop_assert!(!encoded.ends_with('&'));
    }

    #[test]
    fn prop_omit_empty_drops_exactly_the_empty_strings(
        entries in prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9]{0,12}", 0..8),
    ) {
        let mut builder = Record::builder();
        for (key, value) in &entries {
            builder = builder.field(Field::new(key, value.as_str()).omit_empty());
        }
        let encoded = Value::Record(builder.build()).encode();
        let segments: Vec<&str> = if encoded.is_empty() {
            Vec::new()
        } else {
            encoded.split('&').collect()
        };
        let expected: Vec<String> = entries
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        prop_assert_eq!(segments, expected);
    }

    #[test]
    fn prop_primary_key_wins_over_fallback(
        ident in "[A-Z][a-z]{1,8}",
        primary in "[a-z]{1,8}",
        fallback in "[a-z]{1,8}",
        value in "[a-z0-9]{1,8}",
    ) {
        let record = Record::builder()
            .tagged(&ident, Some(&primary), Some(&fallback), value.as_str())
            .build();
        let encoded = Value::Record(record).encode();
        prop_assert_eq!(encoded, format!("{}={}", primary, value));
    }

    #[test]
    fn prop_sequence_separator_counts(
        elems in prop::collection::vec("[a-z0-9]{1,8}", 1..10),
    ) {
        let seq = Value::Seq(elems.iter().map(|e| Value::from(e.as_str())).collect());
        let encoded = seq.encode();
        // n elements produce n "=" markers joined by n-1 "&" separators
        prop_assert_eq!(encoded.matches('=').count(), elems.len());
        prop_assert_eq!(encoded.matches('&').count(), elems.len() - 1);
    }

    #[test]
    fn prop_mapping_emits_every_entry_once(
        entries in prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{1,8}", 1..8),
    ) {
        let mut map = FormMap::new();
        for (key, value) in &entries {
            map.insert(key.clone(), Value::from(value.as_str()));
        }
        let encoded = Value::Map(map).encode();
        prop_assert!(!encoded.ends_with('&'));
        prop_assert_eq!(encoded.matches('&').count(), entries.len() - 1);
        for (key, value) in &entries {
            let pair = format!("{}={}", key, value);
            prop_assert!(encoded.contains(&pair));
        }
    }

    #[test]
    fn prop_duration_human_format_is_parseable_text(nanos in 0u64..u64::MAX / 2) {
        let encoded = Value::Duration(Duration::from_nanos(nanos)).encode();
        prop_assert!(encoded.starts_with('='));
        // human duration text never needs escaping
        prop_assert!(is_form_alphabet(&encoded));
    }

    #[test]
    fn prop_pointer_is_transparent(value in "[a-z0-9]{0,12}") {
        let direct = Value::from(value.as_str()).encode();
        let through = Value::Pointer(Some(Box::new(Value::from(value.as_str())))).encode();
        prop_assert_eq!(direct, through);
    }

    #[test]
    fn prop_encoding_is_deterministic(
        entries in prop::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}"), 0..8),
    ) {
        let mut builder = Record::builder();
        for (key, value) in &entries {
            builder = builder.field(Field::new(key, value.as_str()));
        }
        let record = Value::Record(builder.build());
        prop_assert_eq!(record.encode(), record.encode());
    }
}
