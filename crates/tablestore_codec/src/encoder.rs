//! Canonical CBOR encoding of attribute values.
//!
//! Canonical bytes give every value exactly one binary form. Backends use
//! them as storage keys for items, for duplicate detection of keys and for
//! item size accounting.

use crate::value::Value;
use std::collections::BTreeMap;

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;

const FALSE: u8 = 0xf4;
const TRUE: u8 = 0xf5;
const NULL: u8 = 0xf6;

/// Encode a value to canonical CBOR bytes.
///
/// Integers use the shortest form and map keys are ordered length-first,
/// then bytewise (RFC 8949 §4.2.1). Every [`Value`] is encodable, so this
/// cannot fail.
pub fn to_canonical_cbor(value: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    write_value(&mut out, value);
    out
}

/// Number of bytes [`to_canonical_cbor`] would produce for `value`.
pub fn encoded_len(value: &Value) -> usize {
    match value {
        Value::Null | Value::Bool(_) => 1,
        Value::Integer(n) => header_len(integer_argument(*n).1),
        Value::Bytes(b) => header_len(b.len() as u64) + b.len(),
        Value::Text(s) => header_len(s.len() as u64) + s.len(),
        Value::List(items) => {
            header_len(items.len() as u64) + items.iter().map(encoded_len).sum::<usize>()
        }
        Value::Map(entries) => {
            header_len(entries.len() as u64)
                + entries
                    .iter()
                    .map(|(k, v)| header_len(k.len() as u64) + k.len() + encoded_len(v))
                    .sum::<usize>()
        }
    }
}

fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => out.push(NULL),
        Value::Bool(b) => out.push(if *b { TRUE } else { FALSE }),
        Value::Integer(n) => {
            let (major, arg) = integer_argument(*n);
            write_header(out, major, arg);
        }
        Value::Bytes(b) => {
            write_header(out, MAJOR_BYTES, b.len() as u64);
            out.extend_from_slice(b);
        }
        Value::Text(s) => write_text(out, s),
        Value::List(items) => {
            write_header(out, MAJOR_ARRAY, items.len() as u64);
            for item in items {
                write_value(out, item);
            }
        }
        Value::Map(entries) => write_map(out, entries),
    }
}

fn write_text(out: &mut Vec<u8>, s: &str) {
    write_header(out, MAJOR_TEXT, s.len() as u64);
    out.extend_from_slice(s.as_bytes());
}

fn write_map(out: &mut Vec<u8>, entries: &BTreeMap<String, Value>) {
    // Text keys share a major type, so canonical order reduces to
    // length-first then bytewise on the raw key.
    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.as_bytes().cmp(b.as_bytes())));

    write_header(out, MAJOR_MAP, entries.len() as u64);
    for key in keys {
        write_text(out, key);
        write_value(out, &entries[key]);
    }
}

/// CBOR negative integers carry `-1 - n` as their argument.
#[allow(clippy::cast_sign_loss)]
fn integer_argument(n: i64) -> (u8, u64) {
    if n >= 0 {
        (MAJOR_UNSIGNED, n as u64)
    } else {
        (MAJOR_NEGATIVE, (-(n + 1)) as u64)
    }
}

fn header_len(arg: u64) -> usize {
    if arg < 24 {
        1
    } else if arg <= u64::from(u8::MAX) {
        2
    } else if arg <= u64::from(u16::MAX) {
        3
    } else if arg <= u64::from(u32::MAX) {
        5
    } else {
        9
    }
}

#[allow(clippy::cast_possible_truncation)]
fn write_header(out: &mut Vec<u8>, major: u8, arg: u64) {
    let mt = major << 5;
    match header_len(arg) {
        1 => out.push(mt | arg as u8),
        2 => {
            out.push(mt | 24);
            out.push(arg as u8);
        }
        3 => {
            out.push(mt | 25);
            out.extend_from_slice(&(arg as u16).to_be_bytes());
        }
        5 => {
            out.push(mt | 26);
            out.extend_from_slice(&(arg as u32).to_be_bytes());
        }
        _ => {
            out.push(mt | 27);
            out.extend_from_slice(&arg.to_be_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map(pairs: &[(&str, Value)]) -> Value {
        Value::Map(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn encode_scalars() {
        assert_eq!(to_canonical_cbor(&Value::Null), vec![0xf6]);
        assert_eq!(to_canonical_cbor(&Value::Bool(false)), vec![0xf4]);
        assert_eq!(to_canonical_cbor(&Value::Bool(true)), vec![0xf5]);
        assert_eq!(to_canonical_cbor(&Value::from("a")), vec![0x61, b'a']);
        assert_eq!(
            to_canonical_cbor(&Value::from(vec![1u8, 2, 3])),
            vec![0x43, 1, 2, 3]
        );
    }

    #[test]
    fn integers_use_shortest_form() {
        assert_eq!(to_canonical_cbor(&Value::Integer(23)), vec![0x17]);
        assert_eq!(to_canonical_cbor(&Value::Integer(24)), vec![0x18, 24]);
        assert_eq!(
            to_canonical_cbor(&Value::Integer(256)),
            vec![0x19, 0x01, 0x00]
        );
        assert_eq!(
            to_canonical_cbor(&Value::Integer(65536)),
            vec![0x1a, 0x00, 0x01, 0x00, 0x00]
        );
        assert_eq!(to_canonical_cbor(&Value::Integer(-1)), vec![0x20]);
        assert_eq!(to_canonical_cbor(&Value::Integer(-25)), vec![0x38, 24]);
    }

    #[test]
    fn map_keys_sort_length_first() {
        let value = map(&[("bb", Value::Integer(2)), ("a", Value::Integer(1))]);
        assert_eq!(
            to_canonical_cbor(&value),
            vec![0xa2, 0x61, b'a', 0x01, 0x62, b'b', b'b', 0x02]
        );

        // BTreeMap order would put "Zz" before "a"; canonical order must not.
        let value = map(&[("Zz", Value::Null), ("a", Value::Null)]);
        assert_eq!(
            to_canonical_cbor(&value),
            vec![0xa2, 0x61, b'a', 0xf6, 0x62, b'Z', b'z', 0xf6]
        );
    }

    #[test]
    fn nested_list() {
        let value = Value::List(vec![Value::Integer(1), Value::List(vec![])]);
        assert_eq!(to_canonical_cbor(&value), vec![0x82, 0x01, 0x80]);
    }

    proptest! {
        #[test]
        fn encoded_len_matches_output(
            n in any::<i64>(),
            s in ".{0,300}",
            b in prop::collection::vec(any::<u8>(), 0..300),
        ) {
            let value = map(&[
                ("n", Value::Integer(n)),
                ("s", Value::Text(s)),
                ("b", Value::Bytes(b)),
            ]);
            prop_assert_eq!(encoded_len(&value), to_canonical_cbor(&value).len());
        }
    }
}
