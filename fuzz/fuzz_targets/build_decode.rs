#![no_main]

use std::collections::HashMap;
use std::io::Write;

use arbitrary::Arbitrary;
use flate2::write::GzEncoder;
use flate2::Compression;
use libfuzzer_sys::fuzz_target;
use nbt_types::Node;

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Text(String),
    Ints(Vec<i32>),
    Strings(Vec<String>),
    Nested(Vec<(String, i32)>),
}

fn name(out: &mut Vec<u8>, s: &str) {
    // Over-long strings are written empty.
    let len = u16::try_from(s.len()).unwrap_or(0);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&s.as_bytes()[..usize::from(len)]);
}

fn encode(value: &FuzzValue, out: &mut Vec<u8>) -> u8 {
    match value {
        FuzzValue::Byte(v) => {
            out.extend_from_slice(&v.to_be_bytes());
            0x01
        }
        FuzzValue::Short(v) => {
            out.extend_from_slice(&v.to_be_bytes());
            0x02
        }
        FuzzValue::Int(v) => {
            out.extend_from_slice(&v.to_be_bytes());
            0x03
        }
        FuzzValue::Long(v) => {
            out.extend_from_slice(&v.to_be_bytes());
            0x04
        }
        FuzzValue::Text(s) => {
            name(out, s);
            0x08
        }
        FuzzValue::Ints(values) => {
            out.extend_from_slice(&(values.len() as i32).to_be_bytes());
            for v in values {
                out.extend_from_slice(&v.to_be_bytes());
            }
            0x0B
        }
        FuzzValue::Strings(values) => {
            out.push(0x08);
            out.extend_from_slice(&(values.len() as i32).to_be_bytes());
            for s in values {
                name(out, s);
            }
            0x09
        }
        FuzzValue::Nested(entries) => {
            for (key, v) in entries {
                out.push(0x03);
                name(out, key);
                out.extend_from_slice(&v.to_be_bytes());
            }
            out.push(0x00);
            0x0A
        }
    }
}

// Fuzz target: well-formed documents always decode.
//
// Builds a root compound from arbitrary entries, then checks that the raw
// and gzip paths agree and that every key written is present.
fuzz_target!(|entries: Vec<(String, FuzzValue)>| {
    let mut doc = vec![0x0A, 0x00, 0x00];
    let entries: Vec<_> = entries
        .into_iter()
        .filter(|(key, _)| key.len() <= usize::from(u16::MAX))
        .collect();
    for (key, value) in &entries {
        let mut payload = Vec::new();
        let kind = encode(value, &mut payload);
        doc.push(kind);
        name(&mut doc, key);
        doc.extend(payload);
    }
    doc.push(0x00);

    let tree = nbt_decoder::decode_slice(&doc).expect("well-formed document");
    let mut last = HashMap::new();
    for (key, value) in &entries {
        last.insert(key.as_str(), value);
    }
    assert_eq!(tree.root.len(), last.len());
    for (key, value) in last {
        let node = tree.root.get(key).expect("key present");
        if let (FuzzValue::Ints(values), Node::IntArray(decoded)) = (value, node) {
            assert_eq!(values, decoded);
        }
    }

    let mut enc = GzEncoder::new(Vec::new(), Compression::fast());
    enc.write_all(&doc).unwrap();
    let compressed = enc.finish().unwrap();
    let gz_tree = nbt_decoder::read_from_stream(compressed.as_slice()).expect("gzip decode");
    assert_eq!(tree, gz_tree);
});
