//! Fuzz testing for the argument buffer engine.
//!
//! Applies arbitrary sequences of append/set/remove operations and checks
//! that the buffer stays well formed after every step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use argbuf::{Arguments, EncodeOptions, Variant, VariantView};

#[derive(Debug, Arbitrary)]
struct OpsInput {
    terminated_text: bool,
    operations: Vec<Operation>,
}

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Bool(bool),
    Int8(i8),
    Int32(i32),
    UInt64(u64),
    Double(f64),
    Guid([u8; 16]),
    Text(String),
    Wide(String),
    Utf32(String),
    Binary(Vec<u8>),
    Void,
}

#[derive(Debug, Arbitrary)]
enum Operation {
    Append(u8, FuzzValue),
    AppendAnonymous(FuzzValue),
    Set(u8, FuzzValue),
    Remove(u8),
    Clear,
}

impl FuzzValue {
    fn to_variant(&self) -> Variant {
        match self {
            FuzzValue::Bool(v) => Variant::from(*v),
            FuzzValue::Int8(v) => Variant::from(*v),
            FuzzValue::Int32(v) => Variant::from(*v),
            FuzzValue::UInt64(v) => Variant::from(*v),
            FuzzValue::Double(v) => Variant::from(*v),
            FuzzValue::Guid(g) => Variant::guid(*g),
            FuzzValue::Text(s) => Variant::from(s.as_str()),
            FuzzValue::Wide(s) => Variant::wide_from_str(s),
            FuzzValue::Utf32(s) => Variant::utf32_from_str(s),
            FuzzValue::Binary(b) => Variant::binary(b),
            FuzzValue::Void => Variant::void(),
        }
    }
}

fn name(id: u8) -> String {
    format!("n{}", id % 8)
}

fuzz_target!(|input: OpsInput| {
    let options = EncodeOptions::default().length_prefixed_text(!input.terminated_text);
    let mut args = Arguments::with_options(options);
    let mut expected = 0usize;

    for op in input.operations.iter().take(256) {
        match op {
            Operation::Append(id, value) => {
                let value = value.to_variant();
                args.append(&name(*id), VariantView::from(&value)).unwrap();
                expected += 1;
            }
            Operation::AppendAnonymous(value) => {
                let value = value.to_variant();
                args.append_anonymous(&value).unwrap();
                expected += 1;
            }
            Operation::Set(id, value) => {
                let value = value.to_variant();
                let name = name(*id);
                if !args.contains(&name) {
                    expected += 1;
                }
                let pos = args.set(&name, &value).unwrap();
                let stored = args.get_variant(pos).unwrap();
                assert_eq!(stored.kind(), value.kind());
                assert_eq!(stored.get_string(), value.get_string());
            }
            Operation::Remove(id) => {
                if let Some(pos) = args.find(&name(*id)) {
                    args.remove(pos).unwrap();
                    expected -= 1;
                }
            }
            Operation::Clear => {
                args.clear();
                expected = 0;
            }
        }

        assert_eq!(args.size(), expected);
        let spans: usize = args.iter().map(|a| a.span()).sum();
        assert_eq!(spans, args.len());
    }

    let reparsed = Arguments::from_bytes(args.as_bytes()).unwrap();
    assert_eq!(reparsed, args);
});
