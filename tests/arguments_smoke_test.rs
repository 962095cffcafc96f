//! # Argument Buffer Smoke Test
//!
//! End-to-end scenarios over the public API:
//!
//! - Round-trip of every primitive kind through append/find/get_variant
//! - First-match lookup and insertion ordering with duplicate names
//! - Size accounting across append/set/remove sequences
//! - In-place and shifting `set`
//! - Owning versus borrowing values
//!
//! If any test fails after making changes, it indicates a regression.

use argbuf::types::{PrimitiveKind, Value};
use argbuf::{Arguments, EncodeOptions, Variant, VariantView};

fn every_kind() -> Vec<Variant> {
    vec![
        Variant::Unknown,
        Variant::from(true),
        Variant::from(-8i8),
        Variant::from(-1600i16),
        Variant::from(-320_000i32),
        Variant::from(-64_000_000_000i64),
        Variant::from(200u8),
        Variant::from(60_000u16),
        Variant::from(4_000_000_000u32),
        Variant::from(u64::MAX),
        Variant::from(1.5f32),
        Variant::from(-2.25f64),
        Variant::pointer(0xdead_beef),
        Variant::guid(*b"0123456789abcdef"),
        Variant::narrow(b"narrow"),
        Variant::from("utf-8 \u{e9}t\u{e9}"),
        Variant::wide_from_str("wide \u{1F600}"),
        Variant::utf32_from_str("utf-32"),
        Variant::binary(&[0, 1, 2, 0, 255]),
        Variant::json("{\"k\":[1,2]}"),
        Variant::xml("<a b=\"c\"/>"),
        Variant::void(),
        Variant::bit(true),
    ]
}

mod round_trip {
    use super::*;

    fn assert_round_trip(options: EncodeOptions) {
        let values = every_kind();
        let mut args = Arguments::with_options(options);
        for (i, value) in values.iter().enumerate() {
            args.append(&format!("v{}", i), value).unwrap();
        }

        for (i, value) in values.iter().enumerate() {
            let pos = args.find(&format!("v{}", i)).unwrap();
            let decoded = args.get_variant(pos).unwrap();
            assert!(
                decoded.compare(value),
                "{:?} decoded as {:?}",
                value,
                decoded
            );
            assert_eq!(decoded.kind(), PrimitiveKind::ALL[i]);
        }
    }

    #[test]
    fn every_kind_with_length_prefixed_text() {
        assert_round_trip(EncodeOptions::default());
    }

    #[test]
    fn every_kind_with_terminated_text() {
        assert_round_trip(EncodeOptions::default().length_prefixed_text(false));
    }

    #[test]
    fn every_kind_survives_external_decode() {
        let mut args = Arguments::new();
        for value in every_kind() {
            args.append_anonymous(&value).unwrap();
        }

        let adopted = Arguments::from_bytes(args.as_bytes()).unwrap();
        let decoded: Vec<Variant> = adopted.iter().map(|a| a.to_variant()).collect();
        assert_eq!(decoded.len(), every_kind().len());
        for (got, want) in decoded.iter().zip(every_kind()) {
            assert!(got.compare(&want));
        }
    }

    #[test]
    fn float_bit_patterns_survive_round_trip() {
        let values = [
            Variant::from(f64::NAN),
            Variant::from(-0.0f64),
            Variant::from(f32::NAN),
            Variant::from(-0.0f32),
            Variant::from(f64::NEG_INFINITY),
        ];
        let mut args = Arguments::new();
        let positions: Vec<_> = values
            .iter()
            .map(|v| args.append_anonymous(v).unwrap())
            .collect();

        for (pos, value) in positions.iter().zip(&values) {
            let decoded = args.get_variant(*pos).unwrap();
            assert!(decoded.compare(value), "{:?} decoded as {:?}", value, decoded);
        }

        let zero = args.append_anonymous(0.0f64).unwrap();
        let negative_zero = args.get_variant(positions[1]).unwrap();
        assert!(!args.get_variant(zero).unwrap().compare(&negative_zero));
    }
}

mod ordering {
    use super::*;

    #[test]
    fn duplicates_resolve_to_first_and_list_in_order() {
        let mut args = Arguments::new();
        args.append("x", 1).unwrap();
        args.append("x", 2).unwrap();

        let first = args.find("x").unwrap();
        assert_eq!(args.get_variant(first).unwrap().get_int(), 1);

        let all: Vec<i32> = args
            .find_all("x")
            .into_iter()
            .map(|p| args.get_variant_view(p).unwrap().get_int())
            .collect();
        assert_eq!(all, vec![1, 2]);
    }

    #[test]
    fn set_targets_the_first_duplicate() {
        let mut args = Arguments::new();
        args.append("x", 1).unwrap();
        args.append("x", 2).unwrap();
        args.set("x", "replaced").unwrap();

        assert_eq!(args.print(), "replaced, 2");
    }
}

mod size_accounting {
    use super::*;

    #[test]
    fn traversal_matches_net_inserts_and_length() {
        let mut args = Arguments::new();
        let mut expected = 0usize;

        for i in 0..50i64 {
            let name = format!("k{}", i % 7);
            match i % 5 {
                0 | 1 => {
                    args.append(&name, i).unwrap();
                    expected += 1;
                }
                2 => {
                    if !args.contains(&name) {
                        expected += 1;
                    }
                    args.set(&name, &"x".repeat(i as usize)).unwrap();
                }
                3 => {
                    if let Some(pos) = args.find(&name) {
                        args.remove(pos).unwrap();
                        expected -= 1;
                    }
                }
                _ => {
                    args.append_anonymous(Variant::wide_from_str("w").as_view())
                        .unwrap();
                    expected += 1;
                }
            }

            assert_eq!(args.size(), expected);
            let spans: usize = args.iter().map(|a| a.span()).sum();
            assert_eq!(spans, args.len());
        }
    }
}

mod set_semantics {
    use super::*;

    #[test]
    fn same_fixed_kind_keeps_length() {
        let mut args = Arguments::new();
        args.set("x", 5i32).unwrap();
        let len = args.len();
        args.set("x", 9i32).unwrap();

        assert_eq!(args.len(), len);
        assert_eq!(args.get("x").unwrap().get_int(), 9);
    }

    #[test]
    fn growing_text_shifts_tail_by_delta() {
        let mut args = Arguments::new();
        args.set("s", "ab").unwrap();
        args.append("after", 3.0f64).unwrap();
        args.append("last", "end").unwrap();

        let s = args.get_argument(args.find("s").unwrap()).unwrap();
        let old_span = s.span();
        let tail = args.as_bytes()[old_span..].to_vec();
        let len = args.len();

        args.set("s", "abcdefgh").unwrap();
        let new_span = args.get_argument(args.find("s").unwrap()).unwrap().span();

        assert_eq!(args.len() as isize - len as isize, new_span as isize - old_span as isize);
        assert_eq!(&args.as_bytes()[new_span..], &tail[..]);
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn id_and_name() {
        let mut args = Arguments::new();
        args.append("id", 42).unwrap();
        args.append("name", "bob").unwrap();

        let id = args.find("id").unwrap();
        assert_eq!(args.get_variant(id).unwrap().get_int(), 42);
        assert_eq!(args.print(), "42, bob");
        assert_eq!(args.print_json(), "42, \"bob\"");
    }

    #[test]
    fn copy_of_double_is_independent() {
        let mut v1 = Variant::from(3.14);
        let v2 = v1.clone();
        v1 = Variant::from("now text");

        assert_eq!(v2.get_decimal(), 3.14);
        assert_eq!(v1.kind(), PrimitiveKind::Utf8String);
    }

    #[test]
    fn append_then_remove_leaves_nothing() {
        let mut args = Arguments::new();
        args.append("a", 1i8).unwrap();
        args.remove(args.find("a").unwrap()).unwrap();

        assert_eq!(args.size(), 0);
    }

    #[test]
    fn view_tracks_live_source() {
        let source = Variant::from("still here");
        let view: VariantView<'_> = (&source).into();

        assert_eq!(view.get_string(), source.get_string());
        assert_eq!(view.get_bool(), source.get_bool());
        assert!(view.compare(&source));
    }

    #[test]
    fn owned_copy_outlives_buffer() {
        let owned = {
            let mut args = Arguments::new();
            args.append("blob", VariantView::binary(&[1, 2, 3])).unwrap();
            args.get_variant(args.find("blob").unwrap()).unwrap()
        };

        assert!(matches!(owned, Value::Binary(ref b) if b[..] == [1, 2, 3]));
    }

    #[test]
    fn template_rendering() {
        let args = Arguments::from_pairs([
            ("table", VariantView::from("users")),
            ("id", VariantView::from(7u32)),
        ])
        .unwrap();

        assert_eq!(
            args.print_format("SELECT * FROM {table} WHERE id = {id}"),
            "SELECT * FROM users WHERE id = 7"
        );
    }
}
