//! Argument buffer benchmarks for argbuf
//!
//! These benchmarks measure append, lookup and in-place update costs, the
//! operations every consumer of an argument buffer performs.

use argbuf::{Arguments, EncodeOptions, VariantView};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box as hint_black_box;

fn filled(count: usize) -> Arguments {
    let mut args = Arguments::new();
    for i in 0..count {
        args.append(&format!("field{}", i), i as i64).unwrap();
    }
    args
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    group.bench_function("int32", |b| {
        b.iter(|| {
            let mut args = Arguments::new();
            for i in 0..32 {
                args.append("n", black_box(i)).unwrap();
            }
            hint_black_box(args)
        });
    });

    group.bench_function("text_prefixed", |b| {
        b.iter(|| {
            let mut args = Arguments::new();
            for _ in 0..32 {
                args.append("s", black_box("hello, world")).unwrap();
            }
            hint_black_box(args)
        });
    });

    group.bench_function("text_terminated", |b| {
        let options = EncodeOptions::default().length_prefixed_text(false);
        b.iter(|| {
            let mut args = Arguments::with_options(options);
            for _ in 0..32 {
                args.append("s", black_box("hello, world")).unwrap();
            }
            hint_black_box(args)
        });
    });

    group.bench_function("preallocated", |b| {
        b.iter(|| {
            let mut args = Arguments::with_capacity(1024);
            for i in 0..32 {
                args.append("n", black_box(i)).unwrap();
            }
            hint_black_box(args)
        });
    });

    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for count in [8, 64, 512] {
        let args = filled(count);
        let last = format!("field{}", count - 1);

        group.bench_with_input(BenchmarkId::new("first", count), &args, |b, args| {
            b.iter(|| hint_black_box(args.find(black_box("field0"))));
        });

        group.bench_with_input(BenchmarkId::new("last", count), &args, |b, args| {
            b.iter(|| hint_black_box(args.find(black_box(&last))));
        });

        group.bench_with_input(BenchmarkId::new("missing", count), &args, |b, args| {
            b.iter(|| hint_black_box(args.find(black_box("absent"))));
        });
    }

    group.finish();
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");

    group.bench_function("fixed_in_place", |b| {
        let mut args = filled(64);
        b.iter(|| args.set("field32", black_box(7i64)).unwrap());
    });

    group.bench_function("text_resize", |b| {
        let mut args = filled(64);
        args.set("field0", "short").unwrap();
        let mut long = false;
        b.iter(|| {
            long = !long;
            let text = if long { "a considerably longer value" } else { "short" };
            args.set("field0", black_box(text)).unwrap()
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let mut args = filled(16);
    args.append("blob", VariantView::binary(&[7u8; 256])).unwrap();
    let pos = args.find("blob").unwrap();

    group.bench_function("view", |b| {
        b.iter(|| hint_black_box(args.get_variant_view(black_box(pos)).unwrap()));
    });

    group.bench_function("owned", |b| {
        b.iter(|| hint_black_box(args.get_variant(black_box(pos)).unwrap()));
    });

    group.bench_function("iterate", |b| {
        b.iter(|| hint_black_box(args.iter().map(|a| a.value().get_int64()).sum::<i64>()));
    });

    group.bench_function("print", |b| {
        b.iter(|| hint_black_box(args.print()));
    });

    group.bench_function("from_bytes", |b| {
        let bytes = args.as_bytes().to_vec();
        b.iter(|| hint_black_box(Arguments::from_bytes(black_box(&bytes)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_append, bench_find, bench_set, bench_decode);
criterion_main!(benches);
