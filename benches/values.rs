//! Value benchmarks for argbuf
//!
//! These benchmarks measure value creation, coercion and comparison for both
//! the owning and the borrowing value roles.

use argbuf::{Variant, VariantView};
use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::hint::black_box as hint_black_box;

fn bench_value_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_creation");

    group.bench_function("int", |b| {
        b.iter(|| hint_black_box(Variant::from(black_box(42i32))));
    });

    group.bench_function("text_owned", |b| {
        b.iter(|| hint_black_box(Variant::from(black_box("hello, world"))));
    });

    group.bench_function("text_view", |b| {
        b.iter(|| hint_black_box(VariantView::from(black_box("hello, world"))));
    });

    group.bench_function("wide_from_str", |b| {
        b.iter(|| hint_black_box(Variant::wide_from_str(black_box("hello, world"))));
    });

    group.bench_function("clone_to_arena", |b| {
        let arena = Bump::new();
        let view = VariantView::from("hello, world");
        b.iter(|| hint_black_box(view.clone_to_arena(&arena).kind()));
    });

    group.finish();
}

fn bench_value_coercion(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_coercion");

    group.bench_function("text_to_int", |b| {
        let value = Variant::from("12345678");
        b.iter(|| hint_black_box(black_box(&value).get_int64()));
    });

    group.bench_function("text_to_decimal", |b| {
        let value = Variant::from("-1234.5678e3");
        b.iter(|| hint_black_box(black_box(&value).get_decimal()));
    });

    group.bench_function("int_to_string", |b| {
        let value = Variant::from(12345678i64);
        b.iter(|| hint_black_box(black_box(&value).get_string()));
    });

    group.bench_function("wide_to_string", |b| {
        let value = Variant::wide_from_str("hello, world");
        b.iter(|| hint_black_box(black_box(&value).get_string()));
    });

    group.finish();
}

fn bench_value_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_comparison");

    group.bench_function("int_equal", |b| {
        let a = Variant::from(42i32);
        let other = Variant::from(42i32);
        b.iter(|| hint_black_box(black_box(&a).compare(black_box(&other))));
    });

    group.bench_function("text_owned_vs_view", |b| {
        let a = Variant::from("hello, world");
        let other = VariantView::from("hello, world");
        b.iter(|| hint_black_box(black_box(&a).compare(black_box(&other))));
    });

    group.bench_function("kind_mismatch", |b| {
        let a = Variant::from(42i32);
        let other = Variant::from(42i64);
        b.iter(|| hint_black_box(black_box(&a).compare(black_box(&other))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_value_creation,
    bench_value_coercion,
    bench_value_comparison
);
criterion_main!(benches);
