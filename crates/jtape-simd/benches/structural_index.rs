// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs)]
#![allow(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use criterion::{criterion_group, criterion_main, Criterion};
use jtape_simd::build_structural_index;
use std::hint::black_box;

fn padded(input: &[u8]) -> Vec<u8> {
    let mut v = input.to_vec();
    v.resize(input.len() + 64, 0);
    v
}

fn small_object() -> Vec<u8> {
    br#"{"id":1,"name":"alice","active":true,"score":3.5}"#.to_vec()
}

fn wide_array_of_numbers(n: usize) -> Vec<u8> {
    let mut s = String::from("[");
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&i.to_string());
    }
    s.push(']');
    s.into_bytes()
}

fn deeply_nested(depth: usize) -> Vec<u8> {
    let mut s = String::new();
    for _ in 0..depth {
        s.push('[');
    }
    s.push('0');
    for _ in 0..depth {
        s.push(']');
    }
    s.into_bytes()
}

fn string_heavy(n: usize) -> Vec<u8> {
    let mut s = String::from("[");
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push_str("\"the quick brown fox jumps over the lazy dog\"");
        let _ = i;
    }
    s.push(']');
    s.into_bytes()
}

fn bench_structural_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("structural_index");

    let small = padded(&small_object());
    group.bench_function("small_object", |b| {
        b.iter(|| {
            black_box(build_structural_index(black_box(&small), small_object().len()).unwrap());
        });
    });

    let wide_input = wide_array_of_numbers(4096);
    let wide = padded(&wide_input);
    group.bench_function("wide_array_4096", |b| {
        b.iter(|| {
            black_box(build_structural_index(black_box(&wide), wide_input.len()).unwrap());
        });
    });

    let nested_input = deeply_nested(512);
    let nested = padded(&nested_input);
    group.bench_function("deeply_nested_512", |b| {
        b.iter(|| {
            black_box(build_structural_index(black_box(&nested), nested_input.len()).unwrap());
        });
    });

    let strings_input = string_heavy(1024);
    let strings = padded(&strings_input);
    group.bench_function("string_heavy_1024", |b| {
        b.iter(|| {
            black_box(build_structural_index(black_box(&strings), strings_input.len()).unwrap());
        });
    });

    drop(group);
}

criterion_group!(benches, bench_structural_index);
criterion_main!(benches);
