// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs)]
#![allow(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use criterion::{criterion_group, criterion_main, Criterion};
use jtape_tape::ParserConfig;
use std::hint::black_box;

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
    }
    s.push(']');
    s.into_bytes()
}

fn bench_tape_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tape_build");
    let config = ParserConfig::default();

    let small = small_object();
    group.bench_function("small_object", |b| {
        b.iter(|| {
            black_box(jtape_tape::parse(black_box(&small), &config).unwrap());
        });
    });

    let wide = wide_array_of_numbers(4096);
    group.bench_function("wide_array_4096", |b| {
        b.iter(|| {
            black_box(jtape_tape::parse(black_box(&wide), &config).unwrap());
        });
    });

    let nested = deeply_nested(512);
    group.bench_function("deeply_nested_512", |b| {
        b.iter(|| {
            black_box(jtape_tape::parse(black_box(&nested), &config).unwrap());
        });
    });

    let strings = string_heavy(1024);
    group.bench_function("string_heavy_1024", |b| {
        b.iter(|| {
            black_box(jtape_tape::parse(black_box(&strings), &config).unwrap());
        });
    });

    let strings_aliased = string_heavy(1024);
    let alias_config = ParserConfig::new().with_copy_strings(false);
    group.bench_function("string_heavy_1024_aliased", |b| {
        b.iter(|| {
            black_box(jtape_tape::parse(black_box(&strings_aliased), &alias_config).unwrap());
        });
    });

    drop(group);
}

criterion_group!(benches, bench_tape_build);
criterion_main!(benches);
