// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec Benchmark
//!
//! Measures pack and unpack throughput for a mixed-kind record, plus the
//! cost of the mapping view on top of the positional codec.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use packrec::{values, ByteOrder, Codec, FieldKind, SchemaBuilder, Value};

fn multiple(order: ByteOrder) -> Codec {
    Codec::new(
        SchemaBuilder::new("MultipleTest")
            .field("u_char", FieldKind::UInt8, 0)
            .field("char", FieldKind::Int8, 1)
            .field("short", FieldKind::Int16, 2)
            .field("u_short", FieldKind::UInt16, 3)
            .field("int", FieldKind::Int32, 4)
            .field("u_int", FieldKind::UInt32, 5)
            .field("long", FieldKind::Int64, 6)
            .field("u_long", FieldKind::UInt64, 7)
            .field("float", FieldKind::Float32, 8)
            .field("double", FieldKind::Float64, 9)
            .fixed_bytes("string", 12, 32)
            .byte_order(order)
            .build()
            .expect("compile"),
    )
}

fn sample() -> Vec<Value> {
    values![
        200u8,
        -100i8,
        -30000i16,
        60000u16,
        -2_000_000_000i32,
        4_000_000_000u32,
        i64::MIN,
        u64::MAX,
        13535.0f32,
        std::f64::consts::E,
        "Hello World"
    ]
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    let data = sample();

    for (label, order) in [("little", ByteOrder::Little), ("big", ByteOrder::Big)] {
        let codec = multiple(order);
        group.throughput(Throughput::Bytes(codec.size() as u64));
        group.bench_function(label, |b| {
            b.iter(|| codec.pack(black_box(&data)).expect("pack"));
        });
    }

    let codec = multiple(ByteOrder::Little);
    let mut buf = vec![0u8; codec.size()];
    group.bench_function("into_buffer", |b| {
        b.iter(|| codec.pack_into(black_box(&data), &mut buf).expect("pack"));
    });

    group.finish();
}

fn bench_unpack(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpack");
    let codec = multiple(ByteOrder::Little);
    let packed = codec.pack(&sample()).expect("pack");
    group.throughput(Throughput::Bytes(packed.len() as u64));

    group.bench_function("values", |b| {
        b.iter(|| codec.unpack(black_box(&packed)).expect("unpack"));
    });
    group.bench_function("mapping", |b| {
        b.iter(|| codec.unpack_mapping(black_box(&packed)).expect("unpack"));
    });

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_multiple", |b| {
        b.iter(|| multiple(black_box(ByteOrder::Little)));
    });
}

criterion_group!(benches, bench_pack, bench_unpack, bench_compile);
criterion_main!(benches);
