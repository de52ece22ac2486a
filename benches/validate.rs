//! Benchmarks for typelib validation.
//!
//! Measures the validator on synthetic typelibs of growing size:
//! - Header-only namespaces
//! - Namespaces with many functions and signatures
//! - Early rejection of a corrupted header
//! - Parallel validation of many buffers

extern crate girscope;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use girscope::{validate, validate_all, BlobType, TypeDescriptor, TypeTag, ValidationConfig};
use std::hint::black_box;

#[rustfmt::skip]
const BLOB_SIZES: [u16; 18] = [
    12, 16, 12, 12, 16, 12, 12, 12, 12,
    12, 20, 16,  8, 20, 20, 32, 28, 28,
];

fn push_u16(data: &mut Vec<u8>, value: u16) {
    data.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(data: &mut Vec<u8>, value: u32) {
    data.extend_from_slice(&value.to_le_bytes());
}

/// Synthesize a typelib with `n_functions` functions taking three `int32` arguments each.
fn synthesize(n_functions: usize) -> Vec<u8> {
    let int32 = TypeDescriptor::simple(TypeTag::Int32, false);
    let mut heap = Vec::new();
    let position = |heap: &Vec<u8>| (100 + heap.len()) as u32;

    let namespace = position(&heap);
    heap.extend_from_slice(b"Bench\0");
    let arg_name = position(&heap);
    heap.extend_from_slice(b"value\0");

    let mut entries = Vec::with_capacity(n_functions);
    for index in 0..n_functions {
        let name = position(&heap);
        heap.extend_from_slice(format!("func_{index}\0").as_bytes());
        let symbol = position(&heap);
        heap.extend_from_slice(format!("bench_func_{index}\0").as_bytes());
        heap.resize((heap.len() + 3) & !3, 0);

        let signature = position(&heap);
        push_u32(&mut heap, 0);
        push_u16(&mut heap, 0);
        push_u16(&mut heap, 3);
        for _ in 0..3 {
            push_u32(&mut heap, arg_name);
            push_u32(&mut heap, 0);
            push_u32(&mut heap, int32);
        }

        let function = position(&heap);
        push_u16(&mut heap, BlobType::Function as u16);
        push_u16(&mut heap, 0);
        push_u32(&mut heap, name);
        push_u32(&mut heap, symbol);
        push_u32(&mut heap, signature);

        entries.push((name, function));
    }

    let directory = position(&heap);
    let size = directory as usize + entries.len() * 12;

    let mut data = Vec::with_capacity(size);
    data.extend_from_slice(b"GOBJ\nMETADATA\r\n\x1a");
    data.extend_from_slice(&[1, 0, 0, 0]);
    push_u16(&mut data, entries.len() as u16);
    push_u16(&mut data, entries.len() as u16);
    push_u32(&mut data, directory);
    push_u32(&mut data, 0);
    push_u32(&mut data, 0);
    push_u32(&mut data, 0);
    push_u32(&mut data, size as u32);
    push_u32(&mut data, namespace);
    push_u32(&mut data, 0);
    push_u32(&mut data, 0);
    for declared in BLOB_SIZES {
        push_u16(&mut data, declared);
    }
    data.extend_from_slice(&[0; 8]);
    data.extend_from_slice(&heap);

    for (name, offset) in entries {
        push_u16(&mut data, BlobType::Function as u16);
        push_u16(&mut data, 1);
        push_u32(&mut data, name);
        push_u32(&mut data, offset);
    }

    data
}

/// Benchmark validation of typelibs with growing function counts.
fn bench_validate_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_functions");

    for n_functions in [0, 16, 256, 4096] {
        let data = synthesize(n_functions);
        validate(&data).unwrap();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_functions), &data, |b, data| {
            b.iter(|| validate(black_box(data)));
        });
    }

    group.finish();
}

/// Benchmark the strict preset against the default on the same buffer.
fn bench_validate_strict(c: &mut Criterion) {
    let data = synthesize(1024);
    let strict = ValidationConfig::strict();

    c.bench_function("validate_strict_1024", |b| {
        b.iter(|| girscope::validate_with_config(black_box(&data), black_box(&strict)));
    });
}

/// Benchmark rejection of a buffer with a corrupted magic.
fn bench_reject_header(c: &mut Criterion) {
    let mut data = synthesize(4096);
    data[0] = 0;

    c.bench_function("reject_corrupted_magic", |b| {
        b.iter(|| {
            let result = validate(black_box(&data));
            black_box(result.is_err())
        });
    });
}

/// Benchmark parallel validation of many independent buffers.
fn bench_validate_all(c: &mut Criterion) {
    let buffers: Vec<Vec<u8>> = (0..64).map(|index| synthesize(64 + index)).collect();
    let slices: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();
    let config = ValidationConfig::default();

    c.bench_function("validate_all_64", |b| {
        b.iter(|| validate_all(black_box(&slices), &config));
    });
}

criterion_group!(
    benches,
    bench_validate_functions,
    bench_validate_strict,
    bench_reject_header,
    bench_validate_all
);
criterion_main!(benches);
