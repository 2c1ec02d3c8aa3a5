use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nbt_decoder::{decode_slice, read_from_stream};
use nbt_tests::{CompoundBuilder, ListBuilder, gzip, level_document};
use nbt_types::TagKind;

fn bench_decode_small(c: &mut Criterion) {
    let payload = CompoundBuilder::new().int("x", 42).document("");

    c.bench_function("decode_small", |b| {
        b.iter(|| decode_slice(&payload).unwrap());
    });
}

fn bench_decode_level(c: &mut Criterion) {
    let raw = level_document();
    let compressed = gzip(&raw);

    let mut group = c.benchmark_group("decode_level");

    group.bench_function("raw", |b| {
        b.iter(|| decode_slice(&raw).unwrap());
    });
    group.bench_function("gzip", |b| {
        b.iter(|| read_from_stream(compressed.as_slice()).unwrap());
    });

    group.finish();
}

fn bench_decode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_throughput");

    for entries in [10, 100, 1000] {
        let mut list = ListBuilder::new(TagKind::Compound);
        for i in 0..entries {
            list = list.compound(
                CompoundBuilder::new()
                    .string("id", "minecraft:stone")
                    .byte("Count", 64)
                    .int("Slot", i),
            );
        }
        let payload = CompoundBuilder::new().list("Inventory", list).document("");

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("decode", format!("{entries}_items")),
            &payload,
            |b, p| b.iter(|| decode_slice(p).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_small,
    bench_decode_level,
    bench_decode_throughput
);
criterion_main!(benches);
