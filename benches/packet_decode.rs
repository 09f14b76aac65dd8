//! Benchmarks for DATA packet decoding and mapping
//!
//! A full X-Plane frame carries a dozen or so groups; the whole
//! decode-and-map pass should stay well under a microsecond per group.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use xplane_bridge::protocol::{self, groups};
use xplane_bridge::test_utils::PacketBuilder;
use xplane_bridge::types::TelemetryRecord;

fn typical_packet() -> Vec<u8> {
    PacketBuilder::new()
        .group(3, [2.5, -1.0, 271.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        .group(16, [12.0, -0.5, 80.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        .group(17, [0.1, 0.9, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        .group(20, [0.5, 1.5, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        .group(21, [2400.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        .group(37, [0.8, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0])
        .group(1, [0.0; 8])
        .group(4, [0.0; 8])
        .build()
}

fn bench_decode(c: &mut Criterion) {
    let packet = typical_packet();

    let mut group = c.benchmark_group("packet_decode");
    group.throughput(Throughput::Bytes(packet.len() as u64));

    group.bench_function("decode_only", |b| {
        b.iter(|| {
            let groups = protocol::decode(black_box(&packet)).expect("valid magic");
            black_box(groups.map(|g| g.id).sum::<i32>())
        })
    });

    group.bench_function("decode_and_map", |b| {
        let mut record = TelemetryRecord::new();
        b.iter(|| {
            for group in protocol::decode(black_box(&packet)).expect("valid magic") {
                groups::apply(&mut record, &group);
            }
            black_box(&record);
        })
    });

    group.bench_function("reject_bad_magic", |b| {
        let mut bad = packet.clone();
        bad[0] = b'X';
        b.iter(|| black_box(protocol::decode(black_box(&bad)).is_none()))
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
