//! Throughput of batch encode/decode of Raw Frame Format buffers.
//!
//! Run with: cargo bench --bench codec_benchmark

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nixnet_rs::raw::{decode_all, encode_all};
use nixnet_rs::{
    CanFrame, CanIdentifier, FrameType, RawFrame, XnetFrame, decode_frames, encode_frames,
};

/// Mixed classic and FD records, so both strides are exercised.
fn create_raw_frames(count: usize) -> Vec<RawFrame> {
    (0..count)
        .map(|i| {
            let (frame_type, len) = if i % 4 == 0 {
                (FrameType::CanFdData, 64)
            } else {
                (FrameType::CanData, 8)
            };
            RawFrame::new(i as u64, (i as u32) & 0x3FF, frame_type, vec![i as u8; len])
        })
        .collect()
}

fn create_can_frames(count: usize) -> Vec<XnetFrame> {
    (0..count)
        .map(|i| {
            let id = CanIdentifier::extended(0x1800_0000 | i as u32);
            XnetFrame::from(CanFrame::data(id, &[i as u8; 8]))
        })
        .collect()
}

fn bench_raw_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_codec");

    for size in [16usize, 256, 4096] {
        let frames = create_raw_frames(size);
        let bytes = encode_all(&frames).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode_all", size), &frames, |b, frames| {
            b.iter(|| encode_all(black_box(frames)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decode_all", size), &bytes, |b, bytes| {
            b.iter(|| {
                decode_all(black_box(bytes))
                    .collect::<nixnet_rs::Result<Vec<_>>>()
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_typed_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed_codec");

    for size in [16usize, 256, 4096] {
        let frames = create_can_frames(size);
        let bytes = encode_frames(&frames).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("encode_frames", size), &frames, |b, frames| {
            b.iter(|| encode_frames(black_box(frames)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decode_frames", size), &bytes, |b, bytes| {
            b.iter(|| {
                decode_frames::<XnetFrame>(black_box(bytes))
                    .collect::<nixnet_rs::Result<Vec<_>>>()
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_raw_codec, bench_typed_codec);
criterion_main!(benches);
