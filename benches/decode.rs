use std::io::{Read, Write};
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// A few hundred KiB of mildly repetitive text, gzip-compressed once at
/// bench startup -- stands in for the checked-in corpus fixture the
/// teacher crate benchmarked against, without shipping a binary file.
fn gzip_fixture() -> Vec<u8>
{
    let mut text = String::new();
    for i in 0..8000
    {
        text.push_str(&format!(
            "line {i}: the quick brown fox jumps over the lazy dog\n"
        ));
    }

    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn decode_with_flate2(bytes: &[u8]) -> Vec<u8>
{
    let mut writer = Vec::new();
    let mut decoder = flate2::read::GzDecoder::new(bytes);
    decoder.read_to_end(&mut writer).unwrap();
    writer
}

fn decode_with_tinyflate(bytes: &[u8]) -> Vec<u8>
{
    tinyflate::GzipDecoder::new(bytes).decode().unwrap()
}

fn decode_with_libdeflater(bytes: &[u8], out_len: usize) -> Vec<u8>
{
    let mut decompressor = libdeflater::Decompressor::new();
    let mut out = vec![0; out_len];
    let written = decompressor.gzip_decompress(bytes, &mut out).unwrap();
    out.truncate(written);
    out
}

fn decode_test(c: &mut Criterion)
{
    let compressed = gzip_fixture();
    let decompressed_len = decode_with_flate2(&compressed).len();

    let mut group = c.benchmark_group("gzip decoding");
    group.throughput(Throughput::Bytes(compressed.len() as u64));

    group.bench_function("flate2", |b| {
        b.iter(|| black_box(decode_with_flate2(&compressed)))
    });

    group.bench_function("tinyflate", |b| {
        b.iter(|| black_box(decode_with_tinyflate(&compressed)))
    });

    group.bench_function("libdeflater", |b| {
        b.iter(|| black_box(decode_with_libdeflater(&compressed, decompressed_len)))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(10))
      };
    targets=decode_test);

criterion_main!(benches);
