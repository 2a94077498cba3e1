use criterion::{black_box, criterion_group, criterion_main, Criterion};

use jpeg_structure::{HuffmanDescription, HuffmanTable, Jpeg};

fn segment(marker_code: u8, body: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker_code];
    out.extend_from_slice(&((body.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(body);
    out
}

/// A synthetic baseline stream: JFIF APP0, two quantization tables, SOF0
/// with three components, the four Annex K Huffman tables, SOS.
fn synthetic_stream() -> Vec<u8> {
    let mut buf = vec![0xFF, 0xD8];

    let mut app0 = b"JFIF\0".to_vec();
    app0.extend_from_slice(&[1, 1, 0, 0, 72, 0, 72, 0, 0]);
    buf.extend_from_slice(&segment(0xE0, &app0));

    for slot in 0..2u8 {
        let mut dqt = vec![slot];
        dqt.extend_from_slice(&[16u8; 64]);
        buf.extend_from_slice(&segment(0xDB, &dqt));
    }

    let sof = [8, 0, 64, 0, 64, 3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1];
    buf.extend_from_slice(&segment(0xC0, &sof));

    for (class, slot, counts, symbol_count) in huffman_fixtures() {
        let mut dht = vec![(class << 4) | slot];
        dht.extend_from_slice(&counts);
        dht.extend((0..symbol_count).map(|v| v as u8));
        buf.extend_from_slice(&segment(0xC4, &dht));
    }

    buf.extend_from_slice(&segment(0xDA, &[1, 1, 0x00, 0, 63, 0]));
    buf
}

fn huffman_fixtures() -> Vec<(u8, u8, [u8; 16], usize)> {
    // Annex K.3.1 luminance DC counts and an AC-shaped spread of lengths.
    let dc = [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0];
    let ac = [0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 125];
    vec![(0, 0, dc, 12), (1, 0, ac, 162), (0, 1, dc, 12), (1, 1, ac, 162)]
}

fn criterion_benchmark(c: &mut Criterion) {
    let stream = synthetic_stream();

    c.bench_function("parse a synthetic baseline stream", |b| {
        b.iter(|| Jpeg::from_bytes(black_box(&stream)).unwrap())
    });

    let (_, _, counts, symbol_count) = huffman_fixtures().remove(1);
    let description =
        HuffmanDescription::new(counts, (0..symbol_count).map(|v| v as u8).collect()).unwrap();

    c.bench_function("build a two-level huffman table", |b| {
        b.iter(|| HuffmanTable::build(black_box(&description)).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
