//! Builders for synthetic marker-segment buffers.
#![allow(dead_code)]

pub const SOI: [u8; 2] = [0xFF, 0xD8];
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// A length-prefixed segment: marker, length field counting itself, body.
pub fn segment(marker_code: u8, body: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker_code];
    out.extend_from_slice(&((body.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(body);
    out
}

/// Minimal JFIF APP0: version 1.1, unit 0, 72x72 density, no thumbnail.
pub fn jfif_app0() -> Vec<u8> {
    let mut body = b"JFIF\0".to_vec();
    body.extend_from_slice(&[1, 1]); // version
    body.push(0); // density unit
    body.extend_from_slice(&72u16.to_be_bytes());
    body.extend_from_slice(&72u16.to_be_bytes());
    body.extend_from_slice(&[0, 0]); // 0x0 thumbnail
    segment(0xE0, &body)
}

/// DQT with one 8-bit 8x8 table, entries given in zigzag order.
pub fn dqt_8bit(slot: u8, entries: &[u8; 64]) -> Vec<u8> {
    let mut body = vec![slot]; // precision 0 in the high nibble
    body.extend_from_slice(entries);
    segment(0xDB, &body)
}

/// DQT with one 16-bit 8x8 table, entries given in zigzag order.
pub fn dqt_16bit(slot: u8, entries: &[u16; 64]) -> Vec<u8> {
    let mut body = vec![0x10 | slot];
    for &entry in entries.iter() {
        body.extend_from_slice(&entry.to_be_bytes());
    }
    segment(0xDB, &body)
}

/// Baseline SOF0, 8-bit precision.
/// Components are (identifier, h_factor, v_factor, quantization slot).
pub fn sof0(height: u16, width: u16, components: &[(u8, u8, u8, u8)]) -> Vec<u8> {
    sof(0xC0, height, width, components)
}

pub fn sof(marker_code: u8, height: u16, width: u16, components: &[(u8, u8, u8, u8)]) -> Vec<u8> {
    let mut body = vec![8];
    body.extend_from_slice(&height.to_be_bytes());
    body.extend_from_slice(&width.to_be_bytes());
    body.push(components.len() as u8);
    for &(id, h, v, qt) in components {
        body.extend_from_slice(&[id, (h << 4) | v, qt]);
    }
    segment(marker_code, &body)
}

/// DHT holding one table. `class` is 0 for DC, 1 for AC.
pub fn dht(class: u8, slot: u8, counts: &[u8; 16], values: &[u8]) -> Vec<u8> {
    segment(0xC4, &dht_table(class, slot, counts, values))
}

/// One table description, for packing several into a single DHT segment.
pub fn dht_table(class: u8, slot: u8, counts: &[u8; 16], values: &[u8]) -> Vec<u8> {
    let mut body = vec![(class << 4) | slot];
    body.extend_from_slice(counts);
    body.extend_from_slice(values);
    body
}

/// Minimal SOS header selecting one component.
pub fn sos() -> Vec<u8> {
    // component count, (selector, dc/ac table byte), spectral start/end, approximation
    segment(0xDA, &[1, 1, 0x00, 0, 63, 0])
}

/// Concatenates segments into one buffer.
pub fn buffer(parts: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}
