//! The marker codes of ISO/IEC 10918-1 Table B.1.

/// A two-byte marker, identified by the code byte following the 0xFF prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Marker {
    /// Temporary private use in arithmetic coding.
    TEM,
    /// Reserved, 0x02 through 0xBF.
    RES,
    /// Start of frame. The parameter selects the coding process: baseline (0),
    /// extended sequential (1), progressive (2) or lossless (3), plus 4 for
    /// the differential variants and 8 for arithmetic coding. `SOF(8)` is the
    /// reserved JPEG-extension slot, not a real frame header.
    SOF(u8),
    /// Define Huffman table(s).
    DHT,
    /// Define arithmetic coding conditioning(s).
    DAC,
    /// Restart, modulo-8 count in the parameter.
    RST(u8),
    /// Start of image.
    SOI,
    /// End of image.
    EOI,
    /// Start of scan.
    SOS,
    /// Define quantization table(s).
    DQT,
    /// Define number of lines.
    DNL,
    /// Define restart interval.
    DRI,
    /// Define hierarchical progression.
    DHP,
    /// Expand reference component(s).
    EXP,
    /// Application data, APP0 through APP15.
    APP(u8),
    /// Reserved for JPEG extensions, JPG0 through JPG13.
    JPG(u8),
    /// Comment.
    COM,
}

impl Marker {
    /// Resolves a marker code byte. 0x00 (byte stuffing) and 0xFF (fill)
    /// never name a segment.
    pub fn from_u8(n: u8) -> Option<Marker> {
        use self::Marker::*;

        match n {
            0x00 | 0xFF => None,
            0x01 => Some(TEM),
            0x02..=0xBF => Some(RES),
            0xC4 => Some(DHT),
            0xCC => Some(DAC),
            0xC0..=0xCF => Some(SOF(n - 0xC0)),
            0xD0..=0xD7 => Some(RST(n - 0xD0)),
            0xD8 => Some(SOI),
            0xD9 => Some(EOI),
            0xDA => Some(SOS),
            0xDB => Some(DQT),
            0xDC => Some(DNL),
            0xDD => Some(DRI),
            0xDE => Some(DHP),
            0xDF => Some(EXP),
            0xE0..=0xEF => Some(APP(n - 0xE0)),
            0xF0..=0xFD => Some(JPG(n - 0xF0)),
            0xFE => Some(COM),
        }
    }
}
