//! A structural JPEG parser.
//!
//! This crate walks the marker-segment structure of a JPEG buffer and
//! reconstructs the header metadata: frame geometry and component layout,
//! quantization tables in natural order, and the canonical Huffman tables
//! built into constant-time lookup structures. It does not decode pixels;
//! the entropy-coded scan data, inverse DCT, upsampling and color
//! conversion are a downstream consumer's job, taken over from
//! [`Jpeg::scan_data_offset`] and the tables on the parsed document.
//!
//! ```
//! let buf = [0xFF, 0xD8, 0xFF, 0xD9]; // SOI, EOI
//! let jpeg = jpeg_structure::Jpeg::from_bytes(&buf).unwrap();
//! assert!(jpeg.frame().is_none());
//! ```

pub use crate::decoder::{Decoder, Jpeg};
pub use crate::error::{Error, MarkerError, Result};
pub use crate::huffman::{HuffmanDescription, HuffmanTable, HuffmanTableClass};
pub use crate::marker::Marker;
pub use crate::parser::{
    CodingProcess, Component, DensityUnit, EntropyCoding, FrameInfo, JfifInfo, QuantizationTable,
    TablePrecision, MAX_TABLE_SLOTS,
};

mod decoder;
mod error;
mod huffman;
mod marker;
mod parser;
mod reader;
mod zigzag;
