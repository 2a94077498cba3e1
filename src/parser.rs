//! Segment decoders.
//!
//! Each decoder consumes one length-prefixed segment, starting right after
//! the two marker bytes, and leaves the cursor exactly past the segment
//! (marker start + declared length + 2) no matter how much of the body it
//! interpreted. That invariant is what lets the dispatcher treat segment
//! bodies opaquely.

use crate::error::{Error, Result};
use crate::huffman::{HuffmanDescription, HuffmanTableClass};
use crate::reader::SegmentReader;
use crate::zigzag;

/// Quantization and Huffman tables each address one of four slots.
pub const MAX_TABLE_SLOTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodingProcess {
    DctSequential,
    DctProgressive,
    Lossless,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntropyCoding {
    Huffman,
    Arithmetic,
}

/// Unit of the JFIF pixel density fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DensityUnit {
    /// No unit; the densities only specify the pixel aspect ratio.
    AspectRatio,
    DotsPerInch,
    DotsPerCm,
}

/// Contents of the JFIF APP0 segment, minus the thumbnail pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JfifInfo {
    pub version: (u8, u8),
    pub density_unit: DensityUnit,
    pub x_density: u16,
    pub y_density: u16,
}

/// One frame component as declared in the SOF header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub identifier: u8,
    pub horizontal_sampling_factor: u8,
    pub vertical_sampling_factor: u8,
    pub quantization_table_index: usize,
}

/// The frame header. The flag fields are fixed by which SOF variant carried
/// the header, not by anything inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameInfo {
    pub is_baseline: bool,
    pub is_differential: bool,
    pub coding_process: CodingProcess,
    pub entropy_coding: EntropyCoding,
    pub precision: u8,
    pub image_height: u16,
    pub image_width: u16,
    pub components: Vec<Component>,
}

/// Entry width of a quantization table as transmitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TablePrecision {
    /// One byte per entry.
    Byte,
    /// One big-endian 16-bit word per entry.
    Word,
}

/// A dequantization table in natural (row-major) order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantizationTable {
    pub precision: TablePrecision,
    /// Block dimension; 8 for the 8×8 tables every real JPEG uses.
    pub dimension: u8,
    /// Natural-order entries. Slots past `dimension²` stay zero.
    pub values: [u16; 64],
}

/// Reads the 16-bit segment length field, which counts itself, and returns
/// the number of body bytes that follow it.
fn read_length(reader: &mut SegmentReader<'_>) -> Result<usize> {
    let length = usize::from(reader.read_u16_be()?);
    length
        .checked_sub(2)
        .ok_or_else(|| Error::BadField(format!("segment length {} does not cover itself", length)))
}

/// Skips a length-prefixed segment this parser has no interest in.
pub(crate) fn skip_segment(reader: &mut SegmentReader<'_>) -> Result<()> {
    let length = read_length(reader)?;
    reader.skip(length)
}

/// Decodes the JFIF APP0 segment. The thumbnail pixel data is skipped, not
/// decoded; JFXX extension segments are unsupported.
pub(crate) fn parse_app0(reader: &mut SegmentReader<'_>) -> Result<JfifInfo> {
    let length = read_length(reader)?;

    // identifier (5) + version (2) + unit (1) + densities (4) + thumbnail size (2)
    if length < 14 {
        return Err(Error::BadField(format!(
            "APP0 body of {} bytes is too short for a JFIF header",
            length
        )));
    }

    if reader.read_bytes(5)? != b"JFIF\0" {
        return Err(Error::NotAJpeg("APP0 identifier is not JFIF"));
    }

    let version = (reader.read_u8()?, reader.read_u8()?);
    let density_unit = match reader.read_u8()? {
        0 => DensityUnit::AspectRatio,
        1 => DensityUnit::DotsPerInch,
        2 => DensityUnit::DotsPerCm,
        n => return Err(Error::BadField(format!("unknown JFIF density unit {}", n))),
    };
    let x_density = reader.read_u16_be()?;
    let y_density = reader.read_u16_be()?;

    let thumbnail_width = usize::from(reader.read_u8()?);
    let thumbnail_height = usize::from(reader.read_u8()?);
    let thumbnail_size = 3 * thumbnail_width * thumbnail_height; // packed RGB

    if length - 14 != thumbnail_size {
        return Err(Error::BadField(format!(
            "JFIF thumbnail needs {} bytes but the segment leaves {}",
            thumbnail_size,
            length - 14
        )));
    }
    reader.skip(thumbnail_size)?;

    Ok(JfifInfo {
        version,
        density_unit,
        x_density,
        y_density,
    })
}

/// Decodes a DQT segment holding a single quantization table, returning the
/// addressed slot and the table scattered into natural order.
///
/// The entry count is derived from the declared length, so dimensions other
/// than 8×8 are accepted as long as a zigzag mapping exists for them. One
/// table per segment; see DESIGN.md for why this is not a loop like DHT.
pub(crate) fn parse_dqt(reader: &mut SegmentReader<'_>) -> Result<(usize, QuantizationTable)> {
    let length = read_length(reader)?;
    if length == 0 {
        return Err(Error::BadField("empty DQT segment".to_owned()));
    }

    let byte = reader.read_u8()?;
    let slot = usize::from(byte & 0x0F);
    if slot >= MAX_TABLE_SLOTS {
        return Err(Error::BadField(format!(
            "quantization table slot {} is out of range",
            slot
        )));
    }
    let precision = match byte >> 4 {
        0 => TablePrecision::Byte,
        1 => TablePrecision::Word,
        n => {
            return Err(Error::BadField(format!(
                "unknown quantization table precision {}",
                n
            )))
        }
    };

    let mut entry_count = length - 1;
    if precision == TablePrecision::Word {
        if entry_count % 2 != 0 {
            return Err(Error::BadField(
                "odd byte count for a 16-bit quantization table".to_owned(),
            ));
        }
        entry_count /= 2;
    }

    let dimension = (2usize..=8)
        .find(|dim| dim * dim == entry_count)
        .ok_or_else(|| {
            Error::BadField(format!(
                "no supported block dimension has {} quantization entries",
                entry_count
            ))
        })?;
    let order = zigzag::natural_order(dimension)
        .ok_or_else(|| Error::BadField(format!("unsupported block dimension {}", dimension)))?;

    let mut values = [0u16; 64];
    for &natural in order.iter() {
        values[usize::from(natural)] = match precision {
            TablePrecision::Byte => u16::from(reader.read_u8()?),
            TablePrecision::Word => reader.read_u16_be()?,
        };
    }

    Ok((
        slot,
        QuantizationTable {
            precision,
            dimension: dimension as u8,
            values,
        },
    ))
}

/// Decodes a frame header. `variant` is the SOF parameter (0..=15 minus the
/// slots Table B.1 assigns elsewhere) and fixes the coding flags.
pub(crate) fn parse_sof(reader: &mut SegmentReader<'_>, variant: u8) -> Result<FrameInfo> {
    use self::CodingProcess::*;
    use self::EntropyCoding::*;

    let length = read_length(reader)?;

    let (is_baseline, is_differential, coding_process, entropy_coding) = match variant {
        0 => (true, false, DctSequential, Huffman),
        1 => (false, false, DctSequential, Huffman),
        2 => (false, false, DctProgressive, Huffman),
        3 => (false, false, Lossless, Huffman),
        5 => (false, true, DctSequential, Huffman),
        6 => (false, true, DctProgressive, Huffman),
        7 => (false, true, Lossless, Huffman),
        9 => (false, false, DctSequential, Arithmetic),
        10 => (false, false, DctProgressive, Arithmetic),
        11 => (false, false, Lossless, Arithmetic),
        13 => (false, true, DctSequential, Arithmetic),
        14 => (false, true, DctProgressive, Arithmetic),
        15 => (false, true, Lossless, Arithmetic),
        // The dispatcher never routes the reserved variants here.
        _ => unreachable!("SOF{} has no frame header layout", variant),
    };

    let precision = reader.read_u8()?;
    let image_height = reader.read_u16_be()?;
    let image_width = reader.read_u16_be()?;
    let component_count = usize::from(reader.read_u8()?);

    if image_height == 0 || image_width == 0 {
        return Err(Error::BadField("frame size is zero".to_owned()));
    }
    if component_count == 0 {
        return Err(Error::BadField("frame declares no components".to_owned()));
    }
    if length != 6 + 3 * component_count {
        return Err(Error::BadField(format!(
            "SOF body of {} bytes cannot hold {} components",
            length, component_count
        )));
    }

    let mut components = Vec::with_capacity(component_count);
    for _ in 0..component_count {
        let identifier = reader.read_u8()?;
        let factors = reader.read_u8()?;
        let quantization_table_index = usize::from(reader.read_u8()?);

        if quantization_table_index >= MAX_TABLE_SLOTS {
            return Err(Error::BadField(format!(
                "component {} selects quantization table slot {}",
                identifier, quantization_table_index
            )));
        }

        components.push(Component {
            identifier,
            horizontal_sampling_factor: factors >> 4,
            vertical_sampling_factor: factors & 0x0F,
            quantization_table_index,
        });
    }

    Ok(FrameInfo {
        is_baseline,
        is_differential,
        coding_process,
        entropy_coding,
        precision,
        image_height,
        image_width,
        components,
    })
}

/// Decodes a DHT segment, which may pack several table descriptions.
///
/// Loops until the declared length is consumed, then checks the consumption
/// was exact; a mismatch means the embedded tables lied about their sizes.
pub(crate) fn parse_dht(
    reader: &mut SegmentReader<'_>,
) -> Result<Vec<(HuffmanTableClass, usize, HuffmanDescription)>> {
    let length = read_length(reader)?;
    let body_start = reader.position();
    let mut tables = Vec::new();

    while reader.position() - body_start < length {
        let byte = reader.read_u8()?;
        let class = match byte >> 4 {
            0 => HuffmanTableClass::DC,
            1 => HuffmanTableClass::AC,
            n => {
                return Err(Error::BadField(format!(
                    "unknown huffman table class {}",
                    n
                )))
            }
        };
        let slot = usize::from(byte & 0x0F);
        if slot >= MAX_TABLE_SLOTS {
            return Err(Error::BadField(format!(
                "huffman table slot {} is out of range",
                slot
            )));
        }

        let mut counts = [0u8; 16];
        counts.copy_from_slice(reader.read_bytes(16)?);

        let total: usize = counts.iter().map(|&count| usize::from(count)).sum();
        if total > 256 {
            return Err(Error::BadField(format!(
                "huffman table defines {} symbols, more than the 256 a canonical table can hold",
                total
            )));
        }

        let values = reader.read_bytes(total)?.to_vec();
        tables.push((class, slot, HuffmanDescription::new(counts, values)?));
    }

    if reader.position() - body_start != length {
        return Err(Error::BadField(
            "DHT table sizes do not sum to the declared segment length".to_owned(),
        ));
    }

    Ok(tables)
}
