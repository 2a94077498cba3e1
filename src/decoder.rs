use log::{debug, trace};

#[cfg(feature = "marker-index")]
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::huffman::{HuffmanDescription, HuffmanTable, HuffmanTableClass};
use crate::marker::Marker;
use crate::parser::{
    parse_app0, parse_dht, parse_dqt, parse_sof, skip_segment, FrameInfo, JfifInfo,
    QuantizationTable, MAX_TABLE_SLOTS,
};
use crate::reader::SegmentReader;

/// Everything recovered from the marker-segment structure of one buffer.
///
/// A `Jpeg` is built by a single pass of [`Decoder::decode`] and is immutable
/// afterwards. It carries what a downstream entropy decoder needs to take
/// over: the built Huffman tables, the quantization tables, the frame
/// component list, and the offset of the entropy-coded scan data.
#[derive(Clone, Debug, Default)]
pub struct Jpeg {
    jfif: Option<JfifInfo>,
    quantization_tables: [Option<QuantizationTable>; MAX_TABLE_SLOTS],
    frame: Option<FrameInfo>,
    dc_descriptions: [Option<HuffmanDescription>; MAX_TABLE_SLOTS],
    ac_descriptions: [Option<HuffmanDescription>; MAX_TABLE_SLOTS],
    dc_tables: [Option<HuffmanTable>; MAX_TABLE_SLOTS],
    ac_tables: [Option<HuffmanTable>; MAX_TABLE_SLOTS],
    scan_data_offset: Option<usize>,
    #[cfg(feature = "marker-index")]
    marker_offsets: BTreeMap<Marker, Vec<usize>>,
}

impl Jpeg {
    /// Parses the marker-segment structure of `buf`.
    pub fn from_bytes(buf: &[u8]) -> Result<Jpeg> {
        Decoder::new(buf).decode()
    }

    /// The JFIF APP0 contents, if an APP0 segment was present.
    pub fn jfif(&self) -> Option<&JfifInfo> {
        self.jfif.as_ref()
    }

    pub fn is_jfif(&self) -> bool {
        self.jfif.is_some()
    }

    /// The frame header, if a SOF segment was present.
    pub fn frame(&self) -> Option<&FrameInfo> {
        self.frame.as_ref()
    }

    pub fn quantization_table(&self, slot: usize) -> Option<&QuantizationTable> {
        self.quantization_tables.get(slot)?.as_ref()
    }

    /// The raw DC table description stored by a DHT segment.
    pub fn dc_description(&self, slot: usize) -> Option<&HuffmanDescription> {
        self.dc_descriptions.get(slot)?.as_ref()
    }

    /// The raw AC table description stored by a DHT segment.
    pub fn ac_description(&self, slot: usize) -> Option<&HuffmanDescription> {
        self.ac_descriptions.get(slot)?.as_ref()
    }

    /// The built DC lookup table. Tables are built when the scan header is
    /// reached, so this is `None` for streams without SOS.
    pub fn dc_table(&self, slot: usize) -> Option<&HuffmanTable> {
        self.dc_tables.get(slot)?.as_ref()
    }

    /// The built AC lookup table; see [`Jpeg::dc_table`].
    pub fn ac_table(&self, slot: usize) -> Option<&HuffmanTable> {
        self.ac_tables.get(slot)?.as_ref()
    }

    /// Offset of the entropy-coded scan data, one past the SOS header.
    pub fn scan_data_offset(&self) -> Option<usize> {
        self.scan_data_offset
    }

    /// Buffer offsets at which `marker` occurred, in encounter order. Each
    /// offset points at the 0xFF prefix byte.
    #[cfg(feature = "marker-index")]
    pub fn marker_offsets(&self, marker: Marker) -> &[usize] {
        self.marker_offsets
            .get(&marker)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Nothing consumed yet; the first marker must be SOI.
    Start,
    InBody,
    /// Terminal: EOI was consumed, or the scan header was reached.
    Done,
}

/// Single-pass dispatcher over the marker-segment structure.
///
/// Repeatedly tokenizes a marker and routes it to the matching segment
/// decoder. No ordering is enforced beyond SOI coming first and EOI (or SOS,
/// where this parser's work ends) terminating the walk; APPn, DQT, DHT and
/// SOF segments may interleave freely.
pub struct Decoder<'data> {
    reader: SegmentReader<'data>,
    jpeg: Jpeg,
    state: State,
}

impl<'data> Decoder<'data> {
    pub fn new(buf: &'data [u8]) -> Decoder<'data> {
        Decoder {
            reader: SegmentReader::new(buf),
            jpeg: Jpeg::default(),
            state: State::Start,
        }
    }

    /// Walks the buffer marker by marker until EOI or the scan header.
    ///
    /// Any error abandons the parse; there is no partial-result recovery.
    pub fn decode(mut self) -> Result<Jpeg> {
        while self.state != State::Done {
            let offset = self.reader.position();
            let marker = self.reader.read_marker()?;
            trace!("{:?} marker at offset {}", marker, offset);

            if self.state == State::Start {
                if marker != Marker::SOI {
                    return Err(Error::NotAJpeg("first marker is not SOI"));
                }
                self.state = State::InBody;
            }

            #[cfg(feature = "marker-index")]
            self.jpeg
                .marker_offsets
                .entry(marker)
                .or_insert_with(Vec::new)
                .push(offset);

            self.handle_marker(marker)?;
        }

        Ok(self.jpeg)
    }

    fn handle_marker(&mut self, marker: Marker) -> Result<()> {
        match marker {
            // Zero-length structural markers.
            Marker::SOI => {}
            Marker::EOI => self.state = State::Done,

            Marker::APP(0) => {
                let jfif = parse_app0(&mut self.reader)?;
                debug!("JFIF {}.{:02}", jfif.version.0, jfif.version.1);
                self.jpeg.jfif = Some(jfif);
            }
            // Application segments this parser does not interpret.
            Marker::APP(_) | Marker::COM => skip_segment(&mut self.reader)?,

            Marker::DQT => {
                let (slot, table) = parse_dqt(&mut self.reader)?;
                debug!(
                    "{}x{} quantization table in slot {}",
                    table.dimension, table.dimension, slot
                );
                self.jpeg.quantization_tables[slot] = Some(table);
            }

            // SOF(8) is the reserved JPEG-extension slot with no defined
            // frame header layout.
            Marker::SOF(8) => return Err(Error::UnhandledMarker(marker)),
            Marker::SOF(variant) => {
                let frame = parse_sof(&mut self.reader, variant)?;
                debug!(
                    "{}x{} frame, {} component(s), {:?}/{:?}",
                    frame.image_width,
                    frame.image_height,
                    frame.components.len(),
                    frame.coding_process,
                    frame.entropy_coding
                );
                self.jpeg.frame = Some(frame);
            }

            Marker::DHT => {
                for (class, slot, description) in parse_dht(&mut self.reader)? {
                    debug!("{:?} huffman description in slot {}", class, slot);
                    let slots = match class {
                        HuffmanTableClass::DC => &mut self.jpeg.dc_descriptions,
                        HuffmanTableClass::AC => &mut self.jpeg.ac_descriptions,
                    };
                    slots[slot] = Some(description);
                }
            }

            Marker::SOS => self.handle_sos()?,

            // Recognized markers with no segment decoder: arithmetic coding
            // conditioning, restart handling, hierarchical mode, DNL, and
            // the reserved code ranges.
            _ => return Err(Error::UnhandledMarker(marker)),
        }

        Ok(())
    }

    /// The scan header ends this parser's work: every Huffman description
    /// gathered so far is built into its lookup table here, lazily rather
    /// than inline during DHT parsing, and the cursor position is recorded
    /// for the downstream entropy decoder.
    fn handle_sos(&mut self) -> Result<()> {
        skip_segment(&mut self.reader)?;

        for slot in 0..MAX_TABLE_SLOTS {
            if let Some(description) = &self.jpeg.dc_descriptions[slot] {
                self.jpeg.dc_tables[slot] = Some(HuffmanTable::build(description)?);
            }
            if let Some(description) = &self.jpeg.ac_descriptions[slot] {
                self.jpeg.ac_tables[slot] = Some(HuffmanTable::build(description)?);
            }
        }

        self.jpeg.scan_data_offset = Some(self.reader.position());
        self.state = State::Done;
        Ok(())
    }
}
