use crate::error::{Error, MarkerError, Result};
use crate::marker::Marker;

/// Cursor over an in-memory JPEG buffer.
///
/// The cursor only ever moves forward. Every multi-byte field in the
/// marker-segment grammar is big-endian.
pub(crate) struct SegmentReader<'data> {
    buf: &'data [u8],
    pos: usize,
}

impl<'data> SegmentReader<'data> {
    pub fn new(buf: &'data [u8]) -> SegmentReader<'data> {
        SegmentReader { buf, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let byte = *self.buf.get(self.pos).ok_or(Error::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'data [u8]> {
        let end = self.pos.checked_add(count).ok_or(Error::UnexpectedEof)?;
        let bytes = self.buf.get(self.pos..end).ok_or(Error::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Reads the two-byte marker at the cursor.
    ///
    /// Section B.1.1.2: any marker may be preceded by any number of fill
    /// bytes (0xFF), so repeated 0xFF bytes before the code are consumed.
    /// Without fill bytes this consumes exactly two bytes.
    pub fn read_marker(&mut self) -> Result<Marker> {
        let prefix = self.read_u8()?;
        if prefix != 0xFF {
            return Err(Error::UnrecognizedMarker(MarkerError::MissingPrefix(prefix)));
        }

        let mut code = self.read_u8()?;
        while code == 0xFF {
            code = self.read_u8()?;
        }

        Marker::from_u8(code).ok_or(Error::UnrecognizedMarker(MarkerError::UnknownCode(code)))
    }
}
