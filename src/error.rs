use crate::marker::Marker;

pub type Result<T> = std::result::Result<T, Error>;

/// The two ways marker recognition can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    /// The byte at the cursor is not the 0xFF marker prefix.
    #[error("expected the 0xFF marker prefix, found {0:#04x}")]
    MissingPrefix(u8),
    /// The byte following the prefix names no marker in Table B.1.
    #[error("no marker is assigned code {0:#04x}")]
    UnknownCode(u8),
}

/// Errors that can occur while parsing the marker-segment structure.
///
/// Every error is fatal: the parse aborts immediately and no partial
/// document is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The buffer is not a JPEG at all: it does not open with SOI, or an
    /// identifier field (such as the JFIF string in APP0) mismatches.
    #[error("not a JPEG: {0}")]
    NotAJpeg(&'static str),
    /// The bytes at the cursor do not form a marker.
    #[error("unrecognized marker: {0}")]
    UnrecognizedMarker(MarkerError),
    /// A recognized marker has no segment decoder.
    #[error("no decoder registered for {0:?} marker")]
    UnhandledMarker(Marker),
    /// A segment field violates its structural contract: a bad length, an
    /// out-of-range table slot, a mismatched size.
    #[error("invalid segment field: {0}")]
    BadField(String),
    /// A Huffman description cannot be packed into the 16-bit code space.
    #[error("invalid huffman table: {0}")]
    InvalidHuffmanTable(&'static str),
    /// A read ran past the end of the buffer.
    #[error("unexpected end of buffer")]
    UnexpectedEof,
}
