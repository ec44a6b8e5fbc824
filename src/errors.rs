use std::fmt::{Debug, Formatter};

/// Numeric status codes inherited from the classic `tinf_uncompress`-style
/// C ABI. Preserved so that anything branching on the underlying status
/// code (rather than matching on [`DecodeErrorStatus`]) keeps working.
pub mod status
{
    /// Decompression completed successfully.
    pub const OK: i32 = 0;
    /// The compressed stream does not conform to the format.
    pub const DATA_ERROR: i32 = -3;
    /// The output region is too small to hold the decompressed data.
    pub const BUF_ERROR: i32 = -5;
}

/// A struct returned when decompression fails
pub struct InflateDecodeErrors
{
    /// reason why decompression fails
    pub error: DecodeErrorStatus,
    /// Decoded data up until that decompression error
    pub data:  Vec<u8>
}

impl InflateDecodeErrors
{
    /// Create a new decode wrapper with data being
    /// how many bytes we actually decoded before hitting an error
    pub fn new(error: DecodeErrorStatus, data: Vec<u8>) -> InflateDecodeErrors
    {
        InflateDecodeErrors { error, data }
    }
    /// Create a new decode wrapper with an empty vector
    pub fn new_with_error(error: DecodeErrorStatus) -> InflateDecodeErrors
    {
        InflateDecodeErrors::new(error, vec![])
    }
}

impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        writeln!(f, "{:?}", self.error)
    }
}

pub enum DecodeErrorStatus
{
    /// Input data is not enough to construct
    /// a full output
    InsufficientData,
    /// The destination region ran out of space before the stream ended.
    ///
    /// Potentially recoverable: retry with a larger output buffer.
    InsufficientOutputSpace,
    /// Anything that isn't significant
    Generic(&'static str),
    GenericStr(String),
    /// Input data was malformed.
    CorruptData(&'static str),
    /// Output CRC does not match the gzip trailer.
    MismatchedCRC(u32, u32),
    /// Output length does not match the gzip trailer ISIZE field.
    MismatchedISize(u32, u32)
}

impl DecodeErrorStatus
{
    /// The numeric status code a C embedder would observe for this error.
    pub const fn code(&self) -> i32
    {
        match self
        {
            Self::InsufficientOutputSpace => status::BUF_ERROR,
            _ => status::DATA_ERROR
        }
    }
}

impl Debug for DecodeErrorStatus
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::InsufficientData => writeln!(f, "Insufficient data"),
            Self::InsufficientOutputSpace => writeln!(f, "Output buffer is too small"),
            Self::Generic(reason) => writeln!(f, "{reason}"),
            Self::GenericStr(reason) => writeln!(f, "{reason}"),
            Self::CorruptData(reason) => writeln!(f, "Corrupt data: {reason}"),
            Self::MismatchedCRC(expected, found) =>
            {
                writeln!(f, "Mismatched CRC, expected {expected} but found {found}")
            }
            Self::MismatchedISize(expected, found) =>
            {
                writeln!(
                    f,
                    "Mismatched ISIZE, expected {expected} but found {found}"
                )
            }
        }
    }
}
