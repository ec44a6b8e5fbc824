//! A small DEFLATE (RFC 1951) decoder and gzip (RFC 1952) container reader.
//!
//! The engine is synchronous, allocation-free and single-call: give it a
//! borrowed source slice and a borrowed destination slice and it either
//! fills the front of the destination and reports how much it wrote, or
//! reports exactly why it couldn't (see [`errors::DecodeErrorStatus`]).
//! There is no streaming API, no compressor, and no zlib-format wrapper --
//! only raw DEFLATE and its gzip framing.

mod bitstream;
mod constants;
mod decoder;
pub mod errors;
mod huffman;

#[cfg(feature = "gzip")]
mod gzip;

pub use decoder::inflate;
use errors::DecodeErrorStatus;
#[cfg(feature = "gzip")]
pub use gzip::GzipDecoder;

/// Borrows a raw DEFLATE stream and decodes it into a caller-supplied
/// buffer.
pub struct DeflateDecoder<'a>
{
    source: &'a [u8]
}

impl<'a> DeflateDecoder<'a>
{
    /// Create a decoder over `source`. Nothing is read until
    /// [`decode_deflate`](Self::decode_deflate) is called.
    pub fn new(source: &'a [u8]) -> DeflateDecoder<'a>
    {
        DeflateDecoder { source }
    }

    /// Decode into `dest`, writing at most `dest.len()` bytes.
    ///
    /// Returns the number of bytes written on success. On
    /// [`DecodeErrorStatus::InsufficientOutputSpace`], retrying with a
    /// larger buffer is safe; on any other error the stream itself is
    /// malformed and retrying will not help.
    pub fn decode_deflate(&self, dest: &mut [u8]) -> Result<usize, DecodeErrorStatus>
    {
        inflate(dest, self.source)
    }

    /// Decode into a freshly allocated buffer of exactly `size_hint`
    /// bytes.
    ///
    /// This allocates once, up front -- it does not grow the buffer and
    /// retry, matching the engine's fixed-output-region contract. Pass
    /// the exact expected output length when it is known (for example
    /// from a gzip trailer's ISIZE field); otherwise an
    /// [`errors::InflateDecodeErrors`] with
    /// [`DecodeErrorStatus::InsufficientOutputSpace`] is returned.
    #[cfg(feature = "std")]
    pub fn decode_deflate_to_vec(
        &self, size_hint: usize
    ) -> Result<Vec<u8>, errors::InflateDecodeErrors>
    {
        let mut dest = vec![0_u8; size_hint];

        match inflate(&mut dest, self.source)
        {
            Ok(written) =>
            {
                dest.truncate(written);
                Ok(dest)
            }
            Err(error) => Err(errors::InflateDecodeErrors::new_with_error(error))
        }
    }
}
