//! Gzip (RFC 1952) container framing around the raw DEFLATE engine.
//!
//! This is deliberately thin: validate the fixed header, skip whichever
//! optional fields the flag byte says are present, hand the remaining
//! payload to [`inflate`], then check the trailer's CRC32 and ISIZE
//! against what actually came out.

use crate::decoder::inflate;
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};

const FLAG_FHCRC: u8 = 1 << 1;
const FLAG_FEXTRA: u8 = 1 << 2;
const FLAG_FNAME: u8 = 1 << 3;
const FLAG_FCOMMENT: u8 = 1 << 4;

/// Borrows a gzip-framed byte stream and decodes its DEFLATE payload.
pub struct GzipDecoder<'a>
{
    data: &'a [u8]
}

impl<'a> GzipDecoder<'a>
{
    /// Create a decoder over `data`. Nothing is read until
    /// [`decode`](Self::decode) is called.
    pub fn new(data: &'a [u8]) -> GzipDecoder<'a>
    {
        GzipDecoder { data }
    }

    /// Validate header and trailer, decode the payload, and return the
    /// decompressed bytes.
    ///
    /// The trailer's ISIZE field sizes the output buffer exactly once;
    /// there is no adaptive growth, so a stream whose payload disagrees
    /// with its own advertised ISIZE surfaces as a data error rather than
    /// silently reallocating.
    pub fn decode(&self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let payload_start = self.validate_header().map_err(InflateDecodeErrors::new_with_error)?;

        if self.data.len() < payload_start + 8
        {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::InsufficientData
            ));
        }

        let payload_end = self.data.len() - 8;
        let trailer = &self.data[payload_end..];

        let expected_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let expected_isize = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);

        let mut dest = vec![0_u8; expected_isize as usize];

        let written = inflate(&mut dest, &self.data[payload_start..payload_end])
            .map_err(InflateDecodeErrors::new_with_error)?;
        dest.truncate(written);

        if written as u32 != expected_isize
        {
            return Err(InflateDecodeErrors::new(
                DecodeErrorStatus::MismatchedISize(expected_isize, written as u32),
                dest
            ));
        }

        let actual_crc = crc32fast::hash(&dest);

        if actual_crc != expected_crc
        {
            return Err(InflateDecodeErrors::new(
                DecodeErrorStatus::MismatchedCRC(expected_crc, actual_crc),
                dest
            ));
        }

        Ok(dest)
    }

    /// Validate the fixed 10-byte header (`ID1 ID2 CM FLG MTIME[4] XFL OS`)
    /// and skip any flag-gated optional fields in RFC 1952 order: FEXTRA,
    /// FNAME, FCOMMENT, FHCRC. Returns the offset of the DEFLATE payload.
    fn validate_header(&self) -> Result<usize, DecodeErrorStatus>
    {
        if self.data.len() < 10
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }

        if self.data[0] != 0x1F || self.data[1] != 0x8B
        {
            return Err(DecodeErrorStatus::CorruptData("bad gzip magic bytes"));
        }
        if self.data[2] != 0x08
        {
            return Err(DecodeErrorStatus::CorruptData(
                "unsupported gzip compression method"
            ));
        }

        let flags = self.data[3];
        let mut pos = 10;

        if flags & FLAG_FEXTRA != 0
        {
            if self.data.len() < pos + 2
            {
                return Err(DecodeErrorStatus::CorruptData("truncated FEXTRA length"));
            }
            let xlen = usize::from(u16::from_le_bytes([self.data[pos], self.data[pos + 1]]));
            pos += 2;

            if self.data.len() < pos + xlen
            {
                return Err(DecodeErrorStatus::CorruptData("truncated FEXTRA field"));
            }
            pos += xlen;
        }

        if flags & FLAG_FNAME != 0
        {
            pos = skip_nul_terminated(self.data, pos)?;
        }

        if flags & FLAG_FCOMMENT != 0
        {
            pos = skip_nul_terminated(self.data, pos)?;
        }

        if flags & FLAG_FHCRC != 0
        {
            if self.data.len() < pos + 2
            {
                return Err(DecodeErrorStatus::CorruptData("truncated FHCRC field"));
            }
            pos += 2;
        }

        Ok(pos)
    }
}

fn skip_nul_terminated(data: &[u8], start: usize) -> Result<usize, DecodeErrorStatus>
{
    let mut pos = start;

    loop
    {
        match data.get(pos)
        {
            Some(0) => return Ok(pos + 1),
            Some(_) => pos += 1,
            None => return Err(DecodeErrorStatus::CorruptData("unterminated gzip header field"))
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn gzip_encode(bytes: &[u8]) -> Vec<u8>
    {
        use std::io::Write;
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn empty_gzip_stream_decodes_to_empty_output()
    {
        // The literal end-to-end fixture: an empty payload stored block.
        let data: [u8; 20] = [
            0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00
        ];
        let decoded = GzipDecoder::new(&data).decode().unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn round_trips_through_flate2_gzip_encoder()
    {
        let text = b"The quick brown fox jumps over the lazy dog";
        let encoded = gzip_encode(text);

        let decoded = GzipDecoder::new(&encoded).decode().unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn corrupted_payload_byte_is_rejected()
    {
        let encoded = gzip_encode(b"some reasonably compressible text text text text");
        let mut corrupted = encoded.clone();
        // Flip a byte inside the compressed payload (well past the header).
        corrupted[12] ^= 0xFF;

        assert!(GzipDecoder::new(&corrupted).decode().is_err());
    }

    #[test]
    fn header_with_fname_and_fcomment_is_skipped()
    {
        use std::io::Write;

        let mut encoder = flate2::GzBuilder::new()
            .filename("hello.txt")
            .comment("a comment")
            .write(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"payload text").unwrap();
        let encoded = encoder.finish().unwrap();

        let decoded = GzipDecoder::new(&encoded).decode().unwrap();
        assert_eq!(decoded, b"payload text");
    }

    #[test]
    fn truncated_header_is_insufficient_data()
    {
        let data = [0x1F, 0x8B, 0x08];
        assert!(GzipDecoder::new(&data).decode().is_err());
    }

    #[test]
    fn bad_magic_is_corrupt_data()
    {
        let mut encoded = gzip_encode(b"abc");
        encoded[0] = 0x00;
        assert!(GzipDecoder::new(&encoded).decode().is_err());
    }
}
