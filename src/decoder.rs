//! The block inflater and top-level inflate loop.
//!
//! An [`Inflater`] owns exactly the state described for one decompression
//! call: a bit reader over the borrowed source, a borrowed destination
//! slice with an explicit write cursor, and the two reusable Huffman
//! trees rebuilt per block. Nothing here allocates.

use crate::bitstream::BitReader;
use crate::constants::{
    DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN, DEFLATE_BLOCKTYPE_FIXED_HUFFMAN,
    DEFLATE_BLOCKTYPE_UNCOMPRESSED, DEFLATE_NUM_PRECODE_SYMS, DEFLATE_PRECODE_LENS_PERMUTATION,
    DIST_BASE, DIST_EXTRA_BITS, LENGTH_BASE, LENGTH_EXTRA_BITS
};
use crate::errors::DecodeErrorStatus;
use crate::huffman::HuffmanTree;

/// Size of the scratch buffer the dynamic-tree decoder RLE-expands code
/// lengths into: the worst case is 286 litlen + 30 distance lengths.
const MAX_LENS: usize = 320;

pub(crate) struct Inflater<'src, 'dst>
{
    bits:    BitReader<'src>,
    dest:    &'dst mut [u8],
    written: usize,
    ltree:   HuffmanTree,
    dtree:   HuffmanTree
}

impl<'src, 'dst> Inflater<'src, 'dst>
{
    pub(crate) fn new(source: &'src [u8], dest: &'dst mut [u8]) -> Self
    {
        Inflater {
            bits: BitReader::new(source),
            dest,
            written: 0,
            ltree: HuffmanTree::empty(),
            dtree: HuffmanTree::empty()
        }
    }

    /// Run the top-level inflate loop: read BFINAL/BTYPE per block,
    /// dispatch, and stop once a final block completes.
    pub(crate) fn run(&mut self) -> Result<usize, DecodeErrorStatus>
    {
        loop
        {
            let bfinal = self.bits.get_bits(1);
            let btype = self.bits.get_bits(2);

            match btype
            {
                DEFLATE_BLOCKTYPE_UNCOMPRESSED => self.inflate_stored()?,
                DEFLATE_BLOCKTYPE_FIXED_HUFFMAN => self.inflate_fixed()?,
                DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN => self.inflate_dynamic()?,
                _ => return Err(DecodeErrorStatus::CorruptData("reserved block type 3"))
            }

            if bfinal == 1
            {
                break;
            }
        }

        // The stream may retain unread bits within the last refilled
        // byte; that is expected and not itself an error.
        if self.bits.overflow
        {
            return Err(DecodeErrorStatus::CorruptData("truncated stream"));
        }

        Ok(self.written)
    }

    fn inflate_stored(&mut self) -> Result<(), DecodeErrorStatus>
    {
        self.bits.align_to_byte();

        let header = self.bits.remaining_source();
        if header.len() < 4
        {
            return Err(DecodeErrorStatus::CorruptData(
                "truncated stored block header"
            ));
        }

        let len = u16::from_le_bytes([header[0], header[1]]);
        let nlen = u16::from_le_bytes([header[2], header[3]]);

        if len != !nlen
        {
            return Err(DecodeErrorStatus::CorruptData(
                "stored block length/complement mismatch"
            ));
        }

        self.bits.advance_source(4);

        let len = usize::from(len);
        let body = self.bits.remaining_source();

        if body.len() < len
        {
            return Err(DecodeErrorStatus::CorruptData("truncated stored block"));
        }
        if self.dest.len() - self.written < len
        {
            return Err(DecodeErrorStatus::InsufficientOutputSpace);
        }

        self.dest[self.written..self.written + len].copy_from_slice(&body[..len]);
        self.bits.advance_source(len);
        self.written += len;

        Ok(())
    }

    fn inflate_fixed(&mut self) -> Result<(), DecodeErrorStatus>
    {
        self.ltree.build_fixed_litlen();
        self.dtree.build_fixed_dist();

        self.inflate_block_data()
    }

    fn inflate_dynamic(&mut self) -> Result<(), DecodeErrorStatus>
    {
        self.decode_trees()?;

        self.inflate_block_data()
    }

    /// Read HLIT/HDIST/HCLEN, the code-length code, and RLE-decode the
    /// literal/length and distance code-length vectors from it.
    fn decode_trees(&mut self) -> Result<(), DecodeErrorStatus>
    {
        let hlit = self.bits.get_bits_base(5, 257) as usize;
        let hdist = self.bits.get_bits_base(5, 1) as usize;
        let hclen = self.bits.get_bits_base(4, 4) as usize;

        if hlit > 286 || hdist > 30
        {
            return Err(DecodeErrorStatus::CorruptData("HLIT or HDIST out of range"));
        }

        let mut precode_lengths = [0_u8; DEFLATE_NUM_PRECODE_SYMS];
        for &slot in DEFLATE_PRECODE_LENS_PERMUTATION.iter().take(hclen)
        {
            precode_lengths[usize::from(slot)] = self.bits.get_bits(3) as u8;
        }

        let mut precode_tree = HuffmanTree::empty();
        precode_tree.build(&precode_lengths)?;

        if precode_tree.max_sym == -1
        {
            return Err(DecodeErrorStatus::CorruptData("empty code-length tree"));
        }

        let total = hlit + hdist;
        let mut lengths = [0_u8; MAX_LENS];
        let mut num = 0_usize;

        while num < total
        {
            let sym = precode_tree.decode_symbol(&mut self.bits);

            if sym > precode_tree.max_sym
            {
                return Err(DecodeErrorStatus::CorruptData(
                    "code-length symbol out of range"
                ));
            }

            let (value, repeat) = match sym
            {
                0..=15 => (sym as u8, 1_usize),
                16 =>
                {
                    if num == 0
                    {
                        return Err(DecodeErrorStatus::CorruptData(
                            "repeat-previous code length at position 0"
                        ));
                    }
                    (lengths[num - 1], 3 + self.bits.get_bits(2) as usize)
                }
                17 => (0, 3 + self.bits.get_bits(3) as usize),
                18 => (0, 11 + self.bits.get_bits(7) as usize),
                _ => return Err(DecodeErrorStatus::CorruptData("invalid code-length symbol"))
            };

            if num + repeat > total
            {
                return Err(DecodeErrorStatus::CorruptData(
                    "code-length run overshoots HLIT + HDIST"
                ));
            }

            for slot in &mut lengths[num..num + repeat]
            {
                *slot = value;
            }
            num += repeat;
        }

        if lengths[256] == 0
        {
            return Err(DecodeErrorStatus::CorruptData(
                "literal/length tree has no end-of-block symbol"
            ));
        }

        self.ltree.build(&lengths[..hlit])?;
        self.dtree.build(&lengths[hlit..hlit + hdist])?;

        Ok(())
    }

    /// Shared literal/length + distance symbol loop for fixed and dynamic
    /// blocks. Returns once the end-of-block symbol is decoded.
    fn inflate_block_data(&mut self) -> Result<(), DecodeErrorStatus>
    {
        loop
        {
            let sym = self.ltree.decode_symbol(&mut self.bits);

            if self.bits.overflow
            {
                return Err(DecodeErrorStatus::CorruptData("truncated stream"));
            }

            if sym == 256
            {
                return Ok(());
            }

            if sym < 256
            {
                if self.written == self.dest.len()
                {
                    return Err(DecodeErrorStatus::InsufficientOutputSpace);
                }
                self.dest[self.written] = sym as u8;
                self.written += 1;
                continue;
            }

            if sym > self.ltree.max_sym || sym - 257 > 28 || self.dtree.max_sym == -1
            {
                return Err(DecodeErrorStatus::CorruptData(
                    "length symbol out of range"
                ));
            }

            let code = (sym - 257) as usize;
            let length = self
                .bits
                .get_bits_base(LENGTH_EXTRA_BITS[code], LENGTH_BASE[code]) as usize;

            let dist_sym = self.dtree.decode_symbol(&mut self.bits);

            if dist_sym > self.dtree.max_sym || dist_sym > 29
            {
                return Err(DecodeErrorStatus::CorruptData(
                    "distance symbol out of range"
                ));
            }

            let dist_code = dist_sym as usize;
            let offset = self
                .bits
                .get_bits_base(DIST_EXTRA_BITS[dist_code], DIST_BASE[dist_code])
                as usize;

            if offset > self.written
            {
                return Err(DecodeErrorStatus::CorruptData(
                    "back-reference distance exceeds bytes already written"
                ));
            }
            if self.dest.len() - self.written < length
            {
                return Err(DecodeErrorStatus::InsufficientOutputSpace);
            }

            // Forward, ascending-index copy: for offset < length this
            // must read bytes this same loop just wrote, propagating
            // run-length patterns rather than stale source data.
            for i in 0..length
            {
                self.dest[self.written + i] = self.dest[self.written + i - offset];
            }
            self.written += length;
        }
    }
}

/// Decompress a raw DEFLATE stream from `source` into `dest`.
///
/// On success, returns the number of bytes written to the front of
/// `dest`; on error, nothing about the remainder of `dest` should be
/// trusted.
pub fn inflate(dest: &mut [u8], source: &[u8]) -> Result<usize, DecodeErrorStatus>
{
    Inflater::new(source, dest).run()
}
