//! Canonical Huffman tree construction and symbol decoding.
//!
//! A tree is built fresh per block from a vector of per-symbol code
//! lengths; it never outlives the block it was built for.

use crate::bitstream::BitReader;
use crate::constants::{DEFLATE_MAX_CODEWORD_LENGTH, DEFLATE_NUM_LITLEN_SYMS};
use crate::errors::DecodeErrorStatus;

/// A compact canonical-Huffman decode table, reused across blocks.
pub(crate) struct HuffmanTree
{
    /// Number of codes of each length; index 0 is always zero.
    count: [u16; DEFLATE_MAX_CODEWORD_LENGTH + 1],
    /// Symbols in ascending canonical-code order, grouped by length.
    trans: [u16; DEFLATE_NUM_LITLEN_SYMS],
    /// Largest symbol with a non-zero length, or -1 if the tree is empty.
    pub max_sym: i32
}

impl HuffmanTree
{
    pub(crate) fn empty() -> Self
    {
        HuffmanTree {
            count:   [0; DEFLATE_MAX_CODEWORD_LENGTH + 1],
            trans:   [0; DEFLATE_NUM_LITLEN_SYMS],
            max_sym: -1
        }
    }

    /// Build a canonical Huffman tree from a vector of code lengths, one
    /// entry per symbol, each in `0..=15`.
    ///
    /// Rejects overfull codes. Incompleteness is tolerated only for the
    /// empty tree and the degenerate single-symbol tree (see module docs
    /// on [`HuffmanTree::decode_symbol`]); anything else is a data error.
    pub(crate) fn build(&mut self, lengths: &[u8]) -> Result<(), DecodeErrorStatus>
    {
        self.count = [0; DEFLATE_MAX_CODEWORD_LENGTH + 1];
        self.max_sym = -1;

        for (sym, &len) in lengths.iter().enumerate()
        {
            if len != 0
            {
                self.max_sym = sym as i32;
            }
            self.count[usize::from(len)] += 1;
        }
        self.count[0] = 0;

        let mut offsets = [0_u16; DEFLATE_MAX_CODEWORD_LENGTH + 1];
        let mut max = 1_u32;
        let mut sum = 0_u32;

        for len in 0..=DEFLATE_MAX_CODEWORD_LENGTH
        {
            if u32::from(self.count[len]) > max
            {
                return Err(DecodeErrorStatus::CorruptData(
                    "Huffman code oversubscribed at this length"
                ));
            }
            max = 2 * (max - u32::from(self.count[len]));

            offsets[len] = sum as u16;
            sum += u32::from(self.count[len]);
        }

        // A complete code drives `max` to zero; a single-symbol degenerate
        // tree is legal too, with exactly one length-1 code.
        if (sum > 1 && max > 0) || (sum == 1 && self.count[1] != 1)
        {
            return Err(DecodeErrorStatus::CorruptData(
                "Huffman code is incomplete"
            ));
        }

        for (sym, &len) in lengths.iter().enumerate()
        {
            if len != 0
            {
                let pos = &mut offsets[usize::from(len)];
                self.trans[usize::from(*pos)] = sym as u16;
                *pos += 1;
            }
        }

        // The single-symbol case never actually emits its code 1; plant a
        // guard so that decoding that unused half yields an out-of-range
        // symbol and forces a data error rather than needing a branch on
        // the hot decode path.
        if sum == 1
        {
            self.count[1] = 2;
            self.trans[1] = (self.max_sym + 1) as u16;
        }

        Ok(())
    }

    /// Build the fixed literal/length tree defined by RFC 1951: lengths
    /// 8/9/7/8 for symbol ranges 0-143/144-255/256-279/280-287.
    ///
    /// `build()` tracks `max_sym` as the last non-zero-length index it
    /// scans, which would land on 287 here (symbols 286/287 are present in
    /// the length vector but reserved, never legally emitted). Overridden
    /// to 285 afterwards, matching `tinf_build_fixed_trees`'s explicit
    /// `lt->max_sym = 285;` rather than deriving it from the length scan.
    pub(crate) fn build_fixed_litlen(&mut self)
    {
        let mut lengths = [0_u8; DEFLATE_NUM_LITLEN_SYMS];
        lengths[0..144].fill(8);
        lengths[144..256].fill(9);
        lengths[256..280].fill(7);
        lengths[280..288].fill(8);

        self.build(&lengths).expect("fixed litlen tree is always legal");
        self.max_sym = 285;
    }

    /// Build the fixed distance tree defined by RFC 1951: all 32 distance
    /// symbols at length 5 (codes 30/31 are unused but still part of this
    /// uniform code).
    ///
    /// As in [`build_fixed_litlen`](Self::build_fixed_litlen), `build()`
    /// would otherwise leave `max_sym` at 31; overridden to 29 to match
    /// `tinf_build_fixed_trees`'s `dt->max_sym = 29;`.
    pub(crate) fn build_fixed_dist(&mut self)
    {
        let lengths = [5_u8; 32];

        self.build(&lengths).expect("fixed distance tree is always legal");
        self.max_sym = 29;
    }

    /// Decode one symbol, walking the canonical code bit by bit.
    ///
    /// For each length `len` tried, `cur` tracks how many longer-code
    /// slots remain unused and `sum` tracks how many shorter codes have
    /// already been accounted for; the loop stops as soon as `cur`
    /// underflows past zero, at which point `trans[sum + cur]` is the
    /// decoded symbol. Length never exceeds 15 for a valid tree. This
    /// makes no bounds check on the returned symbol -- callers that
    /// depend on a particular symbol range must check it against
    /// `max_sym` themselves.
    pub(crate) fn decode_symbol(&self, bits: &mut BitReader) -> i32
    {
        let mut sum = 0_i32;
        let mut cur = 0_i32;
        let mut len = 0_usize;

        loop
        {
            cur = 2 * cur + bits.get_bits(1) as i32;
            len += 1;
            sum += i32::from(self.count[len]);
            cur -= i32::from(self.count[len]);

            if cur < 0
            {
                break;
            }
        }

        i32::from(self.trans[(sum + cur) as usize])
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn fixed_litlen_tree_decodes_eob()
    {
        let mut tree = HuffmanTree::empty();
        tree.build_fixed_litlen();
        assert_eq!(tree.max_sym, 285);

        // Symbol 256 (end-of-block) has fixed code length 7 and value
        // 0b0000000 per RFC 1951's canonical assignment.
        let data = [0b0000_0000_u8, 0b0000_0000];
        let mut bits = BitReader::new(&data);
        assert_eq!(tree.decode_symbol(&mut bits), 256);
    }

    #[test]
    fn fixed_dist_tree_has_uniform_length()
    {
        let mut tree = HuffmanTree::empty();
        tree.build_fixed_dist();
        assert_eq!(tree.max_sym, 29);
    }

    #[test]
    fn empty_tree_rejects_with_oversubscription_style_error()
    {
        let tree = HuffmanTree::empty();
        assert_eq!(tree.max_sym, -1);
    }

    #[test]
    fn degenerate_single_symbol_tree_builds()
    {
        let mut tree = HuffmanTree::empty();
        let mut lengths = [0_u8; 4];
        lengths[2] = 1;
        tree.build(&lengths).unwrap();
        assert_eq!(tree.max_sym, 2);
        assert_eq!(tree.count[1], 2);
        assert_eq!(tree.trans[1], 3);
    }

    #[test]
    fn oversubscribed_code_is_rejected()
    {
        let mut tree = HuffmanTree::empty();
        // Two symbols both claiming the only length-1 code is impossible.
        let lengths = [1_u8, 1, 1];
        assert!(tree.build(&lengths).is_err());
    }
}
