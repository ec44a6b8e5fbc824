//! Read-only tables for the DEFLATE block format.

/// Number of symbols in the code-length alphabet used to RLE-encode a
/// dynamic block's literal/length and distance code lengths.
pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;

/// Order in which the code-length alphabet's own code lengths are stored
/// in a dynamic block header.
pub static DEFLATE_PRECODE_LENS_PERMUTATION: [u8; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Maximum codeword length across all codes.
pub const DEFLATE_MAX_CODEWORD_LENGTH: usize = 15;

/// Maximum literal/length symbol count (0..=285 used, 286/287 reserved).
pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;

/// Maximum distance symbol count (0..=29 used, 30/31 reserved/unreachable).
pub const DEFLATE_NUM_DIST_SYMS: usize = 30;

/// Block types carried in the 2-bit BTYPE field.
pub const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u32 = 0;
pub const DEFLATE_BLOCKTYPE_FIXED_HUFFMAN: u32 = 1;
pub const DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN: u32 = 2;

/// Extra bits consumed after each length code 257..=285.
pub static LENGTH_EXTRA_BITS: [u32; DEFLATE_NUM_DIST_SYMS] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0, 127,
];

/// Base length each length code represents before adding its extra bits.
pub static LENGTH_BASE: [u32; DEFLATE_NUM_DIST_SYMS] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258, 0,
];

/// Extra bits consumed after each distance code 0..=29.
pub static DIST_EXTRA_BITS: [u32; DEFLATE_NUM_DIST_SYMS] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// Base distance each distance code represents before adding its extra
/// bits.
pub static DIST_BASE: [u32; DEFLATE_NUM_DIST_SYMS] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];
