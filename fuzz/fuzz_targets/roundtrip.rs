#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1
    {
        let compression_level = data[0] % 11;
        let data = &data[1..];
        let orig_len = data.len();

        let compressed = miniz_oxide::deflate::compress_to_vec(data, compression_level);
        let decoder = tinyflate::DeflateDecoder::new(&compressed);

        let mut dest = vec![0_u8; orig_len];
        let written = decoder
            .decode_deflate(&mut dest)
            .expect("failed to decompress valid compressed data");

        assert_eq!(
            &dest[..written],
            data,
            "the decompressed data doesn't match the original data"
        );
    }
});
