#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut dest = vec![0_u8; data.len().min(1 << 20) + 64];
    let _ = tinyflate::inflate(&mut dest, data);
});
