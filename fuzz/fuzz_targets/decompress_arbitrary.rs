#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics and out-of-bounds writes are not.
    for cap in [0usize, 64, 4096, data.len().saturating_mul(255).min(1 << 20)] {
        let mut dst = vec![0u8; cap];
        if let Ok(n) = lzom::decompress_safe(data, &mut dst) {
            assert!(n <= cap);
        }
    }
});
