#![no_main]
use libfuzzer_sys::fuzz_target;
use lzom::sg::{alloc_segments, linearize, split_segments};
use lzom::{
    compress_to_vec, compress_versioned, decompress_to_vec, worst_compress, BitstreamVersion,
    Dictionary,
};

fuzz_target!(|input: &[u8]| {
    // First byte picks the version and the segment sizes; the rest is data.
    let Some((&ctl, data)) = input.split_first() else {
        return;
    };
    let version = if ctl & 1 == 0 { BitstreamVersion::V0 } else { BitstreamVersion::V1 };
    let in_page = 1 + ((ctl as usize >> 1) & 0x7) * 97;
    let out_page = 1 + (ctl as usize >> 4) * 13;

    let expected = compress_to_vec(data, version).expect("contiguous compression");
    assert!(expected.len() <= worst_compress(data.len()));

    let mut out = alloc_segments(worst_compress(data.len()), out_page);
    let mut dict = Dictionary::new();
    let n = compress_versioned(split_segments(data, in_page), &mut out, &mut dict, version)
        .expect("segmented compression");
    assert_eq!(linearize(&out, n), expected, "segmentation changed the stream");

    let recovered = decompress_to_vec(&expected, data.len()).expect("round trip");
    assert_eq!(recovered, data);
});
