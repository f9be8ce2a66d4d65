// Format constants, bitstream versions and the worst-case bound

use lzom::block::types::{
    worst_compress, BitstreamVersion, Dictionary, EOF_MARKER, M2_MARKER, M2_MAX_LEN,
    M2_MAX_OFFSET, M3_MARKER, M3_MAX_LEN, M3_MAX_OFFSET, M4_MARKER, M4_MAX_LEN, M4_MAX_OFFSET_V0,
    M4_MAX_OFFSET_V1, MAX_ZERO_RUN_LENGTH, SAFETY_MARGIN,
};

#[test]
fn distance_classes() {
    assert_eq!(M2_MAX_OFFSET, 0x0800);
    assert_eq!(M3_MAX_OFFSET, 0x4000);
    assert_eq!(M4_MAX_OFFSET_V0, 0xbfff);
    assert_eq!(M4_MAX_OFFSET_V1, 0xbffe);
}

#[test]
fn length_classes_and_markers() {
    assert_eq!((M2_MAX_LEN, M3_MAX_LEN, M4_MAX_LEN), (8, 33, 9));
    assert_eq!((M2_MARKER, M3_MARKER, M4_MARKER), (64, 32, 16));
    assert_eq!(EOF_MARKER, [17, 0, 0]);
    assert_eq!(SAFETY_MARGIN, 20);
    assert_eq!(MAX_ZERO_RUN_LENGTH, 2051);
}

#[test]
fn version_numbers() {
    assert_eq!(BitstreamVersion::default(), BitstreamVersion::V0);
    assert_eq!(BitstreamVersion::V1.number(), 1);
    assert_eq!(BitstreamVersion::from_number(0), Some(BitstreamVersion::V0));
    assert_eq!(BitstreamVersion::from_number(2), None);
    assert!(!BitstreamVersion::V0.is_versioned());
    assert_eq!(BitstreamVersion::V1.m4_max_offset(), M4_MAX_OFFSET_V1);
}

#[test]
fn worst_case_bound() {
    assert_eq!(worst_compress(0), 69);
    assert_eq!(worst_compress(16), 86);
    assert_eq!(worst_compress(4096), 4096 + 256 + 69);
}

#[test]
fn dictionary_debug_counts_used_buckets() {
    let mut d = Dictionary::new();
    d.swap(3, 9);
    let s = format!("{d:?}");
    assert!(s.contains("used: 1"), "{s}");
}
