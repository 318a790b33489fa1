//! Snapshot tests for wire format stability.
//!
//! These tests pin the literal bytes of packed images. The Neutron bootloader
//! reads the header as a packed C struct, so if any of these change the
//! images no longer boot.

use insta::assert_snapshot;
use nkrn_proto::{ImageMeta, KernelHeader, Version, encode_header, pack};

/// Helper to pack an image and hex-encode it for snapshot
fn image_to_hex(payload: &[u8], meta: &ImageMeta) -> String {
    hex::encode(pack(payload, meta).expect("packing should succeed"))
}

#[test]
fn snapshot_tamper_test_image() {
    let meta = ImageMeta {
        name: "Test".to_string(),
        version: Version::new(1, 0),
        load_addr: 0x0020_0000,
        entry_addr: 0x0020_0000,
    };

    assert_snapshot!(
        image_to_hex(&[0x01, 0x02, 0x03, 0x04], &meta),
        @"4e524b4e00000100000020000000200004000000cdfb3cb65465737400000000000000000000000000000000000000000000000000000000000000000000000001020304"
    );
}

#[test]
fn snapshot_default_meta_empty_payload() {
    assert_snapshot!(
        image_to_hex(&[], &ImageMeta::default()),
        @"4e524b4e00000100000020000000200000000000000000004e657574726f6e204b65726e656c0000000000000000000000000000000000000000000000000000"
    );
}

#[test]
fn snapshot_long_name_is_cut() {
    let meta = ImageMeta {
        name: "A very long kernel name that will not fit in forty bytes".to_string(),
        version: Version::new(3, 14),
        load_addr: 0x0008_0000,
        entry_addr: 0x0008_0800,
    };

    assert_snapshot!(
        image_to_hex(&[0xd5, 0x03, 0x20, 0x1f], &meta),
        @"4e524b4e0e000300000008000008080004000000b901042a412076657279206c6f6e67206b65726e656c206e616d6520746861742077696c6c206e6f74206600d503201f"
    );
}

#[test]
fn snapshot_extreme_field_values() {
    let meta = ImageMeta {
        name: String::new(),
        version: Version::new(u16::MAX, u16::MAX),
        load_addr: u32::MAX,
        entry_addr: 0,
    };

    assert_snapshot!(
        image_to_hex(&[0xff], &meta),
        @"4e524b4effffffffffffffff0000000001000000000000ff00000000000000000000000000000000000000000000000000000000000000000000000000000000ff"
    );
}

#[test]
fn snapshot_raw_header_encoding() {
    let bytes = encode_header(
        KernelHeader::MAGIC,
        Version::new(2, 7).pack(),
        0x0008_0000,
        0x0008_0010,
        0x1000,
        0xDEAD_BEEF,
        "Neutron",
    );

    assert_snapshot!(
        hex::encode(bytes),
        @"4e524b4e07000200000008001000080000100000efbeadde4e657574726f6e000000000000000000000000000000000000000000000000000000000000000000"
    );
}
