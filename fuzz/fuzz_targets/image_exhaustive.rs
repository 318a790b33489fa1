//! Exhaustive positive space fuzzer for image packing/verification
//!
//! Unlike random fuzzing (image_verify.rs), this fuzzer EXHAUSTIVELY tests
//! all combinations of:
//! - Edge-case values (0, 1, MAX) for addresses and version halves
//! - Names around the 39-byte limit, including a split multi-byte character
//! - Empty and small payloads
//!
//! Every packed image must verify and decode back to its metadata.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nkrn_proto::{ImageMeta, KernelHeader, Version, decode_header, pack, verify};

// Edge-case values for 32-bit addresses
const U32_EDGES: &[u32] = &[
    0,
    1,
    0x0008_0000, // Bootloader base
    0x0020_0000, // Default load address
    u32::MAX / 2,
    u32::MAX - 1,
    u32::MAX,
];

// Edge-case values for each version half
const U16_EDGES: &[u16] = &[0, 1, 0x00FF, 0x0100, u16::MAX - 1, u16::MAX];

// Names around the field limit
const NAMES: &[&str] = &[
    "",
    "N",
    "Neutron Kernel",
    "abcdefghijklmnopqrstuvwxyzabcdefghijklm",  // 39 bytes
    "abcdefghijklmnopqrstuvwxyzabcdefghijklmn", // 40 bytes
    "abcdefghijklmnopqrstuvwxyzabcdefghijkl\u{e9}", // é straddles the limit
];

// Payload sizes to test
const PAYLOAD_SIZES: &[usize] = &[
    0,    // Empty
    1,    // Single byte
    63,   // Just under header size
    64,   // Exactly header size
    65,   // Just over
    4096, // One page
];

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let load_addr = U32_EDGES[data[0] as usize % U32_EDGES.len()];
    let entry_addr = U32_EDGES[data[1] as usize % U32_EDGES.len()];
    let major = U16_EDGES[data[2] as usize % U16_EDGES.len()];
    let name = NAMES[data[3] as usize % NAMES.len()];

    for &minor in U16_EDGES {
        let meta = ImageMeta {
            name: name.to_string(),
            version: Version::new(major, minor),
            load_addr,
            entry_addr,
        };

        for &payload_size in PAYLOAD_SIZES {
            let payload = if payload_size <= data.len() - 4 {
                data[4..4 + payload_size].to_vec()
            } else {
                vec![0u8; payload_size]
            };

            // INVARIANT 1: Packing must succeed
            let image = pack(&payload, &meta).expect("pack should never fail for small payloads");

            // INVARIANT 2: Verification must succeed
            let report = verify(&image).expect("verify should succeed for packed image");

            // INVARIANT 3: Header decodes back to the metadata
            let header = decode_header(&image).expect("header present");
            assert_eq!(header, report.header);
            assert_eq!(header.version(), meta.version, "Version mismatch for {:?}", meta);
            assert_eq!(header.load_addr(), load_addr, "Load addr mismatch for {:?}", meta);
            assert_eq!(header.entry_addr(), entry_addr, "Entry addr mismatch for {:?}", meta);

            // INVARIANT 4: Name keeps at most 39 bytes of the input
            let kept = name.len().min(KernelHeader::NAME_MAX);
            assert_eq!(&header.name_field()[..kept], &name.as_bytes()[..kept]);
            assert!(header.name_field()[kept..].iter().all(|&b| b == 0));

            // INVARIANT 5: Encoded size must be correct
            assert_eq!(image.len(), KernelHeader::SIZE + payload.len());
        }
    }
});
