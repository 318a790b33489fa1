//! Random input fuzzer for image verification.
//!
//! Arbitrary bytes must never panic the verifier, and whatever it accepts
//! must satisfy the image invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nkrn_proto::{KernelHeader, VerifyConfig, crc32, decode_header, inspect, verify_with};

fuzz_target!(|data: &[u8]| {
    let Ok(report) = inspect(data) else {
        assert!(data.len() < KernelHeader::SIZE);
        return;
    };

    // decode is a pure parse of the first 64 bytes
    let header = decode_header(data).expect("inspect succeeded");
    assert_eq!(header.to_bytes()[..], data[..KernelHeader::SIZE]);
    assert!(report.payload_available <= header.payload_size() as usize);

    for config in [VerifyConfig::permissive(), VerifyConfig::bootloader()] {
        if let Ok(verified) = verify_with(data, &config) {
            // INVARIANT 1: accepted images carry the magic
            assert_eq!(verified.header.magic(), KernelHeader::MAGIC);

            // INVARIANT 2: the whole payload is present
            let size = verified.header.payload_size() as usize;
            assert!(data.len() >= KernelHeader::SIZE + size);

            // INVARIANT 3: the stored CRC covers exactly the payload
            let payload = &data[KernelHeader::SIZE..KernelHeader::SIZE + size];
            assert_eq!(crc32(payload), verified.header.crc32());
        }
    }
});
