//! CRC32 engine (IEEE 802.3).
//!
//! This is the classic reflected CRC-32 used by Ethernet, gzip and zlib:
//! polynomial `0xEDB88320` (reflected form of `0x04C11DB7`), initial value
//! `0xFFFFFFFF`, final XOR `0xFFFFFFFF`. The Neutron bootloader computes the
//! same value with a 256-entry lookup table and compares it against the
//! header, so any deviation here produces images that refuse to boot.

/// Compute the CRC32 of `bytes` in one shot.
///
/// The CRC of the empty input is `0`.
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// Incremental CRC32 over a payload delivered in chunks.
///
/// Feeding the same bytes through any sequence of [`Crc32::update`] calls
/// yields the same value as [`crc32`] over the concatenation.
#[derive(Clone, Debug, Default)]
pub struct Crc32 {
    hasher: crc32fast::Hasher,
}

impl Crc32 {
    /// Start a new checksum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed more bytes.
    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Current checksum of everything fed so far.
    #[must_use]
    pub fn finalize(self) -> u32 {
        self.hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // Bit-by-bit form of the bootloader's table-driven loop.
    fn reference_crc32(bytes: &[u8]) -> u32 {
        let mut crc: u32 = 0xFFFF_FFFF;
        for &b in bytes {
            crc ^= u32::from(b);
            for _ in 0..8 {
                let mask = (crc & 1).wrapping_neg();
                crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
            }
        }
        !crc
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(crc32(b""), 0x0000_0000);
        assert_eq!(Crc32::new().finalize(), 0x0000_0000);
    }

    #[test]
    fn published_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn known_vectors() {
        assert_eq!(crc32(b"The quick brown fox jumps over the lazy dog"), 0x414F_A339);
        assert_eq!(crc32(&[0x01, 0x02, 0x03, 0x04]), 0xB63C_FBCD);
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(crc32(&all), 0x2905_8C73);
    }

    proptest! {
        #[test]
        fn matches_reference(bytes in prop::collection::vec(any::<u8>(), 0..2048)) {
            prop_assert_eq!(crc32(&bytes), reference_crc32(&bytes));
        }

        #[test]
        fn chunking_does_not_matter(
            bytes in prop::collection::vec(any::<u8>(), 0..1024),
            chunk in 1usize..64,
        ) {
            let mut crc = Crc32::new();
            for part in bytes.chunks(chunk) {
                crc.update(part);
            }
            prop_assert_eq!(crc.finalize(), crc32(&bytes));
        }

        #[test]
        fn single_byte_change_is_detected(
            bytes in prop::collection::vec(any::<u8>(), 1..512),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut mutated = bytes.clone();
            let i = index.index(mutated.len());
            mutated[i] ^= flip;
            prop_assert_ne!(crc32(&bytes), crc32(&mutated));
        }
    }
}
