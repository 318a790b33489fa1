//! Error types for the NKRN image codec.
//!
//! All errors are structured, testable, and carry the observed values so the
//! caller can report them without re-parsing the image.

use thiserror::Error;

/// Errors that can occur while packing or verifying a kernel image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    // Structural errors
    /// Input is shorter than the fixed header size
    #[error("image too small: expected at least {expected} bytes, got {actual}")]
    ImageTooSmall {
        /// Minimum size in bytes (the header size)
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    /// Magic number in the header does not identify an NKRN image
    #[error("bad magic {found:#010X} (expected {expected:#010X})")]
    BadMagic {
        /// Magic value read from the header
        found: u32,
        /// The NKRN magic constant
        expected: u32,
    },

    /// Header claims more payload bytes than the image contains
    #[error("payload truncated: header claims {expected} bytes, but only {actual} available")]
    TruncatedPayload {
        /// Payload size from the header
        expected: usize,
        /// Payload bytes actually present after the header
        actual: usize,
    },

    /// Payload size is outside the range accepted by the verification policy
    #[error("payload size {size} out of range ({min}..={max})")]
    SizeOutOfRange {
        /// Payload size from the header
        size: u32,
        /// Smallest accepted payload size
        min: u32,
        /// Largest accepted payload size
        max: u32,
    },

    // Integrity errors
    /// Stored CRC32 does not match the payload
    #[error("CRC32 mismatch: stored {stored:#010X}, computed {computed:#010X}")]
    ChecksumMismatch {
        /// CRC32 stored in the header
        stored: u32,
        /// CRC32 recomputed over the payload
        computed: u32,
    },

    // Encoding errors
    /// Payload length does not fit the 32-bit size field
    #[error("payload of {size} bytes does not fit the 32-bit size field")]
    SizeFieldOverflow {
        /// Payload length in bytes
        size: usize,
    },
}

impl ImageError {
    /// Returns true if the error means the bytes are not an NKRN image at
    /// all, as opposed to an NKRN image that is damaged or rejected by policy.
    pub fn is_structural(&self) -> bool {
        matches!(self, ImageError::ImageTooSmall { .. } | ImageError::BadMagic { .. })
    }
}

/// Convenient Result type alias for codec operations
pub type Result<T> = std::result::Result<T, ImageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_show_hex_values() {
        let err = ImageError::BadMagic { found: 0xDEAD_BEEF, expected: 0x4E4B_524E };
        assert_eq!(err.to_string(), "bad magic 0xDEADBEEF (expected 0x4E4B524E)");

        let err = ImageError::ChecksumMismatch { stored: 0xB63C_FBCD, computed: 0x0E80_9CA8 };
        assert_eq!(err.to_string(), "CRC32 mismatch: stored 0xB63CFBCD, computed 0x0E809CA8");
    }

    #[test]
    fn structural_errors() {
        assert!(ImageError::ImageTooSmall { expected: 64, actual: 10 }.is_structural());
        assert!(ImageError::BadMagic { found: 0, expected: 1 }.is_structural());

        assert!(!ImageError::ChecksumMismatch { stored: 0, computed: 1 }.is_structural());
        assert!(!ImageError::TruncatedPayload { expected: 4, actual: 0 }.is_structural());
        assert!(!ImageError::SizeOutOfRange { size: 0, min: 1, max: 4 }.is_structural());
    }
}
