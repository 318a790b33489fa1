//! Kernel version as stored in the header.

use std::fmt;

/// Kernel version, packed into the header as `(major << 16) | minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major version (upper 16 bits)
    pub major: u16,
    /// Minor version (lower 16 bits)
    pub minor: u16,
}

impl Version {
    /// Create a version from its parts.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Pack into the 32-bit header word.
    #[must_use]
    pub const fn pack(self) -> u32 {
        ((self.major as u32) << 16) | self.minor as u32
    }

    /// Split a 32-bit header word into major and minor.
    ///
    /// Every `u32` is a valid version, so this never fails.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn unpack(raw: u32) -> Self {
        Self { major: (raw >> 16) as u16, minor: (raw & 0xFFFF) as u16 }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl From<u32> for Version {
    fn from(raw: u32) -> Self {
        Self::unpack(raw)
    }
}

impl From<Version> for u32 {
    fn from(version: Version) -> Self {
        version.pack()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
