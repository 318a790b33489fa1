//! Kernel header implementation with explicit little-endian layout.
//!
//! The `KernelHeader` is a fixed 64-byte structure prepended to the raw
//! kernel payload. The Neutron bootloader casts the first 64 bytes of the
//! image to its own packed C struct, so this layout is a wire contract and
//! must stay byte-exact.

use std::borrow::Cow;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    Version,
    errors::{ImageError, Result},
};

/// Fixed 64-byte kernel header (little endian)
///
/// Fields are stored as raw byte arrays, so the struct has no padding and no
/// host-endian integers. `zerocopy` checks at compile time that every 64-byte
/// pattern is a valid header, which means decoding can never fail on content,
/// only on length.
///
/// ```text
/// 0x00  magic         u32   0x4E4B524E
/// 0x04  version       u32   (major << 16) | minor
/// 0x08  load_addr     u32   where the payload is copied to
/// 0x0C  entry_addr    u32   where execution starts
/// 0x10  payload_size  u32   payload length, header excluded
/// 0x14  crc32         u32   IEEE CRC32 of the payload only
/// 0x18  name          [u8; 40]  UTF-8, NUL terminated, zero padded
/// ```
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct KernelHeader {
    magic: [u8; 4],
    version: [u8; 4],
    load_addr: [u8; 4],
    entry_addr: [u8; 4],
    payload_size: [u8; 4],
    crc32: [u8; 4],
    name: [u8; KernelHeader::NAME_LEN],
}

const _: () = assert!(size_of::<KernelHeader>() == KernelHeader::SIZE);

impl KernelHeader {
    /// Size of the serialized header (64 bytes)
    pub const SIZE: usize = 64;

    /// Magic number: `0x4E4B524E` ("NKRN" read as a big-endian word)
    pub const MAGIC: u32 = 0x4E4B_524E;

    /// Width of the name field, terminator included
    pub const NAME_LEN: usize = 40;

    /// Longest name that survives encoding, in bytes
    pub const NAME_MAX: usize = Self::NAME_LEN - 1;

    /// Offset of the name field within the header
    pub const NAME_OFFSET: usize = 0x18;

    /// Build a header carrying the NKRN magic.
    #[must_use]
    pub fn new(
        version: Version,
        load_addr: u32,
        entry_addr: u32,
        payload_size: u32,
        crc32: u32,
        name: &str,
    ) -> Self {
        Self::with_magic(Self::MAGIC, version.pack(), load_addr, entry_addr, payload_size, crc32, name)
    }

    fn with_magic(
        magic: u32,
        version: u32,
        load_addr: u32,
        entry_addr: u32,
        payload_size: u32,
        crc32: u32,
        name: &str,
    ) -> Self {
        Self {
            magic: magic.to_le_bytes(),
            version: version.to_le_bytes(),
            load_addr: load_addr.to_le_bytes(),
            entry_addr: entry_addr.to_le_bytes(),
            payload_size: payload_size.to_le_bytes(),
            crc32: crc32.to_le_bytes(),
            name: encode_name(name),
        }
    }

    /// Parse a header from the start of `bytes`.
    ///
    /// Trailing bytes (the payload) are ignored. This is a pure parse: the
    /// magic and checksum are NOT validated here, see [`crate::verify`].
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ImageTooSmall`] if fewer than 64 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, _payload) = Self::read_from_prefix(bytes).map_err(|_| {
            ImageError::ImageTooSmall { expected: Self::SIZE, actual: bytes.len() }
        })?;
        Ok(header)
    }

    /// Serialize header to its 64 wire bytes.
    #[must_use]
    #[allow(clippy::wrong_self_convention)]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(IntoBytes::as_bytes(self));
        arr
    }

    /// Get the magic number
    #[must_use]
    pub fn magic(&self) -> u32 {
        u32::from_le_bytes(self.magic)
    }

    /// Whether the magic number identifies an NKRN image
    #[must_use]
    pub fn has_valid_magic(&self) -> bool {
        self.magic() == Self::MAGIC
    }

    /// Get the raw packed version word
    #[must_use]
    pub fn raw_version(&self) -> u32 {
        u32::from_le_bytes(self.version)
    }

    /// Get the version split into major and minor
    #[must_use]
    pub fn version(&self) -> Version {
        Version::unpack(self.raw_version())
    }

    /// Get the load address
    #[must_use]
    pub fn load_addr(&self) -> u32 {
        u32::from_le_bytes(self.load_addr)
    }

    /// Get the entry address
    #[must_use]
    pub fn entry_addr(&self) -> u32 {
        u32::from_le_bytes(self.entry_addr)
    }

    /// Get the payload size claimed by the header
    #[must_use]
    pub fn payload_size(&self) -> u32 {
        u32::from_le_bytes(self.payload_size)
    }

    /// Get the stored payload CRC32
    #[must_use]
    pub fn crc32(&self) -> u32 {
        u32::from_le_bytes(self.crc32)
    }

    /// Get the raw 40-byte name field
    #[must_use]
    pub fn name_field(&self) -> &[u8; Self::NAME_LEN] {
        &self.name
    }

    /// Get the name with trailing zeros stripped.
    ///
    /// Invalid UTF-8 (including a character cut at the 39-byte limit) is
    /// replaced with U+FFFD rather than failing.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        decode_name(&self.name)
    }
}

/// Serialize all header fields into 64 bytes.
///
/// This is the low-level form of [`KernelHeader::new`] that takes the magic
/// and the packed version word as given.
#[must_use]
pub fn encode_header(
    magic: u32,
    version: u32,
    load_addr: u32,
    entry_addr: u32,
    payload_size: u32,
    crc32: u32,
    name: &str,
) -> [u8; KernelHeader::SIZE] {
    KernelHeader::with_magic(magic, version, load_addr, entry_addr, payload_size, crc32, name)
        .to_bytes()
}

/// Parse the header at the start of `bytes`; see [`KernelHeader::from_bytes`].
///
/// # Errors
///
/// Returns [`ImageError::ImageTooSmall`] if fewer than 64 bytes are given.
pub fn decode_header(bytes: &[u8]) -> Result<KernelHeader> {
    KernelHeader::from_bytes(bytes)
}

/// Encode `name` into the fixed name field.
///
/// The UTF-8 bytes are cut at [`KernelHeader::NAME_MAX`] bytes. The cut is
/// byte-level, so a multi-byte character straddling the limit is split. At
/// least one terminating zero always follows.
#[must_use]
pub fn encode_name(name: &str) -> [u8; KernelHeader::NAME_LEN] {
    let bytes = name.as_bytes();
    let len = bytes.len().min(KernelHeader::NAME_MAX);
    let mut field = [0u8; KernelHeader::NAME_LEN];
    field[..len].copy_from_slice(&bytes[..len]);
    field
}

/// Decode a name field: strip trailing zeros, then decode UTF-8 lossily.
#[must_use]
pub fn decode_name(field: &[u8]) -> Cow<'_, str> {
    let end = field.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&field[..end])
}

// Manual Debug implementation (can't derive due to packed repr)
impl std::fmt::Debug for KernelHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelHeader")
            .field("magic", &format!("{:#010x}", self.magic()))
            .field("version", &self.version())
            .field("load_addr", &format!("{:#010x}", self.load_addr()))
            .field("entry_addr", &format!("{:#010x}", self.entry_addr()))
            .field("payload_size", &self.payload_size())
            .field("crc32", &format!("{:#010x}", self.crc32()))
            .field("name", &self.name())
            .finish()
    }
}

// Manual PartialEq implementation (can't derive due to packed repr)
impl PartialEq for KernelHeader {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for KernelHeader {}
