//! Image type combining header and payload.
//!
//! An `Image` is the unit the bootloader loads:
//! - 64-byte little-endian header
//! - Raw payload bytes, copied verbatim to `load_addr`

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    KernelHeader, Version,
    crc::crc32,
    errors::{ImageError, Result},
};

/// Default kernel name written by the packer
pub const DEFAULT_NAME: &str = "Neutron Kernel";

/// Default load address: where the bootloader copies the payload
pub const DEFAULT_LOAD_ADDR: u32 = 0x0020_0000;

/// Default entry address: where the bootloader jumps
pub const DEFAULT_ENTRY_ADDR: u32 = 0x0020_0000;

/// Caller-supplied metadata for a packed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    /// Kernel name, cut to 39 bytes when encoded
    pub name: String,
    /// Kernel version
    pub version: Version,
    /// Address the payload is copied to
    pub load_addr: u32,
    /// Address execution starts at
    pub entry_addr: u32,
}

impl Default for ImageMeta {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            version: Version::default(),
            load_addr: DEFAULT_LOAD_ADDR,
            entry_addr: DEFAULT_ENTRY_ADDR,
        }
    }
}

/// Complete kernel image
///
/// Layout on disk:
/// `[KernelHeader: 64 bytes] + [payload: payload_size bytes]`
///
/// # Invariants
///
/// - `payload.len()` equals `header.payload_size()`.
/// - `header.crc32()` is the CRC32 of `payload`.
///
/// Both are established by [`Image::pack`], the only constructor, so an
/// `Image` value always verifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    header: KernelHeader,
    payload: Bytes,
}

impl Image {
    /// Wrap `payload` with a freshly computed header.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::SizeFieldOverflow`] if the payload is longer than
    /// the 32-bit size field can describe.
    pub fn pack(payload: impl Into<Bytes>, meta: &ImageMeta) -> Result<Self> {
        let payload = payload.into();
        let payload_size = payload_size_field(payload.len())?;
        let crc = crc32(&payload);

        let header = KernelHeader::new(
            meta.version,
            meta.load_addr,
            meta.entry_addr,
            payload_size,
            crc,
            &meta.name,
        );

        Ok(Self { header, payload })
    }

    /// The image header
    #[must_use]
    pub fn header(&self) -> &KernelHeader {
        &self.header
    }

    /// The payload bytes
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Total encoded length: header plus payload
    #[must_use]
    pub fn len(&self) -> usize {
        KernelHeader::SIZE + self.payload.len()
    }

    /// Always false: an image has at least its header
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Encode image into buffer
    ///
    /// Writes: `[header (64 bytes)] + [payload]`
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.header.to_bytes());
        dst.put_slice(&self.payload);
    }

    /// Encode image into a fresh buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.len());
        self.encode(&mut buf);
        buf.freeze()
    }
}

/// Pack `payload` and return the encoded image bytes.
///
/// # Errors
///
/// Returns [`ImageError::SizeFieldOverflow`] if the payload does not fit the
/// 32-bit size field.
pub fn pack(payload: &[u8], meta: &ImageMeta) -> Result<Vec<u8>> {
    let image = Image::pack(Bytes::copy_from_slice(payload), meta)?;
    let mut out = Vec::with_capacity(image.len());
    image.encode(&mut out);
    Ok(out)
}

fn payload_size_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| ImageError::SizeFieldOverflow { size: len })
}
