//! Image verification.
//!
//! Verification is split in two steps so a caller can always show what was
//! parsed, even for a rejected image:
//!
//! 1. [`inspect`] parses the header and recomputes the payload CRC. It only
//!    fails when the input cannot hold a header at all.
//! 2. [`Report::check`] judges the report against a [`VerifyConfig`].
//!
//! [`verify`] runs both with the default policy.

use crate::{
    KernelHeader,
    crc::crc32,
    errors::{ImageError, Result},
};

/// Largest payload the Neutron bootloader accepts (4 MiB)
pub const BOOTLOADER_MAX_PAYLOAD: u32 = 4 * 1024 * 1024;

/// Payload size policy applied by [`Report::check`].
///
/// The default accepts every size the header can express, so anything
/// [`crate::pack`] produces verifies. [`VerifyConfig::bootloader`] matches the
/// limits the Neutron bootloader enforces before loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Smallest accepted payload size
    pub min_payload_size: u32,
    /// Largest accepted payload size
    pub max_payload_size: u32,
}

impl VerifyConfig {
    /// Accept any payload size.
    #[must_use]
    pub const fn permissive() -> Self {
        Self { min_payload_size: 0, max_payload_size: u32::MAX }
    }

    /// Reject what the bootloader would reject: empty payloads and payloads
    /// above [`BOOTLOADER_MAX_PAYLOAD`].
    #[must_use]
    pub const fn bootloader() -> Self {
        Self { min_payload_size: 1, max_payload_size: BOOTLOADER_MAX_PAYLOAD }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Everything parsed from an image, whether or not it is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Parsed header
    pub header: KernelHeader,
    /// Length of the whole input in bytes
    pub image_len: usize,
    /// Payload bytes actually present, at most `payload_size`
    pub payload_available: usize,
    /// CRC32 over the payload bytes actually present
    pub computed_crc: u32,
}

impl Report {
    /// Whether the magic identifies an NKRN image
    #[must_use]
    pub fn magic_ok(&self) -> bool {
        self.header.has_valid_magic()
    }

    /// Whether the stored CRC matches the recomputed one
    #[must_use]
    pub fn crc_ok(&self) -> bool {
        self.header.crc32() == self.computed_crc
    }

    /// Whether the image holds fewer payload bytes than the header claims
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.payload_available < self.header.payload_size() as usize
    }

    /// Bytes after the payload, ignored by the bootloader
    #[must_use]
    pub fn trailing_bytes(&self) -> usize {
        self.image_len - KernelHeader::SIZE - self.payload_available
    }

    /// Judge the report.
    ///
    /// Checks run in order: magic, payload length, size policy, checksum. The
    /// first failure is returned.
    ///
    /// # Errors
    ///
    /// - [`ImageError::BadMagic`] if the magic is wrong
    /// - [`ImageError::TruncatedPayload`] if the image is shorter than the
    ///   header claims
    /// - [`ImageError::SizeOutOfRange`] if `config` rejects the payload size
    /// - [`ImageError::ChecksumMismatch`] if the CRC does not match
    pub fn check(&self, config: &VerifyConfig) -> Result<()> {
        if !self.magic_ok() {
            return Err(ImageError::BadMagic {
                found: self.header.magic(),
                expected: KernelHeader::MAGIC,
            });
        }

        if self.is_truncated() {
            return Err(ImageError::TruncatedPayload {
                expected: self.header.payload_size() as usize,
                actual: self.payload_available,
            });
        }

        let size = self.header.payload_size();
        if size < config.min_payload_size || size > config.max_payload_size {
            return Err(ImageError::SizeOutOfRange {
                size,
                min: config.min_payload_size,
                max: config.max_payload_size,
            });
        }

        if !self.crc_ok() {
            return Err(ImageError::ChecksumMismatch {
                stored: self.header.crc32(),
                computed: self.computed_crc,
            });
        }

        Ok(())
    }
}

/// Parse `image` and recompute its payload CRC without judging it.
///
/// The CRC covers `image[64..64 + payload_size]`, cut short at the end of the
/// input. Bytes past the payload are never read.
///
/// # Errors
///
/// Returns [`ImageError::ImageTooSmall`] if `image` is shorter than the header.
pub fn inspect(image: &[u8]) -> Result<Report> {
    let header = KernelHeader::from_bytes(image)?;

    let body = &image[KernelHeader::SIZE..];
    let payload_available = body.len().min(header.payload_size() as usize);
    let computed_crc = crc32(&body[..payload_available]);

    Ok(Report { header, image_len: image.len(), payload_available, computed_crc })
}

/// Verify `image` with the default (permissive) policy.
///
/// # Errors
///
/// See [`verify_with`].
pub fn verify(image: &[u8]) -> Result<Report> {
    verify_with(image, &VerifyConfig::default())
}

/// Verify `image` against `config`, returning the report on success.
///
/// # Errors
///
/// [`ImageError::ImageTooSmall`] from [`inspect`], or any error from
/// [`Report::check`].
pub fn verify_with(image: &[u8], config: &VerifyConfig) -> Result<Report> {
    let report = inspect(image)?;
    report.check(config)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{ImageMeta, Version, pack};

    fn tamper_meta() -> ImageMeta {
        ImageMeta {
            name: "Test".to_string(),
            version: Version::new(1, 0),
            load_addr: 0x20_0000,
            entry_addr: 0x20_0000,
        }
    }

    #[test]
    fn tamper_detection() {
        let mut image = pack(&[0x01, 0x02, 0x03, 0x04], &tamper_meta()).expect("should pack");
        let report = verify(&image).expect("fresh image verifies");
        assert_eq!(report.computed_crc, 0xB63C_FBCD);

        image[KernelHeader::SIZE] = 0x00;

        let report = inspect(&image).expect("header still parses");
        assert_eq!(report.header.magic(), KernelHeader::MAGIC);
        assert_eq!(report.header.version(), Version::new(1, 0));
        assert_eq!(report.header.load_addr(), 0x20_0000);
        assert_eq!(report.header.entry_addr(), 0x20_0000);
        assert_eq!(report.header.name(), "Test");
        assert!(!report.crc_ok());

        assert_eq!(
            verify(&image),
            Err(ImageError::ChecksumMismatch { stored: 0xB63C_FBCD, computed: 0x0E80_9CA8 })
        );
    }

    #[test]
    fn too_small_image() {
        let result = verify(&[0u8; 10]);
        assert_eq!(result, Err(ImageError::ImageTooSmall { expected: 64, actual: 10 }));
        assert!(inspect(&[0u8; 10]).is_err());
    }

    #[test]
    fn bad_magic_wins_over_crc() {
        let mut image = pack(b"kernel", &ImageMeta::default()).expect("should pack");
        image[0..4].copy_from_slice(b"ELF\x7f");

        let report = inspect(&image).expect("header still parses");
        assert!(report.crc_ok());
        assert_eq!(
            report.check(&VerifyConfig::default()),
            Err(ImageError::BadMagic { found: 0x7F46_4C45, expected: KernelHeader::MAGIC })
        );
    }

    #[test]
    fn truncated_payload_fails_fast() {
        let image = pack(&[7u8; 100], &ImageMeta::default()).expect("should pack");
        let cut = &image[..KernelHeader::SIZE + 60];

        let report = inspect(cut).expect("header parses");
        assert!(report.is_truncated());
        assert_eq!(report.payload_available, 60);
        assert_eq!(verify(cut), Err(ImageError::TruncatedPayload { expected: 100, actual: 60 }));
    }

    #[test]
    fn header_only_image_claiming_payload() {
        let image = pack(&[1, 2, 3], &ImageMeta::default()).expect("should pack");
        let result = verify(&image[..KernelHeader::SIZE]);
        assert_eq!(result, Err(ImageError::TruncatedPayload { expected: 3, actual: 0 }));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut image = pack(b"payload", &ImageMeta::default()).expect("should pack");
        image.extend_from_slice(&[0xFF; 16]);

        let report = verify(&image).expect("trailing data is not checked");
        assert_eq!(report.trailing_bytes(), 16);
        assert_eq!(report.payload_available, 7);
    }

    #[test]
    fn bootloader_limits() {
        let empty = pack(&[], &ImageMeta::default()).expect("should pack");
        assert!(verify(&empty).is_ok());
        assert_eq!(
            verify_with(&empty, &VerifyConfig::bootloader()),
            Err(ImageError::SizeOutOfRange { size: 0, min: 1, max: BOOTLOADER_MAX_PAYLOAD })
        );

        let small = pack(&[0u8; 16], &ImageMeta::default()).expect("should pack");
        assert!(verify_with(&small, &VerifyConfig::bootloader()).is_ok());

        let tight = VerifyConfig { min_payload_size: 0, max_payload_size: 8 };
        assert_eq!(
            verify_with(&small, &tight),
            Err(ImageError::SizeOutOfRange { size: 16, min: 0, max: 8 })
        );
    }

    proptest! {
        #[test]
        fn packed_images_verify(
            payload in prop::collection::vec(any::<u8>(), 0..2048),
            name in "[ -~]{0,60}",
        ) {
            let meta = ImageMeta { name, ..ImageMeta::default() };
            let image = pack(&payload, &meta).expect("should pack");
            let report = verify(&image).expect("should verify");
            prop_assert_eq!(report.computed_crc, report.header.crc32());
            prop_assert_eq!(report.trailing_bytes(), 0);
        }

        #[test]
        fn any_payload_byte_change_is_rejected(
            payload in prop::collection::vec(any::<u8>(), 1..512),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut image = pack(&payload, &ImageMeta::default()).expect("should pack");
            let i = KernelHeader::SIZE + index.index(payload.len());
            image[i] ^= flip;
            let rejected = matches!(verify(&image), Err(ImageError::ChecksumMismatch { .. }));
            prop_assert!(rejected);
        }

        #[test]
        fn magic_corruption_is_rejected(
            payload in prop::collection::vec(any::<u8>(), 0..256),
            magic in any::<[u8; 4]>(),
        ) {
            prop_assume!(u32::from_le_bytes(magic) != KernelHeader::MAGIC);
            let mut image = pack(&payload, &ImageMeta::default()).expect("should pack");
            image[..4].copy_from_slice(&magic);
            let rejected = matches!(verify(&image), Err(ImageError::BadMagic { .. }));
            prop_assert!(rejected);
        }

        #[test]
        fn verify_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let _ = verify(&bytes);
            let _ = verify_with(&bytes, &VerifyConfig::bootloader());
        }
    }
}
