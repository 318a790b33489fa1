//! # NKRN: Kernel Image Format
//!
//! This crate implements the container format the Neutron bootloader loads:
//! a fixed 64-byte header followed by the raw kernel payload.
//!
//! ```text
//! ┌───────────────────────────┬──────────────────────────────┐
//! │ KernelHeader (64 bytes)   │ payload (payload_size bytes) │
//! │ little endian, no padding │ copied verbatim to load_addr │
//! └───────────────────────────┴──────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! - [`pack`] / [`Image::pack`]: wrap a payload with a header carrying its
//!   size and CRC32.
//! - [`decode_header`]: pure parse of the 64 header bytes.
//! - [`inspect`]: parse and recompute the CRC, for reporting.
//! - [`verify`] / [`verify_with`]: inspect, then reject bad magic, truncated
//!   payloads, sizes outside the [`VerifyConfig`] policy, and CRC mismatches.
//!
//! ## Implementation Notes
//!
//! - **Explicit Layout**: Header fields are byte arrays converted with
//!   `to_le_bytes`/`from_le_bytes`. [`zerocopy`](https://docs.rs/zerocopy)
//!   verifies at compile time that the struct is exactly 64 bytes with no
//!   padding, and golden-byte tests pin the layout.
//!
//! - **Bootloader Agreement**: The CRC32 is the standard IEEE 802.3 checksum
//!   the bootloader recomputes natively. The name field is cut at the byte
//!   level, as the bootloader's reader expects.
//!
//! - **No I/O**: Every operation is a pure function over byte buffers. Nothing
//!   here prints, reads files, or holds global state, so all operations are
//!   reentrant and safe to call from any number of threads.
#![warn(missing_docs)]

pub mod crc;
pub mod errors;
pub mod header;
pub mod image;
pub mod verify;
pub mod version;

pub use crc::{Crc32, crc32};
pub use errors::{ImageError, Result};
pub use header::{KernelHeader, decode_header, encode_header};
pub use image::{Image, ImageMeta, pack};
pub use verify::{Report, VerifyConfig, inspect, verify, verify_with};
pub use version::Version;
