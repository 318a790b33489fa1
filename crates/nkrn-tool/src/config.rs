//! Tool defaults and numeric argument parsing.
//!
//! The packer writes `kernel.bin` by default and uses the bootloader's
//! standard load/entry addresses. Nothing here is read from the environment
//! or from files.

use std::num::ParseIntError;

pub use nkrn_proto::image::{DEFAULT_ENTRY_ADDR, DEFAULT_LOAD_ADDR, DEFAULT_NAME};

/// Default output path for `nkrn pack`
pub const DEFAULT_OUTPUT: &str = "kernel.bin";

/// Parse a 32-bit integer literal.
///
/// Accepts decimal, `0x` hex, `0o` octal and `0b` binary (prefixes in either
/// case), with optional `_` separators. Values above `u32::MAX` are rejected.
///
/// # Errors
///
/// Returns a message suitable for a clap usage error.
pub fn parse_u32_literal(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();
    let cleaned: String = trimmed.chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(format!("invalid number {trimmed:?}"));
    }

    u32::from_str_radix(digits, radix).map_err(|e: ParseIntError| match e.kind() {
        std::num::IntErrorKind::PosOverflow => {
            format!("{trimmed:?} does not fit in 32 bits (max 0xFFFFFFFF)")
        },
        _ => format!("invalid number {trimmed:?}: {e}"),
    })
}
