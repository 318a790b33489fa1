//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use nkrn_proto::{ImageMeta, Version, VerifyConfig};

use crate::config::{
    DEFAULT_ENTRY_ADDR, DEFAULT_LOAD_ADDR, DEFAULT_NAME, DEFAULT_OUTPUT, parse_u32_literal,
};

const LONG_ABOUT: &str = "Pack raw kernel binaries into NKRN images for the Neutron bootloader, \
or verify existing images.

An NKRN image is a 64-byte header (magic, version, load and entry address, payload size, \
CRC32, name) followed by the raw payload. Addresses accept decimal, 0x hex, 0o octal and \
0b binary literals.";

#[derive(Parser, Debug)]
#[command(name = "nkrn", version, about = "NKRN kernel image packer", long_about = LONG_ABOUT)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prepend an NKRN header to a raw binary
    Pack(PackArgs),
    /// Check the magic and CRC32 of a packed image
    Verify(VerifyArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PackArgs {
    /// Raw input binary (e.g. mykernel.bin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output image path
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Kernel name, at most 39 bytes are kept
    #[arg(short = 'n', long = "name", default_value = DEFAULT_NAME)]
    pub name: String,

    /// Load address
    #[arg(
        long = "load",
        value_name = "ADDR",
        value_parser = parse_u32_literal,
        default_value_t = DEFAULT_LOAD_ADDR
    )]
    pub load_addr: u32,

    /// Entry address
    #[arg(
        long = "entry",
        value_name = "ADDR",
        value_parser = parse_u32_literal,
        default_value_t = DEFAULT_ENTRY_ADDR
    )]
    pub entry_addr: u32,

    /// Major version (upper 16 bits of the version word)
    #[arg(long = "version-major", value_name = "N", default_value_t = 1)]
    pub version_major: u16,

    /// Minor version (lower 16 bits of the version word)
    #[arg(long = "version-minor", value_name = "N", default_value_t = 0)]
    pub version_minor: u16,
}

impl PackArgs {
    /// Image metadata described by the arguments.
    pub fn meta(&self) -> ImageMeta {
        ImageMeta {
            name: self.name.clone(),
            version: Version::new(self.version_major, self.version_minor),
            load_addr: self.load_addr,
            entry_addr: self.entry_addr,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Packed image to verify
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Also reject payload sizes the bootloader refuses (empty or above 4 MiB)
    #[arg(long = "bootloader-limits", action = ArgAction::SetTrue)]
    pub bootloader_limits: bool,
}

impl VerifyArgs {
    /// Verification policy selected by the arguments.
    pub fn config(&self) -> VerifyConfig {
        if self.bootloader_limits { VerifyConfig::bootloader() } else { VerifyConfig::default() }
    }
}
