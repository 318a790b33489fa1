//! `nkrn`: command-line packer and verifier for NKRN kernel images.
//!
//! This crate is the thin shell around [`nkrn_proto`]: argument parsing,
//! file I/O, the printed reports, logging, and exit codes. All format logic
//! lives in the codec crate.
//!
//! # Modules
//!
//! - [`cli`]: `clap` definitions for `pack` and `verify`
//! - [`commands`]: subcommand implementations
//! - [`config`]: defaults and numeric literal parsing
//! - [`report`]: human-readable summaries
//! - [`error`]: tool error type
//! - [`logging`]: tracing subscriber setup

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

pub use cli::Cli;
pub use commands::run;
pub use error::{Result, ToolError};
