//! Error types for the `nkrn` command.
//!
//! Codec failures are wrapped unchanged; I/O failures keep the path that
//! caused them so the message names the file.

use std::{io, path::PathBuf};

use nkrn_proto::ImageError;
use thiserror::Error;

/// Errors surfaced by the `nkrn` subcommands.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Input file does not exist
    #[error("input file not found: {}", path.display())]
    InputNotFound {
        /// Path given on the command line
        path: PathBuf,
    },

    /// Reading a file failed
    #[error("failed to read {}", path.display())]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing a file failed
    #[error("failed to write {}", path.display())]
    Write {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Packing or verification failed
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl ToolError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            ToolError::InputNotFound { path }
        } else {
            ToolError::Read { path, source }
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ToolError::Write { path: path.into(), source }
    }
}

/// Convenient Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;
