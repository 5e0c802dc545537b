//! Error types for ghettonet-hosts

use std::path::PathBuf;

/// Result type for ghettonet-hosts operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating, reading or updating the local
/// hosts file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No default hosts location is known for this platform
    #[error("Hosts location unknown for this platform, please pass a path")]
    LocationUnknown,

    /// The resolved hosts path does not point at a regular file
    #[error("Hosts not at {path}, please pass a path")]
    NotAFile { path: PathBuf },

    /// The existing hosts file could not be renamed aside before writing
    #[error(
        "The existing hosts file at {path} could not be renamed. \
         You need to run this program with system rights."
    )]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure reading or writing a file
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse failure from ghettonet-core
    #[error(transparent)]
    Core(#[from] ghettonet_core::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
