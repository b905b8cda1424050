//! Error types for the core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading snapshots or producing frames.
#[derive(Debug, Error)]
pub enum Error {
    /// A snapshot record is structurally invalid (missing or duplicate `id`,
    /// unparseable JSON, unsupported identifier type).
    ///
    /// `snapshot` is the 1-based record number in the input.
    #[error("malformed snapshot #{snapshot}: {reason}")]
    MalformedSnapshot { snapshot: usize, reason: String },

    /// Reading input or writing output failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A frame sink could not finish its artifact.
    #[error("export to {} failed: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    /// A frame could not be drawn consistently.
    #[error("render failed: {0}")]
    Render(String),

    /// A still frame was requested for a snapshot that does not exist.
    #[error("frame {index} out of range (input has {total} snapshots)")]
    FrameOutOfRange { index: usize, total: usize },
}

impl Error {
    pub(crate) fn malformed(snapshot: usize, reason: impl Into<String>) -> Self {
        Error::MalformedSnapshot {
            snapshot,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
