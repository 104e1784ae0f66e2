//! Per-clip error types for the remap strategies.
//!
//! Every variant is confined to the clip it happened on; the batch driver
//! records it and moves on to the next clip.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::host::HostError;
use crate::models::FailureKind;

/// Error from applying a strategy to one clip.
#[derive(Error, Debug)]
pub enum RemapError {
    /// The host refused the new binding. The old binding is unchanged.
    #[error("Host rejected binding to \"{}\": {source}", .path.display())]
    HostRejected {
        path: PathBuf,
        #[source]
        source: HostError,
    },

    /// Copying the revision file failed before the host was called.
    #[error("Unable to copy \"{}\" to \"{}\": {source}", .src.display(), .dst.display())]
    CopyFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file the clip would be bound to does not exist.
    #[error("Media file not found: \"{}\"", .path.display())]
    MissingMedia { path: PathBuf },

    /// The media directory could not be listed to find the next tag.
    #[error("Unable to scan \"{}\" for revisions: {source}", .dir.display())]
    ScanFailed {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The clip has no bound path, or the path cannot be decomposed.
    #[error("Clip has no usable media path: {0}")]
    Unbound(String),
}

impl RemapError {
    /// Create a host rejection error.
    pub fn host_rejected(path: impl Into<PathBuf>, source: HostError) -> Self {
        Self::HostRejected {
            path: path.into(),
            source,
        }
    }

    /// Create a copy failure error.
    pub fn copy_failed(src: impl Into<PathBuf>, dst: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CopyFailed {
            src: src.into(),
            dst: dst.into(),
            source,
        }
    }

    /// Create a missing media error.
    pub fn missing_media(path: impl Into<PathBuf>) -> Self {
        Self::MissingMedia { path: path.into() }
    }

    /// Create a directory scan error.
    pub fn scan_failed(dir: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ScanFailed {
            dir: dir.into(),
            source,
        }
    }

    /// Create an unbound clip error.
    pub fn unbound(detail: impl Into<String>) -> Self {
        Self::Unbound(detail.into())
    }

    /// Classification used in reports.
    pub fn kind(&self) -> FailureKind {
        match self {
            RemapError::HostRejected { .. } => FailureKind::HostBindingRejected,
            RemapError::CopyFailed { .. } => FailureKind::CopyIoFailure,
            RemapError::MissingMedia { .. } => FailureKind::MissingMedia,
            RemapError::ScanFailed { .. } => FailureKind::ScanFailure,
            RemapError::Unbound(_) => FailureKind::Unbound,
        }
    }
}

/// Result type for strategy operations.
pub type RemapResult<T> = Result<T, RemapError>;
