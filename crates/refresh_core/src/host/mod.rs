//! Contracts for the collaborators the engine orchestrates.
//!
//! The engine never touches the host application or the disk directly. It
//! goes through three capabilities:
//!
//! - [`ProjectModel`]: read access to selection, bins and clip bindings
//! - [`MediaBinding`]: the host's relink/replace primitive
//! - [`MediaFs`]: copy, delete and directory listing
//!
//! Two implementations ship with the crate: [`StdMediaFs`] over `std::fs`,
//! and [`ManifestHost`], a JSON project file standing in for a live host.

mod fs;
mod manifest;

pub use fs::StdMediaFs;
pub use manifest::{ManifestBin, ManifestClip, ManifestError, ManifestHost, ProjectManifest};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{ClipRef, ContainerRef, ProjectItem};

/// Errors reported by a host primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The handle does not refer to anything the host knows about.
    #[error("Unknown clip '{0}'")]
    UnknownClip(String),

    /// The host refused to bind the clip to the path.
    #[error("Host rejected '{path}': {reason}")]
    Rejected { path: PathBuf, reason: String },
}

impl HostError {
    /// Create a rejection error.
    pub fn rejected(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Read access to the host's project structure.
pub trait ProjectModel {
    /// Items currently selected by the user, in host order.
    fn selection(&self) -> Vec<ProjectItem>;

    /// The container the user is currently looking at, if any.
    fn current_container(&self) -> Option<ContainerRef>;

    /// Direct children of a container, in host order.
    fn children(&self, container: &ContainerRef) -> Vec<ProjectItem>;

    /// The project's root container, if a project is open.
    fn root_container(&self) -> Option<ContainerRef>;

    /// The file the clip is bound to. `None` for clips without media
    /// (timelines, generators, compound clips).
    fn bound_path(&self, clip: &ClipRef) -> Option<PathBuf>;

    /// Human-readable clip name for logs and reports.
    fn clip_name(&self, clip: &ClipRef) -> String {
        clip.key().to_string()
    }
}

/// The host's binding-update primitive.
pub trait MediaBinding {
    /// Bind `clip` to `path`. The file must already exist.
    fn relink(&self, clip: &ClipRef, path: &Path) -> Result<(), HostError>;

    /// Rename the clip. Hosts that rename on relink can keep the default.
    fn set_clip_name(&self, _clip: &ClipRef, _name: &str) -> Result<(), HostError> {
        Ok(())
    }
}

/// Filesystem primitives used by the strategies.
///
/// `remove` must report a locked or in-use file as an `Err`; callers treat
/// that as an expected, recoverable condition.
pub trait MediaFs {
    fn exists(&self, path: &Path) -> bool;

    /// Copy `src` to `dst` byte for byte, returning the number of bytes.
    fn copy(&self, src: &Path, dst: &Path) -> io::Result<u64>;

    fn remove(&self, path: &Path) -> io::Result<()>;

    /// File names (not paths) of the entries in `dir`.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;
}
