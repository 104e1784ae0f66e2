//! Opaque handles to host-owned project objects.
//!
//! Handles wrap a key issued by the host. They are only meaningful when
//! handed back to the host that produced them, and only for the duration of
//! one batch run. The engine never persists them.

use std::fmt;

use serde::Serialize;

/// Handle to a clip managed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClipRef(String);

impl ClipRef {
    /// Wrap a host-issued clip key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The host key this handle wraps.
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a container (bin/folder) managed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContainerRef(String);

impl ContainerRef {
    /// Wrap a host-issued container key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The host key this handle wraps.
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entry returned by host listings: either a clip or a nested container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectItem {
    Clip(ClipRef),
    Container(ContainerRef),
}

impl ProjectItem {
    /// The clip handle, if this item is a clip.
    pub fn as_clip(&self) -> Option<&ClipRef> {
        match self {
            ProjectItem::Clip(clip) => Some(clip),
            ProjectItem::Container(_) => None,
        }
    }
}
