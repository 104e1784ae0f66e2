//! JSON project manifest acting as the host.
//!
//! The manifest stores bins and clips in flat lists. Bins reference their
//! children by id, so any graph shape (including cycles) can be expressed.
//! Relinking rewrites the clip's path and, for a manifest loaded from a
//! file, saves the manifest before reporting success, so a binding the
//! engine acts on (by deleting the previous revision) is already on disk.
//! `save()` writes the whole manifest back atomically (temp file, then
//! rename).

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{HostError, MediaBinding, ProjectModel};
use crate::models::{ClipRef, ContainerRef, ProjectItem};

/// Errors that can occur while loading or saving a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read project manifest: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse project manifest: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate id '{0}' in project manifest")]
    DuplicateId(String),

    #[error("'{from}' references unknown id '{id}'")]
    UnknownReference { from: String, id: String },

    #[error("Manifest was not loaded from a file; use save_to()")]
    NoSourcePath,
}

/// On-disk project layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project display name.
    #[serde(default)]
    pub name: String,
    /// Id of the root bin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Id of the bin the user has open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_bin: Option<String>,
    /// Ids of selected clips or bins.
    #[serde(default)]
    pub selection: Vec<String>,
    #[serde(default)]
    pub bins: Vec<ManifestBin>,
    #[serde(default)]
    pub clips: Vec<ManifestClip>,
}

/// A bin and the ids of its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestBin {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Child bin ids, in display order.
    #[serde(default)]
    pub bins: Vec<String>,
    /// Child clip ids, in display order.
    #[serde(default)]
    pub clips: Vec<String>,
}

/// A clip and the file it is bound to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestClip {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Bound media file. Absent for clips without media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Host backed by a [`ProjectManifest`].
pub struct ManifestHost {
    source_path: Option<PathBuf>,
    manifest: Mutex<ProjectManifest>,
    clip_index: HashMap<String, usize>,
    bin_index: HashMap<String, usize>,
}

impl ManifestHost {
    /// Build a host from an in-memory manifest, validating ids and references.
    pub fn from_manifest(manifest: ProjectManifest) -> Result<Self, ManifestError> {
        let mut clip_index = HashMap::new();
        for (i, clip) in manifest.clips.iter().enumerate() {
            if clip_index.insert(clip.id.clone(), i).is_some() {
                return Err(ManifestError::DuplicateId(clip.id.clone()));
            }
        }

        let mut bin_index = HashMap::new();
        for (i, bin) in manifest.bins.iter().enumerate() {
            if clip_index.contains_key(&bin.id) || bin_index.insert(bin.id.clone(), i).is_some() {
                return Err(ManifestError::DuplicateId(bin.id.clone()));
            }
        }

        let check_bin = |from: &str, id: &str| -> Result<(), ManifestError> {
            if bin_index.contains_key(id) {
                Ok(())
            } else {
                Err(ManifestError::UnknownReference {
                    from: from.to_string(),
                    id: id.to_string(),
                })
            }
        };

        if let Some(root) = &manifest.root {
            check_bin("root", root)?;
        }
        if let Some(current) = &manifest.current_bin {
            check_bin("current_bin", current)?;
        }
        for bin in &manifest.bins {
            for child in &bin.bins {
                check_bin(&bin.id, child)?;
            }
            for clip in &bin.clips {
                if !clip_index.contains_key(clip) {
                    return Err(ManifestError::UnknownReference {
                        from: bin.id.clone(),
                        id: clip.clone(),
                    });
                }
            }
        }
        for id in &manifest.selection {
            if !clip_index.contains_key(id) && !bin_index.contains_key(id) {
                return Err(ManifestError::UnknownReference {
                    from: "selection".to_string(),
                    id: id.clone(),
                });
            }
        }

        Ok(Self {
            source_path: None,
            manifest: Mutex::new(manifest),
            clip_index,
            bin_index,
        })
    }

    /// Load a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let manifest: ProjectManifest = serde_json::from_str(&content)?;
        let mut host = Self::from_manifest(manifest)?;
        host.source_path = Some(path.to_path_buf());
        tracing::debug!(
            "Loaded project manifest {} ({} bins, {} clips)",
            path.display(),
            host.bin_index.len(),
            host.clip_index.len()
        );
        Ok(host)
    }

    /// File the manifest was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Copy of the current manifest state.
    pub fn snapshot(&self) -> ProjectManifest {
        self.manifest.lock().clone()
    }

    /// Write the manifest back to the file it was loaded from.
    pub fn save(&self) -> Result<(), ManifestError> {
        let path = self.source_path.as_ref().ok_or(ManifestError::NoSourcePath)?;
        self.save_to(path)
    }

    /// Write the manifest to `path` atomically.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&*self.manifest.lock())?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, path)?;

        tracing::debug!("Saved project manifest {}", path.display());
        Ok(())
    }

    fn item(&self, id: &str) -> Option<ProjectItem> {
        if self.clip_index.contains_key(id) {
            Some(ProjectItem::Clip(ClipRef::new(id)))
        } else if self.bin_index.contains_key(id) {
            Some(ProjectItem::Container(ContainerRef::new(id)))
        } else {
            None
        }
    }
}

impl ProjectModel for ManifestHost {
    fn selection(&self) -> Vec<ProjectItem> {
        let manifest = self.manifest.lock();
        manifest.selection.iter().filter_map(|id| self.item(id)).collect()
    }

    fn current_container(&self) -> Option<ContainerRef> {
        self.manifest
            .lock()
            .current_bin
            .as_ref()
            .map(ContainerRef::new)
    }

    fn children(&self, container: &ContainerRef) -> Vec<ProjectItem> {
        let Some(&index) = self.bin_index.get(container.key()) else {
            return Vec::new();
        };
        let manifest = self.manifest.lock();
        let bin = &manifest.bins[index];
        bin.bins
            .iter()
            .map(|id| ProjectItem::Container(ContainerRef::new(id)))
            .chain(bin.clips.iter().map(|id| ProjectItem::Clip(ClipRef::new(id))))
            .collect()
    }

    fn root_container(&self) -> Option<ContainerRef> {
        self.manifest.lock().root.as_ref().map(ContainerRef::new)
    }

    fn bound_path(&self, clip: &ClipRef) -> Option<PathBuf> {
        let &index = self.clip_index.get(clip.key())?;
        self.manifest.lock().clips[index].path.clone()
    }

    fn clip_name(&self, clip: &ClipRef) -> String {
        match self.clip_index.get(clip.key()) {
            Some(&index) => {
                let manifest = self.manifest.lock();
                let name = &manifest.clips[index].name;
                if name.is_empty() {
                    clip.key().to_string()
                } else {
                    name.clone()
                }
            }
            None => clip.key().to_string(),
        }
    }
}

impl MediaBinding for ManifestHost {
    fn relink(&self, clip: &ClipRef, path: &Path) -> Result<(), HostError> {
        let &index = self
            .clip_index
            .get(clip.key())
            .ok_or_else(|| HostError::UnknownClip(clip.key().to_string()))?;
        if !path.is_file() {
            return Err(HostError::rejected(path, "file does not exist"));
        }

        let previous = std::mem::replace(
            &mut self.manifest.lock().clips[index].path,
            Some(path.to_path_buf()),
        );
        if let Some(source) = &self.source_path {
            if let Err(e) = self.save_to(source) {
                self.manifest.lock().clips[index].path = previous;
                return Err(HostError::rejected(
                    path,
                    format!("project could not be saved: {}", e),
                ));
            }
        }
        Ok(())
    }

    fn set_clip_name(&self, clip: &ClipRef, name: &str) -> Result<(), HostError> {
        let &index = self
            .clip_index
            .get(clip.key())
            .ok_or_else(|| HostError::UnknownClip(clip.key().to_string()))?;
        self.manifest.lock().clips[index].name = name.to_string();
        Ok(())
    }
}
