//! Per-batch bookkeeping of superseded revision files.
//!
//! After a clip is rebound, the revision file it used to point at is stale.
//! The store remembers it per clip and deletes it once the caller confirms
//! the new binding took. Deletion is best effort: a file the host still has
//! open stays on disk and is reported as left for later. Originals are never
//! accepted as deletion candidates.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::host::MediaFs;
use crate::models::ClipRef;
use crate::naming::RevisionNamer;

/// Result of a cleanup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CleanupOutcome {
    /// The stale revision file was removed.
    Deleted { path: PathBuf },
    /// The file could not be removed (usually locked by the host) and was
    /// left on disk. Later tag scans skip past it.
    LeftForLater { path: PathBuf, reason: String },
    /// Nothing to clean up.
    NotApplicable,
}

impl CleanupOutcome {
    pub fn is_left_for_later(&self) -> bool {
        matches!(self, CleanupOutcome::LeftForLater { .. })
    }
}

/// Pending deletions for the current batch.
#[derive(Debug)]
pub struct RevisionStore {
    namer: RevisionNamer,
    delete_enabled: bool,
    pending: HashMap<ClipRef, PathBuf>,
    left_behind: Vec<PathBuf>,
}

impl RevisionStore {
    /// Create an empty store.
    ///
    /// With `delete_enabled` false every commit reports
    /// [`CleanupOutcome::NotApplicable`] and nothing is removed.
    pub fn new(namer: RevisionNamer, delete_enabled: bool) -> Self {
        Self {
            namer,
            delete_enabled,
            pending: HashMap::new(),
            left_behind: Vec::new(),
        }
    }

    /// Remember `path` for deletion once `clip`'s remap succeeds.
    ///
    /// Returns false, and records nothing, when `path` is not a revision
    /// file.
    pub fn record_pending(&mut self, clip: &ClipRef, path: &Path) -> bool {
        if !self.namer.is_revision(path) {
            tracing::error!(
                "Refusing to schedule non-revision file \"{}\" for deletion",
                path.display()
            );
            return false;
        }
        self.pending.insert(clip.clone(), path.to_path_buf());
        true
    }

    /// Delete the file recorded for `clip`, if any.
    ///
    /// A failed delete is logged and returned as
    /// [`CleanupOutcome::LeftForLater`]; it never fails the clip.
    pub fn commit_or_skip_delete(&mut self, clip: &ClipRef, fs: &dyn MediaFs) -> CleanupOutcome {
        let Some(path) = self.pending.remove(clip) else {
            return CleanupOutcome::NotApplicable;
        };
        if !self.delete_enabled {
            return CleanupOutcome::NotApplicable;
        }

        tracing::debug!("Deleting file \"{}\"", path.display());
        match fs.remove(&path) {
            Ok(()) => CleanupOutcome::Deleted { path },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("\"{}\" is already gone", path.display());
                CleanupOutcome::NotApplicable
            }
            Err(e) => {
                tracing::warn!(
                    "Unable to delete \"{}\", leaving it for later: {}",
                    path.display(),
                    e
                );
                self.left_behind.push(path.clone());
                CleanupOutcome::LeftForLater {
                    path,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Forget the pending deletion for `clip` (its remap failed).
    pub fn discard(&mut self, clip: &ClipRef) {
        self.pending.remove(clip);
    }

    /// Best-effort removal of a revision file that was never bound, such as
    /// a copy the host refused. Not tied to any clip.
    pub fn remove_orphan(&mut self, path: &Path, fs: &dyn MediaFs) -> CleanupOutcome {
        let clip = ClipRef::new(format!("orphan:{}", path.display()));
        if !self.record_pending(&clip, path) {
            return CleanupOutcome::NotApplicable;
        }
        self.commit_or_skip_delete(&clip, fs)
    }

    /// Whether a deletion is waiting for `clip`.
    pub fn has_pending(&self, clip: &ClipRef) -> bool {
        self.pending.contains_key(clip)
    }

    /// Files that could not be deleted during this batch.
    pub fn left_for_later(&self) -> &[PathBuf] {
        &self.left_behind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StdMediaFs;
    use std::fs;
    use tempfile::tempdir;

    struct LockedFs;

    impl MediaFs for LockedFs {
        fn exists(&self, path: &Path) -> bool {
            path.exists()
        }
        fn copy(&self, src: &Path, dst: &Path) -> io::Result<u64> {
            fs::copy(src, dst)
        }
        fn remove(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file is in use by another process",
            ))
        }
        fn list_dir(&self, _dir: &Path) -> io::Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    fn store() -> RevisionStore {
        RevisionStore::new(RevisionNamer::default(), true)
    }

    #[test]
    fn deletes_recorded_revision() {
        let dir = tempdir().unwrap();
        let stale = dir.path().join("shot--refresh--0001.mov");
        fs::write(&stale, b"x").unwrap();
        let clip = ClipRef::new("c1");

        let mut store = store();
        assert!(store.record_pending(&clip, &stale));
        assert!(store.has_pending(&clip));
        assert_eq!(
            store.commit_or_skip_delete(&clip, &StdMediaFs),
            CleanupOutcome::Deleted {
                path: stale.clone()
            }
        );
        assert!(!stale.exists());
        assert!(!store.has_pending(&clip));
    }

    #[test]
    fn never_accepts_an_original() {
        let dir = tempdir().unwrap();
        let original = dir.path().join("shot.mov");
        fs::write(&original, b"x").unwrap();
        let clip = ClipRef::new("c1");

        let mut store = store();
        assert!(!store.record_pending(&clip, &original));
        assert_eq!(
            store.commit_or_skip_delete(&clip, &StdMediaFs),
            CleanupOutcome::NotApplicable
        );
        assert!(original.exists());
    }

    #[test]
    fn locked_file_is_left_for_later() {
        let clip = ClipRef::new("c1");
        let stale = PathBuf::from("/media/shot--refresh--0003.mov");

        let mut store = store();
        store.record_pending(&clip, &stale);
        let outcome = store.commit_or_skip_delete(&clip, &LockedFs);

        assert!(outcome.is_left_for_later());
        assert_eq!(store.left_for_later(), &[stale]);
    }

    #[test]
    fn already_removed_revision_is_not_left_for_later() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("shot--refresh--0002.mov");
        let clip = ClipRef::new("c1");

        let mut store = store();
        assert!(store.record_pending(&clip, &gone));
        assert_eq!(
            store.commit_or_skip_delete(&clip, &StdMediaFs),
            CleanupOutcome::NotApplicable
        );
        assert!(store.left_for_later().is_empty());
    }

    #[test]
    fn nothing_pending_is_not_applicable() {
        let mut store = store();
        assert_eq!(
            store.commit_or_skip_delete(&ClipRef::new("c1"), &StdMediaFs),
            CleanupOutcome::NotApplicable
        );
    }

    #[test]
    fn discard_drops_pending() {
        let clip = ClipRef::new("c1");
        let mut store = store();
        store.record_pending(&clip, Path::new("/m/a--refresh--0001.mov"));
        store.discard(&clip);
        assert_eq!(
            store.commit_or_skip_delete(&clip, &LockedFs),
            CleanupOutcome::NotApplicable
        );
        assert!(store.left_for_later().is_empty());
    }

    #[test]
    fn disabled_deletion_keeps_files() {
        let dir = tempdir().unwrap();
        let stale = dir.path().join("shot--refresh--0001.mov");
        fs::write(&stale, b"x").unwrap();
        let clip = ClipRef::new("c1");

        let mut store = RevisionStore::new(RevisionNamer::default(), false);
        store.record_pending(&clip, &stale);
        assert_eq!(
            store.commit_or_skip_delete(&clip, &StdMediaFs),
            CleanupOutcome::NotApplicable
        );
        assert!(stale.exists());
    }
}
