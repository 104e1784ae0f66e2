//! Remapping strategies.
//!
//! Each strategy rebinds one clip through the host's binding primitive:
//!
//! ```text
//! Relink            shot.mov                  -> shot.mov (same path, forces a re-read)
//! CopyAndReplace    shot.mov                  -> shot--refresh--0001.mov
//!                   shot--refresh--0001.mov   -> shot--refresh--0002.mov (0001 deleted)
//! RevertToOriginal  shot--refresh--0002.mov   -> shot.mov (0002 deleted)
//! ```
//!
//! The host is only ever asked to bind to a file that exists at that moment.

mod copy_replace;
mod errors;
mod relink;
mod revert;

pub use copy_replace::CopyAndReplace;
pub use errors::{RemapError, RemapResult};
pub use relink::RelinkSamePath;
pub use revert::RevertToOriginal;

use std::path::{Path, PathBuf};

use crate::config::CleanupSettings;
use crate::host::{MediaBinding, MediaFs, ProjectModel};
use crate::models::{ClipRef, MediaPath, StrategyKind};
use crate::naming::RevisionNamer;
use crate::store::{CleanupOutcome, RevisionStore};

/// Collaborators and settings a strategy works with.
pub struct RemapContext<'a> {
    pub project: &'a dyn ProjectModel,
    pub binding: &'a dyn MediaBinding,
    pub fs: &'a dyn MediaFs,
    pub namer: &'a RevisionNamer,
    pub cleanup: &'a CleanupSettings,
}

/// What a strategy did to a clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemapOutcome {
    /// The clip is now bound to `target`.
    Remapped {
        target: PathBuf,
        cleanup: CleanupOutcome,
    },
    /// Nothing to do for this clip (not an error).
    Skipped(String),
}

/// A remapping strategy.
pub trait RemapStrategy {
    fn kind(&self) -> StrategyKind;

    /// Rebind `clip`, currently bound to `current`.
    ///
    /// On error the clip's binding must be unchanged.
    fn apply(
        &self,
        ctx: &RemapContext<'_>,
        store: &mut RevisionStore,
        clip: &ClipRef,
        current: &MediaPath,
    ) -> RemapResult<RemapOutcome>;
}

/// The strategy implementing `kind`.
pub fn strategy_for(kind: StrategyKind) -> Box<dyn RemapStrategy> {
    match kind {
        StrategyKind::Relink => Box::new(RelinkSamePath),
        StrategyKind::CopyAndReplace => Box::new(CopyAndReplace),
        StrategyKind::RevertToOriginal => Box::new(RevertToOriginal),
    }
}

/// Bind `clip` to `path`, failing early if the file is gone.
fn bind(ctx: &RemapContext<'_>, clip: &ClipRef, path: &Path) -> RemapResult<()> {
    if !ctx.fs.exists(path) {
        return Err(RemapError::missing_media(path));
    }
    ctx.binding
        .relink(clip, path)
        .map_err(|e| RemapError::host_rejected(path, e))
}

/// Some hosts keep the old clip name after a replace; set it explicitly.
/// Failure is harmless and only logged.
fn rename_clip(ctx: &RemapContext<'_>, clip: &ClipRef, path: &Path) {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return;
    };
    if let Err(e) = ctx.binding.set_clip_name(clip, name) {
        tracing::debug!("Could not rename clip '{}' to '{}': {}", clip, name, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{
        HostError, ManifestBin, ManifestClip, ManifestHost, ProjectManifest, StdMediaFs,
    };
    use crate::models::FailureKind;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        dir: TempDir,
        host: ManifestHost,
        namer: RevisionNamer,
        cleanup: CleanupSettings,
    }

    impl Fixture {
        /// One clip "c1" bound to `bound`, with `files` present on disk.
        fn new(files: &[&str], bound: &str) -> Self {
            let dir = tempdir().unwrap();
            for name in files {
                fs::write(dir.path().join(name), format!("content of {name}")).unwrap();
            }
            let manifest = ProjectManifest {
                name: "fixture".to_string(),
                root: Some("root".to_string()),
                current_bin: Some("root".to_string()),
                selection: vec!["c1".to_string()],
                bins: vec![ManifestBin {
                    id: "root".to_string(),
                    name: "Master".to_string(),
                    bins: vec![],
                    clips: vec!["c1".to_string()],
                }],
                clips: vec![ManifestClip {
                    id: "c1".to_string(),
                    name: bound.to_string(),
                    path: Some(dir.path().join(bound)),
                }],
            };
            Self {
                host: ManifestHost::from_manifest(manifest).unwrap(),
                dir,
                namer: RevisionNamer::default(),
                cleanup: CleanupSettings::default(),
            }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn files(&self) -> Vec<String> {
            let mut names = StdMediaFs.list_dir(self.dir.path()).unwrap();
            names.sort();
            names
        }

        fn apply_with(
            &self,
            strategy: &dyn RemapStrategy,
            binding: &dyn MediaBinding,
        ) -> RemapResult<RemapOutcome> {
            let ctx = RemapContext {
                project: &self.host,
                binding,
                fs: &StdMediaFs,
                namer: &self.namer,
                cleanup: &self.cleanup,
            };
            let clip = ClipRef::new("c1");
            let current = MediaPath::parse(self.host.bound_path(&clip).unwrap()).unwrap();
            let mut store = RevisionStore::new(self.namer.clone(), true);
            strategy.apply(&ctx, &mut store, &clip, &current)
        }

        fn apply(&self, strategy: &dyn RemapStrategy) -> RemapResult<RemapOutcome> {
            self.apply_with(strategy, &self.host)
        }

        fn bound(&self) -> PathBuf {
            self.host.bound_path(&ClipRef::new("c1")).unwrap()
        }
    }

    struct RejectingHost;

    impl MediaBinding for RejectingHost {
        fn relink(&self, _clip: &ClipRef, path: &Path) -> Result<(), HostError> {
            Err(HostError::rejected(path, "media offline"))
        }
    }

    #[test]
    fn relink_keeps_path() {
        let fx = Fixture::new(&["shot.mov"], "shot.mov");
        let outcome = fx.apply(&RelinkSamePath).unwrap();
        assert_eq!(
            outcome,
            RemapOutcome::Remapped {
                target: fx.path("shot.mov"),
                cleanup: CleanupOutcome::NotApplicable,
            }
        );
        assert_eq!(fx.files(), vec!["shot.mov"]);
    }

    #[test]
    fn relink_missing_file_fails() {
        let fx = Fixture::new(&[], "shot.mov");
        let err = fx.apply(&RelinkSamePath).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingMedia);
    }

    #[test]
    fn relink_rejected_by_host() {
        let fx = Fixture::new(&["shot.mov"], "shot.mov");
        let err = fx.apply_with(&RelinkSamePath, &RejectingHost).unwrap_err();
        assert_eq!(err.kind(), FailureKind::HostBindingRejected);
    }

    #[test]
    fn copy_from_original_creates_first_revision() {
        let fx = Fixture::new(&["shot.mov"], "shot.mov");
        let outcome = fx.apply(&CopyAndReplace).unwrap();

        let revision = fx.path("shot--refresh--0001.mov");
        assert_eq!(
            outcome,
            RemapOutcome::Remapped {
                target: revision.clone(),
                cleanup: CleanupOutcome::NotApplicable,
            }
        );
        assert_eq!(fx.bound(), revision);
        assert_eq!(fs::read_to_string(&revision).unwrap(), "content of shot.mov");
        assert_eq!(fx.files(), vec!["shot--refresh--0001.mov", "shot.mov"]);
        assert_eq!(fx.host.clip_name(&ClipRef::new("c1")), "shot--refresh--0001.mov");
    }

    #[test]
    fn copy_from_revision_recovers_origin_and_deletes_previous() {
        let fx = Fixture::new(
            &["image-1.tif", "image-1--refresh--0002.tif"],
            "image-1--refresh--0002.tif",
        );
        let outcome = fx.apply(&CopyAndReplace).unwrap();

        assert_eq!(
            outcome,
            RemapOutcome::Remapped {
                target: fx.path("image-1--refresh--0003.tif"),
                cleanup: CleanupOutcome::Deleted {
                    path: fx.path("image-1--refresh--0002.tif"),
                },
            }
        );
        assert_eq!(
            fx.files(),
            vec!["image-1--refresh--0003.tif", "image-1.tif"]
        );
        // Copied from the original, not from the stale revision
        assert_eq!(
            fs::read_to_string(fx.path("image-1--refresh--0003.tif")).unwrap(),
            "content of image-1.tif"
        );
    }

    #[test]
    fn copy_with_missing_original_fails_before_host_call() {
        let fx = Fixture::new(&["shot--refresh--0001.mov"], "shot--refresh--0001.mov");
        let err = fx.apply(&CopyAndReplace).unwrap_err();
        assert_eq!(err.kind(), FailureKind::CopyIoFailure);
        assert_eq!(fx.bound(), fx.path("shot--refresh--0001.mov"));
        assert_eq!(fx.files(), vec!["shot--refresh--0001.mov"]);
    }

    #[test]
    fn copy_with_exhausted_tags_keeps_current_revision() {
        let fx = Fixture::new(
            &["shot.mov", "shot--refresh--4294967295.mov"],
            "shot--refresh--4294967295.mov",
        );
        let err = fx.apply(&CopyAndReplace).unwrap_err();

        assert_eq!(err.kind(), FailureKind::ScanFailure);
        assert_eq!(fx.bound(), fx.path("shot--refresh--4294967295.mov"));
        assert_eq!(
            fs::read_to_string(fx.path("shot--refresh--4294967295.mov")).unwrap(),
            "content of shot--refresh--4294967295.mov"
        );
        assert_eq!(fx.files(), vec!["shot--refresh--4294967295.mov", "shot.mov"]);
    }

    #[test]
    fn copy_rejected_by_host_leaves_orphan() {
        let fx = Fixture::new(&["shot.mov"], "shot.mov");
        let err = fx.apply_with(&CopyAndReplace, &RejectingHost).unwrap_err();
        assert_eq!(err.kind(), FailureKind::HostBindingRejected);
        assert_eq!(fx.bound(), fx.path("shot.mov"));
        assert_eq!(fx.files(), vec!["shot--refresh--0001.mov", "shot.mov"]);
    }

    #[test]
    fn copy_rejected_by_host_can_discard_orphan() {
        let mut fx = Fixture::new(&["shot.mov"], "shot.mov");
        fx.cleanup.discard_orphaned_copy = true;
        fx.apply_with(&CopyAndReplace, &RejectingHost).unwrap_err();
        assert_eq!(fx.files(), vec!["shot.mov"]);
    }

    #[test]
    fn revert_rebinds_original_and_deletes_revision() {
        let fx = Fixture::new(
            &["image-1.tif", "image-1--refresh--0003.tif"],
            "image-1--refresh--0003.tif",
        );
        let outcome = fx.apply(&RevertToOriginal).unwrap();

        assert_eq!(
            outcome,
            RemapOutcome::Remapped {
                target: fx.path("image-1.tif"),
                cleanup: CleanupOutcome::Deleted {
                    path: fx.path("image-1--refresh--0003.tif"),
                },
            }
        );
        assert_eq!(fx.bound(), fx.path("image-1.tif"));
        assert_eq!(fx.files(), vec!["image-1.tif"]);
    }

    #[test]
    fn revert_on_original_is_skipped() {
        let fx = Fixture::new(&["image-1.tif"], "image-1.tif");
        let outcome = fx.apply(&RevertToOriginal).unwrap();
        assert!(matches!(outcome, RemapOutcome::Skipped(_)));
        assert_eq!(fx.bound(), fx.path("image-1.tif"));
    }

    #[test]
    fn revert_never_recreates_missing_original() {
        let fx = Fixture::new(&["image-1--refresh--0003.tif"], "image-1--refresh--0003.tif");
        let err = fx.apply(&RevertToOriginal).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingMedia);
        assert_eq!(fx.bound(), fx.path("image-1--refresh--0003.tif"));
        assert_eq!(fx.files(), vec!["image-1--refresh--0003.tif"]);
    }

    #[test]
    fn strategy_for_matches_kind() {
        for kind in [
            StrategyKind::Relink,
            StrategyKind::CopyAndReplace,
            StrategyKind::RevertToOriginal,
        ] {
            assert_eq!(strategy_for(kind).kind(), kind);
        }
    }
}
