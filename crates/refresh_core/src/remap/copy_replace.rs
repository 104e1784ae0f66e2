//! Copy-And-Replace strategy.
//!
//! Some hosts cache decoded media by file name, so relinking the same path
//! is not always enough. This strategy gives the host a name it has never
//! seen: the original is copied to the next revision file and the clip is
//! rebound to the copy. The revision the clip used before is then deleted.
//!
//! Typical cycle:
//!
//! 1. The user adds `mypict.jpg` to the project.
//! 2. They re-render `mypict.jpg` externally; the host keeps showing the old
//!    image. Running this copies it to `mypict--refresh--0001.jpg` and binds
//!    the clip to that.
//! 3. They re-render `mypict.jpg` again. Running this copies it to
//!    `mypict--refresh--0002.jpg`, binds to it and deletes `0001`.

use super::{rename_clip, RemapContext, RemapError, RemapOutcome, RemapResult, RemapStrategy};
use crate::models::{ClipRef, MediaPath, StrategyKind};
use crate::store::RevisionStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAndReplace;

impl RemapStrategy for CopyAndReplace {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CopyAndReplace
    }

    fn apply(
        &self,
        ctx: &RemapContext<'_>,
        store: &mut RevisionStore,
        clip: &ClipRef,
        current: &MediaPath,
    ) -> RemapResult<RemapOutcome> {
        let origin = ctx.namer.origin_of(current);
        let origin_path = origin.to_path_buf();
        let current_path = current.to_path_buf();

        let tag = ctx
            .namer
            .next_tag(ctx.fs, origin.directory(), origin.stem(), origin.extension())
            .map_err(|e| RemapError::scan_failed(origin.directory(), e))?;
        let target = ctx.namer.derive_revision_name(&origin, tag);

        // The original holds the latest render; the revision currently bound
        // is whatever the host last saw.
        tracing::debug!(
            "Copying \"{}\" to \"{}\"",
            origin_path.display(),
            target.display()
        );
        let bytes = ctx
            .fs
            .copy(&origin_path, &target)
            .map_err(|e| RemapError::copy_failed(&origin_path, &target, e))?;
        tracing::trace!("Copied {} bytes", bytes);

        tracing::debug!("Replacing '{}' with \"{}\"", clip, target.display());
        if let Err(e) = ctx.binding.relink(clip, &target) {
            store.discard(clip);
            if ctx.cleanup.discard_orphaned_copy {
                store.remove_orphan(&target, ctx.fs);
            } else {
                tracing::warn!(
                    "Leaving unused copy \"{}\" on disk",
                    target.display()
                );
            }
            return Err(RemapError::host_rejected(&target, e));
        }
        rename_clip(ctx, clip, &target);

        // Never the user's original, only a revision we created earlier, and
        // never the file the clip is now bound to.
        if current_path != origin_path
            && current_path != target
            && ctx.namer.is_revision(&current_path)
        {
            store.record_pending(clip, &current_path);
        }
        let cleanup = store.commit_or_skip_delete(clip, ctx.fs);

        Ok(RemapOutcome::Remapped { target, cleanup })
    }
}
