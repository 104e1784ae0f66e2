//! Revert-To-Original strategy.
//!
//! Rebinds a clip that points at a revision file back to the original it was
//! copied from, then deletes the revision. Used for media the user is done
//! changing. The host should be restarted first so it drops any cached
//! content for the original's name; the strategy cannot check that.

use super::{bind, rename_clip, RemapContext, RemapOutcome, RemapResult, RemapStrategy};
use crate::models::{ClipRef, MediaPath, StrategyKind};
use crate::store::RevisionStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct RevertToOriginal;

impl RemapStrategy for RevertToOriginal {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RevertToOriginal
    }

    fn apply(
        &self,
        ctx: &RemapContext<'_>,
        store: &mut RevisionStore,
        clip: &ClipRef,
        current: &MediaPath,
    ) -> RemapResult<RemapOutcome> {
        let Some(revision) = ctx.namer.parse_media(current) else {
            tracing::debug!("Already at original for \"{}\"", current);
            return Ok(RemapOutcome::Skipped("already bound to original".to_string()));
        };

        let current_path = current.to_path_buf();
        let original = current.with_stem(revision.origin_stem).to_path_buf();
        tracing::debug!(
            "Replacing \"{}\" with original \"{}\"",
            current_path.display(),
            original.display()
        );
        bind(ctx, clip, &original)?;
        rename_clip(ctx, clip, &original);

        store.record_pending(clip, &current_path);
        let cleanup = store.commit_or_skip_delete(clip, ctx.fs);

        Ok(RemapOutcome::Remapped {
            target: original,
            cleanup,
        })
    }
}
