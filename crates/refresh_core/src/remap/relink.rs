//! Relink-Same-Path strategy.

use super::{bind, RemapContext, RemapOutcome, RemapResult, RemapStrategy};
use crate::models::{ClipRef, MediaPath, StrategyKind};
use crate::store::{CleanupOutcome, RevisionStore};

/// Rebind the clip to the path it already has, so the host re-reads it.
/// Nothing is copied or deleted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelinkSamePath;

impl RemapStrategy for RelinkSamePath {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Relink
    }

    fn apply(
        &self,
        ctx: &RemapContext<'_>,
        _store: &mut RevisionStore,
        clip: &ClipRef,
        current: &MediaPath,
    ) -> RemapResult<RemapOutcome> {
        let path = current.to_path_buf();
        tracing::debug!("Relinking '{}' to \"{}\"", clip, path.display());
        bind(ctx, clip, &path)?;

        Ok(RemapOutcome::Remapped {
            target: path,
            cleanup: CleanupOutcome::NotApplicable,
        })
    }
}
