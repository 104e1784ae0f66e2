//! Batch driver: resolve a scope and remap each clip in turn.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;

use super::report::{BatchReport, ClipOutcome};
use crate::config::Settings;
use crate::host::{MediaBinding, MediaFs, ProjectModel};
use crate::models::{ClipRef, MediaPath, Preset, Scope, StrategyKind};
use crate::naming::RevisionNamer;
use crate::remap::{strategy_for, RemapContext, RemapError, RemapOutcome, RemapStrategy};
use crate::scope;
use crate::store::RevisionStore;

/// Runs one strategy over every clip in a scope.
///
/// Clips are processed one at a time, each to completion (copy, host call,
/// cleanup) before the next. A failing clip is recorded and the batch moves
/// on; nothing is rolled back.
pub struct BatchDriver<'a> {
    project: &'a dyn ProjectModel,
    binding: &'a dyn MediaBinding,
    fs: &'a dyn MediaFs,
    settings: &'a Settings,
    namer: RevisionNamer,
}

impl<'a> BatchDriver<'a> {
    /// Create a driver over separate project and binding collaborators.
    pub fn new(
        project: &'a dyn ProjectModel,
        binding: &'a dyn MediaBinding,
        fs: &'a dyn MediaFs,
        settings: &'a Settings,
    ) -> Self {
        Self {
            project,
            binding,
            fs,
            settings,
            namer: RevisionNamer::from_settings(&settings.naming),
        }
    }

    /// Create a driver over a host that provides both project access and
    /// the binding primitive.
    pub fn with_host<H>(host: &'a H, fs: &'a dyn MediaFs, settings: &'a Settings) -> Self
    where
        H: ProjectModel + MediaBinding,
    {
        Self::new(host, host, fs, settings)
    }

    /// Run a named preset.
    pub fn run_preset(&self, preset: Preset) -> BatchReport {
        tracing::info!("Running preset {}", preset);
        self.run(preset.scope(), preset.strategy())
    }

    /// Resolve `scope` and apply `strategy` to every clip in it.
    pub fn run(&self, scope: Scope, strategy: StrategyKind) -> BatchReport {
        tracing::info!("Processing {}...", scope);
        let clips = scope::resolve(scope, self.project);
        self.run_clips(scope, strategy, &clips)
    }

    /// Apply `strategy` to an explicit list of clips. `scope` is only used
    /// to label the report.
    pub fn run_clips(&self, scope: Scope, strategy: StrategyKind, clips: &[ClipRef]) -> BatchReport {
        let started_at = Local::now();
        let timer = Instant::now();

        let strategy = strategy_for(strategy);
        let ctx = RemapContext {
            project: self.project,
            binding: self.binding,
            fs: self.fs,
            namer: &self.namer,
            cleanup: &self.settings.cleanup,
        };
        let mut store = RevisionStore::new(
            self.namer.clone(),
            self.settings.cleanup.delete_previous_revision,
        );

        let mut outcomes = Vec::with_capacity(clips.len());
        let mut directories: HashSet<PathBuf> = HashSet::new();

        for (i, clip) in clips.iter().enumerate() {
            tracing::debug!("[{}/{}] {}", i + 1, clips.len(), self.project.clip_name(clip));
            let outcome = self.process_clip(&ctx, strategy.as_ref(), &mut store, clip, &mut directories);
            outcomes.push(outcome);
        }

        let report = BatchReport {
            scope,
            strategy: strategy.kind(),
            started_at,
            elapsed_secs: timer.elapsed().as_secs_f64(),
            outcomes,
            directories: directories.len(),
            left_for_later: store.left_for_later().to_vec(),
        };

        tracing::info!(
            "Successfully processed {} of {} clips [{} unique directories] in {:.2} seconds",
            report.succeeded(),
            report.total(),
            report.directories,
            report.elapsed_secs
        );
        if report.failed() > 0 {
            tracing::warn!("{} clips failed", report.failed());
        }

        report
    }

    fn process_clip(
        &self,
        ctx: &RemapContext<'_>,
        strategy: &dyn RemapStrategy,
        store: &mut RevisionStore,
        clip: &ClipRef,
        directories: &mut HashSet<PathBuf>,
    ) -> ClipOutcome {
        let name = self.project.clip_name(clip);
        let kind = strategy.kind();
        let before = self.project.bound_path(clip);

        let result = match before.as_deref().and_then(MediaPath::parse) {
            Some(current) => {
                directories.insert(current.directory().to_path_buf());
                strategy.apply(ctx, store, clip, &current)
            }
            None => Err(RemapError::unbound(format!(
                "'{}' is bound to {:?}",
                name, before
            ))),
        };

        let outcome = match result {
            Ok(RemapOutcome::Remapped { target, cleanup }) => {
                tracing::debug!("'{}' bound to \"{}\"", name, target.display());
                ClipOutcome::succeeded(clip.clone(), name, kind, cleanup)
            }
            Ok(RemapOutcome::Skipped(reason)) => {
                tracing::info!("Skipped '{}': {}", name, reason);
                ClipOutcome::skipped(clip.clone(), name, kind, reason)
            }
            Err(e) => {
                store.discard(clip);
                tracing::error!("{} failed for '{}': {}", kind, name, e);
                ClipOutcome::failed(clip.clone(), name, kind, e.kind(), e.to_string())
            }
        };

        let after = self.project.bound_path(clip);
        outcome.with_bindings(before, after)
    }
}
