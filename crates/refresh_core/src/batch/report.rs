//! Per-clip outcomes and the batch summary.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::{ClipRef, FailureKind, OutcomeStatus, Scope, StrategyKind};
use crate::store::CleanupOutcome;

/// What happened to one clip.
#[derive(Debug, Clone, Serialize)]
pub struct ClipOutcome {
    pub clip: ClipRef,
    pub clip_name: String,
    pub strategy: StrategyKind,
    pub status: OutcomeStatus,
    /// Path the clip was bound to before the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_before: Option<PathBuf>,
    /// Path the clip is bound to after the operation, as reported by the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_after: Option<PathBuf>,
    pub cleanup: CleanupOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// Failure detail or skip reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ClipOutcome {
    /// Create a successful outcome.
    pub fn succeeded(
        clip: ClipRef,
        clip_name: String,
        strategy: StrategyKind,
        cleanup: CleanupOutcome,
    ) -> Self {
        Self {
            clip,
            clip_name,
            strategy,
            status: OutcomeStatus::Succeeded,
            bound_before: None,
            bound_after: None,
            cleanup,
            failure: None,
            reason: None,
        }
    }

    /// Create a skipped outcome.
    pub fn skipped(
        clip: ClipRef,
        clip_name: String,
        strategy: StrategyKind,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status: OutcomeStatus::Skipped,
            reason: Some(reason.into()),
            ..Self::succeeded(clip, clip_name, strategy, CleanupOutcome::NotApplicable)
        }
    }

    /// Create a failed outcome.
    pub fn failed(
        clip: ClipRef,
        clip_name: String,
        strategy: StrategyKind,
        kind: FailureKind,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            failure: Some(kind),
            reason: Some(reason.into()),
            ..Self::succeeded(clip, clip_name, strategy, CleanupOutcome::NotApplicable)
        }
    }

    /// Record the binding before and after the operation.
    pub fn with_bindings(mut self, before: Option<PathBuf>, after: Option<PathBuf>) -> Self {
        self.bound_before = before;
        self.bound_after = after;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }
}

/// Result of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub scope: Scope,
    pub strategy: StrategyKind,
    pub started_at: DateTime<Local>,
    pub elapsed_secs: f64,
    /// Outcomes in processing order.
    pub outcomes: Vec<ClipOutcome>,
    /// Number of distinct media directories among the processed clips.
    pub directories: usize,
    /// Superseded revision files that could not be deleted.
    pub left_for_later: Vec<PathBuf>,
}

impl BatchReport {
    /// Number of clips the batch looked at.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(OutcomeStatus::Succeeded)
    }

    pub fn skipped(&self) -> usize {
        self.count(OutcomeStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    /// Failed outcomes, in processing order.
    pub fn failures(&self) -> impl Iterator<Item = &ClipOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// Outcome for a given clip, if it was part of the batch.
    pub fn outcome_for(&self, clip: &ClipRef) -> Option<&ClipOutcome> {
        self.outcomes.iter().find(|o| &o.clip == clip)
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Human-readable summary: counts, failures with reasons, stale files.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} on {}: processed {} clips [{} unique directories] in {:.2} seconds",
            self.strategy,
            self.scope,
            self.total(),
            self.directories,
            self.elapsed_secs
        )?;
        writeln!(
            f,
            "  succeeded: {}, skipped: {}, failed: {}",
            self.succeeded(),
            self.skipped(),
            self.failed()
        )?;

        if self.failed() > 0 {
            writeln!(f, "Failures:")?;
            for outcome in self.failures() {
                writeln!(
                    f,
                    "  {}: {}",
                    outcome.clip_name,
                    outcome.reason.as_deref().unwrap_or("unknown error")
                )?;
            }
        }

        if !self.left_for_later.is_empty() {
            writeln!(f, "Could not delete (in use, remove later):")?;
            for path in &self.left_for_later {
                writeln!(f, "  {}", path.display())?;
            }
        }

        Ok(())
    }
}
