//! Data models for Media Refresh.
//!
//! This module contains the core data structures shared by every component:
//! - Opaque host handles (clips, containers)
//! - Media path decomposition
//! - Enums for scopes, strategies, presets and outcomes

mod enums;
mod handles;
mod media;

pub use enums::{FailureKind, OutcomeStatus, Preset, Scope, StrategyKind, UnknownName};
pub use handles::{ClipRef, ContainerRef, ProjectItem};
pub use media::MediaPath;
