//! Core enums used throughout the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a scope, strategy or preset name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {what} \"{name}\"")]
pub struct UnknownName {
    pub what: &'static str,
    pub name: String,
}

impl UnknownName {
    fn new(what: &'static str, name: &str) -> Self {
        Self {
            what,
            name: name.to_string(),
        }
    }
}

/// Lowercase and strip separators so `Copy-And-Replace`, `copy_and_replace`
/// and `CopyAndReplace` compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Which clips a batch run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    /// The host's active selection.
    #[default]
    Selected,
    /// Direct media children of the active container.
    CurrentContainer,
    /// The active container and all of its descendants.
    CurrentContainerRecursive,
    /// Every clip reachable from the project root.
    EntireProject,
}

impl Scope {
    /// All scopes in display order.
    pub const ALL: [Scope; 4] = [
        Scope::Selected,
        Scope::CurrentContainer,
        Scope::CurrentContainerRecursive,
        Scope::EntireProject,
    ];
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Selected => write!(f, "selected clips"),
            Scope::CurrentContainer => write!(f, "current bin"),
            Scope::CurrentContainerRecursive => write!(f, "current bin (recursive)"),
            Scope::EntireProject => write!(f, "entire project"),
        }
    }
}

impl FromStr for Scope {
    type Err = UnknownName;

    /// Accepts the variant names and the action names of the original
    /// scripts (`RefreshSelectedClips`, `RefreshCurrentBin`,
    /// `RefreshCurrentBinRecursive`, `RefreshAll`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "selected" | "selectedclips" | "refreshselectedclips" => Ok(Scope::Selected),
            "currentcontainer" | "currentbin" | "refreshcurrentbin" => {
                Ok(Scope::CurrentContainer)
            }
            "currentcontainerrecursive" | "currentbinrecursive" | "refreshcurrentbinrecursive" => {
                Ok(Scope::CurrentContainerRecursive)
            }
            "entireproject" | "all" | "project" | "refreshall" => Ok(Scope::EntireProject),
            _ => Err(UnknownName::new("scope", s)),
        }
    }
}

/// Remapping strategy applied to each clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Relink the clip to the path it is already bound to.
    #[default]
    Relink,
    /// Copy the original to a new revision file and rebind to it.
    CopyAndReplace,
    /// Rebind a revision-bound clip back to its original file.
    RevertToOriginal,
}

impl StrategyKind {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Relink => "Relink",
            StrategyKind::CopyAndReplace => "CopyAndReplace",
            StrategyKind::RevertToOriginal => "RevertToOriginal",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "relink" | "relinksamepath" => Ok(StrategyKind::Relink),
            "copyandreplace" | "copyreplace" => Ok(StrategyKind::CopyAndReplace),
            "reverttooriginal" | "revert" | "replacewithoriginal" => {
                Ok(StrategyKind::RevertToOriginal)
            }
            _ => Err(UnknownName::new("strategy", s)),
        }
    }
}

/// Named entry points, each a fixed scope and strategy pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    RefreshSelectedClips,
    RefreshCurrentBin,
    RefreshCurrentBinRecursive,
    RefreshAll,
    CopyReplaceSelectedClips,
    CopyReplaceCurrentBin,
    CopyReplaceCurrentBinRecursive,
    CopyReplaceAll,
    RevertSelectedClips,
}

impl Preset {
    /// All presets in display order.
    pub const ALL: [Preset; 9] = [
        Preset::RefreshSelectedClips,
        Preset::RefreshCurrentBin,
        Preset::RefreshCurrentBinRecursive,
        Preset::RefreshAll,
        Preset::CopyReplaceSelectedClips,
        Preset::CopyReplaceCurrentBin,
        Preset::CopyReplaceCurrentBinRecursive,
        Preset::CopyReplaceAll,
        Preset::RevertSelectedClips,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::RefreshSelectedClips => "RefreshSelectedClips",
            Preset::RefreshCurrentBin => "RefreshCurrentBin",
            Preset::RefreshCurrentBinRecursive => "RefreshCurrentBinRecursive",
            Preset::RefreshAll => "RefreshAll",
            Preset::CopyReplaceSelectedClips => "CopyReplaceSelectedClips",
            Preset::CopyReplaceCurrentBin => "CopyReplaceCurrentBin",
            Preset::CopyReplaceCurrentBinRecursive => "CopyReplaceCurrentBinRecursive",
            Preset::CopyReplaceAll => "CopyReplaceAll",
            Preset::RevertSelectedClips => "RevertSelectedClips",
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Preset::RefreshSelectedClips
            | Preset::CopyReplaceSelectedClips
            | Preset::RevertSelectedClips => Scope::Selected,
            Preset::RefreshCurrentBin | Preset::CopyReplaceCurrentBin => Scope::CurrentContainer,
            Preset::RefreshCurrentBinRecursive | Preset::CopyReplaceCurrentBinRecursive => {
                Scope::CurrentContainerRecursive
            }
            Preset::RefreshAll | Preset::CopyReplaceAll => Scope::EntireProject,
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        match self {
            Preset::RefreshSelectedClips
            | Preset::RefreshCurrentBin
            | Preset::RefreshCurrentBinRecursive
            | Preset::RefreshAll => StrategyKind::Relink,
            Preset::CopyReplaceSelectedClips
            | Preset::CopyReplaceCurrentBin
            | Preset::CopyReplaceCurrentBinRecursive
            | Preset::CopyReplaceAll => StrategyKind::CopyAndReplace,
            Preset::RevertSelectedClips => StrategyKind::RevertToOriginal,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Preset::ALL
            .into_iter()
            .find(|preset| normalize(preset.name()) == wanted)
            .ok_or_else(|| UnknownName::new("preset", s))
    }
}

/// Final status of one clip in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Succeeded,
    Skipped,
    Failed,
}

/// Classification of a per-clip failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The host refused the new binding; the old binding is unchanged.
    HostBindingRejected,
    /// Copying the revision file failed; the host was not called.
    CopyIoFailure,
    /// The file the host would be bound to does not exist.
    MissingMedia,
    /// The media directory could not be scanned for existing revisions.
    ScanFailure,
    /// The clip has no usable bound path.
    Unbound,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HostBindingRejected => write!(f, "host rejected binding"),
            FailureKind::CopyIoFailure => write!(f, "copy failed"),
            FailureKind::MissingMedia => write!(f, "media missing"),
            FailureKind::ScanFailure => write!(f, "directory scan failed"),
            FailureKind::Unbound => write!(f, "clip not bound to media"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_parses_original_action_names() {
        assert_eq!("RefreshAll".parse::<Scope>().unwrap(), Scope::EntireProject);
        assert_eq!(
            "refreshcurrentbinrecursive".parse::<Scope>().unwrap(),
            Scope::CurrentContainerRecursive
        );
        assert_eq!("current-bin".parse::<Scope>().unwrap(), Scope::CurrentContainer);
        assert_eq!("Selected".parse::<Scope>().unwrap(), Scope::Selected);
    }

    #[test]
    fn strategy_parses_original_method_names() {
        assert_eq!(
            "ReplaceWithOriginal".parse::<StrategyKind>().unwrap(),
            StrategyKind::RevertToOriginal
        );
        assert_eq!(
            "copy_and_replace".parse::<StrategyKind>().unwrap(),
            StrategyKind::CopyAndReplace
        );
        assert_eq!("RELINK".parse::<StrategyKind>().unwrap(), StrategyKind::Relink);
    }

    #[test]
    fn unknown_names_are_reported() {
        let err = "Sideways".parse::<Scope>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown scope \"Sideways\"");
        assert!("Shred".parse::<StrategyKind>().is_err());
        assert!("RefreshNothing".parse::<Preset>().is_err());
    }

    #[test]
    fn presets_cover_every_scope_for_relink_and_copy() {
        for scope in Scope::ALL {
            for strategy in [StrategyKind::Relink, StrategyKind::CopyAndReplace] {
                assert!(Preset::ALL
                    .iter()
                    .any(|p| p.scope() == scope && p.strategy() == strategy));
            }
        }
        assert_eq!(
            Preset::RevertSelectedClips.strategy(),
            StrategyKind::RevertToOriginal
        );
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!(
            "copy-replace-current-bin".parse::<Preset>().unwrap(),
            Preset::CopyReplaceCurrentBin
        );
    }
}
