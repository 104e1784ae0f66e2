//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::{Scope, StrategyKind};
use crate::naming::{DEFAULT_MARKER, DEFAULT_TAG_WIDTH};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Revision file naming.
    #[serde(default)]
    pub naming: NamingSettings,

    /// Removal of superseded revision files.
    #[serde(default)]
    pub cleanup: CleanupSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Scope and strategy used when none is given.
    #[serde(default)]
    pub defaults: DefaultSettings,
}

/// How revision files are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingSettings {
    /// Marker between the original stem and the tag.
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Digits a tag is zero-padded to.
    #[serde(default = "default_tag_width")]
    pub tag_width: usize,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_tag_width() -> usize {
    DEFAULT_TAG_WIDTH
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            tag_width: default_tag_width(),
        }
    }
}

/// Cleanup behaviour after a remap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupSettings {
    /// Delete the previous revision file once the clip is bound to the new one.
    #[serde(default = "default_true")]
    pub delete_previous_revision: bool,

    /// Delete a freshly copied revision file when the host refuses to bind it.
    #[serde(default)]
    pub discard_orphaned_copy: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CleanupSettings {
    fn default() -> Self {
        Self {
            delete_previous_revision: true,
            discard_orphaned_copy: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level written to the console.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write a log file into `logs_folder`.
    #[serde(default)]
    pub log_to_file: bool,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            log_to_file: false,
            logs_folder: default_logs_folder(),
        }
    }
}

/// Fallback scope and strategy for runs that don't name one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default)]
    pub scope: Scope,

    #[serde(default)]
    pub strategy: StrategyKind,
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Naming,
    Cleanup,
    Logging,
    Defaults,
}

impl ConfigSection {
    /// All sections in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Naming,
        ConfigSection::Cleanup,
        ConfigSection::Logging,
        ConfigSection::Defaults,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Naming => "naming",
            ConfigSection::Cleanup => "cleanup",
            ConfigSection::Logging => "logging",
            ConfigSection::Defaults => "defaults",
        }
    }

    /// Comment written above the section.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Naming => "# Revision file naming",
            ConfigSection::Cleanup => "# Removal of superseded revision files",
            ConfigSection::Logging => "# Logging configuration",
            ConfigSection::Defaults => "# Scope and strategy used by `run` when none is given",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[naming]"));
        assert!(toml.contains("[cleanup]"));
        assert!(toml.contains("marker = \"--refresh--\""));
    }

    #[test]
    fn settings_round_trip() {
        let mut settings = Settings::default();
        settings.defaults.strategy = StrategyKind::CopyAndReplace;
        settings.defaults.scope = Scope::CurrentContainerRecursive;
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[cleanup]\ndelete_previous_revision = false";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert!(!parsed.cleanup.delete_previous_revision);
        // Defaults applied for missing
        assert!(!parsed.cleanup.discard_orphaned_copy);
        assert_eq!(parsed.naming.tag_width, 4);
        assert_eq!(parsed.defaults.strategy, StrategyKind::Relink);
    }
}
