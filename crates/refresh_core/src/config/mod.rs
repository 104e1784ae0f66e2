//! Configuration management for Media Refresh.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use refresh_core::config::{ConfigManager, ConfigSection};
//! use refresh_core::models::StrategyKind;
//!
//! let mut config = ConfigManager::new(".config/media-refresh.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Marker: {}", config.settings().naming.marker);
//!
//! config.settings_mut().defaults.strategy = StrategyKind::CopyAndReplace;
//! config.update_section(ConfigSection::Defaults).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    CleanupSettings, ConfigSection, DefaultSettings, LoggingSettings, NamingSettings, Settings,
};
