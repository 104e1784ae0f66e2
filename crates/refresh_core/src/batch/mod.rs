//! Batch execution and reporting.
//!
//! # Example
//!
//! ```no_run
//! use refresh_core::batch::BatchDriver;
//! use refresh_core::config::Settings;
//! use refresh_core::host::{ManifestHost, StdMediaFs};
//! use refresh_core::models::Preset;
//!
//! let host = ManifestHost::load("project.json").unwrap();
//! let settings = Settings::default();
//! let driver = BatchDriver::with_host(&host, &StdMediaFs, &settings);
//!
//! let report = driver.run_preset(Preset::CopyReplaceSelectedClips);
//! print!("{}", report.summary());
//! host.save().unwrap();
//! ```

mod driver;
mod report;

pub use driver::BatchDriver;
pub use report::{BatchReport, ClipOutcome};
