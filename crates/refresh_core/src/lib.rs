//! Media Refresh Core - revision tracking and clip remapping
//!
//! Keeps an NLE host's clip bindings in step with media files that were
//! modified in place. The host is reached only through the traits in
//! [`host`]; this crate has no UI dependencies and can back a GUI plugin or
//! the command line tool.

pub mod batch;
pub mod config;
pub mod host;
pub mod logging;
pub mod models;
pub mod naming;
pub mod remap;
pub mod scope;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
