//! `MediaFs` over the real filesystem.

use std::fs;
use std::io;
use std::path::Path;

use super::MediaFs;

/// Filesystem primitives backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdMediaFs;

impl MediaFs for StdMediaFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn copy(&self, src: &Path, dst: &Path) -> io::Result<u64> {
        fs::copy(src, dst)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // Non-UTF-8 names can never match a revision name we generated.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }
}
