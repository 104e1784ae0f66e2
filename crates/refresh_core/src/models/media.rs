//! Media path decomposition.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A media file path split into directory, stem and extension.
///
/// The extension keeps its leading dot (`.tif`) and is empty for files
/// without one. Splitting follows the last dot of the file name, so
/// `clip.final.mov` has stem `clip.final`; dot files such as `.hidden`
/// have no extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaPath {
    directory: PathBuf,
    stem: String,
    extension: String,
}

impl MediaPath {
    /// Decompose a path.
    ///
    /// Returns `None` when the path has no file name or the file name is
    /// not valid UTF-8.
    pub fn parse(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let stem = path.file_stem()?.to_str()?.to_string();
        let extension = match path.extension() {
            Some(ext) => format!(".{}", ext.to_str()?),
            None => String::new(),
        };
        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Some(Self {
            directory,
            stem,
            extension,
        })
    }

    /// Build a path from its parts.
    pub fn from_parts(
        directory: impl Into<PathBuf>,
        stem: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            stem: stem.into(),
            extension: extension.into(),
        }
    }

    /// Directory containing the file.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name without extension.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension including the leading dot, or empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name with extension.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.stem, self.extension)
    }

    /// Same directory and extension, different stem.
    pub fn with_stem(&self, stem: impl Into<String>) -> Self {
        Self {
            directory: self.directory.clone(),
            stem: stem.into(),
            extension: self.extension.clone(),
        }
    }

    /// Full path.
    pub fn to_path_buf(&self) -> PathBuf {
        self.directory.join(self.file_name())
    }
}

impl fmt::Display for MediaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path_buf().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_parts() {
        let media = MediaPath::parse("/media/renders/image-1.tif").unwrap();
        assert_eq!(media.directory(), Path::new("/media/renders"));
        assert_eq!(media.stem(), "image-1");
        assert_eq!(media.extension(), ".tif");
        assert_eq!(media.file_name(), "image-1.tif");
        assert_eq!(media.to_path_buf(), PathBuf::from("/media/renders/image-1.tif"));
    }

    #[test]
    fn parse_uses_last_dot() {
        let media = MediaPath::parse("/media/clip.final.mov").unwrap();
        assert_eq!(media.stem(), "clip.final");
        assert_eq!(media.extension(), ".mov");
    }

    #[test]
    fn parse_without_extension() {
        let media = MediaPath::parse("/media/README").unwrap();
        assert_eq!(media.stem(), "README");
        assert_eq!(media.extension(), "");
        assert_eq!(media.file_name(), "README");
    }

    #[test]
    fn parse_rejects_root() {
        assert!(MediaPath::parse("/").is_none());
    }

    #[test]
    fn with_stem_keeps_directory_and_extension() {
        let media = MediaPath::parse("/a/b/shot.mov").unwrap();
        let other = media.with_stem("shot--refresh--0001");
        assert_eq!(other.to_path_buf(), PathBuf::from("/a/b/shot--refresh--0001.mov"));
    }
}
