//! Revision file naming.
//!
//! Revision files live next to the original and carry the original's stem,
//! a marker and a zero-padded tag:
//!
//! ```text
//! mypict.jpg                  (original, never modified or deleted)
//! mypict--refresh--0001.jpg   (first copy-and-replace)
//! mypict--refresh--0002.jpg   (second; 0001 is removed once bound)
//! ```
//!
//! Everything here is pure string/path derivation except [`RevisionNamer::next_tag`],
//! which lists the directory to find the highest tag already on disk.

mod tag;

pub use tag::RevisionTag;

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::NamingSettings;
use crate::host::MediaFs;
use crate::models::MediaPath;

/// Default marker placed between the origin stem and the tag.
pub const DEFAULT_MARKER: &str = "--refresh--";

/// Default number of digits a tag is padded to.
pub const DEFAULT_TAG_WIDTH: usize = 4;

/// A file name recognized as a revision of some original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionName {
    /// Stem of the original file.
    pub origin_stem: String,
    pub tag: RevisionTag,
    /// Extension with leading dot, or empty.
    pub extension: String,
}

/// Derives and parses revision file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionNamer {
    marker: String,
    tag_width: usize,
}

impl Default for RevisionNamer {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            tag_width: DEFAULT_TAG_WIDTH,
        }
    }
}

impl RevisionNamer {
    /// Create a namer with a custom marker and tag width.
    ///
    /// An empty marker or zero width falls back to the defaults.
    pub fn new(marker: impl Into<String>, tag_width: usize) -> Self {
        let marker = marker.into();
        Self {
            marker: if marker.is_empty() {
                DEFAULT_MARKER.to_string()
            } else {
                marker
            },
            tag_width: if tag_width == 0 {
                DEFAULT_TAG_WIDTH
            } else {
                tag_width
            },
        }
    }

    /// Create a namer from the `[naming]` config section.
    pub fn from_settings(settings: &NamingSettings) -> Self {
        Self::new(settings.marker.clone(), settings.tag_width)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Stem of the revision file for `origin_stem` at `tag`.
    pub fn revision_stem(&self, origin_stem: &str, tag: RevisionTag) -> String {
        format!("{}{}{}", origin_stem, self.marker, tag.render(self.tag_width))
    }

    /// Path of the revision file for `original` at `tag`, in the same
    /// directory.
    ///
    /// If `original` is itself a revision file its origin stem is used, so
    /// names never pile up suffixes.
    pub fn derive_revision_name(&self, original: &MediaPath, tag: RevisionTag) -> PathBuf {
        let origin_stem = self.origin_stem(original);
        original
            .with_stem(self.revision_stem(&origin_stem, tag))
            .to_path_buf()
    }

    /// Parse a revision file name.
    ///
    /// Only a stem ending in the marker followed by the canonical rendering
    /// of a tag is a revision. `a--refresh--0004.tif` parses;
    /// `a--refresh--4.tif`, `a--refresh--0004-final.tif` and
    /// `--refresh--0004.tif` (empty origin) do not.
    pub fn parse_revision(&self, path: impl AsRef<Path>) -> Option<RevisionName> {
        let media = MediaPath::parse(path)?;
        self.parse_media(&media)
    }

    /// [`parse_revision`](Self::parse_revision) for an already decomposed path.
    pub fn parse_media(&self, media: &MediaPath) -> Option<RevisionName> {
        let stem = media.stem();
        let marker_at = stem.rfind(&self.marker)?;
        let origin_stem = &stem[..marker_at];
        let digits = &stem[marker_at + self.marker.len()..];
        if origin_stem.is_empty() {
            return None;
        }

        let tag = RevisionTag::parse_canonical(digits, self.tag_width)?;
        Some(RevisionName {
            origin_stem: origin_stem.to_string(),
            tag,
            extension: media.extension().to_string(),
        })
    }

    /// Whether `path` names a revision file.
    pub fn is_revision(&self, path: impl AsRef<Path>) -> bool {
        self.parse_revision(path).is_some()
    }

    /// Stem of the original `media` derives from (its own stem for originals).
    pub fn origin_stem(&self, media: &MediaPath) -> String {
        match self.parse_media(media) {
            Some(revision) => revision.origin_stem,
            None => media.stem().to_string(),
        }
    }

    /// The original file `media` derives from (`media` itself for originals).
    pub fn origin_of(&self, media: &MediaPath) -> MediaPath {
        media.with_stem(self.origin_stem(media))
    }

    /// Path of the original file `path` derives from. Paths that cannot be
    /// decomposed are returned unchanged.
    pub fn origin_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match MediaPath::parse(path) {
            Some(media) => self.origin_of(&media).to_path_buf(),
            None => path.to_path_buf(),
        }
    }

    /// Next free tag for `(directory, stem, extension)`.
    ///
    /// Lists `directory`, takes the highest tag among revision files of the
    /// same origin stem and extension, and returns one past it (1 when there
    /// are none). Stragglers left behind by failed deletes are counted, so a
    /// new tag never collides with them. Fails when the highest tag on disk
    /// is already the largest representable one.
    pub fn next_tag(
        &self,
        fs: &dyn MediaFs,
        directory: &Path,
        stem: &str,
        extension: &str,
    ) -> io::Result<RevisionTag> {
        let highest = fs
            .list_dir(directory)?
            .iter()
            .filter_map(|name| self.parse_revision(name))
            .filter(|rev| rev.origin_stem == stem && rev.extension == extension)
            .map(|rev| rev.tag)
            .max()
            .unwrap_or(RevisionTag::NONE);

        highest.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("no revision tag left after {} for '{}{}'", highest, stem, extension),
            )
        })
    }
}
