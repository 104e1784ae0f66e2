//! Revision tag type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic revision number attached to a copy of an original.
///
/// Tag 0 means "no revision yet"; the first copy gets tag 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionTag(u32);

impl RevisionTag {
    /// The tag before the first revision.
    pub const NONE: RevisionTag = RevisionTag(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The tag after this one, or `None` once the tag space is used up.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Zero-padded rendering, e.g. `0004` for width 4. Values wider than
    /// `width` render in full.
    pub fn render(&self, width: usize) -> String {
        format!("{:0width$}", self.0, width = width)
    }

    /// Parse `digits` only if it is exactly what [`render`](Self::render)
    /// would produce for some tag, so `0004` parses at width 4 but `4`,
    /// `00004` and `+004` do not.
    pub fn parse_canonical(digits: &str, width: usize) -> Option<Self> {
        if digits.len() < width || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u32 = digits.parse().ok()?;
        let tag = Self(value);
        (tag.render(width) == digits).then_some(tag)
    }
}

impl fmt::Display for RevisionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
