//! Grouping strategies.
//!
//! A [`GroupingStrategy`] decides which files count as copies of each other
//! by mapping every file to a [`GroupKey`]. The set of strategies is closed:
//!
//! | strategy      | key                                               |
//! |---------------|---------------------------------------------------|
//! | `ContentHash` | BLAKE3 digest of the full file content (hex)      |
//! | `TrackNumber` | leading token of a name that starts with a digit  |
//! | `AllFiles`    | one shared key: the whole directory is one group  |
//! | `Passthrough` | the canonical path: every group is a singleton    |
//!
//! Unknown strategy names resolve to `Passthrough`, which never deletes.
//!
//! # Example
//!
//! ```
//! use mp3prune::duplicates::{track_number_key, GroupingStrategy};
//!
//! assert_eq!(track_number_key("03 Song.mp3"), "03");
//! assert_eq!(track_number_key("Intro.mp3"), "Intro.mp3");
//!
//! assert_eq!(GroupingStrategy::from_name("track"), GroupingStrategy::TrackNumber);
//! assert_eq!(GroupingStrategy::from_name("bogus"), GroupingStrategy::Passthrough);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::groups::GroupKey;
use crate::scanner::{FileRecord, HashError, Hasher};

/// Key shared by every file under [`GroupingStrategy::AllFiles`].
const ALL_FILES_KEY: &str = "";

/// How files are partitioned into groups of copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingStrategy {
    /// Byte-identical content.
    #[default]
    ContentHash,
    /// Same leading track number in the file name.
    TrackNumber,
    /// Every file in the directory.
    AllFiles,
    /// No grouping; nothing is ever deleted.
    Passthrough,
}

/// Accepted spellings, after lowercasing and mapping `_` to `-`.
const KNOWN_NAMES: &[(&str, GroupingStrategy)] = &[
    ("content-hash", GroupingStrategy::ContentHash),
    ("hash", GroupingStrategy::ContentHash),
    ("md5", GroupingStrategy::ContentHash),
    ("track-number", GroupingStrategy::TrackNumber),
    ("track", GroupingStrategy::TrackNumber),
    ("all-files", GroupingStrategy::AllFiles),
    ("all", GroupingStrategy::AllFiles),
    ("passthrough", GroupingStrategy::Passthrough),
    ("none", GroupingStrategy::Passthrough),
];

impl GroupingStrategy {
    /// Look up a strategy by name, returning `None` for unknown names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = normalize_name(name);
        KNOWN_NAMES
            .iter()
            .find(|(known, _)| *known == normalized)
            .map(|(_, strategy)| *strategy)
    }

    /// Resolve a strategy name, falling back to [`GroupingStrategy::Passthrough`].
    ///
    /// Unknown names are logged with a suggestion when a known name is close.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if let Some(strategy) = Self::parse(name) {
            return strategy;
        }

        match suggest_name(name) {
            Some(suggestion) => log::warn!(
                "Unknown strategy '{}' (did you mean '{}'?); no files will be deleted",
                name,
                suggestion
            ),
            None => log::warn!("Unknown strategy '{}'; no files will be deleted", name),
        }
        Self::Passthrough
    }

    /// Canonical name of this strategy.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ContentHash => "content-hash",
            Self::TrackNumber => "track-number",
            Self::AllFiles => "all-files",
            Self::Passthrough => "passthrough",
        }
    }

    /// Whether computing a key reads file content.
    #[must_use]
    pub fn reads_content(self) -> bool {
        matches!(self, Self::ContentHash)
    }

    /// Compute the group key for a file.
    ///
    /// Only [`GroupingStrategy::ContentHash`] touches the filesystem; the
    /// other strategies never fail.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if the file content cannot be read.
    pub fn group_key(self, record: &FileRecord, hasher: &Hasher) -> Result<GroupKey, HashError> {
        let key = match self {
            Self::ContentHash => hasher.full_hash_hex(&record.path)?,
            Self::TrackNumber => track_number_key(record.file_name()).to_string(),
            Self::AllFiles => ALL_FILES_KEY.to_string(),
            Self::Passthrough => record.path.to_string_lossy().into_owned(),
        };
        Ok(GroupKey::new(key))
    }
}

impl fmt::Display for GroupingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extract the track-number key from a file name.
///
/// A name starting with an ASCII digit yields everything before the first
/// space. Any other name, or a digit-led name without a space, yields the
/// whole name.
#[must_use]
pub fn track_number_key(file_name: &str) -> &str {
    if !file_name.starts_with(|c: char| c.is_ascii_digit()) {
        return file_name;
    }
    match file_name.find(' ') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}

/// Closest known name by Jaro-Winkler similarity, if it is close enough.
fn suggest_name(name: &str) -> Option<&'static str> {
    let normalized = normalize_name(name);
    KNOWN_NAMES
        .iter()
        .map(|(known, _)| (*known, strsim::jaro_winkler(&normalized, known)))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(known, _)| known)
}
