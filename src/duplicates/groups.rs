//! Group construction and survivor selection.
//!
//! # Overview
//!
//! This module turns a directory listing into a [`GroupTable`] (every file
//! filed under the key its strategy computes) and then picks the survivor of
//! each group.
//!
//! ## Survivor selection
//!
//! Members of a group are ordered by [`FileRecord`] ordering: earliest
//! modification time first, canonical path as the tie-break. The first member
//! is kept, the rest are marked for removal. Selection never touches the
//! filesystem.
//!
//! # Example
//!
//! ```
//! use mp3prune::duplicates::{GroupKey, GroupTable};
//! use mp3prune::scanner::FileRecord;
//! use std::path::PathBuf;
//! use std::time::{Duration, SystemTime};
//!
//! let at = |s| SystemTime::UNIX_EPOCH + Duration::from_secs(s);
//!
//! let mut table = GroupTable::new();
//! table.insert(GroupKey::new("03"), FileRecord::new(at(20), PathBuf::from("/m/03 Take2.mp3")));
//! table.insert(GroupKey::new("03"), FileRecord::new(at(10), PathBuf::from("/m/03 Take1.mp3")));
//! table.insert(GroupKey::new("Intro.mp3"), FileRecord::new(at(30), PathBuf::from("/m/Intro.mp3")));
//!
//! let selections = table.select_survivors();
//! assert_eq!(selections.len(), 2);
//! assert_eq!(selections[0].keep.path, PathBuf::from("/m/03 Take1.mp3"));
//! assert_eq!(selections[0].remove.len(), 1);
//! assert!(selections[1].remove.is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use super::strategy::GroupingStrategy;
use crate::scanner::{FileRecord, HashError, Hasher};

/// Key that partitions files into groups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Wrap a key value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The key value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Files of one directory scan, partitioned by [`GroupKey`].
///
/// Keys iterate in sorted order so processing is reproducible.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    groups: BTreeMap<GroupKey, Vec<FileRecord>>,
}

impl GroupTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File a record under `key`.
    pub fn insert(&mut self, key: GroupKey, record: FileRecord) {
        self.groups.entry(key).or_default().push(record);
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the table has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of files across all groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Members of the group filed under `key`, in insertion order.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn get(&self, key: &GroupKey) -> Option<&[FileRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Order each group and split it into the survivor and the rest.
    ///
    /// Consumes the table: it only lives for a single pass.
    #[must_use]
    pub fn select_survivors(self) -> Vec<GroupSelection> {
        self.groups
            .into_iter()
            .filter_map(|(key, mut members)| {
                members.sort();
                let mut members = members.into_iter();
                let keep = members.next()?;
                let remove: Vec<FileRecord> = members.collect();
                if !remove.is_empty() {
                    log::debug!(
                        "Group '{}': keeping {}, removing {}",
                        key,
                        keep.path.display(),
                        remove.len()
                    );
                }
                Some(GroupSelection { key, keep, remove })
            })
            .collect()
    }
}

/// The outcome of ordering one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSelection {
    /// Key shared by the group
    pub key: GroupKey,
    /// Earliest member, the one that stays on disk
    pub keep: FileRecord,
    /// Every other member, in order
    pub remove: Vec<FileRecord>,
}

/// Result of computing keys for a directory listing.
#[derive(Debug, Default)]
pub struct Grouping {
    /// Files grouped by key
    pub table: GroupTable,
    /// Files whose key could not be computed (excluded from the table)
    pub unreadable: Vec<HashError>,
}

/// Compute the key of every record and build the [`GroupTable`].
///
/// Content hashing runs on a dedicated pool of `io_threads` threads. Every
/// key is known before this function returns, so callers can only start
/// deleting once group membership is final.
///
/// # Example
///
/// ```
/// use mp3prune::duplicates::{build_groups, GroupingStrategy};
/// use mp3prune::scanner::{FileRecord, Hasher};
/// use std::path::PathBuf;
/// use std::time::SystemTime;
///
/// let records = vec![
///     FileRecord::new(SystemTime::UNIX_EPOCH, PathBuf::from("/m/01 A.mp3")),
///     FileRecord::new(SystemTime::UNIX_EPOCH, PathBuf::from("/m/01 B.mp3")),
/// ];
/// let grouping = build_groups(records, GroupingStrategy::TrackNumber, &Hasher::new(), 1);
/// assert_eq!(grouping.table.len(), 1);
/// assert!(grouping.unreadable.is_empty());
/// ```
#[must_use]
pub fn build_groups(
    records: Vec<FileRecord>,
    strategy: GroupingStrategy,
    hasher: &Hasher,
    io_threads: usize,
) -> Grouping {
    let keyed: Vec<(FileRecord, Result<GroupKey, HashError>)> = if strategy.reads_content() {
        log::debug!(
            "Hashing {} file(s) with {} I/O thread(s)",
            records.len(),
            io_threads.max(1)
        );
        match rayon::ThreadPoolBuilder::new()
            .num_threads(io_threads.max(1))
            .build()
        {
            Ok(pool) => pool.install(|| key_all_parallel(records, strategy, hasher)),
            Err(e) => {
                log::warn!(
                    "Failed to create hashing thread pool, using global pool with {} threads: {}",
                    rayon::current_num_threads(),
                    e
                );
                key_all_parallel(records, strategy, hasher)
            }
        }
    } else {
        records
            .into_iter()
            .map(|record| {
                let key = strategy.group_key(&record, hasher);
                (record, key)
            })
            .collect()
    };

    let mut grouping = Grouping::default();
    for (record, key) in keyed {
        match key {
            Ok(key) => {
                log::trace!("{} -> {}", record.path.display(), key);
                grouping.table.insert(key, record);
            }
            Err(e) => {
                log::warn!("Skipping unreadable file: {}", e);
                grouping.unreadable.push(e);
            }
        }
    }

    grouping
}

fn key_all_parallel(
    records: Vec<FileRecord>,
    strategy: GroupingStrategy,
    hasher: &Hasher,
) -> Vec<(FileRecord, Result<GroupKey, HashError>)> {
    records
        .into_par_iter()
        .map(|record| {
            let key = strategy.group_key(&record, hasher);
            (record, key)
        })
        .collect()
}
