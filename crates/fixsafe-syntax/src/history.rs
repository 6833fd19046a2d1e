//! Fix history and named buffer snapshots.
//!
//! The history is a bounded FIFO: once the limit is reached, recording a fix
//! evicts the oldest record. Snapshots are whole-buffer copies kept until
//! removed, cleared or overwritten under the same identifier.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use time::OffsetDateTime;

use crate::error::SnapshotError;
use crate::position::{Location, line_count};

/// Default number of retained fix records.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// One applied fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixRecord {
    /// Rule the fix was made for.
    pub rule_id: String,
    /// One-based line of the fix.
    pub line: u32,
    /// One-based column of the fix.
    pub column: u32,
    /// Text before the fix.
    pub original_text: String,
    /// Text after the fix.
    pub fixed_text: String,
    /// When the fix was recorded (UTC).
    pub timestamp: OffsetDateTime,
}

impl FixRecord {
    /// Location of the fix.
    #[must_use]
    pub const fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }
}

/// Bounded log of applied fixes, oldest first.
#[derive(Debug, Clone)]
pub struct FixHistory {
    records: VecDeque<FixRecord>,
    limit: usize,
}

impl FixHistory {
    /// Creates a history retaining at most `limit` records (minimum one).
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let bounded = limit.max(1);
        Self {
            records: VecDeque::with_capacity(bounded),
            limit: bounded,
        }
    }

    /// Appends a record stamped with the current time, evicting the oldest
    /// when full.
    pub fn record(
        &mut self,
        rule_id: impl Into<String>,
        location: Location,
        original_text: impl Into<String>,
        fixed_text: impl Into<String>,
    ) {
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(FixRecord {
            rule_id: rule_id.into(),
            line: location.line,
            column: location.column,
            original_text: original_text.into(),
            fixed_text: fixed_text.into(),
            timestamp: OffsetDateTime::now_utc(),
        });
    }

    /// Records oldest first.
    pub fn records(&self) -> impl Iterator<Item = &FixRecord> {
        self.records.iter()
    }

    /// Records for one rule, oldest first.
    pub fn for_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a FixRecord> {
        self.records
            .iter()
            .filter(move |record| record.rule_id == rule_id)
    }

    /// Most recent record.
    #[must_use]
    pub fn latest(&self) -> Option<&FixRecord> {
        self.records.back()
    }

    /// Retention limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for FixHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

/// Differences between a buffer and a stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotDiff {
    /// Contents are byte-for-byte equal.
    pub identical: bool,
    /// Buffer length minus snapshot length, in bytes.
    pub length_delta: i64,
    /// Buffer line count minus snapshot line count.
    pub line_delta: i64,
    /// Contents differ.
    pub has_changes: bool,
}

/// Named buffer copies.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshots: HashMap<String, String>,
}

impl SnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a copy of `source` under `id`, replacing any previous one.
    pub fn create(&mut self, id: impl Into<String>, source: &str) {
        self.snapshots.insert(id.into(), source.to_owned());
    }

    /// The snapshot stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotFound`] for an unknown identifier.
    pub fn get(&self, id: &str) -> Result<&str, SnapshotError> {
        self.snapshots
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| not_found(id))
    }

    /// Removes and returns the snapshot stored under `id`.
    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.snapshots.remove(id)
    }

    /// Compares `source` with the snapshot stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotFound`] for an unknown identifier.
    pub fn compare(&self, id: &str, source: &str) -> Result<SnapshotDiff, SnapshotError> {
        let snapshot = self.get(id)?;
        let identical = snapshot == source;
        Ok(SnapshotDiff {
            identical,
            length_delta: signed_delta(source.len(), snapshot.len()),
            line_delta: signed_delta(line_count(source), line_count(snapshot)),
            has_changes: !identical,
        })
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` when no snapshots are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

fn not_found(id: &str) -> SnapshotError {
    SnapshotError::NotFound { id: id.to_owned() }
}

fn signed_delta(current: usize, previous: usize) -> i64 {
    let magnitude = i64::try_from(current.abs_diff(previous)).unwrap_or(i64::MAX);
    if current >= previous { magnitude } else { -magnitude }
}
