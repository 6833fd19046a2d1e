//! Conversions between one-based line/column locations and byte offsets.
//!
//! Lines are split on `\n` only; a carriage return preceding the newline is
//! part of the line's content, so an offset always equals the summed lengths
//! of the preceding lines (each plus one for its newline) plus the column
//! minus one. Columns count bytes.

use serde::Serialize;

use crate::error::PositionError;

/// A one-based line and column within a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// Line number (one-based).
    pub line: u32,
    /// Column number (one-based, UTF-8 bytes).
    pub column: u32,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Pre-computed line start offsets for repeated conversions over one buffer.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Indexes the line starts of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines in the buffer. An empty buffer has one empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a location to a byte offset.
    ///
    /// The column may address the position just past the last character of
    /// the line, which is where insertions at end of line land.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] when the line or column is zero or beyond
    /// the buffer, or when the offset would split a UTF-8 sequence.
    pub fn offset(&self, location: Location) -> Result<usize, PositionError> {
        let line_error = PositionError::LineOutOfRange {
            line: location.line,
            line_count: self.line_count(),
        };
        let line_idx = (location.line as usize)
            .checked_sub(1)
            .ok_or(line_error)?;
        let line_start = *self.line_starts.get(line_idx).ok_or(line_error)?;

        // The next line starts after this line's newline.
        let line_end = self
            .line_starts
            .get(line_idx + 1)
            .map_or(self.source.len(), |next| next - 1);
        let line_len = line_end - line_start;

        let column_error = PositionError::ColumnOutOfRange {
            line: location.line,
            column: location.column,
            max_column: line_len + 1,
        };
        let column_idx = (location.column as usize)
            .checked_sub(1)
            .ok_or(column_error)?;
        if column_idx > line_len {
            return Err(column_error);
        }

        let offset = line_start + column_idx;
        if !self.source.is_char_boundary(offset) {
            return Err(PositionError::NotCharBoundary { offset });
        }
        Ok(offset)
    }

    /// Converts a byte offset to a location, or `None` past the end.
    #[must_use]
    pub fn location(&self, offset: usize) -> Option<Location> {
        if offset > self.source.len() {
            return None;
        }
        // Index of the last line starting at or before `offset`.
        let line_idx = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line_idx).copied().unwrap_or(0);
        Some(Location::new(
            to_u32(line_idx + 1),
            to_u32(offset - line_start + 1),
        ))
    }
}

/// Converts a location in `source` to a byte offset.
///
/// # Errors
///
/// See [`LineIndex::offset`].
pub fn offset_of(source: &str, location: Location) -> Result<usize, PositionError> {
    LineIndex::new(source).offset(location)
}

/// Converts a byte offset in `source` to a location.
///
/// # Errors
///
/// Returns [`PositionError::OffsetOutOfRange`] past the end of the buffer and
/// [`PositionError::NotCharBoundary`] inside a multi-byte character.
pub fn location_of(source: &str, offset: usize) -> Result<Location, PositionError> {
    if !source.is_char_boundary(offset) && offset < source.len() {
        return Err(PositionError::NotCharBoundary { offset });
    }
    LineIndex::new(source)
        .location(offset)
        .ok_or(PositionError::OffsetOutOfRange {
            offset,
            length: source.len(),
        })
}

/// Counts lines the same way [`LineIndex`] does: newlines plus one.
#[must_use]
pub fn line_count(source: &str) -> usize {
    source.bytes().filter(|byte| *byte == b'\n').count() + 1
}

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    (
        to_u32(pos.row.saturating_add(1)),
        to_u32(pos.column.saturating_add(1)),
    )
}

// Line/column numbers will realistically never exceed u32::MAX.
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
