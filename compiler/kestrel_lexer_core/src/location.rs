//! Line/column positions and offset lookup.
//!
//! Positions are tracked incrementally by the tokenizer while it scans.
//! When they were not (diagnostics against an arbitrary byte offset), use
//! [`get_line_info`] for a one-off O(n) lookup or [`LineOffsetTable`] for
//! repeated O(log L) lookups. All three agree for every offset.

use std::fmt;

use crate::whitespace::next_line_break;

/// A point in the source: 1-based line, 0-based byte column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    /// Byte offset from the start of the line (not a code-point count).
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span between two positions, with optional naming metadata.
///
/// `end` is `None` while the span is still open (a node whose end has not
/// been parsed yet).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub start: Position,
    pub end: Option<Position>,
    pub filename: Option<String>,
    pub identifier_name: Option<String>,
}

impl SourceLocation {
    /// Open a location at `start`.
    pub fn new(start: Position) -> Self {
        SourceLocation {
            start,
            end: None,
            filename: None,
            identifier_name: None,
        }
    }

    /// A closed location from `start` to `end`.
    pub fn spanning(start: Position, end: Position) -> Self {
        SourceLocation {
            end: Some(end),
            ..SourceLocation::new(start)
        }
    }

    /// Close the span at `end`.
    pub fn close(&mut self, end: Position) {
        self.end = Some(end);
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_identifier_name(mut self, name: impl Into<String>) -> Self {
        self.identifier_name = Some(name.into());
        self
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }
}

/// Byte distance as a column, saturating for absurdly long lines.
#[inline]
pub(crate) fn column(from: usize, to: usize) -> u32 {
    u32::try_from(to - from).unwrap_or(u32::MAX)
}

/// Compute the position of `offset` by scanning line breaks from the start.
///
/// Lines are counted from 1. A break counts only when it ends strictly
/// before `offset`, so the offset of a `\n` itself still belongs to the line
/// it terminates. Offsets past the end of the buffer are measured from the
/// last line start.
///
/// ```
/// use kestrel_lexer_core::{get_line_info, Position};
///
/// let src = b"a\r\nb";
/// assert_eq!(get_line_info(src, 3), Position::new(2, 0));
/// ```
pub fn get_line_info(buffer: &[u8], offset: usize) -> Position {
    let mut line = 1u32;
    let mut cur = 0usize;
    while let Some(index) = next_line_break(buffer, cur) {
        if index >= offset {
            break;
        }
        line += 1;
        cur = index + 1;
    }
    Position::new(line, column(cur, offset.max(cur)))
}

/// Pre-computed line starts for O(log L) offset lookup.
///
/// Built with the same line-break rules as [`get_line_info`]: `\r\n` is a
/// single break, lone `\r` and U+2028/U+2029 are breaks too.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start. `starts[0] == 0`.
    starts: Vec<usize>,
}

impl LineOffsetTable {
    /// Scan `buffer` once and record every line start.
    pub fn build(buffer: &[u8]) -> Self {
        let mut starts = vec![0usize];
        let mut cur = 0usize;
        while let Some(index) = next_line_break(buffer, cur) {
            cur = index + 1;
            starts.push(cur);
        }
        LineOffsetTable { starts }
    }

    /// Position of `offset`; identical to [`get_line_info`].
    pub fn position(&self, offset: usize) -> Position {
        // A line starting exactly at `offset` began after a break ending at
        // `offset - 1`, which is strictly before `offset`, so it counts.
        let idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.starts[idx];
        let line = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        Position::new(line, column(line_start, offset.max(line_start)))
    }

    /// Byte offset where 1-based `line` starts, if it exists.
    pub fn line_start(&self, line: u32) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.starts.get((line - 1) as usize).copied()
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests;
