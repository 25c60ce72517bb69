//! Line/column positions and the offset-to-position map.
//!
//! Lines are 1-based and columns are 0-based byte offsets from the line
//! start. Line terminators are `\n`, `\r\n`, `\r`, U+2028 and U+2029.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line/column pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end positions of a token or node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Precomputed line start offsets for one source text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build the line map in a single pass over `text`.
    #[must_use]
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push((i + 1) as u32);
                }
                b'\n' => line_starts.push((i + 1) as u32),
                // U+2028 / U+2029 encode as E2 80 A8 / E2 80 A9.
                0xE2 if bytes.get(i + 1) == Some(&0x80)
                    && matches!(bytes.get(i + 2), Some(0xA8 | 0xA9)) =>
                {
                    i += 2;
                    line_starts.push((i + 1) as u32);
                }
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of byte `offset`. Offsets past the end clamp to the last line.
    #[must_use]
    pub fn position_of(&self, offset: u32) -> Position {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(insert_at) => insert_at.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_index).copied().unwrap_or(0);
        Position {
            line: line_index as u32 + 1,
            column: offset - line_start,
        }
    }

    /// Byte offset of the start of 1-based `line`.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let index = line.checked_sub(1)? as usize;
        self.line_starts.get(index).copied()
    }
}
