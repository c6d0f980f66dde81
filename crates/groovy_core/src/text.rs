//! Text span and line map types for source location tracking.
//!
//! Token spans are measured in characters, because the lexer reads the
//! source as a sequence of `char`s. The [`LineMap`] works on the UTF-8 text
//! and converts 1-based line/column pairs back into byte offsets for
//! renderers that need them.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A position in source text, measured in characters from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Serialize)]
pub struct TextSpan {
    /// The character offset where this span starts.
    pub start: TextPos,
    /// The length of this span in characters.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Convert to a character index range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }

    /// Return a new span covering both this span and the other.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        TextSpan::from_bounds(start, end)
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A 1-based line and column, as reported to users.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct LineAndColumn {
    pub line: u32,
    pub column: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for LineAndColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A map from lines to the byte offsets where they start.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offsets of the start of each line.
    line_starts: Vec<usize>,
}

impl LineMap {
    /// Build a line map from source text.
    ///
    /// A lone `\r` does not start a new line here; the lexer counts it as a
    /// line break, so [`LineMap::byte_offset`] clamps columns to the line.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| i + 1));
        Self { line_starts }
    }

    /// Get the 0-based line index for a byte offset.
    pub fn line_index_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Convert a 1-based line/column (column counted in characters) into a
    /// byte offset into `text`. Positions past the end are clamped.
    pub fn byte_offset(&self, text: &str, position: LineAndColumn) -> usize {
        let line = (position.line.max(1) - 1) as usize;
        let Some(&start) = self.line_starts.get(line) else {
            return text.len();
        };
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(text.len());
        let wanted = position.column.max(1) as usize - 1;
        text[start..end]
            .char_indices()
            .nth(wanted)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    /// Get the byte offset of the start of a 0-based line.
    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts[line]
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.end(), 15);
        assert!(span.contains(5));
        assert!(span.contains(14));
        assert!(!span.contains(15));
        assert_eq!(span.to_range(), 5..15);
    }

    #[test]
    fn test_span_union() {
        let a = TextSpan::from_bounds(2, 4);
        let b = TextSpan::from_bounds(8, 9);
        assert_eq!(a.union(&b), TextSpan::from_bounds(2, 9));
    }

    #[test]
    fn test_line_map_counts_lines() {
        let map = LineMap::new("a\nbb\nccc");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_start(1), 2);
        assert_eq!(map.line_index_of(3), 1);
        assert_eq!(map.line_index_of(5), 2);
    }

    #[test]
    fn test_byte_offset_handles_multibyte_columns() {
        let text = "x = 'é'\ny = 2";
        let map = LineMap::new(text);
        // column 7 on line 1 is the closing quote, after a two-byte char
        assert_eq!(map.byte_offset(text, LineAndColumn::new(1, 7)), 7);
        assert_eq!(map.byte_offset(text, LineAndColumn::new(2, 1)), 9);
        assert_eq!(map.byte_offset(text, LineAndColumn::new(9, 1)), text.len());
    }
}
