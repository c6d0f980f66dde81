//! Buffered character source with line/column tracking.

use crate::text::{LineAndColumn, TextPos, TextSpan};

/// A saved position in a [`CharSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMark {
    pos: usize,
    line: u32,
    column: u32,
}

impl SourceMark {
    #[inline]
    pub fn pos(&self) -> TextPos {
        self.pos as TextPos
    }

    pub fn position(&self) -> LineAndColumn {
        LineAndColumn::new(self.line, self.column)
    }
}

/// The character stream the lexer consumes.
///
/// Lines and columns are 1-based. Every character, including a tab, advances
/// the column by one. `\r\n`, a lone `\r` and `\n` each end one line.
#[derive(Debug, Clone)]
pub struct CharSource {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl CharSource {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// The character `offset` positions ahead of the cursor.
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.peek(0)
    }

    /// Whether the upcoming characters spell `text`.
    pub fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    /// Consume one character, keeping line and column up to date.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        match ch {
            '\n' => self.new_line(),
            '\r' if self.current() != Some('\n') => self.new_line(),
            _ => self.column += 1,
        }
        Some(ch)
    }

    /// Consume `count` characters.
    pub fn bump_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.bump().is_none() {
                break;
            }
        }
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.pos as TextPos
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> LineAndColumn {
        LineAndColumn::new(self.line, self.column)
    }

    pub fn mark(&self) -> SourceMark {
        SourceMark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn rewind(&mut self, mark: SourceMark) {
        self.pos = mark.pos;
        self.line = mark.line;
        self.column = mark.column;
    }

    /// The raw source text covered by `span`.
    pub fn slice(&self, span: TextSpan) -> String {
        let range = span.to_range();
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars[start..end].iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_lines_and_columns() {
        let mut source = CharSource::new("ab\ncd");
        source.bump_n(2);
        assert_eq!(source.position(), LineAndColumn::new(1, 3));
        source.bump();
        assert_eq!(source.position(), LineAndColumn::new(2, 1));
        source.bump();
        assert_eq!(source.column(), 2);
    }

    #[test]
    fn test_crlf_is_one_line_break() {
        let mut source = CharSource::new("a\r\nb\rc");
        source.bump_n(3);
        assert_eq!(source.position(), LineAndColumn::new(2, 1));
        source.bump_n(2);
        assert_eq!(source.position(), LineAndColumn::new(3, 1));
    }

    #[test]
    fn test_mark_and_rewind() {
        let mut source = CharSource::new("x\ny");
        let mark = source.mark();
        source.bump_n(3);
        assert!(source.is_eof());
        source.rewind(mark);
        assert_eq!(source.current(), Some('x'));
        assert_eq!(source.line(), 1);
        assert_eq!(mark.pos(), 0);
        assert_eq!(mark.position(), LineAndColumn::new(1, 1));
    }

    #[test]
    fn test_starts_with_and_slice() {
        let source = CharSource::new(">>>= b");
        assert!(source.starts_with(">>>="));
        assert!(!source.starts_with(">>>>"));
        assert_eq!(source.slice(TextSpan::new(0, 3)), ">>>");
    }
}
