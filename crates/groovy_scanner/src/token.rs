//! Tokens produced by the lexer.

use groovy_ast::syntax_kind::SyntaxKind;
use groovy_core::text::{LineAndColumn, TextSpan};
use serde::{Serialize, Serializer};

bitflags::bitflags! {
    /// Token flags describing a token's surroundings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u8 {
        const NONE                   = 0;
        /// Whitespace, a comment or a line break came right before this token.
        const PRECEDED_BY_WHITESPACE = 1 << 0;
        /// A newline kept in whitespace-included mode that is not a separator.
        const INSIGNIFICANT          = 1 << 1;
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Decoded text: string contents without quotes and with escapes
    /// applied, `<newline>` for a significant newline, source text otherwise.
    pub text: String,
    /// The exact source characters this token was scanned from.
    pub span: TextSpan,
    pub line: u32,
    pub column: u32,
    #[serde(serialize_with = "serialize_flags")]
    pub flags: TokenFlags,
}

fn serialize_flags<S: Serializer>(flags: &TokenFlags, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(flags.bits())
}

impl Token {
    pub fn new(kind: SyntaxKind, text: impl Into<String>, span: TextSpan, position: LineAndColumn) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            line: position.line,
            column: position.column,
            flags: TokenFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    pub fn position(&self) -> LineAndColumn {
        LineAndColumn::new(self.line, self.column)
    }

    pub fn is_preceded_by_whitespace(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDED_BY_WHITESPACE)
    }

    pub fn is_insignificant(&self) -> bool {
        self.flags.contains(TokenFlags::INSIGNIFICANT)
    }

    /// The length of this token in source characters.
    pub fn len(&self) -> u32 {
        self.span.length
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}
