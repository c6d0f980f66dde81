//! An index-addressable token buffer with O(1) mark and rewind.
//!
//! Tokens are pulled from the [`TokenStream`] only as far as the parser
//! looks ahead, so a trial parse can scan forward and the real parse can
//! replay the same tokens afterwards. A lexical error ends the buffer with a
//! synthetic `EOF` at the error position; the error itself is kept and handed
//! back to the caller once the parse finishes.

use groovy_ast::syntax_kind::SyntaxKind;
use groovy_core::text::{LineAndColumn, TextSpan};
use groovy_diagnostics::GroovyError;
use groovy_options::ParserOptions;
use groovy_scanner::{Scanner, Token, TokenStream};

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferMark(usize);

pub struct TokenBuffer {
    stream: TokenStream,
    tokens: Vec<Token>,
    cursor: usize,
    /// Drop whitespace, comments and insignificant newlines.
    filter_trivia: bool,
    lexical_error: Option<GroovyError>,
    exhausted: bool,
}

impl TokenBuffer {
    pub fn new(text: &str, file_name: Option<&str>, options: &ParserOptions) -> Self {
        let mut scanner = Scanner::new(text, options);
        if let Some(name) = file_name {
            scanner = scanner.with_file_name(name);
        }
        Self {
            stream: TokenStream::from_scanner(scanner),
            tokens: Vec::new(),
            cursor: 0,
            filter_trivia: options.whitespace_included,
            lexical_error: None,
            exhausted: false,
        }
    }

    /// Make sure the token at `index` exists. Past the end, the final `EOF`
    /// is repeated.
    fn fill(&mut self, index: usize) {
        while self.tokens.len() <= index && !self.exhausted {
            let token = match self.stream.next_token() {
                Ok(token) => token,
                Err(error) => {
                    let span = error.diagnostic().span.unwrap_or_else(|| TextSpan::empty(0));
                    let position = error.diagnostic().position.unwrap_or(LineAndColumn::new(1, 1));
                    self.lexical_error = Some(error);
                    Token::new(SyntaxKind::Eof, "", TextSpan::empty(span.start), position)
                }
            };
            if self.filter_trivia && self.is_filtered(&token) {
                continue;
            }
            self.exhausted = token.is(SyntaxKind::Eof);
            self.tokens.push(token);
        }
    }

    fn is_filtered(&self, token: &Token) -> bool {
        if token.kind.is_trivia() || token.is_insignificant() {
            return true;
        }
        // Runs of blank lines arrive as separate newline tokens here.
        token.is(SyntaxKind::Nls) && self.tokens.last().is_some_and(|last| last.is(SyntaxKind::Nls))
    }

    /// The token `offset` positions ahead of the cursor.
    pub fn peek(&mut self, offset: usize) -> &Token {
        let index = self.cursor + offset;
        self.fill(index);
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    #[inline]
    pub fn peek_kind(&mut self, offset: usize) -> SyntaxKind {
        self.peek(offset).kind
    }

    /// Consume the current token. The final `EOF` is never consumed.
    pub fn advance(&mut self) -> Token {
        let token = self.peek(0).clone();
        if !token.is(SyntaxKind::Eof) {
            self.cursor += 1;
        }
        token
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> Option<&Token> {
        self.cursor.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    pub fn mark(&self) -> BufferMark {
        BufferMark(self.cursor)
    }

    pub fn rewind(&mut self, mark: BufferMark) {
        self.cursor = mark.0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Tokens pulled from the lexer so far.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn take_lexical_error(&mut self) -> Option<GroovyError> {
        self.lexical_error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> TokenBuffer {
        TokenBuffer::new(text, None, &ParserOptions::default())
    }

    #[test]
    fn test_fills_lazily() {
        let mut buffer = buffer("a b c");
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.peek(1).text, "b");
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_mark_and_rewind() {
        let mut buffer = buffer("a b");
        let mark = buffer.mark();
        buffer.advance();
        buffer.advance();
        assert!(buffer.peek(0).is(SyntaxKind::Eof));
        buffer.rewind(mark);
        assert_eq!(buffer.advance().text, "a");
        assert_eq!(buffer.previous().map(|t| t.text.as_str()), Some("a"));
    }

    #[test]
    fn test_eof_repeats() {
        let mut buffer = buffer("");
        assert!(buffer.advance().is(SyntaxKind::Eof));
        assert!(buffer.peek(5).is(SyntaxKind::Eof));
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_lexical_error_becomes_eof() {
        let mut buffer = buffer("a `");
        assert!(buffer.peek(1).is(SyntaxKind::Eof));
        let error = buffer.take_lexical_error().unwrap();
        assert!(error.is_lexical());
    }

    #[test]
    fn test_whitespace_mode_filters_trivia() {
        let options = ParserOptions::default().with_whitespace_included(true);
        let mut buffer = TokenBuffer::new("a // c\n\n(b\n)", None, &options);
        let kinds: Vec<_> = (0..6).map(|i| buffer.peek_kind(i)).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Ident,
                SyntaxKind::Nls,
                SyntaxKind::LParen,
                SyntaxKind::Ident,
                SyntaxKind::RParen,
                SyntaxKind::Eof
            ]
        );
    }
}
