//! A token stream that drives the scanner across interpolated strings.

use crate::scanner::Scanner;
use crate::state::StringCtorState;
use crate::token::Token;
use groovy_ast::syntax_kind::SyntaxKind;
use groovy_diagnostics::GroovyError;
use groovy_options::ParserOptions;

/// Pulls tokens from a [`Scanner`], resuming a suspended string body as
/// soon as the embedded value before it has ended.
///
/// As an iterator the stream yields every token up to and including `EOF`
/// and stops after the first error.
pub struct TokenStream {
    scanner: Scanner,
    done: bool,
}

impl TokenStream {
    pub fn new(text: &str, options: &ParserOptions) -> Self {
        Self::from_scanner(Scanner::new(text, options))
    }

    pub fn from_scanner(scanner: Scanner) -> Self {
        Self { scanner, done: false }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn next_token(&mut self) -> Result<Token, GroovyError> {
        if let StringCtorState::AwaitingLiteral { triple } = self.scanner.state().string_ctor {
            self.scanner.state_mut().string_ctor = StringCtorState::None;
            return self.scanner.resume_string_body(triple);
        }
        self.scanner.next_token()
    }
}

impl Iterator for TokenStream {
    type Item = Result<Token, GroovyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        self.done = match &result {
            Ok(token) => token.is(SyntaxKind::Eof),
            Err(_) => true,
        };
        Some(result)
    }
}

impl std::iter::FusedIterator for TokenStream {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_ends_with_single_eof() {
        let tokens: Vec<_> = TokenStream::new("a", &ParserOptions::default())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].is(SyntaxKind::Eof));
    }

    #[test]
    fn test_stream_stops_after_error() {
        let mut stream = TokenStream::new("a ` b", &ParserOptions::default());
        assert!(stream.next().unwrap().is_ok());
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_resumes_string_after_simple_value() {
        let kinds: Vec<_> = TokenStream::new("\"a$b c\"", &ParserOptions::default())
            .map(|t| t.unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::StringCtorStart,
                SyntaxKind::Ident,
                SyntaxKind::StringCtorEnd,
                SyntaxKind::Eof
            ]
        );
    }
}
