//! groovy_scanner: Lexer for Groovy source code.
//!
//! Produces tokens from source text with support for:
//! - Newline significance that follows bracket nesting
//! - Interpolated strings (`"a${b}c"`, `"$x.y"`) split into constructor parts
//! - Triple-quoted multi-line strings and escape decoding
//! - Integer and floating-point literal families with type suffixes
//! - An optional whitespace-preserving mode for tooling

pub mod char_codes;
pub mod numbers;
mod scanner;
pub mod state;
mod stream;
mod token;

pub use numbers::{decode_number, NumberFormatError, NumericValue};
pub use scanner::{keyword_kind, Scanner};
pub use state::{LexerState, StringCtorState};
pub use stream::TokenStream;
pub use token::{Token, TokenFlags};

use groovy_diagnostics::GroovyError;
use groovy_options::ParserOptions;

/// Tokenize a whole source text. The last token is always `EOF`.
pub fn tokenize(text: &str, options: &ParserOptions) -> Result<Vec<Token>, GroovyError> {
    tokenize_with_file(text, None, options)
}

/// Like [`tokenize`], naming `file_name` in diagnostics.
pub fn tokenize_with_file(
    text: &str,
    file_name: Option<&str>,
    options: &ParserOptions,
) -> Result<Vec<Token>, GroovyError> {
    let mut scanner = Scanner::new(text, options);
    if let Some(name) = file_name {
        scanner = scanner.with_file_name(name);
    }
    let tokens = TokenStream::from_scanner(scanner).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}
