//! Fatal front-end errors rendered with miette.
//!
//! A [`GroovyError`] carries a character span and a 1-based position. miette
//! wants byte offsets into the source, so the span is re-measured against
//! the UTF-8 text through a [`LineMap`].

// Fields are read by the derive macros.
#![allow(unused_assignments)]

use groovy_core::text::LineMap;
use groovy_diagnostics::GroovyError;
use miette::{Diagnostic, SourceSpan};

/// A lexical or syntax error with its source snippet.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{code}: {message}")]
#[diagnostic(code(groovy::parse))]
pub struct ParseDiagnostic {
    pub message: String,
    pub code: String,
    #[source_code]
    pub src: miette::NamedSource<String>,
    #[label("{label}")]
    pub span: SourceSpan,
    pub label: String,
    #[help]
    pub fix: Option<String>,
}

impl ParseDiagnostic {
    pub fn from_error(error: &GroovyError, source_path: &str, source: &str) -> Self {
        let diagnostic = error.diagnostic();
        let label = if error.is_lexical() { "lexical error here" } else { "syntax error here" };
        let offset = diagnostic
            .position
            .map_or(source.len(), |position| LineMap::new(source).byte_offset(source, position));
        let chars = diagnostic.span.map_or(0, |span| span.length as usize);
        let length = source[offset..].chars().take(chars).map(char::len_utf8).sum::<usize>();

        Self {
            message: diagnostic.message_text.clone(),
            code: format!("GRV{}", diagnostic.code),
            src: miette::NamedSource::new(source_path, source.to_string()),
            span: (offset, length).into(),
            label: label.to_string(),
            fix: diagnostic.fix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovy_options::ParserOptions;

    fn first_error(source: &str) -> GroovyError {
        groovy_parser::parse(source, Some("test.groovy"), &ParserOptions::default()).unwrap_err()
    }

    #[test]
    fn test_syntax_error_span() {
        let source = "x = (1 + )";
        let diag = ParseDiagnostic::from_error(&first_error(source), "test.groovy", source);
        assert_eq!(diag.span.offset(), 9);
        assert_eq!(diag.span.len(), 1);
        assert_eq!(diag.code, "GRV2001");
        assert_eq!(diag.label, "syntax error here");
    }

    #[test]
    fn test_offsets_are_bytes() {
        let source = "s = 'é'\nx = )";
        let diag = ParseDiagnostic::from_error(&first_error(source), "test.groovy", source);
        assert_eq!(&source[diag.span.offset()..diag.span.offset() + diag.span.len()], ")");
    }

    #[test]
    fn test_fix_becomes_help() {
        let source = "{ println 1 }";
        let diag = ParseDiagnostic::from_error(&first_error(source), "test.groovy", source);
        assert!(diag.fix.is_some());
    }

    #[test]
    fn test_lexical_label() {
        let source = "x = 'abc\n";
        let diag = ParseDiagnostic::from_error(&first_error(source), "test.groovy", source);
        assert_eq!(diag.label, "lexical error here");
    }
}
