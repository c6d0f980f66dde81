//! groovy_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! The front end has two channels. Fatal problems (lexical and syntax errors)
//! travel as a [`GroovyError`] through `Result` and abort the parse. Style
//! warnings are plain [`Diagnostic`]s collected in a [`DiagnosticCollection`]
//! and handed back next to the tree. Every diagnostic carries a problem
//! statement and, where one is known, a suggested fix.

use groovy_core::text::{LineAndColumn, TextSpan};
use serde::Serialize;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code, a category and an optional fix.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002, 2001).
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The problem template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
    /// The suggested fix template, using the same placeholders.
    pub fix: Option<&'static str>,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// The file name given to the parser, if any.
    pub file: Option<String>,
    /// Where the diagnostic was raised.
    pub position: Option<LineAndColumn>,
    /// The source characters the diagnostic points at.
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub fix: Option<String>,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            position: None,
            span: None,
            message_text: format_message(message.message, args),
            fix: message.fix.map(|fix| format_message(fix, args)),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic with file and position info.
    pub fn with_location(
        file: &str,
        position: LineAndColumn,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file.to_string()),
            position: Some(position),
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Attach a position and the span it points at.
    pub fn at(mut self, position: LineAndColumn, span: TextSpan) -> Self {
        self.position = Some(position);
        self.span = Some(span);
        self
    }

    pub fn in_file(mut self, file: Option<&str>) -> Self {
        self.file = file.map(str::to_string);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// 1-based line, or 0 when the diagnostic has no location.
    pub fn line(&self) -> u32 {
        self.position.map_or(0, |p| p.line)
    }

    /// 1-based column, or 0 when the diagnostic has no location.
    pub fn column(&self) -> u32 {
        self.position.map_or(0, |p| p.column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(position) = self.position {
                write!(f, ":{}", position)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} GRV{}: {}", self.category, self.code, self.message_text)?;
        if let Some(ref fix) = self.fix {
            write!(f, "\n  solution: {}", fix)?;
        }
        Ok(())
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A fatal front-end error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GroovyError {
    /// Unrecognized character, unterminated literal or bad escape.
    #[error("{0}")]
    Lexical(Diagnostic),
    /// No viable alternative or token mismatch.
    #[error("{0}")]
    Syntax(Diagnostic),
}

impl GroovyError {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            GroovyError::Lexical(d) | GroovyError::Syntax(d) => d,
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        match self {
            GroovyError::Lexical(d) | GroovyError::Syntax(d) => d,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, GroovyError::Lexical(_))
    }
}

/// Diagnostics accumulated during one parse, in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Warning)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every diagnostic recorded after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg, fix: None }
        };
        ($code:expr, Error, $msg:expr, $fix:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg, fix: Some($fix) }
        };
        ($code:expr, Warning, $msg:expr, $fix:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg, fix: Some($fix) }
        };
    }

    // ========================================================================
    // Lexical errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(1001, Error, "unexpected character '{0}'");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "unterminated string literal");
    pub const NEWLINE_IN_SIMPLE_STRING: DiagnosticMessage = diag!(
        1003,
        Error,
        "end of line reached within a simple string 'x' or \"x\"",
        "for multi-line literals, use triple quotes '''x''' or \"\"\"x\"\"\""
    );
    pub const ILLEGAL_DOLLAR_IN_STRING: DiagnosticMessage = diag!(
        1004,
        Error,
        "illegal string body character after dollar sign",
        "either escape a literal dollar sign \"\\$5\" or bracket the value expression \"${5}\""
    );
    pub const INVALID_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1005, Error, "invalid escape sequence '\\{0}'");
    pub const UNTERMINATED_BLOCK_COMMENT: DiagnosticMessage = diag!(1006, Error, "unterminated block comment");
    pub const MISPLACED_SHEBANG: DiagnosticMessage = diag!(
        1007,
        Error,
        "'#!' is only allowed at the start of the first line",
        "remove the '#!' or move it to line 1, column 1"
    );
    pub const MALFORMED_NUMBER: DiagnosticMessage = diag!(1008, Error, "malformed number literal '{0}'");

    // ========================================================================
    // Syntax errors (2000-2099)
    // ========================================================================
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(2001, Error, "unexpected token: {0}");
    pub const EXPECTING_0_FOUND_1: DiagnosticMessage = diag!(2002, Error, "expecting {0}, found '{1}'");
    pub const AMBIGUOUS_BLOCK_AFTER_NEWLINE: DiagnosticMessage = diag!(
        2003,
        Error,
        "Ambiguous expression could be a parameterless closure expression, an isolated open code block, or it may continue a previous statement",
        "Add an explicit parameter list, e.g. {it -> ...}, or force it to be treated as an open block by giving it a label, e.g. L:{...}"
    );
    pub const AMBIGUOUS_COMMAND_OPERATOR: DiagnosticMessage = diag!(
        2004,
        Error,
        "Ambiguous expression: '{0}' after a command name could be a binary or a prefix operator",
        "Use parentheses to say which: f({0}x) or (f) {0} x"
    );
    pub const SPECULATION_BUDGET_EXCEEDED: DiagnosticMessage = diag!(
        2005,
        Error,
        "parse exceeded the speculative lookahead budget of {0} trial parses",
        "simplify the statement, or raise maxSpeculativeParses in the parser options"
    );
    pub const MISMATCHED_GENERIC_BRACKETS: DiagnosticMessage = diag!(
        2006,
        Error,
        "mismatched generic type brackets near '{0}'",
        "check that every '<' opening a type argument list is closed by a matching '>'"
    );
    pub const STRING_VALUE_EXPECTED: DiagnosticMessage = diag!(
        2007,
        Error,
        "expecting an identifier or a braced expression after '$', found '{0}'"
    );
    pub const ILLEGAL_MEMBER_NAME: DiagnosticMessage = diag!(2008, Error, "'{0}' cannot be used as a member name");

    // ========================================================================
    // Style warnings (3000-3099)
    // ========================================================================
    pub const STATEMENT_MAY_CONTINUE_PREVIOUS: DiagnosticMessage = diag!(
        3001,
        Warning,
        "Expression statement looks like it may continue a previous statement",
        "Either remove the previous newline, or add an explicit semicolon ';'."
    );
    pub const NEWLINE_BEFORE_BODY: DiagnosticMessage = diag!(
        3002,
        Warning,
        "A newline at this point does not follow the Groovy Coding Conventions.",
        "Keep this statement on one line, or use curly braces to break across multiple lines."
    );
    pub const AMBIGUOUS_BLOCK: DiagnosticMessage = diag!(
        3003,
        Warning,
        "Ambiguous expression could be either a parameterless closure expression or an isolated open code block",
        "Add an explicit closure parameter list, e.g. {it -> ...}, or force it to be treated as an open block by giving it a label, e.g. L:{...}"
    );
}
