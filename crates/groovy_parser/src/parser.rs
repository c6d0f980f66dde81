//! The Groovy parser: shared machinery and the compilation unit.
//!
//! This is a predictive recursive descent parser. Most alternatives are
//! chosen from the next few token kinds; where that is not enough the parser
//! runs a trial parse ([`Parser::guess`]) and only keeps its verdict. The
//! grammar rules themselves live in the `statements`, `declarations`,
//! `types` and `expressions` modules as further `impl Parser` blocks.

use groovy_ast::node::AstNode;
use groovy_ast::syntax_kind::SyntaxKind;
use groovy_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage, GroovyError};
use groovy_options::ParserOptions;
use groovy_scanner::Token;

use crate::context::ParserContext;
use crate::token_buffer::TokenBuffer;

pub(crate) type ParseResult<T> = Result<T, GroovyError>;

/// The result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub root: AstNode,
    /// Style warnings in the order they were raised.
    pub warnings: Vec<Diagnostic>,
}

/// The parser produces a `COMPILATION_UNIT` tree from Groovy source text.
pub struct Parser {
    pub(crate) buffer: TokenBuffer,
    pub(crate) context: ParserContext,
    warnings: DiagnosticCollection,
    file_name: Option<String>,
    max_speculative_parses: u32,
}

impl Parser {
    pub fn new(source_text: &str, file_name: Option<&str>, options: &ParserOptions) -> Self {
        Self {
            buffer: TokenBuffer::new(source_text, file_name, options),
            context: ParserContext::new(options),
            warnings: DiagnosticCollection::new(),
            file_name: file_name.map(str::to_string),
            max_speculative_parses: options.max_speculative_parses,
        }
    }

    /// Parse the whole unit. The first lexical or syntax error aborts the
    /// parse and no tree is returned.
    pub fn parse_compilation_unit(mut self) -> Result<ParseOutput, GroovyError> {
        let result = self.compilation_unit();
        let root = match (result, self.buffer.take_lexical_error()) {
            (Ok(root), None) => root,
            (Err(error), Some(lexical)) if reported_before(&error, &lexical) => return Err(error),
            (_, Some(lexical)) => return Err(lexical),
            (Err(error), None) => return Err(error),
        };
        tracing::debug!(
            file = self.file_name.as_deref().unwrap_or("<input>"),
            tokens = self.buffer.len(),
            warnings = self.warnings.len(),
            "parsed compilation unit"
        );
        Ok(ParseOutput {
            root,
            warnings: self.warnings.into_diagnostics(),
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn current(&mut self) -> SyntaxKind {
        self.buffer.peek_kind(0)
    }

    #[inline]
    pub(crate) fn peek(&mut self, offset: usize) -> SyntaxKind {
        self.buffer.peek_kind(offset)
    }

    pub(crate) fn peek_token(&mut self, offset: usize) -> Token {
        self.buffer.peek(offset).clone()
    }

    #[inline]
    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn bump(&mut self) -> Token {
        self.buffer.advance()
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> ParseResult<Token> {
        if self.at(kind) {
            return Ok(self.bump());
        }
        let found = self.peek_token(0);
        Err(self.error_at(&found, &messages::EXPECTING_0_FOUND_1, &[kind.name(), &describe(&found)]))
    }

    /// A leaf node for a consumed token.
    pub(crate) fn leaf(token: &Token) -> AstNode {
        AstNode::leaf(token.kind, token.text.clone(), token.line, token.column)
    }

    /// A synthetic node positioned at the current token.
    pub(crate) fn synthetic_here(&mut self, kind: SyntaxKind) -> AstNode {
        let token = self.buffer.peek(0);
        AstNode::synthetic(kind, token.line, token.column)
    }

    /// The kind of the most recently consumed token.
    pub(crate) fn previous_kind(&self) -> SyntaxKind {
        self.buffer.previous().map_or(SyntaxKind::Eof, |t| t.kind)
    }

    /// Skip optional newlines. Returns whether any were skipped.
    pub(crate) fn nls(&mut self) -> bool {
        let mut skipped = false;
        while self.eat(SyntaxKind::Nls) {
            skipped = true;
        }
        skipped
    }

    /// Skip optional newlines before a statement body, warning about them.
    pub(crate) fn nls_warn(&mut self) {
        if self.at(SyntaxKind::Nls) {
            self.nls();
            let token = self.peek_token(0);
            self.warn(&token, &messages::NEWLINE_BEFORE_BODY, &[]);
        }
    }

    /// The offset of the first token after any newlines and semicolons.
    pub(crate) fn offset_past_separators(&mut self) -> usize {
        let mut offset = 0;
        while matches!(self.peek(offset), SyntaxKind::Nls | SyntaxKind::Semi) {
            offset += 1;
        }
        offset
    }

    /// The offset of the first token after any newlines.
    pub(crate) fn offset_past_newlines(&mut self) -> usize {
        let mut offset = 0;
        while self.peek(offset) == SyntaxKind::Nls {
            offset += 1;
        }
        offset
    }

    // ========================================================================
    // Trial parses
    // ========================================================================

    /// Run `trial` speculatively and report whether it succeeded. The token
    /// cursor and the context are restored either way and warnings raised
    /// during the trial are discarded.
    pub(crate) fn guess(&mut self, trial: impl FnOnce(&mut Self) -> ParseResult<()>) -> ParseResult<bool> {
        if !self.context.spend_trial() {
            let token = self.peek_token(0);
            let budget = self.max_speculative_parses.to_string();
            tracing::debug!(line = token.line, "speculation budget exhausted");
            return Err(self.error_at(&token, &messages::SPECULATION_BUDGET_EXCEEDED, &[&budget]));
        }
        let mark = self.buffer.mark();
        let snapshot = self.context.snapshot();
        self.context.guessing += 1;
        let outcome = trial(self);
        self.context.guessing -= 1;
        let reached = self.buffer.cursor();
        self.buffer.rewind(mark);
        self.context.restore(snapshot);
        tracing::trace!(cursor = self.buffer.cursor(), reached, matched = outcome.is_ok(), "trial parse");
        match outcome {
            Ok(()) => Ok(true),
            Err(error) if error.diagnostic().code == messages::SPECULATION_BUDGET_EXCEEDED.code => Err(error),
            Err(_) => Ok(false),
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    pub(crate) fn error_at(&self, token: &Token, message: &DiagnosticMessage, args: &[&str]) -> GroovyError {
        let diagnostic = Diagnostic::new(message, args)
            .at(token.position(), token.span)
            .in_file(self.file_name.as_deref());
        if !self.context.is_guessing() {
            tracing::debug!(code = diagnostic.code, line = token.line, column = token.column, "syntax error");
        }
        GroovyError::Syntax(diagnostic)
    }

    /// `unexpected token: x` at the current token.
    pub(crate) fn unexpected(&mut self) -> GroovyError {
        let token = self.peek_token(0);
        self.error_at(&token, &messages::UNEXPECTED_TOKEN, &[&describe(&token)])
    }

    /// Record a style warning. Trial parses record nothing.
    pub(crate) fn warn(&mut self, token: &Token, message: &DiagnosticMessage, args: &[&str]) {
        if self.context.is_guessing() {
            return;
        }
        let diagnostic = Diagnostic::new(message, args)
            .at(token.position(), token.span)
            .in_file(self.file_name.as_deref());
        tracing::debug!(code = diagnostic.code, line = token.line, "style warning");
        self.warnings.add(diagnostic);
    }

    // ========================================================================
    // Compilation unit
    // ========================================================================

    fn compilation_unit(&mut self) -> ParseResult<AstNode> {
        let mut unit = AstNode::synthetic(SyntaxKind::CompilationUnit, 1, 1);
        self.eat(SyntaxKind::ShebangComment);
        self.nls();

        let mut start_marker = SyntaxKind::Eof;
        if self.is_package_start()? {
            unit.add_child(self.package_definition()?);
            match self.separators() {
                Some(separator) => start_marker = separator,
                None if self.at(SyntaxKind::Eof) => {}
                None => return Err(self.unexpected()),
            }
        }

        self.statement_list(start_marker, |kind| kind == SyntaxKind::Eof, &mut unit.children)?;
        self.expect(SyntaxKind::Eof)?;
        Ok(unit)
    }

    /// Consume a run of statement separators. A run containing a `;` counts
    /// as `SEMI`, a run of newlines alone as `NLS`.
    pub(crate) fn separators(&mut self) -> Option<SyntaxKind> {
        let mut separator = None;
        loop {
            match self.current() {
                SyntaxKind::Semi => {
                    self.bump();
                    separator = Some(SyntaxKind::Semi);
                }
                SyntaxKind::Nls => {
                    self.bump();
                    separator.get_or_insert(SyntaxKind::Nls);
                }
                _ => return separator,
            }
        }
    }

    /// Statements separated by `;` or newlines, up to a token for which
    /// `is_end` holds. `start_marker` stands in for the separator before
    /// the first statement.
    pub(crate) fn statement_list(
        &mut self,
        start_marker: SyntaxKind,
        is_end: fn(SyntaxKind) -> bool,
        out: &mut Vec<AstNode>,
    ) -> ParseResult<()> {
        self.context.last_separator = match self.separators() {
            Some(SyntaxKind::Semi) => SyntaxKind::Semi,
            _ => start_marker,
        };
        loop {
            if is_end(self.current()) {
                return Ok(());
            }
            self.statement(out)?;
            match self.separators() {
                Some(separator) => self.context.last_separator = separator,
                None if is_end(self.current()) => return Ok(()),
                None => return Err(self.unexpected()),
            }
        }
    }
}

/// How a token is shown in an error message.
pub(crate) fn describe(token: &Token) -> String {
    match token.kind {
        SyntaxKind::Eof => "<EOF>".to_string(),
        _ => token.text.clone(),
    }
}

/// Whether a syntax error was raised before the lexer failed, so that it is
/// the first error in the source.
fn reported_before(error: &GroovyError, lexical: &GroovyError) -> bool {
    let start = |e: &GroovyError| e.diagnostic().span.map_or(0, |s| s.start);
    !error.is_lexical() && start(error) < start(lexical)
}
