//! The Groovy lexer.
//!
//! Converts source text into tokens one at a time. The lexer is stateful:
//! whether a newline is a statement separator depends on the brackets open
//! around it, and interpolated strings hand control back and forth between
//! the string body and the embedded value. String bodies suspended at a `$`
//! are resumed by the [`TokenStream`](crate::TokenStream) adapter, not here.

use crate::char_codes::*;
use crate::state::{LexerState, StringCtorState};
use crate::token::{Token, TokenFlags};
use groovy_ast::syntax_kind::SyntaxKind;
use groovy_core::source::{CharSource, SourceMark};
use groovy_core::text::TextSpan;
use groovy_diagnostics::{messages, Diagnostic, DiagnosticMessage, GroovyError};
use groovy_options::ParserOptions;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Operators and comment openers in matching priority order. The first
/// entry the input starts with wins, so longer spellings come first.
const OPERATORS: &[(&str, SyntaxKind)] = &[
    (">>>=", SyntaxKind::BsrAssign),
    ("<=>", SyntaxKind::CompareTo),
    (">>=", SyntaxKind::SrAssign),
    (">>>", SyntaxKind::Bsr),
    ("<<=", SyntaxKind::SlAssign),
    ("...", SyntaxKind::TripleDot),
    ("==~", SyntaxKind::RegexMatch),
    ("**=", SyntaxKind::StarStarAssign),
    ("==", SyntaxKind::Equal),
    ("!=", SyntaxKind::NotEqual),
    ("/=", SyntaxKind::DivAssign),
    ("+=", SyntaxKind::PlusAssign),
    ("++", SyntaxKind::Inc),
    ("-=", SyntaxKind::MinusAssign),
    ("--", SyntaxKind::Dec),
    ("*=", SyntaxKind::StarAssign),
    ("%=", SyntaxKind::ModAssign),
    (">>", SyntaxKind::Sr),
    (">=", SyntaxKind::Ge),
    ("<<", SyntaxKind::Sl),
    ("<=", SyntaxKind::Le),
    ("^=", SyntaxKind::BxorAssign),
    ("|=", SyntaxKind::BorAssign),
    ("||", SyntaxKind::Lor),
    ("&=", SyntaxKind::BandAssign),
    ("&&", SyntaxKind::Land),
    ("..", SyntaxKind::RangeInclusive),
    ("*.", SyntaxKind::StarDot),
    ("?.", SyntaxKind::QuestionDot),
    ("=~", SyntaxKind::RegexFind),
    ("**", SyntaxKind::StarStar),
    ("->", SyntaxKind::ClosureOp),
    ("//", SyntaxKind::SingleLineComment),
    ("/*", SyntaxKind::MultiLineComment),
    ("?", SyntaxKind::Question),
    (".", SyntaxKind::Dot),
    ("=", SyntaxKind::Assign),
    ("!", SyntaxKind::LNot),
    ("/", SyntaxKind::Div),
    ("+", SyntaxKind::Plus),
    ("-", SyntaxKind::Minus),
    ("*", SyntaxKind::Star),
    ("%", SyntaxKind::Mod),
    (">", SyntaxKind::Gt),
    ("<", SyntaxKind::Lt),
    ("^", SyntaxKind::Bxor),
    ("|", SyntaxKind::Bor),
    ("&", SyntaxKind::Band),
    ("#!", SyntaxKind::ShebangComment),
];

fn keyword_table() -> &'static FxHashMap<&'static str, SyntaxKind> {
    static TABLE: OnceLock<FxHashMap<&'static str, SyntaxKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        SyntaxKind::keywords()
            .filter_map(|kind| kind.keyword_text().map(|text| (text, kind)))
            .collect()
    })
}

/// Look up a keyword by its spelling.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    keyword_table().get(text).copied()
}

/// The scanner converts Groovy source text into tokens.
pub struct Scanner {
    source: CharSource,
    state: LexerState,
    assert_keyword_enabled: bool,
    enum_keyword_enabled: bool,
    whitespace_included: bool,
    file_name: Option<String>,
    /// Start of the token being scanned.
    token_start: SourceMark,
    /// Flags for the next token, gathered from skipped trivia.
    pending_flags: TokenFlags,
}

impl Scanner {
    pub fn new(text: &str, options: &ParserOptions) -> Self {
        let source = CharSource::new(text);
        let token_start = source.mark();
        Self {
            source,
            state: LexerState::new(),
            assert_keyword_enabled: options.assert_keyword_enabled,
            enum_keyword_enabled: options.enum_keyword_enabled,
            whitespace_included: options.whitespace_included,
            file_name: None,
            token_start,
            pending_flags: TokenFlags::NONE,
        }
    }

    /// Name reported in diagnostics.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn state(&self) -> &LexerState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut LexerState {
        &mut self.state
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token. Returns an `EOF` token at the end of input, and
    /// keeps returning it if called again.
    pub fn next_token(&mut self) -> Result<Token, GroovyError> {
        loop {
            self.begin_token();
            let Some(ch) = self.source.current() else {
                return Ok(self.finish(SyntaxKind::Eof, String::new()));
            };
            let token = match ch {
                '(' => {
                    self.state.open_bracket();
                    self.single(SyntaxKind::LParen)
                }
                '[' => {
                    self.state.open_bracket();
                    self.single(SyntaxKind::LBrack)
                }
                ')' => {
                    self.state.close_bracket();
                    self.single(SyntaxKind::RParen)
                }
                ']' => {
                    self.state.close_bracket();
                    self.single(SyntaxKind::RBrack)
                }
                '{' => {
                    self.state.push_brace();
                    self.single(SyntaxKind::LCurly)
                }
                '}' => {
                    self.state.pop_brace();
                    self.single(SyntaxKind::RCurly)
                }
                ':' => self.single(SyntaxKind::Colon),
                ',' => self.single(SyntaxKind::Comma),
                '~' => self.single(SyntaxKind::BNot),
                ';' => self.single(SyntaxKind::Semi),
                '$' => self.single(SyntaxKind::Dollar),
                '@' => self.single(SyntaxKind::At),
                c if is_white_space(c) => match self.scan_whitespace() {
                    Some(token) => token,
                    None => continue,
                },
                c if is_line_break(c) => match self.scan_newlines()? {
                    Some(token) => token,
                    None => continue,
                },
                SINGLE_QUOTE | DOUBLE_QUOTE => self.scan_string(ch)?,
                c if is_letter(c) => self.scan_identifier(),
                c if is_digit(c) => self.scan_number()?,
                _ => match self.scan_operator()? {
                    Some(token) => token,
                    None => continue,
                },
            };
            if token.kind.is_trivia() || token.kind == SyntaxKind::Nls {
                self.pending_flags |= TokenFlags::PRECEDED_BY_WHITESPACE;
            }
            tracing::trace!(kind = %token.kind, line = token.line, column = token.column, "token");
            return Ok(token);
        }
    }

    /// Continue a string body suspended at `$` once its value part ended.
    pub(crate) fn resume_string_body(&mut self, triple: bool) -> Result<Token, GroovyError> {
        self.begin_token();
        self.scan_string_body(false, triple)
    }

    #[inline]
    fn begin_token(&mut self) {
        self.token_start = self.source.mark();
    }

    /// Build a token spanning from the token start to the cursor.
    fn finish(&mut self, kind: SyntaxKind, text: String) -> Token {
        let span = TextSpan::from_bounds(self.token_start.pos(), self.source.pos());
        let flags = std::mem::take(&mut self.pending_flags);
        Token::new(kind, text, span, self.token_start.position()).with_flags(flags)
    }

    /// Build a token whose text is exactly its source text.
    fn finish_raw(&mut self, kind: SyntaxKind) -> Token {
        let span = TextSpan::from_bounds(self.token_start.pos(), self.source.pos());
        let text = self.source.slice(span);
        self.finish(kind, text)
    }

    fn single(&mut self, kind: SyntaxKind) -> Token {
        self.source.bump();
        self.finish_raw(kind)
    }

    /// Emit a whitespace or comment token, or skip it and remember that the
    /// next token follows whitespace.
    fn trivia(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.whitespace_included {
            Some(self.finish_raw(kind))
        } else {
            self.pending_flags |= TokenFlags::PRECEDED_BY_WHITESPACE;
            None
        }
    }

    fn error_at(&self, mark: SourceMark, message: &DiagnosticMessage, args: &[&str]) -> GroovyError {
        let end = self.source.pos().max(mark.pos());
        let diagnostic = Diagnostic::new(message, args)
            .at(mark.position(), TextSpan::from_bounds(mark.pos(), end))
            .in_file(self.file_name.as_deref());
        tracing::debug!(code = diagnostic.code, line = mark.position().line, "lexical error");
        GroovyError::Lexical(diagnostic)
    }

    fn error_here(&self, message: &DiagnosticMessage, args: &[&str]) -> GroovyError {
        let length = u32::from(!self.source.is_eof());
        let diagnostic = Diagnostic::new(message, args)
            .at(self.source.position(), TextSpan::new(self.source.pos(), length))
            .in_file(self.file_name.as_deref());
        tracing::debug!(code = diagnostic.code, line = self.source.line(), "lexical error");
        GroovyError::Lexical(diagnostic)
    }

    // ========================================================================
    // Whitespace, newlines and comments
    // ========================================================================

    fn scan_whitespace(&mut self) -> Option<Token> {
        while self.source.current().is_some_and(is_white_space) {
            self.source.bump();
        }
        self.trivia(SyntaxKind::Whitespace)
    }

    /// A line break inside an open simple string is an error.
    fn newline_check(&mut self) -> Result<(), GroovyError> {
        if self.state.suppress_newline > 0 {
            self.state.suppress_newline = 0;
            return Err(self.error_here(&messages::NEWLINE_IN_SIMPLE_STRING, &[]));
        }
        Ok(())
    }

    /// Consume one `\r\n`, `\r` or `\n`.
    fn one_newline(&mut self) -> Result<(), GroovyError> {
        self.newline_check()?;
        if self.source.starts_with("\r\n") {
            self.source.bump_n(2);
        } else {
            self.source.bump();
        }
        Ok(())
    }

    /// A run of line breaks. Outside whitespace-included mode the run also
    /// swallows the blank lines and comments after it.
    fn scan_newlines(&mut self) -> Result<Option<Token>, GroovyError> {
        self.one_newline()?;
        if !self.whitespace_included {
            loop {
                match self.source.current() {
                    Some(c) if is_line_break(c) => self.one_newline()?,
                    Some(c) if is_white_space(c) => {
                        self.source.bump();
                    }
                    Some('/') if self.source.peek(1) == Some('/') => self.skip_line_comment(),
                    Some('/') if self.source.peek(1) == Some('*') => self.skip_block_comment()?,
                    _ => break,
                }
            }
        }

        if self.whitespace_included {
            let mut token = self.finish_raw(SyntaxKind::Nls);
            if self.state.is_inside_brackets() {
                token.flags |= TokenFlags::INSIGNIFICANT;
            }
            Ok(Some(token))
        } else if self.state.is_inside_brackets() {
            self.pending_flags |= TokenFlags::PRECEDED_BY_WHITESPACE;
            Ok(None)
        } else {
            Ok(Some(self.finish(SyntaxKind::Nls, "<newline>".to_string())))
        }
    }

    fn skip_line_comment(&mut self) {
        self.source.bump_n(2);
        while self.source.current().is_some_and(|c| !is_line_break(c)) {
            self.source.bump();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), GroovyError> {
        let start = self.source.mark();
        self.source.bump_n(2);
        loop {
            match self.source.current() {
                None => return Err(self.error_at(start, &messages::UNTERMINATED_BLOCK_COMMENT, &[])),
                Some('*') if self.source.peek(1) == Some('/') => {
                    self.source.bump_n(2);
                    return Ok(());
                }
                Some(c) if is_line_break(c) => self.one_newline()?,
                Some(_) => {
                    self.source.bump();
                }
            }
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_operator(&mut self) -> Result<Option<Token>, GroovyError> {
        let Some(&(text, kind)) = OPERATORS.iter().find(|(text, _)| self.source.starts_with(text)) else {
            let ch = self.source.current().map(String::from).unwrap_or_default();
            return Err(self.error_here(&messages::UNEXPECTED_CHARACTER, &[&ch]));
        };
        match kind {
            SyntaxKind::SingleLineComment => {
                self.skip_line_comment();
                Ok(self.trivia(kind))
            }
            SyntaxKind::MultiLineComment => {
                self.skip_block_comment()?;
                Ok(self.trivia(kind))
            }
            SyntaxKind::ShebangComment => {
                if self.source.line() != 1 || self.source.column() != 1 {
                    return Err(self.error_here(&messages::MISPLACED_SHEBANG, &[]));
                }
                while self.source.current().is_some_and(|c| !is_line_break(c)) {
                    self.source.bump();
                }
                Ok(Some(self.finish_raw(kind)))
            }
            _ => {
                self.source.bump_n(text.chars().count());
                Ok(Some(self.finish(kind, text.to_string())))
            }
        }
    }

    fn scan_identifier(&mut self) -> Token {
        while self
            .source
            .current()
            .is_some_and(|c| is_letter(c) || is_digit(c))
        {
            self.source.bump();
        }

        if !self.state.string_ctor.is_none() {
            // `$a.b.c` keeps the value part open while another name follows
            let continues = self.source.current() == Some(DOT)
                && self
                    .source
                    .peek(1)
                    .is_some_and(|c| c != DOLLAR_SIGN && is_java_identifier_start(c));
            self.state.restart_string_ctor(!continues);
        }

        let span = TextSpan::from_bounds(self.token_start.pos(), self.source.pos());
        let text = self.source.slice(span);
        let kind = match keyword_kind(&text) {
            Some(SyntaxKind::AssertKeyword) if !self.assert_keyword_enabled => SyntaxKind::Ident,
            Some(SyntaxKind::EnumKeyword) if !self.enum_keyword_enabled => SyntaxKind::Ident,
            Some(kind) => kind,
            None => SyntaxKind::Ident,
        };
        self.finish(kind, text)
    }

    // ========================================================================
    // Strings
    // ========================================================================

    fn scan_string(&mut self, quote: char) -> Result<Token, GroovyError> {
        if quote == SINGLE_QUOTE {
            if self.source.starts_with("'''") {
                self.source.bump_n(3);
                return self.scan_single_quoted(true);
            }
            self.source.bump();
            self.state.suppress_newline += 1;
            return self.scan_single_quoted(false);
        }
        if self.source.starts_with("\"\"\"") {
            self.source.bump_n(3);
            self.scan_string_body(true, true)
        } else {
            self.source.bump();
            self.state.suppress_newline += 1;
            self.scan_string_body(true, false)
        }
    }

    /// `'...'` and `'''...'''`: no interpolation.
    fn scan_single_quoted(&mut self, triple: bool) -> Result<Token, GroovyError> {
        let mut text = String::new();
        loop {
            match self.source.current() {
                None => {
                    return Err(self.error_at(self.token_start, &messages::UNTERMINATED_STRING_LITERAL, &[]));
                }
                Some(SINGLE_QUOTE) if triple => {
                    if self.source.starts_with("'''") {
                        self.source.bump_n(3);
                        break;
                    }
                    text.push(SINGLE_QUOTE);
                    self.source.bump();
                }
                Some(SINGLE_QUOTE) => {
                    self.source.bump();
                    self.state.suppress_newline = self.state.suppress_newline.saturating_sub(1);
                    break;
                }
                Some(c) if c == BACKSLASH || is_line_break(c) => self.scan_escape(&mut text)?,
                Some(c) => {
                    text.push(c);
                    self.source.bump();
                }
            }
        }
        Ok(self.finish(SyntaxKind::StringLiteral, text))
    }

    /// The body of a double-quoted string, up to the closing quote or to a
    /// `$` that starts an embedded value.
    fn scan_string_body(&mut self, from_start: bool, triple: bool) -> Result<Token, GroovyError> {
        let mut text = String::new();
        loop {
            match self.source.current() {
                None => {
                    return Err(self.error_at(self.token_start, &messages::UNTERMINATED_STRING_LITERAL, &[]));
                }
                Some(c) if c == BACKSLASH || is_line_break(c) => self.scan_escape(&mut text)?,
                Some(DOUBLE_QUOTE) if triple => {
                    if self.source.starts_with("\"\"\"") {
                        self.source.bump_n(3);
                        break;
                    }
                    text.push(DOUBLE_QUOTE);
                    self.source.bump();
                }
                Some(DOUBLE_QUOTE) => {
                    self.source.bump();
                    self.state.suppress_newline = self.state.suppress_newline.saturating_sub(1);
                    break;
                }
                Some(DOLLAR_SIGN) => {
                    self.source.bump();
                    let value_start = if self.source.current() == Some(ASTERISK) { 1 } else { 0 };
                    let starts_value = match self.source.peek(value_start) {
                        Some(OPEN_BRACE) => true,
                        Some(c) => c != DOLLAR_SIGN && is_java_identifier_start(c),
                        None => false,
                    };
                    if !starts_value {
                        return Err(self.error_here(&messages::ILLEGAL_DOLLAR_IN_STRING, &[]));
                    }
                    self.state.string_ctor = StringCtorState::AwaitingValue { triple };
                    let kind = if from_start {
                        SyntaxKind::StringCtorStart
                    } else {
                        SyntaxKind::StringCtorMiddle
                    };
                    return Ok(self.finish(kind, text));
                }
                Some(c) => {
                    text.push(c);
                    self.source.bump();
                }
            }
        }
        let kind = if from_start {
            SyntaxKind::StringLiteral
        } else {
            SyntaxKind::StringCtorEnd
        };
        Ok(self.finish(kind, text))
    }

    /// An escape sequence, a line continuation or a raw line break inside a
    /// string. Appends the decoded characters to `text`.
    fn scan_escape(&mut self, text: &mut String) -> Result<(), GroovyError> {
        if self.source.current().is_some_and(is_line_break) {
            self.one_newline()?;
            text.push(LINE_FEED);
            return Ok(());
        }

        let escape_start = self.source.mark();
        self.source.bump();
        let Some(ch) = self.source.current() else {
            return Err(self.error_at(self.token_start, &messages::UNTERMINATED_STRING_LITERAL, &[]));
        };
        match ch {
            'n' | 'r' | 't' | 'b' | 'f' => {
                text.push(match ch {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'b' => '\u{0008}',
                    _ => '\u{000C}',
                });
                self.source.bump();
            }
            '"' | '\'' | '\\' | '$' => {
                text.push(ch);
                self.source.bump();
            }
            'u' => {
                while self.source.current() == Some('u') {
                    self.source.bump();
                }
                let mut value = 0u32;
                for _ in 0..4 {
                    match self.source.current().and_then(|c| c.to_digit(16)) {
                        Some(digit) => {
                            value = value * 16 + digit;
                            self.source.bump();
                        }
                        None => {
                            return Err(self.error_at(escape_start, &messages::INVALID_ESCAPE_SEQUENCE, &["u"]));
                        }
                    }
                }
                text.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            '0'..='7' => {
                // \0 to \377: a leading 0-3 allows two more digits, 4-7 one more
                let extra = if ch <= '3' { 2 } else { 1 };
                let mut value = ch.to_digit(8).unwrap_or(0);
                self.source.bump();
                for _ in 0..extra {
                    match self.source.current().filter(|&c| is_octal_digit(c)) {
                        Some(c) => {
                            value = value * 8 + c.to_digit(8).unwrap_or(0);
                            self.source.bump();
                        }
                        None => break,
                    }
                }
                text.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            c if is_line_break(c) => self.one_newline()?,
            other => {
                let shown = other.to_string();
                return Err(self.error_at(escape_start, &messages::INVALID_ESCAPE_SEQUENCE, &[&shown]));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self) -> Result<Token, GroovyError> {
        let mut is_decimal = true;
        if self.source.current() == Some('0') {
            self.source.bump();
            match self.source.current() {
                Some('x' | 'X') => {
                    self.source.bump();
                    is_decimal = false;
                    if !self.source.current().is_some_and(is_hex_digit) {
                        return Err(self.malformed_number());
                    }
                    while self.source.current().is_some_and(is_hex_digit) {
                        self.source.bump();
                    }
                }
                Some(c) if is_digit(c) => {
                    if self.digits_lead_to_fraction() {
                        self.skip_digits();
                    } else {
                        is_decimal = false;
                        while self.source.current().is_some_and(is_octal_digit) {
                            self.source.bump();
                        }
                        if self.source.current().is_some_and(is_digit) {
                            self.skip_digits();
                            return Err(self.malformed_number());
                        }
                    }
                }
                _ => {}
            }
        } else {
            self.skip_digits();
        }

        let kind = match self.source.current() {
            Some('l' | 'L') => {
                self.source.bump();
                SyntaxKind::NumLong
            }
            Some('i' | 'I') => {
                self.source.bump();
                SyntaxKind::NumInt
            }
            Some('g' | 'G') => {
                self.source.bump();
                SyntaxKind::NumBigInt
            }
            Some(_) if is_decimal && self.at_fraction_or_exponent(0) => self.scan_fraction()?,
            _ => SyntaxKind::NumInt,
        };
        Ok(self.finish_raw(kind))
    }

    fn skip_digits(&mut self) {
        while self.source.current().is_some_and(is_digit) {
            self.source.bump();
        }
    }

    /// Whether the character at `offset` starts `.digit`, an exponent or a
    /// floating-point suffix.
    fn at_fraction_or_exponent(&self, offset: usize) -> bool {
        match self.source.peek(offset) {
            Some(DOT) => self.source.peek(offset + 1).is_some_and(is_digit),
            Some(c) => matches!(c, 'e' | 'E' | 'f' | 'F' | 'd' | 'D'),
            None => false,
        }
    }

    /// After a leading `0`: do the digits that follow continue into a
    /// floating-point literal (making them decimal rather than octal)?
    fn digits_lead_to_fraction(&self) -> bool {
        let mut offset = 0;
        while self.source.peek(offset).is_some_and(is_digit) {
            offset += 1;
        }
        self.at_fraction_or_exponent(offset)
    }

    fn scan_fraction(&mut self) -> Result<SyntaxKind, GroovyError> {
        if self.source.current() == Some(DOT) {
            self.source.bump();
            self.skip_digits();
            if matches!(self.source.current(), Some('e' | 'E')) {
                self.scan_exponent()?;
            }
        } else if matches!(self.source.current(), Some('e' | 'E')) {
            self.scan_exponent()?;
        }
        let kind = match self.source.current() {
            Some('f' | 'F') => SyntaxKind::NumFloat,
            Some('d' | 'D') => SyntaxKind::NumDouble,
            Some('g' | 'G') => SyntaxKind::NumBigDecimal,
            _ => return Ok(SyntaxKind::NumDouble),
        };
        self.source.bump();
        Ok(kind)
    }

    fn scan_exponent(&mut self) -> Result<(), GroovyError> {
        self.source.bump();
        if matches!(self.source.current(), Some('+' | '-')) {
            self.source.bump();
        }
        if !self.source.current().is_some_and(is_digit) {
            return Err(self.malformed_number());
        }
        self.skip_digits();
        Ok(())
    }

    fn malformed_number(&self) -> GroovyError {
        let span = TextSpan::from_bounds(self.token_start.pos(), self.source.pos());
        let text = self.source.slice(span);
        self.error_at(self.token_start, &messages::MALFORMED_NUMBER, &[&text])
    }
}
