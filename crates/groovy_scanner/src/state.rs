//! Mutable lexer state that makes tokenization context-sensitive.
//!
//! Newlines inside `(...)` and `[...]` are not statement separators, but a
//! `{...}` nested inside them starts a fresh statement context. Interpolated
//! strings suspend the string body while the lexer scans an embedded value
//! and resume it afterwards. Both need state that survives across tokens.

/// Where the lexer is relative to an interpolated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringCtorState {
    /// Not inside a string constructor.
    #[default]
    None,
    /// Just saw `$`; the next tokens form the embedded value.
    AwaitingValue { triple: bool },
    /// The value part ended; the next token resumes the string body.
    AwaitingLiteral { triple: bool },
}

impl StringCtorState {
    pub fn is_none(self) -> bool {
        self == StringCtorState::None
    }

    pub fn is_triple(self) -> bool {
        matches!(
            self,
            StringCtorState::AwaitingValue { triple: true } | StringCtorState::AwaitingLiteral { triple: true }
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct LexerState {
    /// Open `(` and `[` not yet closed within the current `{...}`.
    pub bracket_depth: u32,
    /// Saved `(bracket_depth, string_ctor)` for each open `{`.
    pub bracket_depth_stack: Vec<(u32, StringCtorState)>,
    pub string_ctor: StringCtorState,
    /// Open simple (single-line) string literals. A line break while this is
    /// non-zero is an error.
    pub suppress_newline: u32,
}

impl LexerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_bracket(&mut self) {
        self.bracket_depth += 1;
    }

    pub fn close_bracket(&mut self) {
        self.bracket_depth = self.bracket_depth.saturating_sub(1);
    }

    /// `{` saves the bracket depth and string state and clears both.
    pub fn push_brace(&mut self) {
        self.bracket_depth_stack
            .push((self.bracket_depth, self.string_ctor));
        self.bracket_depth = 0;
        self.string_ctor = StringCtorState::None;
    }

    /// `}` restores what the matching `{` saved. A restored string state
    /// means the `}` closed a `${...}` value, so the string body resumes.
    pub fn pop_brace(&mut self) {
        let Some((depth, string_ctor)) = self.bracket_depth_stack.pop() else {
            return;
        };
        self.bracket_depth = depth;
        self.string_ctor = string_ctor;
        self.restart_string_ctor(true);
    }

    /// Switch an active string constructor to its literal or value phase,
    /// keeping its quoting.
    pub fn restart_string_ctor(&mut self, expect_literal: bool) {
        if self.string_ctor.is_none() {
            return;
        }
        let triple = self.string_ctor.is_triple();
        self.string_ctor = if expect_literal {
            StringCtorState::AwaitingLiteral { triple }
        } else {
            StringCtorState::AwaitingValue { triple }
        };
    }

    pub fn is_inside_brackets(&self) -> bool {
        self.bracket_depth > 0
    }
}
