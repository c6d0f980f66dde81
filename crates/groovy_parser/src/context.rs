//! Parser state that trial parses must leave untouched.

use groovy_ast::syntax_kind::SyntaxKind;
use groovy_options::ParserOptions;

#[derive(Debug, Clone)]
pub struct ParserContext {
    /// Names of the type definitions being parsed, innermost last.
    pub enclosing_type_names: Vec<String>,
    /// Generic brackets opened and not yet closed.
    pub generic_depth: i32,
    /// The token that ended the previous statement: `NLS`, `SEMI`, or a
    /// marker for the start of a unit (`EOF`) or block (`LCURLY`).
    pub last_separator: SyntaxKind,
    pub legacy_closure_syntax: bool,
    /// Nesting depth of trial parses. Warnings are dropped while non-zero.
    pub guessing: u32,
    /// Trial parses left before the parse is abandoned.
    pub trial_budget: u32,
}

/// The part of the context a trial parse may change.
#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    enclosing_type_names: Vec<String>,
    generic_depth: i32,
    last_separator: SyntaxKind,
}

impl ParserContext {
    pub fn new(options: &ParserOptions) -> Self {
        Self {
            enclosing_type_names: Vec::new(),
            generic_depth: 0,
            last_separator: SyntaxKind::Eof,
            legacy_closure_syntax: options.legacy_closure_syntax,
            guessing: 0,
            trial_budget: options.max_speculative_parses,
        }
    }

    #[inline]
    pub fn is_guessing(&self) -> bool {
        self.guessing > 0
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            enclosing_type_names: self.enclosing_type_names.clone(),
            generic_depth: self.generic_depth,
            last_separator: self.last_separator,
        }
    }

    pub fn restore(&mut self, snapshot: ContextSnapshot) {
        self.enclosing_type_names = snapshot.enclosing_type_names;
        self.generic_depth = snapshot.generic_depth;
        self.last_separator = snapshot.last_separator;
    }

    /// Spend one trial parse. Returns false once the budget is gone.
    pub fn spend_trial(&mut self) -> bool {
        match self.trial_budget.checked_sub(1) {
            Some(left) => {
                self.trial_budget = left;
                true
            }
            None => false,
        }
    }

    /// Whether `name` is the innermost enclosing type's name, which makes a
    /// member called `name` a constructor.
    pub fn is_constructor_name(&self, name: &str) -> bool {
        self.enclosing_type_names.last().is_some_and(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_restores_mutable_fields() {
        let mut context = ParserContext::new(&ParserOptions::default());
        let snapshot = context.snapshot();
        context.generic_depth = 2;
        context.enclosing_type_names.push("Foo".to_string());
        context.last_separator = SyntaxKind::Semi;
        context.restore(snapshot);
        assert_eq!(context.generic_depth, 0);
        assert!(context.enclosing_type_names.is_empty());
        assert_eq!(context.last_separator, SyntaxKind::Eof);
    }

    #[test]
    fn test_trial_budget() {
        let options = ParserOptions {
            max_speculative_parses: 1,
            ..ParserOptions::default()
        };
        let mut context = ParserContext::new(&options);
        assert!(context.spend_trial());
        assert!(!context.spend_trial());
    }

    #[test]
    fn test_constructor_name() {
        let mut context = ParserContext::new(&ParserOptions::default());
        assert!(!context.is_constructor_name("Foo"));
        context.enclosing_type_names.push("Outer".to_string());
        context.enclosing_type_names.push("Foo".to_string());
        assert!(context.is_constructor_name("Foo"));
        assert!(!context.is_constructor_name("Outer"));
    }
}
