//! Parser utility functions.

use groovy_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start an expression.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    is_literal(kind)
        || kind.is_builtin_type()
        || matches!(
            kind,
            SyntaxKind::Ident
                | SyntaxKind::StringCtorStart
                | SyntaxKind::LParen
                | SyntaxKind::LBrack
                | SyntaxKind::LCurly
                | SyntaxKind::Plus
                | SyntaxKind::Minus
                | SyntaxKind::Inc
                | SyntaxKind::Dec
                | SyntaxKind::LNot
                | SyntaxKind::BNot
                | SyntaxKind::NewKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
        )
}

/// Tokens that are complete primary expressions on their own.
pub fn is_literal(kind: SyntaxKind) -> bool {
    kind.is_number()
        || matches!(
            kind,
            SyntaxKind::StringLiteral | SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword
        )
}

/// Check if a token kind can start the first argument of a command call
/// such as `println x`. Brackets, braces and parentheses are excluded:
/// after a bare name they continue the name as an index, an appended
/// closure or an ordinary call.
pub fn can_start_command_argument(kind: SyntaxKind) -> bool {
    is_literal(kind)
        || matches!(
            kind,
            SyntaxKind::Ident
                | SyntaxKind::StringCtorStart
                | SyntaxKind::LNot
                | SyntaxKind::BNot
                | SyntaxKind::NewKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
        )
}

/// Operators that read as either binary or prefix after a command name.
pub fn is_ambiguous_command_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Plus | SyntaxKind::Minus | SyntaxKind::Inc | SyntaxKind::Dec
    )
}

/// Tokens accepted as a member name after a dot.
pub fn is_member_name(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Ident || kind == SyntaxKind::StringLiteral || kind.is_keyword()
}

/// The tag of a navigation node built from the given dot token.
pub fn navigation_tag(kind: SyntaxKind) -> Option<SyntaxKind> {
    match kind {
        SyntaxKind::Dot => Some(SyntaxKind::Dot),
        SyntaxKind::QuestionDot => Some(SyntaxKind::OptionalDot),
        SyntaxKind::StarDot => Some(SyntaxKind::SpreadDot),
        _ => None,
    }
}

/// Statement terminators: where an optional trailing expression is absent.
pub fn ends_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Nls | SyntaxKind::Semi | SyntaxKind::RCurly | SyntaxKind::Eof
    )
}

/// Whether a separator before a parameterless `{` makes it a suspected
/// continuation of the previous line rather than an open block.
pub fn is_line_start_separator(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Nls | SyntaxKind::Eof | SyntaxKind::LCurly)
}

/// A name that starts with an uppercase letter. Such a name followed by
/// another name is a declaration (`String x`) rather than a command call.
pub fn is_upper_case_name(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_argument_starts() {
        assert!(can_start_command_argument(SyntaxKind::StringLiteral));
        assert!(can_start_command_argument(SyntaxKind::NumDouble));
        assert!(!can_start_command_argument(SyntaxKind::LBrack));
        assert!(!can_start_command_argument(SyntaxKind::Minus));
        assert!(!can_start_command_argument(SyntaxKind::InKeyword));
    }

    #[test]
    fn test_upper_case_name() {
        assert!(is_upper_case_name("String"));
        assert!(!is_upper_case_name("println"));
        assert!(!is_upper_case_name("_Foo"));
    }

    #[test]
    fn test_member_names() {
        assert!(is_member_name(SyntaxKind::ClassKeyword));
        assert!(is_member_name(SyntaxKind::Ident));
        assert!(!is_member_name(SyntaxKind::NumInt));
        assert_eq!(navigation_tag(SyntaxKind::QuestionDot), Some(SyntaxKind::OptionalDot));
    }
}
