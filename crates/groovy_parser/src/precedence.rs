//! Operator precedence for binary operators.

use groovy_ast::syntax_kind::SyntaxKind;

/// Binary operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    LogicalOr = 1,
    LogicalAnd = 2,
    BitwiseOr = 3,
    BitwiseXor = 4,
    BitwiseAnd = 5,
    Equality = 6,
    Regex = 7,
    /// Non-associative: `a < b < c` is rejected.
    Relational = 8,
    Shift = 9,
    Additive = 10,
    Multiplicative = 11,
    Power = 12,
    Invalid = 255,
}

impl OperatorPrecedence {
    /// The next tighter level, used for the right operand of a
    /// left-associative operator.
    pub fn next(self) -> OperatorPrecedence {
        match self {
            OperatorPrecedence::LogicalOr => OperatorPrecedence::LogicalAnd,
            OperatorPrecedence::LogicalAnd => OperatorPrecedence::BitwiseOr,
            OperatorPrecedence::BitwiseOr => OperatorPrecedence::BitwiseXor,
            OperatorPrecedence::BitwiseXor => OperatorPrecedence::BitwiseAnd,
            OperatorPrecedence::BitwiseAnd => OperatorPrecedence::Equality,
            OperatorPrecedence::Equality => OperatorPrecedence::Regex,
            OperatorPrecedence::Regex => OperatorPrecedence::Relational,
            OperatorPrecedence::Relational => OperatorPrecedence::Shift,
            OperatorPrecedence::Shift => OperatorPrecedence::Additive,
            OperatorPrecedence::Additive => OperatorPrecedence::Multiplicative,
            OperatorPrecedence::Multiplicative => OperatorPrecedence::Power,
            OperatorPrecedence::Power | OperatorPrecedence::Invalid => OperatorPrecedence::Invalid,
        }
    }
}

/// Get the binary operator precedence for a given token kind.
///
/// `..<` arrives as `RANGE_INCLUSIVE` followed by `LT` and is classified by
/// its first token.
pub fn binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::Lor => OperatorPrecedence::LogicalOr,
        SyntaxKind::Land => OperatorPrecedence::LogicalAnd,
        SyntaxKind::Bor => OperatorPrecedence::BitwiseOr,
        SyntaxKind::Bxor => OperatorPrecedence::BitwiseXor,
        SyntaxKind::Band => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::Equal | SyntaxKind::NotEqual | SyntaxKind::CompareTo => OperatorPrecedence::Equality,
        SyntaxKind::RegexFind | SyntaxKind::RegexMatch => OperatorPrecedence::Regex,
        SyntaxKind::Lt
        | SyntaxKind::Le
        | SyntaxKind::Gt
        | SyntaxKind::Ge
        | SyntaxKind::InKeyword
        | SyntaxKind::InstanceofKeyword
        | SyntaxKind::AsKeyword => OperatorPrecedence::Relational,
        SyntaxKind::Sl | SyntaxKind::Sr | SyntaxKind::Bsr | SyntaxKind::RangeInclusive => OperatorPrecedence::Shift,
        SyntaxKind::Plus | SyntaxKind::Minus => OperatorPrecedence::Additive,
        SyntaxKind::Star | SyntaxKind::Div | SyntaxKind::Mod => OperatorPrecedence::Multiplicative,
        SyntaxKind::StarStar => OperatorPrecedence::Power,
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(binary_operator_precedence(SyntaxKind::Lor) < binary_operator_precedence(SyntaxKind::Land));
        assert!(binary_operator_precedence(SyntaxKind::Equal) < binary_operator_precedence(SyntaxKind::RegexFind));
        assert!(binary_operator_precedence(SyntaxKind::RangeInclusive) < binary_operator_precedence(SyntaxKind::Plus));
        assert!(binary_operator_precedence(SyntaxKind::Star) < binary_operator_precedence(SyntaxKind::StarStar));
    }

    #[test]
    fn test_non_operators_are_invalid() {
        assert_eq!(binary_operator_precedence(SyntaxKind::Assign), OperatorPrecedence::Invalid);
        assert_eq!(binary_operator_precedence(SyntaxKind::Question), OperatorPrecedence::Invalid);
        assert_eq!(OperatorPrecedence::Power.next(), OperatorPrecedence::Invalid);
    }
}
