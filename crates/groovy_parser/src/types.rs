//! Type specifications, type arguments and type parameters.
//!
//! Generic argument lists share a single bracket counter so that `>>` and
//! `>>>` can close two or three nested lists at once.

use groovy_ast::node::AstNode;
use groovy_ast::syntax_kind::SyntaxKind;
use groovy_diagnostics::messages;

use crate::parser::{describe, ParseResult, Parser};
use crate::utilities::is_upper_case_name;

impl Parser {
    /// A builtin or class type followed by any number of `[]` pairs.
    pub(crate) fn type_spec(&mut self) -> ParseResult<AstNode> {
        let mut ty = if self.current().is_builtin_type() {
            let keyword = self.bump();
            AstNode::synthetic(SyntaxKind::Type, keyword.line, keyword.column).with_child(Self::leaf(&keyword))
        } else {
            self.class_type_spec()?
        };
        while self.at(SyntaxKind::LBrack) && self.peek(1) == SyntaxKind::RBrack {
            let lbrack = self.bump();
            self.bump();
            let element = std::mem::take(&mut ty.children);
            let declarator = AstNode::synthetic(SyntaxKind::ArrayDeclarator, lbrack.line, lbrack.column).with_children(element);
            ty.add_child(declarator);
        }
        Ok(ty)
    }

    /// `a.b.C<T>` as `TYPE[name, TYPE_ARGUMENTS?]`.
    pub(crate) fn class_type_spec(&mut self) -> ParseResult<AstNode> {
        let start = self.peek_token(0);
        let name = self.qualified_name()?;
        let mut ty = AstNode::synthetic(SyntaxKind::Type, start.line, start.column).with_child(name);
        if self.at(SyntaxKind::Lt) {
            ty.add_child(self.type_arguments()?);
        }
        Ok(ty)
    }

    /// Whether a type is spelled with a builtin keyword or a name whose last
    /// segment is capitalized. Only such types can start a declaration
    /// without modifiers.
    pub(crate) fn looks_like_declared_type(ty: &AstNode) -> bool {
        let Some(first) = ty.first_child() else {
            return false;
        };
        match first.kind {
            SyntaxKind::ArrayDeclarator => Self::looks_like_declared_type(first),
            SyntaxKind::Ident => is_upper_case_name(&first.text),
            SyntaxKind::Dot => first.last_child().is_some_and(|n| is_upper_case_name(&n.text)),
            kind => kind.is_builtin_type(),
        }
    }

    pub(crate) fn type_arguments(&mut self) -> ParseResult<AstNode> {
        let before = self.context.generic_depth;
        let lt = self.expect(SyntaxKind::Lt)?;
        self.context.generic_depth += 1;
        let mut arguments = AstNode::synthetic(SyntaxKind::TypeArguments, lt.line, lt.column);
        self.nls();
        arguments.add_child(self.type_argument()?);
        while self.at(SyntaxKind::Comma) && self.context.generic_depth == before + 1 {
            self.bump();
            self.nls();
            arguments.add_child(self.type_argument()?);
        }
        self.close_generic_list(before)?;
        Ok(arguments)
    }

    fn type_argument(&mut self) -> ParseResult<AstNode> {
        let start = self.peek_token(0);
        let mut argument = AstNode::synthetic(SyntaxKind::TypeArgument, start.line, start.column);
        if !self.at(SyntaxKind::Question) {
            argument.add_child(self.type_spec()?);
            return Ok(argument);
        }
        let question = self.bump();
        argument.add_child(Self::leaf(&question).retagged(SyntaxKind::WildcardType));
        let bounds = match self.current() {
            SyntaxKind::ExtendsKeyword => Some(SyntaxKind::TypeUpperBounds),
            SyntaxKind::SuperKeyword => Some(SyntaxKind::TypeLowerBounds),
            _ => None,
        };
        if let Some(tag) = bounds {
            let keyword = self.bump();
            self.nls();
            let bound = self.class_type_spec()?;
            argument.add_child(AstNode::synthetic(tag, keyword.line, keyword.column).with_child(bound));
        }
        Ok(argument)
    }

    /// `<T, U extends Number & Comparable>`.
    pub(crate) fn type_parameters(&mut self) -> ParseResult<AstNode> {
        let before = self.context.generic_depth;
        let lt = self.expect(SyntaxKind::Lt)?;
        self.context.generic_depth += 1;
        let mut parameters = AstNode::synthetic(SyntaxKind::TypeParameters, lt.line, lt.column);
        self.nls();
        parameters.add_child(self.type_parameter()?);
        while self.at(SyntaxKind::Comma) && self.context.generic_depth == before + 1 {
            self.bump();
            self.nls();
            parameters.add_child(self.type_parameter()?);
        }
        self.close_generic_list(before)?;
        Ok(parameters)
    }

    fn type_parameter(&mut self) -> ParseResult<AstNode> {
        let name = self.expect(SyntaxKind::Ident)?;
        let mut parameter = AstNode::synthetic(SyntaxKind::TypeParameter, name.line, name.column).with_child(Self::leaf(&name));
        if self.at(SyntaxKind::ExtendsKeyword) {
            let keyword = self.bump();
            self.nls();
            let mut bounds = AstNode::synthetic(SyntaxKind::TypeUpperBounds, keyword.line, keyword.column);
            bounds.add_child(self.class_type_spec()?);
            while self.eat(SyntaxKind::Band) {
                self.nls();
                bounds.add_child(self.class_type_spec()?);
            }
            parameter.add_child(bounds);
        }
        Ok(parameter)
    }

    /// Consume the closing bracket of a generic list opened at depth
    /// `before`, unless a nested list already closed it with `>>` or `>>>`.
    /// The outermost list must leave the counter at zero.
    fn close_generic_list(&mut self, before: i32) -> ParseResult<()> {
        if self.context.generic_depth > before {
            self.nls();
            let closes = match self.current() {
                SyntaxKind::Gt => 1,
                SyntaxKind::Sr => 2,
                SyntaxKind::Bsr => 3,
                _ => 0,
            };
            if closes > 0 {
                self.bump();
                self.context.generic_depth -= closes;
            }
        }
        if before == 0 && self.context.generic_depth != 0 {
            let token = self.peek_token(0);
            return Err(self.error_at(&token, &messages::MISMATCHED_GENERIC_BRACKETS, &[&describe(&token)]));
        }
        Ok(())
    }

    /// `throws A, B` as `LITERAL_throws[TYPE+]`.
    pub(crate) fn throws_clause(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::ThrowsKeyword)?;
        self.nls();
        let mut clause = Self::leaf(&keyword);
        clause.add_child(self.class_type_spec()?);
        while self.eat(SyntaxKind::Comma) {
            self.nls();
            clause.add_child(self.class_type_spec()?);
        }
        Ok(clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovy_options::ParserOptions;

    fn parse_type(text: &str) -> ParseResult<AstNode> {
        let mut parser = Parser::new(text, None, &ParserOptions::default());
        parser.type_spec()
    }

    #[test]
    fn test_nested_arguments_close_with_shift() {
        let ty = parse_type("Map<String, List<Integer>>").unwrap();
        assert_eq!(
            ty.to_sexpr(),
            "(TYPE Map (TYPE_ARGUMENTS (TYPE_ARGUMENT (TYPE String)) (TYPE_ARGUMENT (TYPE List (TYPE_ARGUMENTS (TYPE_ARGUMENT (TYPE Integer)))))))"
        );
    }

    #[test]
    fn test_triple_close() {
        let ty = parse_type("A<B<C<D>>>").unwrap();
        assert_eq!(ty.find_descendant(SyntaxKind::TypeArguments).map(|n| n.children.len()), Some(1));
    }

    #[test]
    fn test_unclosed_list_is_mismatched() {
        let error = parse_type("List<String").unwrap_err();
        assert_eq!(error.diagnostic().code, messages::MISMATCHED_GENERIC_BRACKETS.code);
    }

    #[test]
    fn test_array_type() {
        let ty = parse_type("int[][]").unwrap();
        assert_eq!(ty.to_sexpr(), "(TYPE (ARRAY_DECLARATOR (ARRAY_DECLARATOR LITERAL_int)))");
    }

    #[test]
    fn test_wildcard_bounds() {
        let ty = parse_type("List<? extends Number>").unwrap();
        let argument = ty.find_descendant(SyntaxKind::TypeArgument).unwrap();
        assert_eq!(argument.to_sexpr(), "(TYPE_ARGUMENT WILDCARD_TYPE (TYPE_UPPER_BOUNDS (TYPE Number)))");
    }

    #[test]
    fn test_declared_type_shape() {
        assert!(Parser::looks_like_declared_type(&parse_type("java.util.List").unwrap()));
        assert!(!Parser::looks_like_declared_type(&parse_type("foo.bar").unwrap()));
        assert!(Parser::looks_like_declared_type(&parse_type("String[]").unwrap()));
        assert!(Parser::looks_like_declared_type(&parse_type("void").unwrap()));
    }
}
