//! Expressions, from assignment down to primaries, plus closures, string
//! constructors and parenthesis-free command calls.

use groovy_ast::builder::TreeBuilder;
use groovy_ast::node::AstNode;
use groovy_ast::syntax_kind::SyntaxKind;
use groovy_diagnostics::messages;

use crate::declarations::BodyKind;
use crate::parser::{describe, ParseResult, Parser};
use crate::precedence::{binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{
    can_start_command_argument, can_start_expression, is_ambiguous_command_operator, is_literal, is_member_name,
    navigation_tag,
};

impl Parser {
    /// The expression of an expression statement. Unlike [`Parser::expression`]
    /// this accepts a command call such as `println "hi", 2`.
    pub(crate) fn statement_expression(&mut self) -> ParseResult<AstNode> {
        if self.at(SyntaxKind::Ident) {
            let head_length = self.command_head_length();
            let next = self.peek_token(head_length);
            if can_start_command_argument(next.kind) {
                return self.command_call(head_length);
            }
            if is_ambiguous_command_operator(next.kind) && next.is_preceded_by_whitespace() {
                let operand = self.peek_token(head_length + 1);
                if !operand.is_preceded_by_whitespace() && can_start_expression(operand.kind) {
                    return Err(self.error_at(&next, &messages::AMBIGUOUS_COMMAND_OPERATOR, &[&next.text]));
                }
            }
        }
        self.expression()
    }

    /// Tokens in a bare command head: a name and any `.name` steps.
    fn command_head_length(&mut self) -> usize {
        let mut length = 1;
        while navigation_tag(self.peek(length)).is_some() {
            let name = self.peek(length + 1);
            if name == SyntaxKind::StringLiteral || !is_member_name(name) {
                break;
            }
            length += 2;
        }
        length
    }

    fn command_call(&mut self, head_length: usize) -> ParseResult<AstNode> {
        let first = self.bump();
        let mut head = Self::leaf(&first);
        let mut consumed = 1;
        while consumed < head_length {
            let dot = self.bump();
            let name = self.bump();
            let tag = navigation_tag(dot.kind).unwrap_or(SyntaxKind::Dot);
            head = Self::leaf(&dot).retagged(tag).with_children([head, Self::leaf(&name)]);
            consumed += 2;
        }

        let mut arguments = self.synthetic_here(SyntaxKind::Elist);
        loop {
            arguments.add_child(self.argument()?);
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
            self.nls();
        }
        Ok(AstNode::synthetic(SyntaxKind::MethodCall, first.line, first.column).with_children([head, arguments]))
    }

    pub(crate) fn expression(&mut self) -> ParseResult<AstNode> {
        self.assignment_expression()
    }

    /// Right-associative assignment.
    fn assignment_expression(&mut self) -> ParseResult<AstNode> {
        let target = self.conditional_expression()?;
        if !self.current().is_assignment_operator() {
            return Ok(target);
        }
        let operator = self.bump();
        self.nls();
        let value = self.assignment_expression()?;
        Ok(Self::leaf(&operator).with_children([target, value]))
    }

    /// `cond ? a : b`. Newlines may surround `?` and `:`.
    pub(crate) fn conditional_expression(&mut self) -> ParseResult<AstNode> {
        let condition = self.binary_expression(OperatorPrecedence::LogicalOr)?;
        let offset = self.offset_past_newlines();
        if self.peek(offset) != SyntaxKind::Question {
            return Ok(condition);
        }
        self.nls();
        let question = self.bump();
        self.nls();
        let then_branch = self.assignment_expression()?;
        self.nls();
        self.expect(SyntaxKind::Colon)?;
        self.nls();
        let else_branch = self.conditional_expression()?;
        Ok(Self::leaf(&question).with_children([condition, then_branch, else_branch]))
    }

    /// Left-associative binary operators at `minimum` precedence or tighter.
    /// Relational operators do not chain.
    fn binary_expression(&mut self, minimum: OperatorPrecedence) -> ParseResult<AstNode> {
        let mut tree = TreeBuilder::from_node(self.unary_expression()?);
        let mut seen_relational = false;
        loop {
            let kind = self.current();
            let precedence = binary_operator_precedence(kind);
            if precedence == OperatorPrecedence::Invalid || precedence < minimum {
                break;
            }
            if precedence == OperatorPrecedence::Relational {
                if seen_relational {
                    break;
                }
                seen_relational = true;
            }
            let operator = self.bump();
            let mut node = Self::leaf(&operator);
            let right = match kind {
                SyntaxKind::InstanceofKeyword | SyntaxKind::AsKeyword => {
                    self.nls();
                    self.type_spec()?
                }
                _ => {
                    if kind == SyntaxKind::RangeInclusive && self.at(SyntaxKind::Lt) {
                        self.bump();
                        node = AstNode::synthetic(SyntaxKind::RangeExclusive, operator.line, operator.column);
                    }
                    self.nls();
                    self.binary_expression(precedence.next())?
                }
            };
            tree.make_root(node);
            tree.add(right);
        }
        match tree.finish() {
            Some(expression) => Ok(expression),
            None => Err(self.unexpected()),
        }
    }

    fn unary_expression(&mut self) -> ParseResult<AstNode> {
        let tag = match self.current() {
            SyntaxKind::Inc | SyntaxKind::Dec | SyntaxKind::BNot | SyntaxKind::LNot => None,
            SyntaxKind::Minus => Some(SyntaxKind::UnaryMinus),
            SyntaxKind::Plus => Some(SyntaxKind::UnaryPlus),
            SyntaxKind::LParen if self.is_type_cast()? => return self.type_cast(),
            _ => return self.postfix_expression(),
        };
        let operator = self.bump();
        self.nls();
        let operand = self.unary_expression()?;
        let node = Self::leaf(&operator);
        let node = match tag {
            Some(tag) => node.retagged(tag),
            None => node,
        };
        Ok(node.with_child(operand))
    }

    /// `(Type) operand`. A class-type cast needs an operand that cannot be
    /// read as the right side of a binary operator or an index.
    fn is_type_cast(&mut self) -> ParseResult<bool> {
        self.guess(|p| {
            p.expect(SyntaxKind::LParen)?;
            let builtin = p.current().is_builtin_type();
            let ty = p.type_spec()?;
            p.expect(SyntaxKind::RParen)?;
            let next = p.current();
            let operand = if builtin {
                can_start_expression(next)
            } else {
                let starts_operand = is_literal(next)
                    || matches!(
                        next,
                        SyntaxKind::Ident
                            | SyntaxKind::StringCtorStart
                            | SyntaxKind::LParen
                            | SyntaxKind::ThisKeyword
                            | SyntaxKind::SuperKeyword
                            | SyntaxKind::NewKeyword
                            | SyntaxKind::LNot
                            | SyntaxKind::BNot
                    );
                starts_operand && Self::looks_like_declared_type(&ty)
            };
            if operand {
                Ok(())
            } else {
                Err(p.unexpected())
            }
        })
    }

    fn type_cast(&mut self) -> ParseResult<AstNode> {
        let lparen = self.expect(SyntaxKind::LParen)?;
        let ty = self.type_spec()?;
        self.expect(SyntaxKind::RParen)?;
        let operand = self.unary_expression()?;
        Ok(Self::leaf(&lparen).retagged(SyntaxKind::TypeCast).with_children([ty, operand]))
    }

    fn postfix_expression(&mut self) -> ParseResult<AstNode> {
        let expression = self.path_expression()?;
        let tag = match self.current() {
            SyntaxKind::Inc => SyntaxKind::PostInc,
            SyntaxKind::Dec => SyntaxKind::PostDec,
            _ => return Ok(expression),
        };
        let operator = self.bump();
        Ok(Self::leaf(&operator).retagged(tag).with_child(expression))
    }

    /// A primary followed by member access, calls, indexing and appended
    /// closures. A newline may precede a dot.
    fn path_expression(&mut self) -> ParseResult<AstNode> {
        let mut expression = self.primary_expression()?;
        loop {
            let offset = self.offset_past_newlines();
            match self.peek(offset) {
                SyntaxKind::Dot | SyntaxKind::QuestionDot | SyntaxKind::StarDot => {
                    self.nls();
                    expression = self.navigation(expression)?;
                }
                _ if offset > 0 => return Ok(expression),
                SyntaxKind::LParen => expression = self.method_call(expression)?,
                SyntaxKind::LBrack => expression = self.index_operation(expression)?,
                SyntaxKind::LCurly => expression = self.appended_closure(expression)?,
                _ => return Ok(expression),
            }
        }
    }

    fn navigation(&mut self, receiver: AstNode) -> ParseResult<AstNode> {
        let dot = self.bump();
        let mut tag = navigation_tag(dot.kind).unwrap_or(SyntaxKind::Dot);
        if dot.is(SyntaxKind::Dot) && self.at(SyntaxKind::Band) {
            self.bump();
            tag = SyntaxKind::MemberPointer;
        }
        self.nls();
        let name = self.member_name()?;
        Ok(Self::leaf(&dot).retagged(tag).with_children([receiver, name]))
    }

    fn member_name(&mut self) -> ParseResult<AstNode> {
        let token = self.peek_token(0);
        match token.kind {
            SyntaxKind::At => {
                self.bump();
                let name = self.expect(SyntaxKind::Ident)?;
                Ok(Self::leaf(&token).retagged(SyntaxKind::SelectSlot).with_child(Self::leaf(&name)))
            }
            SyntaxKind::StringCtorStart => {
                let value = self.string_constructor()?;
                Ok(AstNode::wrap(SyntaxKind::DynamicMember, vec![value], token.line, token.column))
            }
            SyntaxKind::LParen => {
                self.bump();
                self.nls();
                let value = self.expression()?;
                self.nls();
                self.expect(SyntaxKind::RParen)?;
                Ok(AstNode::synthetic(SyntaxKind::DynamicMember, token.line, token.column).with_child(value))
            }
            kind if is_member_name(kind) => {
                self.bump();
                Ok(Self::leaf(&token))
            }
            SyntaxKind::Eof | SyntaxKind::Nls => Err(self.unexpected()),
            _ => Err(self.error_at(&token, &messages::ILLEGAL_MEMBER_NAME, &[&describe(&token)])),
        }
    }

    fn method_call(&mut self, callee: AstNode) -> ParseResult<AstNode> {
        let lparen = self.expect(SyntaxKind::LParen)?;
        let arguments = self.argument_list(SyntaxKind::RParen)?;
        self.nls();
        self.expect(SyntaxKind::RParen)?;
        Ok(Self::leaf(&lparen).retagged(SyntaxKind::MethodCall).with_children([callee, arguments]))
    }

    fn index_operation(&mut self, receiver: AstNode) -> ParseResult<AstNode> {
        let lbrack = self.expect(SyntaxKind::LBrack)?;
        let arguments = self.argument_list(SyntaxKind::RBrack)?;
        self.nls();
        self.expect(SyntaxKind::RBrack)?;
        Ok(Self::leaf(&lbrack).retagged(SyntaxKind::IndexOp).with_children([receiver, arguments]))
    }

    /// `foo() { }` adds the closure to the call; `foo { }` makes one.
    fn appended_closure(&mut self, expression: AstNode) -> ParseResult<AstNode> {
        let closure = self.closable_block()?;
        if expression.is(SyntaxKind::MethodCall) {
            return Ok(expression.with_child(closure));
        }
        let (line, column) = (expression.line, expression.column);
        Ok(AstNode::synthetic(SyntaxKind::MethodCall, line, column).with_children([expression, closure]))
    }

    fn primary_expression(&mut self) -> ParseResult<AstNode> {
        let token = self.peek_token(0);
        match token.kind {
            SyntaxKind::Ident | SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword => {
                self.bump();
                Ok(Self::leaf(&token))
            }
            kind if is_literal(kind) || kind.is_builtin_type() => {
                self.bump();
                Ok(Self::leaf(&token))
            }
            SyntaxKind::StringCtorStart => self.string_constructor(),
            SyntaxKind::LParen => {
                self.bump();
                self.nls();
                let expression = self.expression()?;
                self.nls();
                self.expect(SyntaxKind::RParen)?;
                Ok(expression)
            }
            SyntaxKind::LBrack => self.list_or_map_constructor(),
            SyntaxKind::LCurly => self.closable_block(),
            SyntaxKind::NewKeyword => self.new_expression(),
            _ => Err(self.unexpected()),
        }
    }

    /// `[a, b]`, `[k: v]` or the empty map `[:]`.
    fn list_or_map_constructor(&mut self) -> ParseResult<AstNode> {
        let lbrack = self.expect(SyntaxKind::LBrack)?;
        if self.at(SyntaxKind::Colon) && self.peek(1) == SyntaxKind::RBrack {
            self.bump();
            self.bump();
            return Ok(Self::leaf(&lbrack).retagged(SyntaxKind::MapConstructor));
        }
        let elements = self.argument_list(SyntaxKind::RBrack)?;
        self.nls();
        self.expect(SyntaxKind::RBrack)?;
        let is_map = elements
            .children
            .iter()
            .any(|e| e.is(SyntaxKind::LabeledArg) || e.is(SyntaxKind::SpreadMapArg));
        let tag = if is_map {
            SyntaxKind::MapConstructor
        } else {
            SyntaxKind::ListConstructor
        };
        Ok(Self::leaf(&lbrack).retagged(tag).with_child(elements))
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    /// Comma-separated arguments up to `terminator` as an `ELIST`. A
    /// trailing comma is allowed.
    pub(crate) fn argument_list(&mut self, terminator: SyntaxKind) -> ParseResult<AstNode> {
        self.nls();
        let mut arguments = self.synthetic_here(SyntaxKind::Elist);
        if self.at(terminator) {
            return Ok(arguments);
        }
        loop {
            arguments.add_child(self.argument()?);
            self.nls();
            if !self.eat(SyntaxKind::Comma) {
                return Ok(arguments);
            }
            self.nls();
            if self.at(terminator) {
                return Ok(arguments);
            }
        }
    }

    /// Plain expressions separated by commas, as in a `for` header.
    pub(crate) fn expression_list(&mut self, terminator: SyntaxKind) -> ParseResult<AstNode> {
        let mut list = self.synthetic_here(SyntaxKind::Elist);
        while !self.at(terminator) {
            list.add_child(self.expression()?);
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
            self.nls();
        }
        Ok(list)
    }

    fn argument(&mut self) -> ParseResult<AstNode> {
        if self.at(SyntaxKind::Star) {
            let star = self.bump();
            let tag = if self.eat(SyntaxKind::Colon) {
                self.nls();
                SyntaxKind::SpreadMapArg
            } else {
                SyntaxKind::SpreadArg
            };
            let value = self.expression()?;
            return Ok(Self::leaf(&star).retagged(tag).with_child(value));
        }
        if self.is_argument_label() {
            return self.labeled_argument();
        }
        self.expression()
    }

    /// `key:` or `(expression):`. A parenthesized key is found by skipping
    /// to the matching `)`, so nested arguments are never parsed twice.
    fn is_argument_label(&mut self) -> bool {
        let kind = self.current();
        if kind == SyntaxKind::LParen {
            return self
                .offset_past_group()
                .is_some_and(|offset| self.peek(offset) == SyntaxKind::Colon);
        }
        let is_key = kind == SyntaxKind::Ident || kind == SyntaxKind::StringLiteral || kind.is_keyword() || kind.is_number();
        is_key && self.peek(1) == SyntaxKind::Colon
    }

    /// Offset of the token after the bracket group opened at the cursor, or
    /// `None` if input ends first.
    fn offset_past_group(&mut self) -> Option<usize> {
        let mut depth = 0usize;
        let mut offset = 0;
        loop {
            match self.peek(offset) {
                SyntaxKind::LParen | SyntaxKind::LBrack | SyntaxKind::LCurly => depth += 1,
                SyntaxKind::RParen | SyntaxKind::RBrack | SyntaxKind::RCurly => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(offset + 1);
                    }
                }
                SyntaxKind::Eof => return None,
                _ => {}
            }
            offset += 1;
        }
    }

    /// `key: value` as `LABELED_ARG[key, value]`.
    fn labeled_argument(&mut self) -> ParseResult<AstNode> {
        let key = if self.at(SyntaxKind::LParen) {
            self.bump();
            let key = self.expression()?;
            self.expect(SyntaxKind::RParen)?;
            key
        } else {
            Self::leaf(&self.bump())
        };
        let colon = self.expect(SyntaxKind::Colon)?;
        self.nls();
        let value = self.expression()?;
        Ok(Self::leaf(&colon).retagged(SyntaxKind::LabeledArg).with_children([key, value]))
    }

    // ========================================================================
    // Closures
    // ========================================================================

    /// Whether the `{` at the cursor opens a closure with an explicit
    /// parameter list.
    pub(crate) fn has_closure_parameters(&mut self) -> ParseResult<bool> {
        self.guess(|p| {
            p.expect(SyntaxKind::LCurly)?;
            p.nls();
            p.closure_parameters().map(drop)
        })
    }

    /// `a, b ->`, a bare `->`, or with legacy syntax `|a, b|`.
    fn closure_parameters(&mut self) -> ParseResult<AstNode> {
        if self.context.legacy_closure_syntax && self.at(SyntaxKind::Bor) {
            self.bump();
            let parameters = self.parameter_list(SyntaxKind::Bor)?;
            self.expect(SyntaxKind::Bor)?;
            return Ok(parameters);
        }
        let parameters = self.parameter_list(SyntaxKind::ClosureOp)?;
        self.nls();
        self.expect(SyntaxKind::ClosureOp)?;
        Ok(parameters)
    }

    /// `{ params -> statements }` as a `CLOSABLE_BLOCK`. Without a
    /// parameter list the closure gets `IMPLICIT_PARAMETERS`.
    pub(crate) fn closable_block(&mut self) -> ParseResult<AstNode> {
        let lcurly = self.expect(SyntaxKind::LCurly)?;
        let mut block = Self::leaf(&lcurly);
        self.nls();
        let parameters = if self.guess(|p| p.closure_parameters().map(drop))? {
            self.closure_parameters()?
        } else {
            self.synthetic_here(SyntaxKind::ImplicitParameters)
        };
        block.add_child(parameters);
        self.statement_list(SyntaxKind::LCurly, |kind| kind == SyntaxKind::RCurly, &mut block.children)?;
        self.expect(SyntaxKind::RCurly)?;
        block.retag(SyntaxKind::ClosableBlock);
        Ok(block)
    }

    // ========================================================================
    // Strings and object creation
    // ========================================================================

    /// An interpolated string: literal pieces alternating with values.
    fn string_constructor(&mut self) -> ParseResult<AstNode> {
        let start = self.expect(SyntaxKind::StringCtorStart)?;
        let mut string = AstNode::synthetic(SyntaxKind::StringConstructor, start.line, start.column)
            .with_child(Self::leaf(&start).retagged(SyntaxKind::StringLiteral));
        loop {
            string.add_child(self.string_constructor_value()?);
            match self.current() {
                SyntaxKind::StringCtorMiddle => {
                    let middle = self.bump();
                    string.add_child(Self::leaf(&middle).retagged(SyntaxKind::StringLiteral));
                }
                SyntaxKind::StringCtorEnd => {
                    let end = self.bump();
                    string.add_child(Self::leaf(&end).retagged(SyntaxKind::StringLiteral));
                    return Ok(string);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// `$name.path`, `$this.path` or `${ ... }`. A braced value holding one expression
    /// statement is that expression.
    fn string_constructor_value(&mut self) -> ParseResult<AstNode> {
        match self.current() {
            SyntaxKind::Ident | SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword => {
                let mut value = Self::leaf(&self.bump());
                while self.at(SyntaxKind::Dot) && self.peek(1) != SyntaxKind::StringLiteral && is_member_name(self.peek(1)) {
                    let dot = self.bump();
                    let name = self.bump();
                    value = Self::leaf(&dot).with_children([value, Self::leaf(&name)]);
                }
                Ok(value)
            }
            SyntaxKind::LCurly if self.has_closure_parameters()? => self.closable_block(),
            SyntaxKind::LCurly => {
                let mut block = self.open_block()?;
                if block.children.len() == 1 && block.children[0].is(SyntaxKind::Expr) {
                    let mut statement = block.children.remove(0);
                    if let Some(expression) = statement.children.pop() {
                        return Ok(expression);
                    }
                }
                Ok(block)
            }
            _ => {
                let token = self.peek_token(0);
                Err(self.error_at(&token, &messages::STRING_VALUE_EXPECTED, &[&describe(&token)]))
            }
        }
    }

    /// `new Type(args) { body }` or `new Type[size]...`.
    fn new_expression(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::NewKeyword)?;
        self.nls();
        let mut node = Self::leaf(&keyword);
        let ty = if self.current().is_builtin_type() {
            let builtin = self.bump();
            AstNode::synthetic(SyntaxKind::Type, builtin.line, builtin.column).with_child(Self::leaf(&builtin))
        } else {
            self.class_type_spec()?
        };
        node.add_child(ty);

        match self.current() {
            SyntaxKind::LParen => {
                self.bump();
                let arguments = self.argument_list(SyntaxKind::RParen)?;
                self.nls();
                self.expect(SyntaxKind::RParen)?;
                node.add_child(arguments);
                if self.at(SyntaxKind::LCurly) {
                    node.add_child(self.class_block(BodyKind::Class)?);
                }
            }
            SyntaxKind::LBrack => {
                let mut declarator: Option<AstNode> = None;
                while self.at(SyntaxKind::LBrack) {
                    let lbrack = self.bump();
                    let mut next = AstNode::synthetic(SyntaxKind::ArrayDeclarator, lbrack.line, lbrack.column);
                    next.children.extend(declarator.take());
                    if !self.at(SyntaxKind::RBrack) {
                        next.add_child(self.expression()?);
                    }
                    self.expect(SyntaxKind::RBrack)?;
                    declarator = Some(next);
                }
                node.children.extend(declarator);
            }
            _ => return Err(self.unexpected()),
        }
        Ok(node)
    }
}
