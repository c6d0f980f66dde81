//! Statements: blocks, control flow, labels, imports and the package header.

use groovy_ast::node::AstNode;
use groovy_ast::syntax_kind::SyntaxKind;
use groovy_diagnostics::messages;

use crate::parser::{ParseResult, Parser};
use crate::utilities::{can_start_expression, ends_statement, is_line_start_separator};

impl Parser {
    /// One statement in a statement list. Declarations may produce several
    /// nodes (`int a, b`), so results are appended to `out`.
    pub(crate) fn statement(&mut self, out: &mut Vec<AstNode>) -> ParseResult<()> {
        let separator = self.context.last_separator;
        let node = match self.current() {
            SyntaxKind::LCurly => self.block_statement(separator)?,
            SyntaxKind::IfKeyword => self.if_statement()?,
            SyntaxKind::WhileKeyword => self.while_statement()?,
            SyntaxKind::ForKeyword => self.for_statement()?,
            SyntaxKind::SwitchKeyword => self.switch_statement()?,
            SyntaxKind::TryKeyword => self.try_statement()?,
            SyntaxKind::ReturnKeyword | SyntaxKind::ThrowKeyword => self.return_or_throw_statement()?,
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => self.break_or_continue_statement()?,
            SyntaxKind::AssertKeyword => self.assert_statement()?,
            SyntaxKind::ImportKeyword => {
                let annotations = self.synthetic_here(SyntaxKind::Annotations);
                self.import_statement(annotations)?
            }
            SyntaxKind::SynchronizedKeyword if self.peek(1) == SyntaxKind::LParen => self.synchronized_statement()?,
            SyntaxKind::Ident if self.is_label_start()? => self.labeled_statement()?,
            _ => return self.declaration_or_expression_statement(separator, out),
        };
        out.push(node);
        Ok(())
    }

    fn declaration_or_expression_statement(&mut self, separator: SyntaxKind, out: &mut Vec<AstNode>) -> ParseResult<()> {
        if self.at(SyntaxKind::At) && self.is_annotated_import()? {
            let annotations = self.annotations()?;
            self.nls();
            out.push(self.import_statement(annotations)?);
        } else if self.is_type_definition_start()? {
            let modifiers = self.modifiers_opt()?;
            out.push(self.type_definition(modifiers)?);
        } else if self.is_declaration_start()? {
            out.extend(self.declaration()?);
        } else {
            out.push(self.expression_statement(separator)?);
        }
        Ok(())
    }

    /// An expression used as a statement, wrapped in `EXPR`.
    pub(crate) fn expression_statement(&mut self, separator: SyntaxKind) -> ParseResult<AstNode> {
        let first = self.peek_token(0);
        let suspicious = match first.kind {
            SyntaxKind::Plus | SyntaxKind::Minus | SyntaxKind::LParen | SyntaxKind::LBrack => true,
            // Only closures with parameters get here after a newline.
            SyntaxKind::LCurly => true,
            _ => false,
        };
        if separator == SyntaxKind::Nls && suspicious {
            self.warn(&first, &messages::STATEMENT_MAY_CONTINUE_PREVIOUS, &[]);
        }
        let expression = self.statement_expression()?;
        Ok(AstNode::wrap(SyntaxKind::Expr, vec![expression], first.line, first.column))
    }

    /// A `{` in statement position: a closure if it declares parameters,
    /// otherwise an open block where that is unambiguous.
    fn block_statement(&mut self, separator: SyntaxKind) -> ParseResult<AstNode> {
        if self.has_closure_parameters()? {
            return self.expression_statement(separator);
        }
        let lcurly = self.peek_token(0);
        if is_line_start_separator(separator) {
            return Err(self.error_at(&lcurly, &messages::AMBIGUOUS_BLOCK_AFTER_NEWLINE, &[]));
        }
        self.warn(&lcurly, &messages::AMBIGUOUS_BLOCK, &[]);
        self.open_block()
    }

    /// `{ statements }` as an `SLIST`.
    pub(crate) fn open_block(&mut self) -> ParseResult<AstNode> {
        let lcurly = self.expect(SyntaxKind::LCurly)?;
        let mut block = Self::leaf(&lcurly);
        self.statement_list(SyntaxKind::LCurly, |kind| kind == SyntaxKind::RCurly, &mut block.children)?;
        self.expect(SyntaxKind::RCurly)?;
        block.retag(SyntaxKind::Slist);
        Ok(block)
    }

    /// A braced body that becomes a `CLOSABLE_BLOCK` only when it declares
    /// parameters.
    pub(crate) fn block_or_closure(&mut self) -> ParseResult<AstNode> {
        if self.has_closure_parameters()? {
            self.closable_block()
        } else {
            self.open_block()
        }
    }

    /// The body of `if`, `else`, loops and labels.
    pub(crate) fn compatible_body_statement(&mut self) -> ParseResult<AstNode> {
        match self.current() {
            SyntaxKind::LCurly => self.block_or_closure(),
            SyntaxKind::Semi => {
                let semi = self.bump();
                Ok(AstNode::synthetic(SyntaxKind::EmptyStat, semi.line, semi.column))
            }
            _ => {
                let (line, column) = {
                    let token = self.peek_token(0);
                    (token.line, token.column)
                };
                self.context.last_separator = self.previous_kind();
                let mut nodes = Vec::new();
                self.statement(&mut nodes)?;
                if nodes.len() == 1 {
                    Ok(nodes.remove(0))
                } else {
                    Ok(AstNode::wrap(SyntaxKind::Slist, nodes, line, column))
                }
            }
        }
    }

    /// `( expression )` as the `EXPR` of a statement header.
    fn parenthesized_condition(&mut self) -> ParseResult<AstNode> {
        self.expect(SyntaxKind::LParen)?;
        self.nls();
        let first = self.peek_token(0);
        let condition = self.statement_expression()?;
        self.nls();
        self.expect(SyntaxKind::RParen)?;
        Ok(AstNode::wrap(SyntaxKind::Expr, vec![condition], first.line, first.column))
    }

    fn if_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::IfKeyword)?;
        let mut node = Self::leaf(&keyword);
        node.add_child(self.parenthesized_condition()?);
        self.nls_warn();
        node.add_child(self.compatible_body_statement()?);

        let offset = self.offset_past_separators();
        if self.peek(offset) == SyntaxKind::ElseKeyword {
            for _ in 0..offset {
                self.bump();
            }
            self.bump();
            self.nls_warn();
            node.add_child(self.compatible_body_statement()?);
        }
        Ok(node)
    }

    fn while_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::WhileKeyword)?;
        let mut node = Self::leaf(&keyword);
        node.add_child(self.parenthesized_condition()?);
        self.nls_warn();
        node.add_child(self.compatible_body_statement()?);
        Ok(node)
    }

    fn for_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::ForKeyword)?;
        let mut node = Self::leaf(&keyword);
        self.expect(SyntaxKind::LParen)?;
        self.nls();
        if self.is_for_in_clause()? {
            node.add_child(self.for_in_clause()?);
        } else {
            node.children.extend(self.traditional_for_clause()?);
        }
        self.nls();
        self.expect(SyntaxKind::RParen)?;
        self.nls_warn();
        node.add_child(self.compatible_body_statement()?);
        Ok(node)
    }

    /// `x in items`, `String x in items` or `x : items`.
    fn is_for_in_clause(&mut self) -> ParseResult<bool> {
        self.guess(|p| {
            p.for_in_variable()?;
            match p.current() {
                SyntaxKind::InKeyword | SyntaxKind::Colon => Ok(()),
                _ => Err(p.unexpected()),
            }
        })
    }

    fn for_in_variable(&mut self) -> ParseResult<AstNode> {
        if self.is_declaration_start()? {
            self.uninitialized_variable()
        } else {
            let name = self.expect(SyntaxKind::Ident)?;
            Ok(Self::leaf(&name))
        }
    }

    fn for_in_clause(&mut self) -> ParseResult<AstNode> {
        let variable = self.for_in_variable()?;
        let operator = self.bump();
        let tag = if operator.is(SyntaxKind::Colon) {
            SyntaxKind::ForEachClause
        } else {
            SyntaxKind::ForInIterable
        };
        let iterable = self.expression()?;
        Ok(Self::leaf(&operator).retagged(tag).with_children([variable, iterable]))
    }

    /// `init; condition; update`, each part optional.
    fn traditional_for_clause(&mut self) -> ParseResult<[AstNode; 3]> {
        let mut init = self.synthetic_here(SyntaxKind::ForInit);
        if self.is_declaration_start()? {
            init.children.extend(self.declaration()?);
        } else if !self.at(SyntaxKind::Semi) {
            init.add_child(self.expression_list(SyntaxKind::Semi)?);
        }
        self.expect(SyntaxKind::Semi)?;

        let mut condition = self.synthetic_here(SyntaxKind::ForCondition);
        if !self.at(SyntaxKind::Semi) {
            condition.add_child(self.expression()?);
        }
        self.expect(SyntaxKind::Semi)?;

        let mut iterator = self.synthetic_here(SyntaxKind::ForIterator);
        if !self.at(SyntaxKind::RParen) {
            iterator.add_child(self.expression_list(SyntaxKind::RParen)?);
        }
        Ok([init, condition, iterator])
    }

    fn switch_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::SwitchKeyword)?;
        let mut node = Self::leaf(&keyword);
        node.add_child(self.parenthesized_condition()?);
        self.nls();
        self.expect(SyntaxKind::LCurly)?;
        self.nls();
        while matches!(self.current(), SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword) {
            node.add_child(self.case_group()?);
        }
        self.expect(SyntaxKind::RCurly)?;
        Ok(node)
    }

    fn case_group(&mut self) -> ParseResult<AstNode> {
        let mut group = self.synthetic_here(SyntaxKind::CaseGroup);
        loop {
            match self.current() {
                SyntaxKind::CaseKeyword => {
                    let keyword = self.bump();
                    let value = self.expression()?;
                    group.add_child(Self::leaf(&keyword).with_child(value));
                }
                SyntaxKind::DefaultKeyword => {
                    let keyword = self.bump();
                    group.add_child(Self::leaf(&keyword));
                }
                _ => break,
            }
            self.expect(SyntaxKind::Colon)?;
            self.nls();
        }
        let mut body = self.synthetic_here(SyntaxKind::Slist);
        self.statement_list(
            SyntaxKind::Colon,
            |kind| matches!(kind, SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::RCurly),
            &mut body.children,
        )?;
        group.add_child(body);
        Ok(group)
    }

    fn try_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::TryKeyword)?;
        let mut node = Self::leaf(&keyword);
        self.nls_warn();
        node.add_child(self.open_block()?);

        loop {
            let offset = self.offset_past_newlines();
            if self.peek(offset) != SyntaxKind::CatchKeyword {
                break;
            }
            self.nls();
            let catch = self.bump();
            self.expect(SyntaxKind::LParen)?;
            let parameter = self.parameter_declaration()?;
            self.expect(SyntaxKind::RParen)?;
            self.nls_warn();
            let block = self.open_block()?;
            node.add_child(Self::leaf(&catch).with_children([parameter, block]));
        }

        let offset = self.offset_past_newlines();
        if self.peek(offset) == SyntaxKind::FinallyKeyword {
            self.nls();
            let finally = self.bump();
            self.nls_warn();
            let block = self.open_block()?;
            node.add_child(Self::leaf(&finally).with_child(block));
        }
        Ok(node)
    }

    fn return_or_throw_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.bump();
        let mut node = Self::leaf(&keyword);
        let kind = self.current();
        if keyword.is(SyntaxKind::ThrowKeyword) || (!ends_statement(kind) && can_start_expression(kind)) {
            node.add_child(self.expression()?);
        }
        Ok(node)
    }

    fn break_or_continue_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.bump();
        let mut node = Self::leaf(&keyword);
        if self.at(SyntaxKind::Ident) {
            let label = self.bump();
            node.add_child(Self::leaf(&label));
        }
        Ok(node)
    }

    fn assert_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::AssertKeyword)?;
        let mut node = Self::leaf(&keyword);
        node.add_child(self.expression()?);
        if matches!(self.current(), SyntaxKind::Colon | SyntaxKind::Comma) {
            self.bump();
            self.nls();
            node.add_child(self.expression()?);
        }
        Ok(node)
    }

    fn synchronized_statement(&mut self) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::SynchronizedKeyword)?;
        let mut node = Self::leaf(&keyword);
        node.add_child(self.parenthesized_condition()?);
        self.nls_warn();
        node.add_child(self.open_block()?);
        Ok(node)
    }

    fn is_label_start(&mut self) -> ParseResult<bool> {
        if self.peek(1) != SyntaxKind::Colon {
            return Ok(false);
        }
        self.guess(|p| {
            p.expect(SyntaxKind::Ident)?;
            p.expect(SyntaxKind::Colon)?;
            Ok(())
        })
    }

    fn labeled_statement(&mut self) -> ParseResult<AstNode> {
        let label = self.expect(SyntaxKind::Ident)?;
        self.expect(SyntaxKind::Colon)?;
        self.nls();
        let body = self.compatible_body_statement()?;
        Ok(AstNode::synthetic(SyntaxKind::LabeledStat, label.line, label.column).with_children([Self::leaf(&label), body]))
    }

    // ========================================================================
    // Package and imports
    // ========================================================================

    pub(crate) fn is_package_start(&mut self) -> ParseResult<bool> {
        match self.current() {
            SyntaxKind::PackageKeyword => Ok(true),
            SyntaxKind::At => self.guess(|p| {
                p.annotations()?;
                p.nls();
                p.expect(SyntaxKind::PackageKeyword).map(drop)
            }),
            _ => Ok(false),
        }
    }

    pub(crate) fn package_definition(&mut self) -> ParseResult<AstNode> {
        let annotations = self.annotations()?;
        self.nls();
        let keyword = self.expect(SyntaxKind::PackageKeyword)?;
        let name = self.qualified_name()?;
        Ok(AstNode::synthetic(SyntaxKind::PackageDef, keyword.line, keyword.column).with_children([annotations, name]))
    }

    fn is_annotated_import(&mut self) -> ParseResult<bool> {
        self.guess(|p| {
            p.annotations()?;
            p.nls();
            p.expect(SyntaxKind::ImportKeyword).map(drop)
        })
    }

    /// `import a.b.C`, `import a.b.*`, `import a.B as C`, with `static`.
    fn import_statement(&mut self, annotations: AstNode) -> ParseResult<AstNode> {
        let keyword = self.expect(SyntaxKind::ImportKeyword)?;
        let tag = if self.eat(SyntaxKind::StaticKeyword) {
            SyntaxKind::StaticImport
        } else {
            SyntaxKind::Import
        };
        let mut target = self.qualified_name()?;
        if self.at(SyntaxKind::Dot) && self.peek(1) == SyntaxKind::Star {
            let dot = self.bump();
            let star = self.bump();
            target = Self::leaf(&dot).with_children([target, Self::leaf(&star)]);
        } else if self.at(SyntaxKind::AsKeyword) {
            let keyword = self.bump();
            let alias = self.expect(SyntaxKind::Ident)?;
            target = Self::leaf(&keyword).with_children([target, Self::leaf(&alias)]);
        }
        Ok(Self::leaf(&keyword).retagged(tag).with_children([annotations, target]))
    }

    /// `a.b.c` as `IDENT` or nested `DOT[name, IDENT]`.
    pub(crate) fn qualified_name(&mut self) -> ParseResult<AstNode> {
        let first = self.expect(SyntaxKind::Ident)?;
        let mut name = Self::leaf(&first);
        while self.at(SyntaxKind::Dot) && self.peek(1) == SyntaxKind::Ident {
            let dot = self.bump();
            let part = self.bump();
            name = Self::leaf(&dot).with_children([name, Self::leaf(&part)]);
        }
        Ok(name)
    }
}
