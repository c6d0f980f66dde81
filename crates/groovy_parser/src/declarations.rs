//! Declarations: modifiers, annotations, variables, methods, parameters and
//! type definitions with their member blocks.

use groovy_ast::node::AstNode;
use groovy_ast::syntax_kind::SyntaxKind;

use crate::parser::{ParseResult, Parser};
use crate::utilities::is_upper_case_name;

/// The kind of type whose body is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

fn starts_modifier(kind: SyntaxKind) -> bool {
    kind.is_modifier() || matches!(kind, SyntaxKind::DefKeyword | SyntaxKind::At)
}

impl Parser {
    // ========================================================================
    // Modifiers and annotations
    // ========================================================================

    /// Modifier keywords, `def` and annotations, each optionally followed by
    /// newlines. `def` only marks a declaration and is not kept.
    pub(crate) fn modifiers_opt(&mut self) -> ParseResult<AstNode> {
        let mut modifiers = self.synthetic_here(SyntaxKind::Modifiers);
        loop {
            match self.current() {
                SyntaxKind::At if self.peek(1) != SyntaxKind::InterfaceKeyword => {
                    modifiers.add_child(self.annotation()?);
                }
                SyntaxKind::DefKeyword => {
                    self.bump();
                }
                kind if kind.is_modifier() => {
                    let keyword = self.bump();
                    modifiers.add_child(Self::leaf(&keyword));
                }
                _ => return Ok(modifiers),
            }
            self.nls();
        }
    }

    pub(crate) fn annotations(&mut self) -> ParseResult<AstNode> {
        let mut annotations = self.synthetic_here(SyntaxKind::Annotations);
        while self.at(SyntaxKind::At) && self.peek(1) != SyntaxKind::InterfaceKeyword {
            annotations.add_child(self.annotation()?);
            self.nls();
        }
        Ok(annotations)
    }

    /// `@Name`, `@Name(value)` or `@Name(key = value, ...)`.
    pub(crate) fn annotation(&mut self) -> ParseResult<AstNode> {
        let at = self.expect(SyntaxKind::At)?;
        let name = self.qualified_name()?;
        let mut annotation = AstNode::synthetic(SyntaxKind::Annotation, at.line, at.column).with_child(name);
        if !self.eat(SyntaxKind::LParen) {
            return Ok(annotation);
        }
        self.nls();
        if self.at(SyntaxKind::Ident) && self.peek(1) == SyntaxKind::Assign {
            loop {
                let key = self.expect(SyntaxKind::Ident)?;
                self.expect(SyntaxKind::Assign)?;
                self.nls();
                let value = self.annotation_value()?;
                annotation.add_child(
                    AstNode::synthetic(SyntaxKind::AnnotationMemberValuePair, key.line, key.column)
                        .with_children([Self::leaf(&key), value]),
                );
                self.nls();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
                self.nls();
            }
        } else if !self.at(SyntaxKind::RParen) {
            annotation.add_child(self.annotation_value()?);
        }
        self.nls();
        self.expect(SyntaxKind::RParen)?;
        Ok(annotation)
    }

    fn annotation_value(&mut self) -> ParseResult<AstNode> {
        if self.at(SyntaxKind::At) {
            self.annotation()
        } else {
            self.conditional_expression()
        }
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    fn at_type_keyword(&mut self) -> bool {
        match self.current() {
            SyntaxKind::ClassKeyword | SyntaxKind::InterfaceKeyword | SyntaxKind::EnumKeyword => true,
            SyntaxKind::At => self.peek(1) == SyntaxKind::InterfaceKeyword,
            _ => false,
        }
    }

    /// Modifiers followed by `class`, `interface`, `enum` or `@interface`.
    pub(crate) fn is_type_definition_start(&mut self) -> ParseResult<bool> {
        if self.at_type_keyword() {
            return Ok(true);
        }
        if !starts_modifier(self.current()) {
            return Ok(false);
        }
        self.guess(|p| {
            p.modifiers_opt()?;
            if p.at_type_keyword() {
                Ok(())
            } else {
                Err(p.unexpected())
            }
        })
    }

    /// Whether a variable or method declaration starts here: modifiers, or a
    /// type followed by a name. A plain identifier only counts as a type
    /// when it is capitalized, so `foo bar` stays a command call.
    pub(crate) fn is_declaration_start(&mut self) -> ParseResult<bool> {
        let kind = self.current();
        match kind {
            SyntaxKind::DefKeyword => return Ok(true),
            SyntaxKind::At => {
                return self.guess(|p| {
                    p.modifiers_opt()?;
                    p.declaration_rest_start()
                })
            }
            _ if kind.is_modifier() => return Ok(true),
            SyntaxKind::Ident => {
                let capitalized = is_upper_case_name(&self.peek_token(0).text);
                if !capitalized && self.peek(1) != SyntaxKind::Dot {
                    return Ok(false);
                }
            }
            _ if kind.is_builtin_type() => {}
            _ => return Ok(false),
        }
        self.guess(|p| {
            let ty = p.type_spec()?;
            if !Self::looks_like_declared_type(&ty) {
                return Err(p.unexpected());
            }
            p.declaration_name_start()
        })
    }

    /// What may follow the modifiers of a declaration.
    fn declaration_rest_start(&mut self) -> ParseResult<()> {
        match self.current() {
            SyntaxKind::Ident | SyntaxKind::Lt => Ok(()),
            SyntaxKind::StringLiteral if self.peek(1) == SyntaxKind::LParen => Ok(()),
            kind if kind.is_builtin_type() => Ok(()),
            _ => Err(self.unexpected()),
        }
    }

    /// A declared name: an identifier, or a string naming a method.
    fn declaration_name_start(&mut self) -> ParseResult<()> {
        match self.current() {
            SyntaxKind::Ident => Ok(()),
            SyntaxKind::StringLiteral if self.peek(1) == SyntaxKind::LParen => Ok(()),
            _ => Err(self.unexpected()),
        }
    }

    /// Whether an explicit type precedes the declared name.
    fn is_typed_declaration(&mut self) -> ParseResult<bool> {
        let kind = self.current();
        if kind != SyntaxKind::Ident && !kind.is_builtin_type() {
            return Ok(false);
        }
        self.guess(|p| {
            p.type_spec()?;
            p.declaration_name_start()
        })
    }

    // ========================================================================
    // Variables and methods
    // ========================================================================

    /// A declaration in statement position. `int a = 1, b` yields one
    /// `VARIABLE_DEF` per declarator.
    pub(crate) fn declaration(&mut self) -> ParseResult<Vec<AstNode>> {
        let modifiers = self.modifiers_opt()?;
        self.declaration_rest(modifiers, None)
    }

    fn declaration_rest(&mut self, modifiers: AstNode, body: Option<BodyKind>) -> ParseResult<Vec<AstNode>> {
        let type_parameters = if self.at(SyntaxKind::Lt) {
            Some(self.type_parameters()?)
        } else {
            None
        };
        let ty = if self.is_typed_declaration()? {
            self.type_spec()?
        } else {
            self.synthetic_here(SyntaxKind::Type)
        };

        let name = match self.current() {
            SyntaxKind::Ident => Self::leaf(&self.bump()),
            SyntaxKind::StringLiteral if self.peek(1) == SyntaxKind::LParen => {
                Self::leaf(&self.bump()).retagged(SyntaxKind::Ident)
            }
            _ => return Err(self.unexpected()),
        };

        if self.at(SyntaxKind::LParen) {
            let method = if body == Some(BodyKind::Annotation) {
                self.annotation_field_definition(modifiers, ty, name)?
            } else {
                self.method_definition(type_parameters, modifiers, ty, name)?
            };
            return Ok(vec![method]);
        }
        if type_parameters.is_some() {
            return Err(self.unexpected());
        }
        self.variable_definitions(modifiers, ty, name)
    }

    fn method_definition(
        &mut self,
        type_parameters: Option<AstNode>,
        modifiers: AstNode,
        ty: AstNode,
        name: AstNode,
    ) -> ParseResult<AstNode> {
        let mut method = AstNode::synthetic(SyntaxKind::MethodDef, modifiers.line, modifiers.column);
        method.children.extend(type_parameters);
        method.children.extend([modifiers, ty, name]);
        method.add_child(self.parenthesized_parameters()?);

        let offset = self.offset_past_newlines();
        if self.peek(offset) == SyntaxKind::ThrowsKeyword {
            self.nls();
            method.add_child(self.throws_clause()?);
        }
        if self.at(SyntaxKind::LCurly) || (self.at(SyntaxKind::Nls) && self.peek(1) == SyntaxKind::LCurly) {
            self.nls();
            method.add_child(self.open_block()?);
        }
        Ok(method)
    }

    /// `String value() default "x"` inside `@interface`.
    fn annotation_field_definition(&mut self, modifiers: AstNode, ty: AstNode, name: AstNode) -> ParseResult<AstNode> {
        self.expect(SyntaxKind::LParen)?;
        self.expect(SyntaxKind::RParen)?;
        let mut field = AstNode::synthetic(SyntaxKind::AnnotationFieldDef, modifiers.line, modifiers.column)
            .with_children([modifiers, ty, name]);
        if self.eat(SyntaxKind::DefaultKeyword) {
            self.nls();
            field.add_child(self.annotation_value()?);
        }
        Ok(field)
    }

    fn variable_definitions(&mut self, modifiers: AstNode, ty: AstNode, first: AstNode) -> ParseResult<Vec<AstNode>> {
        let mut definitions = Vec::new();
        let mut name = first;
        loop {
            let mut definition = AstNode::synthetic(SyntaxKind::VariableDef, modifiers.line, modifiers.column)
                .with_children([modifiers.clone(), ty.clone(), name]);
            if self.at(SyntaxKind::Assign) {
                let assign = self.bump();
                self.nls();
                let value = self.expression()?;
                definition.add_child(Self::leaf(&assign).with_child(value));
            }
            definitions.push(definition);
            if !self.eat(SyntaxKind::Comma) {
                return Ok(definitions);
            }
            self.nls();
            name = Self::leaf(&self.expect(SyntaxKind::Ident)?);
        }
    }

    /// A `VARIABLE_DEF` without an initializer, as in a for-in header.
    pub(crate) fn uninitialized_variable(&mut self) -> ParseResult<AstNode> {
        let modifiers = self.modifiers_opt()?;
        let ty = if self.is_typed_declaration()? {
            self.type_spec()?
        } else {
            self.synthetic_here(SyntaxKind::Type)
        };
        let name = self.expect(SyntaxKind::Ident)?;
        Ok(AstNode::synthetic(SyntaxKind::VariableDef, modifiers.line, modifiers.column)
            .with_children([modifiers, ty, Self::leaf(&name)]))
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    fn is_typed_parameter(&mut self) -> ParseResult<bool> {
        let kind = self.current();
        if kind != SyntaxKind::Ident && !kind.is_builtin_type() {
            return Ok(false);
        }
        self.guess(|p| {
            p.type_spec()?;
            p.eat(SyntaxKind::TripleDot);
            p.expect(SyntaxKind::Ident).map(drop)
        })
    }

    /// `final String name = "x"` or `Object... rest`.
    pub(crate) fn parameter_declaration(&mut self) -> ParseResult<AstNode> {
        let modifiers = self.modifiers_opt()?;
        let ty = if self.is_typed_parameter()? {
            self.type_spec()?
        } else {
            self.synthetic_here(SyntaxKind::Type)
        };
        let tag = if self.eat(SyntaxKind::TripleDot) {
            SyntaxKind::VariableParameterDef
        } else {
            SyntaxKind::ParameterDef
        };
        let name = self.expect(SyntaxKind::Ident)?;
        let mut parameter =
            AstNode::synthetic(tag, modifiers.line, modifiers.column).with_children([modifiers, ty, Self::leaf(&name)]);
        if self.at(SyntaxKind::Assign) {
            let assign = self.bump();
            self.nls();
            let value = self.expression()?;
            parameter.add_child(Self::leaf(&assign).with_child(value));
        }
        Ok(parameter)
    }

    /// Comma-separated parameters up to, not including, `terminator`.
    pub(crate) fn parameter_list(&mut self, terminator: SyntaxKind) -> ParseResult<AstNode> {
        let mut parameters = self.synthetic_here(SyntaxKind::Parameters);
        if self.at(terminator) {
            return Ok(parameters);
        }
        loop {
            parameters.add_child(self.parameter_declaration()?);
            if !self.eat(SyntaxKind::Comma) {
                return Ok(parameters);
            }
            self.nls();
        }
    }

    fn parenthesized_parameters(&mut self) -> ParseResult<AstNode> {
        self.expect(SyntaxKind::LParen)?;
        self.nls();
        let parameters = self.parameter_list(SyntaxKind::RParen)?;
        self.nls();
        self.expect(SyntaxKind::RParen)?;
        Ok(parameters)
    }

    // ========================================================================
    // Type definitions
    // ========================================================================

    pub(crate) fn type_definition(&mut self, modifiers: AstNode) -> ParseResult<AstNode> {
        match self.current() {
            SyntaxKind::ClassKeyword => self.class_definition(modifiers),
            SyntaxKind::InterfaceKeyword => self.interface_definition(modifiers, BodyKind::Interface),
            SyntaxKind::At => {
                self.bump();
                self.interface_definition(modifiers, BodyKind::Annotation)
            }
            SyntaxKind::EnumKeyword => self.enum_definition(modifiers),
            _ => Err(self.unexpected()),
        }
    }

    fn class_definition(&mut self, modifiers: AstNode) -> ParseResult<AstNode> {
        self.expect(SyntaxKind::ClassKeyword)?;
        let name = self.expect(SyntaxKind::Ident)?;
        let type_parameters = self.type_parameters_opt()?;
        self.nls();

        let mut extends = self.synthetic_here(SyntaxKind::ExtendsClause);
        if self.eat(SyntaxKind::ExtendsKeyword) {
            self.nls();
            extends.add_child(self.class_type_spec()?);
            self.nls();
        }
        let implements = self.implements_clause()?;
        let body = self.type_body(&name.text, BodyKind::Class)?;

        Ok(AstNode::synthetic(SyntaxKind::ClassDef, modifiers.line, modifiers.column).with_children([
            modifiers,
            Self::leaf(&name),
            type_parameters,
            extends,
            implements,
            body,
        ]))
    }

    /// `interface` and `@interface` bodies share a shape.
    fn interface_definition(&mut self, modifiers: AstNode, kind: BodyKind) -> ParseResult<AstNode> {
        self.expect(SyntaxKind::InterfaceKeyword)?;
        let name = self.expect(SyntaxKind::Ident)?;
        let type_parameters = self.type_parameters_opt()?;
        self.nls();

        let mut extends = self.synthetic_here(SyntaxKind::ExtendsClause);
        if self.eat(SyntaxKind::ExtendsKeyword) {
            self.nls();
            extends.add_child(self.class_type_spec()?);
            while self.eat(SyntaxKind::Comma) {
                self.nls();
                extends.add_child(self.class_type_spec()?);
            }
            self.nls();
        }
        let body = self.type_body(&name.text, kind)?;
        let tag = match kind {
            BodyKind::Annotation => SyntaxKind::AnnotationDef,
            _ => SyntaxKind::InterfaceDef,
        };
        Ok(AstNode::synthetic(tag, modifiers.line, modifiers.column).with_children([
            modifiers,
            Self::leaf(&name),
            type_parameters,
            extends,
            body,
        ]))
    }

    fn enum_definition(&mut self, modifiers: AstNode) -> ParseResult<AstNode> {
        self.expect(SyntaxKind::EnumKeyword)?;
        let name = self.expect(SyntaxKind::Ident)?;
        self.nls();
        let implements = self.implements_clause()?;
        let body = self.type_body(&name.text, BodyKind::Enum)?;
        Ok(AstNode::synthetic(SyntaxKind::EnumDef, modifiers.line, modifiers.column).with_children([
            modifiers,
            Self::leaf(&name),
            implements,
            body,
        ]))
    }

    fn type_parameters_opt(&mut self) -> ParseResult<AstNode> {
        if self.at(SyntaxKind::Lt) {
            self.type_parameters()
        } else {
            Ok(self.synthetic_here(SyntaxKind::TypeParameters))
        }
    }

    fn implements_clause(&mut self) -> ParseResult<AstNode> {
        let mut implements = self.synthetic_here(SyntaxKind::ImplementsClause);
        if self.eat(SyntaxKind::ImplementsKeyword) {
            self.nls();
            implements.add_child(self.class_type_spec()?);
            while self.eat(SyntaxKind::Comma) {
                self.nls();
                implements.add_child(self.class_type_spec()?);
            }
            self.nls();
        }
        Ok(implements)
    }

    /// The body of a named type. Its name is in scope for constructor
    /// detection while the body is parsed.
    fn type_body(&mut self, name: &str, kind: BodyKind) -> ParseResult<AstNode> {
        self.context.enclosing_type_names.push(name.to_string());
        let body = self.class_block(kind);
        self.context.enclosing_type_names.pop();
        body
    }

    /// `{ members }` as an `OBJBLOCK`.
    pub(crate) fn class_block(&mut self, kind: BodyKind) -> ParseResult<AstNode> {
        let lcurly = self.expect(SyntaxKind::LCurly)?;
        let mut block = AstNode::synthetic(SyntaxKind::ObjBlock, lcurly.line, lcurly.column);
        self.separators();

        if kind == BodyKind::Enum && self.is_enum_constant_start()? {
            loop {
                block.add_child(self.enum_constant()?);
                self.nls();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
                self.nls();
                if !self.is_enum_constant_start()? {
                    break;
                }
            }
            self.separators();
        }

        while !self.at(SyntaxKind::RCurly) {
            self.class_member(kind, &mut block.children)?;
            if self.separators().is_none() && !self.at(SyntaxKind::RCurly) {
                return Err(self.unexpected());
            }
        }
        self.expect(SyntaxKind::RCurly)?;
        Ok(block)
    }

    fn is_enum_constant_start(&mut self) -> ParseResult<bool> {
        self.guess(|p| {
            p.annotations()?;
            p.expect(SyntaxKind::Ident)?;
            match p.current() {
                SyntaxKind::LParen
                | SyntaxKind::LCurly
                | SyntaxKind::Comma
                | SyntaxKind::Semi
                | SyntaxKind::Nls
                | SyntaxKind::RCurly => Ok(()),
                _ => Err(p.unexpected()),
            }
        })
    }

    fn enum_constant(&mut self) -> ParseResult<AstNode> {
        let annotations = self.annotations()?;
        let name = self.expect(SyntaxKind::Ident)?;
        let mut constant = AstNode::synthetic(SyntaxKind::EnumConstantDef, annotations.line, annotations.column)
            .with_children([annotations, Self::leaf(&name)]);
        if self.eat(SyntaxKind::LParen) {
            constant.add_child(self.argument_list(SyntaxKind::RParen)?);
            self.nls();
            self.expect(SyntaxKind::RParen)?;
        }
        if self.at(SyntaxKind::LCurly) {
            constant.add_child(self.class_block(BodyKind::Class)?);
        }
        Ok(constant)
    }

    fn class_member(&mut self, kind: BodyKind, out: &mut Vec<AstNode>) -> ParseResult<()> {
        match self.current() {
            SyntaxKind::LCurly => {
                let block = self.open_block()?;
                out.push(AstNode::wrap(SyntaxKind::InstanceInit, vec![block], 0, 0));
            }
            SyntaxKind::StaticKeyword if self.peek(1) == SyntaxKind::LCurly => {
                let keyword = self.bump();
                let block = self.open_block()?;
                out.push(AstNode::synthetic(SyntaxKind::StaticInit, keyword.line, keyword.column).with_child(block));
            }
            _ if self.is_type_definition_start()? => {
                let modifiers = self.modifiers_opt()?;
                out.push(self.type_definition(modifiers)?);
            }
            _ => {
                let modifiers = self.modifiers_opt()?;
                if self.is_constructor_start() {
                    out.push(self.constructor_definition(modifiers)?);
                } else {
                    out.extend(self.declaration_rest(modifiers, Some(kind))?);
                }
            }
        }
        Ok(())
    }

    fn is_constructor_start(&mut self) -> bool {
        if !self.at(SyntaxKind::Ident) || self.peek(1) != SyntaxKind::LParen {
            return false;
        }
        let name = self.peek_token(0);
        self.context.is_constructor_name(&name.text)
    }

    fn constructor_definition(&mut self, modifiers: AstNode) -> ParseResult<AstNode> {
        self.expect(SyntaxKind::Ident)?;
        let mut constructor = AstNode::synthetic(SyntaxKind::CtorIdent, modifiers.line, modifiers.column).with_child(modifiers);
        constructor.add_child(self.parenthesized_parameters()?);
        let offset = self.offset_past_newlines();
        if self.peek(offset) == SyntaxKind::ThrowsKeyword {
            self.nls();
            constructor.add_child(self.throws_clause()?);
        }
        self.nls();
        constructor.add_child(self.constructor_body()?);
        Ok(constructor)
    }

    /// A constructor body whose first statement may be `this(...)` or
    /// `super(...)`.
    fn constructor_body(&mut self) -> ParseResult<AstNode> {
        let lcurly = self.expect(SyntaxKind::LCurly)?;
        let mut block = Self::leaf(&lcurly);
        self.separators();
        if matches!(self.current(), SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword) && self.peek(1) == SyntaxKind::LParen {
            let keyword = self.bump();
            self.bump();
            let arguments = self.argument_list(SyntaxKind::RParen)?;
            self.nls();
            self.expect(SyntaxKind::RParen)?;
            let tag = if keyword.is(SyntaxKind::ThisKeyword) {
                SyntaxKind::CtorCall
            } else {
                SyntaxKind::SuperCtorCall
            };
            block.add_child(AstNode::synthetic(tag, keyword.line, keyword.column).with_child(arguments));
            if self.separators().is_none() && !self.at(SyntaxKind::RCurly) {
                return Err(self.unexpected());
            }
        }
        self.statement_list(SyntaxKind::LCurly, |kind| kind == SyntaxKind::RCurly, &mut block.children)?;
        self.expect(SyntaxKind::RCurly)?;
        block.retag(SyntaxKind::Slist);
        Ok(block)
    }
}
