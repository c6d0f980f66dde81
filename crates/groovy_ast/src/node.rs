//! The AST node type produced by the parser.
//!
//! Nodes are homogeneous: a tag, a text, ordered children and the position
//! of the token the node was built from. The child order of every tag is
//! fixed, which is what lets consumers walk the tree positionally.

use crate::syntax_kind::SyntaxKind;
use groovy_core::text::LineAndColumn;
use serde::Serialize;
use std::fmt;

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstNode {
    /// The tag of this node. A node may be retagged once after creation.
    pub kind: SyntaxKind,
    /// The token text for leaves; the tag name for synthetic nodes.
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstNode>,
    pub line: u32,
    pub column: u32,
}

impl AstNode {
    /// A node built from a token.
    pub fn leaf(kind: SyntaxKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            children: Vec::new(),
            line,
            column,
        }
    }

    /// A node with no token of its own; its text is the tag name.
    pub fn synthetic(kind: SyntaxKind, line: u32, column: u32) -> Self {
        Self::leaf(kind, kind.name(), line, column)
    }

    /// A synthetic node wrapping `children`, positioned at the first child.
    pub fn wrap(kind: SyntaxKind, children: Vec<AstNode>, line: u32, column: u32) -> Self {
        let (line, column) = children
            .first()
            .map_or((line, column), |c| (c.line, c.column));
        Self {
            children,
            ..Self::synthetic(kind, line, column)
        }
    }

    pub fn with_child(mut self, child: AstNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = AstNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn add_child(&mut self, child: AstNode) {
        self.children.push(child);
    }

    /// Change the tag. Synthetic text follows the new tag.
    pub fn retag(&mut self, kind: SyntaxKind) {
        if self.text == self.kind.name() || self.kind.fixed_text() == Some(self.text.as_str()) {
            self.text = kind.name().to_string();
        }
        self.kind = kind;
    }

    pub fn retagged(mut self, kind: SyntaxKind) -> Self {
        self.retag(kind);
        self
    }

    pub fn position(&self) -> LineAndColumn {
        LineAndColumn::new(self.line, self.column)
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children.get(index)
    }

    pub fn first_child(&self) -> Option<&AstNode> {
        self.children.first()
    }

    pub fn last_child(&self) -> Option<&AstNode> {
        self.children.last()
    }

    /// The first direct child with the given tag.
    pub fn find_child(&self, kind: SyntaxKind) -> Option<&AstNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    pub fn children_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = &AstNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Depth-first search of the whole subtree, including this node.
    pub fn find_descendant(&self, kind: SyntaxKind) -> Option<&AstNode> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_descendant(kind))
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstNode::node_count).sum::<usize>()
    }

    /// Structural equality: same tags and texts, positions ignored.
    pub fn same_shape(&self, other: &AstNode) -> bool {
        self.kind == other.kind
            && self.text == other.text
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }

    /// The compact label used by [`AstNode::to_sexpr`].
    ///
    /// Identifiers and numbers print their text, string pieces print their
    /// text quoted and everything else prints its tag name.
    pub fn label(&self) -> String {
        match self.kind {
            SyntaxKind::Ident
            | SyntaxKind::NumInt
            | SyntaxKind::NumLong
            | SyntaxKind::NumBigInt
            | SyntaxKind::NumFloat
            | SyntaxKind::NumDouble
            | SyntaxKind::NumBigDecimal => self.text.clone(),
            kind if kind.is_string() => format!("{:?}", self.text),
            kind => kind.name().to_string(),
        }
    }

    /// A one-line s-expression, e.g. `(METHOD_CALL println (ELIST "hi"))`.
    pub fn to_sexpr(&self) -> String {
        let mut out = String::new();
        self.write_sexpr(&mut out);
        out
    }

    fn write_sexpr(&self, out: &mut String) {
        if self.children.is_empty() {
            out.push_str(&self.label());
            return;
        }
        out.push('(');
        out.push_str(&self.label());
        for child in &self.children {
            out.push(' ');
            child.write_sexpr(out);
        }
        out.push(')');
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sexpr())
    }
}
