//! Incremental tree construction for grammar rules.
//!
//! A [`TreeBuilder`] accumulates the subtrees one rule produces. Subtrees are
//! attached as they are parsed; an operator can then be promoted to the root
//! of everything accumulated so far, which is how left-associative operator
//! chains fold up without the rule knowing its final shape in advance.

use crate::node::AstNode;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: Option<AstNode>,
    children: Vec<AstNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing subtree.
    pub fn from_node(node: AstNode) -> Self {
        let mut builder = Self::new();
        builder.add(node);
        builder
    }

    /// Attach a finished subtree. It becomes a child of the current root,
    /// or a top-level sibling while there is no root.
    pub fn add(&mut self, node: AstNode) {
        self.children.push(node);
    }

    /// Make `node` the parent of everything accumulated so far.
    pub fn make_root(&mut self, mut node: AstNode) {
        node.children.extend(self.take_trees());
        self.root = Some(node);
    }

    /// Retag the current root. Does nothing without a root.
    pub fn retag(&mut self, kind: SyntaxKind) {
        if let Some(root) = self.root.as_mut() {
            root.retag(kind);
        }
    }

    pub fn root_kind(&self) -> Option<SyntaxKind> {
        self.root.as_ref().map(|r| r.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.children.is_empty()
    }

    /// The accumulated top-level trees, leaving the builder empty.
    fn take_trees(&mut self) -> Vec<AstNode> {
        let children = std::mem::take(&mut self.children);
        match self.root.take() {
            Some(mut root) => {
                root.children.extend(children);
                vec![root]
            }
            None => children,
        }
    }

    /// The finished tree: the root, or the single accumulated subtree.
    /// Returns `None` when nothing was built or several siblings remain.
    pub fn finish(mut self) -> Option<AstNode> {
        let mut trees = self.take_trees();
        if trees.len() == 1 {
            trees.pop()
        } else {
            None
        }
    }

    /// Wrap everything accumulated in a synthetic node.
    pub fn wrap(mut self, kind: SyntaxKind, line: u32, column: u32) -> AstNode {
        AstNode::wrap(kind, self.take_trees(), line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> AstNode {
        AstNode::leaf(SyntaxKind::NumInt, text, 1, 1)
    }

    #[test]
    fn test_make_root_folds_left() {
        let mut builder = TreeBuilder::from_node(num("1"));
        builder.make_root(AstNode::leaf(SyntaxKind::Minus, "-", 1, 3));
        builder.add(num("2"));
        builder.make_root(AstNode::leaf(SyntaxKind::Minus, "-", 1, 7));
        builder.add(num("3"));
        let tree = builder.finish().unwrap();
        assert_eq!(tree.to_sexpr(), "(MINUS (MINUS 1 2) 3)");
    }

    #[test]
    fn test_wrap_collects_siblings() {
        let mut builder = TreeBuilder::new();
        builder.add(num("1"));
        builder.add(num("2"));
        let elist = builder.wrap(SyntaxKind::Elist, 1, 1);
        assert_eq!(elist.to_sexpr(), "(ELIST 1 2)");
    }

    #[test]
    fn test_retag_root() {
        let mut builder = TreeBuilder::new();
        builder.make_root(AstNode::leaf(SyntaxKind::LCurly, "{", 1, 1));
        builder.add(num("1"));
        builder.retag(SyntaxKind::Slist);
        assert_eq!(builder.root_kind(), Some(SyntaxKind::Slist));
        assert_eq!(builder.finish().unwrap().to_sexpr(), "(SLIST 1)");
    }

    #[test]
    fn test_finish_rejects_loose_siblings() {
        let mut builder = TreeBuilder::new();
        assert!(builder.is_empty());
        builder.add(num("1"));
        builder.add(num("2"));
        assert!(builder.finish().is_none());
    }
}
