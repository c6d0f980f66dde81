//! AST visitor trait for traversing the syntax tree.
//!
//! Provides an `AstVisitor` trait with enter/leave hooks, the `walk`
//! driver, and an `OutlinePrinter` that renders a tree as an indented
//! outline.

use crate::node::AstNode;
use crate::syntax_kind::SyntaxKind;
use std::fmt::Write;

/// A visitor over [`AstNode`] trees. Default implementations visit everything.
pub trait AstVisitor {
    /// Called before the children of `node`. Return `false` to skip them.
    fn enter(&mut self, _node: &AstNode, _depth: usize) -> bool {
        true
    }

    /// Called after the children of `node` (also when they were skipped).
    fn leave(&mut self, _node: &AstNode, _depth: usize) {}
}

/// Walk `node` depth-first, children in order.
pub fn walk<V: AstVisitor + ?Sized>(visitor: &mut V, node: &AstNode) {
    walk_at(visitor, node, 0);
}

fn walk_at<V: AstVisitor + ?Sized>(visitor: &mut V, node: &AstNode, depth: usize) {
    if visitor.enter(node, depth) {
        for child in &node.children {
            walk_at(visitor, child, depth + 1);
        }
    }
    visitor.leave(node, depth);
}

/// Renders a tree as one line per node, indented two spaces per level:
/// the tag, the token text when it differs from the tag, and the position.
#[derive(Debug, Default)]
pub struct OutlinePrinter {
    out: String,
}

impl OutlinePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(node: &AstNode) -> String {
        let mut printer = Self::new();
        walk(&mut printer, node);
        printer.out
    }
}

impl AstVisitor for OutlinePrinter {
    fn enter(&mut self, node: &AstNode, depth: usize) -> bool {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(node.kind.name());
        if node.text != node.kind.name() {
            let _ = write!(self.out, " {:?}", node.text);
        }
        let _ = writeln!(self.out, " @{}:{}", node.line, node.column);
        true
    }
}

/// Counts nodes per tag.
#[derive(Debug, Default)]
pub struct KindCounter {
    pub counts: Vec<(SyntaxKind, usize)>,
}

impl KindCounter {
    pub fn count(&self, kind: SyntaxKind) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, n)| *n)
    }
}

impl AstVisitor for KindCounter {
    fn enter(&mut self, node: &AstNode, _depth: usize) -> bool {
        match self.counts.iter_mut().find(|(k, _)| *k == node.kind) {
            Some((_, n)) => *n += 1,
            None => self.counts.push((node.kind, 1)),
        }
        true
    }
}
