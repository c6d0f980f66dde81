//! groovy_ast: Syntax tree definitions for the Groovy front end.
//!
//! Defines the shared token/node vocabulary ([`SyntaxKind`]), the homogeneous
//! [`AstNode`], the [`TreeBuilder`] grammar rules use to assemble nodes, and
//! tree visitors.

pub mod builder;
pub mod node;
pub mod syntax_kind;
pub mod visitor;

// Re-export key types
pub use builder::TreeBuilder;
pub use node::AstNode;
pub use syntax_kind::SyntaxKind;
pub use visitor::{walk, AstVisitor, OutlinePrinter};
