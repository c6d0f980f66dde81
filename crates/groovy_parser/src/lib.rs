//! groovy_parser: Recursive descent parser for Groovy.
//!
//! Turns source text into a [`groovy_ast::node::AstNode`] tree rooted at
//! `COMPILATION_UNIT`. Alternatives the next few tokens cannot decide are
//! settled by speculative trial parses over a rewindable token buffer.
//! Parsing stops at the first lexical or syntax error; style warnings are
//! collected and returned with the tree.

mod context;
mod declarations;
mod expressions;
mod parser;
mod precedence;
mod statements;
mod token_buffer;
mod types;
mod utilities;

pub use parser::{ParseOutput, Parser};

use groovy_diagnostics::GroovyError;
use groovy_options::ParserOptions;

/// Parse one compilation unit.
pub fn parse(source: &str, file_name: Option<&str>, options: &ParserOptions) -> Result<ParseOutput, GroovyError> {
    Parser::new(source, file_name, options).parse_compilation_unit()
}
