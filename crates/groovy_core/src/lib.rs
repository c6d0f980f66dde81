//! groovy_core: Core utilities shared by the Groovy front end.
//!
//! Provides text spans, the line map used to translate positions for
//! diagnostics, and the character source the lexer reads from.

pub mod source;
pub mod text;

// Re-export commonly used types
pub use source::{CharSource, SourceMark};
pub use text::{LineAndColumn, LineMap, TextSpan};
