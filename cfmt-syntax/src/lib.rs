//! Lexing, concrete syntax tree, and diagnostics for the cfmt style checker.
//!
//! This crate turns C source text into a lossless concrete syntax tree (CST)
//! built on [`rowan`]: every byte of the input, including whitespace and
//! comments, is represented as a token somewhere in the tree, so the tree can
//! always be rendered back to exactly the source it was parsed from. Higher
//! layers (`cfmt-ast`, `cfmt-check`) build typed views and style rules on top
//! of this tree rather than reparsing or re-tokenizing.

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

mod diagnostic;
mod lexer;
mod parser;
mod syntax_kind;
mod tree;

pub use diagnostic::Diagnostic;
pub use diagnostic::Label;
pub use diagnostic::Severity;
pub use diagnostic::Span;
pub use lexer::Token;
pub use lexer::tokenize;
pub use parser::Parse;
pub use parser::Parser;
pub use syntax_kind::Lang;
pub use syntax_kind::SyntaxKind;
pub use tree::SyntaxElement;
pub use tree::SyntaxElementChildren;
pub use tree::SyntaxNode;
pub use tree::SyntaxToken;
pub use tree::SyntaxTokenExt;

/// Parses `source` as a complete C translation unit, returning the resulting
/// [`Parse`] (a lossless syntax tree plus any diagnostics raised along the
/// way). Parsing never fails outright: malformed input is represented by
/// `Error` nodes/tokens in the tree alongside diagnostics describing what
/// went wrong, so callers always get a tree to walk.
pub fn parse(source: &str) -> Parse {
    Parser::parse_module(source)
}
