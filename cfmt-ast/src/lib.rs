//! A typed abstract syntax tree facade over `cfmt-syntax`'s concrete syntax
//! tree.
//!
//! Every node in this crate is a thin newtype wrapping a [`SyntaxNode`] (or,
//! for leaf tokens, a [`SyntaxToken`]); casting between the untyped CST and
//! a typed node is free, and every typed node can be cloned cheaply since
//! rowan's green tree is reference-counted.
//!
//! `first_token`/`last_token` for any node are supplied directly by rowan's
//! [`SyntaxNode::first_token`]/[`SyntaxNode::last_token`], since a rowan
//! node's own token range already spans exactly its children — unlike the
//! hand-written recursive first/last-token functions a non-lossless AST
//! would need.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

mod decl;
mod declarator;
mod expr;
mod stmt;
mod types;

pub use decl::*;
pub use declarator::*;
pub use expr::*;
pub use stmt::*;
pub use types::*;

pub use cfmt_syntax::Diagnostic;
pub use cfmt_syntax::Label;
pub use cfmt_syntax::Severity;
pub use cfmt_syntax::Span;
pub use cfmt_syntax::SyntaxElement;
pub use cfmt_syntax::SyntaxKind;
pub use cfmt_syntax::SyntaxNode;
pub use cfmt_syntax::SyntaxToken;
pub use cfmt_syntax::SyntaxTokenExt;
pub use rowan::Direction;
pub use rowan::ast::AstChildren;
pub use rowan::ast::AstNode;
pub use rowan::ast::support;

use cfmt_syntax::Lang;

/// Parses `source`, returning the root [`Module`] node and any diagnostics
/// raised while parsing.
pub fn parse(source: &str) -> (Module, Vec<Diagnostic>) {
    let parse = cfmt_syntax::parse(source);
    let module = Module::cast(parse.syntax()).expect("root node should be a module");
    (module, parse.diagnostics)
}

/// The trait implemented by every typed token wrapper (keywords,
/// punctuators, identifiers, and literals held directly in an AST
/// node).
///
/// Modeled directly on rust-analyzer's `AstToken` trait, the same design
/// `wdl-ast` uses for its own token wrappers.
pub trait AstToken {
    /// Determines if a token of the given kind can be cast to this type.
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    /// Casts a [`SyntaxToken`] to this type, if possible.
    fn cast(syntax: SyntaxToken) -> Option<Self>
    where
        Self: Sized;

    /// Gets the underlying [`SyntaxToken`].
    fn syntax(&self) -> &SyntaxToken;

    /// Gets the exact source text of the token.
    fn text(&self) -> &str {
        self.syntax().text()
    }
}

/// Finds the first child token of `parent` that casts to `T`.
pub fn token<T: AstToken>(parent: &SyntaxNode) -> Option<T> {
    parent
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find_map(T::cast)
}

/// Finds every child token of `parent` that casts to `T`, in source order.
pub fn tokens<T: AstToken>(parent: &SyntaxNode) -> impl Iterator<Item = T> + use<T> {
    parent
        .children_with_tokens()
        .filter_map(|c| c.into_token())
        .filter_map(T::cast)
}

/// A macro that implements [`AstToken`] for a newtype wrapping a single
/// [`SyntaxKind`] punctuator or keyword token.
macro_rules! ast_token {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxToken);

        impl AstToken for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(syntax: SyntaxToken) -> Option<Self> {
                if Self::can_cast(syntax.kind()) {
                    Some(Self(syntax))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxToken {
                &self.0
            }
        }
    };
}
pub(crate) use ast_token;

ast_token!(
    /// An identifier token.
    Ident => Ident
);
ast_token!(
    /// An integer literal token.
    IntLiteral => IntLiteral
);
ast_token!(
    /// A character literal token.
    CharLiteral => CharLiteral
);
ast_token!(
    /// A string literal token.
    StringLiteral => StringLiteral
);

/// A macro that implements [`AstNode`] for a newtype wrapping a single
/// [`SyntaxKind`] node kind with no further accessors generated.
///
/// Accessors specific to a node (children, token fields) are added in a
/// separate `impl` block alongside each invocation.
macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            type Language = Lang;

            fn can_cast(kind: SyntaxKind) -> bool
            where
                Self: Sized,
            {
                kind == SyntaxKind::$kind
            }

            fn cast(syntax: SyntaxNode) -> Option<Self>
            where
                Self: Sized,
            {
                if Self::can_cast(syntax.kind()) {
                    Some(Self(syntax))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}
pub(crate) use ast_node;

/// Implements [`AstNode`] for an enum that casts to one of several node
/// kinds, dispatching `can_cast`/`cast`/`syntax` across the variants.
///
/// Modeled on the same "union node" pattern `wdl-ast` uses for its
/// `Expr`/`Statement`-style enums.
macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident => { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[allow(missing_docs)]
                $variant($ty)
            ),+
        }

        impl AstNode for $name {
            type Language = Lang;

            fn can_cast(kind: SyntaxKind) -> bool
            where
                Self: Sized,
            {
                $(<$ty as AstNode>::can_cast(kind))||+
            }

            fn cast(syntax: SyntaxNode) -> Option<Self>
            where
                Self: Sized,
            {
                $(
                    if let Some(node) = <$ty as AstNode>::cast(syntax.clone()) {
                        return Some(Self::$variant(node));
                    }
                )+
                None
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(node) => node.syntax()),+
                }
            }
        }
    };
}
pub(crate) use ast_enum;

/// Returns the first token belonging to `node`.
///
/// A thin re-export of rowan's own traversal: kept as a named helper so
/// call sites read as `first_token(n)`/`last_token(n)`.
pub fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.first_token()
}

/// Returns the last token belonging to `node`. See [`first_token`].
pub fn last_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.last_token()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_module() {
        let (module, diagnostics) = parse("int main(void)\n{\n\treturn 0;\n}\n");
        assert!(diagnostics.is_empty());
        assert_eq!(module.items().count(), 1);
    }
}
