//! Parser infrastructure for building a rowan syntax tree from a token
//! stream.
//!
//! The parser is a hand-written recursive-descent parser with a
//! checkpoint-based marker API (inspired by rust-analyzer and similar
//! rowan-based parsers). Grammar rules live in the sibling `decl`, `stmt`,
//! and `expr` modules; this module provides only the shared plumbing.

mod decl;
mod expr;
mod stmt;

use std::collections::HashSet;

use rowan::Checkpoint;
use rowan::GreenNode;
use rowan::GreenNodeBuilder;

use crate::SyntaxKind;
use crate::SyntaxKind::*;
use crate::SyntaxNode;
use crate::diagnostic::Diagnostic;
use crate::diagnostic::Span;
use crate::lexer::Token;
use crate::lexer::tokenize;

/// The result of parsing a module.
pub struct Parse {
    green: GreenNode,
    /// Diagnostics raised while parsing.
    pub diagnostics: Vec<Diagnostic>,
}

impl Parse {
    /// Gets the root syntax node of the parsed tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}

/// A marker for a node currently being built.
///
/// Call [`Marker::complete`] to finish the node with a specific kind.
/// Dropping a marker without completing it is a bug and panics in debug
/// builds, matching the "forgotten marker" bomb used by rowan-based parsers
/// elsewhere in the corpus.
#[must_use]
pub struct Marker {
    checkpoint: Checkpoint,
    #[cfg(debug_assertions)]
    completed: bool,
}

impl Marker {
    fn new(checkpoint: Checkpoint) -> Self {
        Self {
            checkpoint,
            #[cfg(debug_assertions)]
            completed: false,
        }
    }

    /// Finishes the node, wrapping everything produced since the marker was
    /// created in a new node of the given kind.
    #[allow(unused_mut)]
    pub fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) {
        #[cfg(debug_assertions)]
        {
            self.completed = true;
        }
        p.builder.start_node_at(self.checkpoint, kind.into());
        p.builder.finish_node();
    }
}

#[cfg(debug_assertions)]
impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("marker was dropped without being completed");
        }
    }
}

/// The parser itself: drives the token stream into a rowan tree.
pub struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Vec<Diagnostic>,
    /// Identifiers introduced by a `typedef` seen so far. Used to
    /// disambiguate an identifier in specifier position as a type name vs.
    /// an ordinary identifier, since that distinction cannot be made purely
    /// syntactically in a C-family grammar.
    typedef_names: HashSet<String>,
    /// The identifier named by the most recently parsed declarator, if any.
    /// Stashed here because `parse_declarator` has no return value; the
    /// caller (`decl::parse_item`) consumes it immediately after parsing
    /// each declarator in a `typedef`.
    last_declarator_ident: Option<String>,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            tokens: tokenize(source),
            pos: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Vec::new(),
            typedef_names: HashSet::new(),
            last_declarator_ident: None,
        }
    }

    /// Parses a complete module (translation unit) from `source`.
    pub fn parse_module(source: &str) -> Parse {
        let mut parser = Parser::new(source);
        parser.builder.start_node(Module.into());
        decl::parse_module_items(&mut parser);
        parser.flush_trivia();
        parser.bump_raw(Eof);
        parser.builder.finish_node();

        Parse {
            green: parser.builder.finish(),
            diagnostics: parser.diagnostics,
        }
    }

    /// Opens a new marker at the current position.
    fn start(&mut self) -> Marker {
        self.flush_trivia();
        Marker::new(self.builder.checkpoint())
    }

    /// Takes a raw checkpoint at the current position, flushing pending
    /// trivia first. Unlike [`Marker`], a checkpoint can be wrapped zero or
    /// more times via [`Parser::wrap_from`]; used by the expression parser's
    /// precedence-climbing loop, where a binary chain wraps its left operand
    /// repeatedly (once per operator) rather than exactly once.
    fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Wraps everything produced since `checkpoint` in a new node of the
    /// given kind. See [`Parser::checkpoint`].
    fn wrap_from(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
        self.builder.finish_node();
    }

    /// The kind of the `n`th significant (non-trivia) token from the
    /// current position, or [`SyntaxKind::Eof`] past the end.
    fn nth(&self, n: usize) -> SyntaxKind {
        self.significant_indices()
            .nth(n)
            .map(|i| self.tokens[i].kind)
            .unwrap_or(Eof)
    }

    /// The text of the `n`th significant token.
    fn nth_text(&self, n: usize) -> &'src str {
        self.significant_indices()
            .nth(n)
            .map(|i| self.tokens[i].text)
            .unwrap_or("")
    }

    fn significant_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (self.pos..self.tokens.len()).filter(|&i| !self.tokens[i].kind.is_wspace())
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.nth(0) == kind
    }

    /// True if the current significant token is an identifier previously
    /// declared via `typedef`.
    fn at_typedef_name(&self) -> bool {
        self.at(Ident) && self.typedef_names.contains(self.nth_text(0))
    }

    fn current_span(&self) -> Span {
        let idx = self.significant_indices().next().unwrap_or(self.pos);
        let token = &self.tokens[idx.min(self.tokens.len() - 1)];
        Span::new(token.start as usize, token.text.len())
    }

    /// Pushes every pending trivia token (whitespace, comments, preprocessor
    /// directives) preceding the current position into the tree. Called
    /// before starting or bumping any significant token so that trivia
    /// always lands between the significant tokens it actually separates.
    fn flush_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_wspace() {
            let tok = self.tokens[self.pos];
            self.builder.token(tok.kind.into(), tok.text);
            self.pos += 1;
        }
    }

    /// Bumps the current significant token verbatim.
    fn bump(&mut self) {
        self.flush_trivia();
        let kind = self.nth(0);
        self.bump_raw(kind);
    }

    fn bump_raw(&mut self, expected: SyntaxKind) {
        if self.pos >= self.tokens.len() {
            return;
        }
        let tok = self.tokens[self.pos];
        debug_assert_eq!(tok.kind, expected, "bumping unexpected token kind");
        self.builder.token(tok.kind.into(), tok.text);
        self.pos += 1;
    }

    /// Bumps the current token if it matches `kind`, returning whether it
    /// did.
    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Bumps the current token if it matches `kind`; otherwise records a
    /// parse diagnostic and wraps a single erroneous token (if any) in an
    /// `Error` node. The parser never aborts on a single malformed
    /// construct.
    fn expect(&mut self, kind: SyntaxKind, what: &str) {
        if !self.eat(kind) {
            let span = self.current_span();
            self.diagnostics.push(
                Diagnostic::error(format!("expected {what}")).with_label("here", span),
            );
            if !self.at(kind) && !self.at_recovery() {
                self.flush_trivia();
                self.builder.start_node(Error.into());
                if self.pos < self.tokens.len() && self.nth(0) != Eof {
                    self.bump();
                }
                self.builder.finish_node();
            }
        }
    }

    fn at_recovery(&self) -> bool {
        matches!(self.nth(0), Semicolon | RBrace | Eof)
    }

    fn error(&mut self, message: impl Into<String>) {
        let span = self.current_span();
        self.diagnostics
            .push(Diagnostic::error(message).with_label("here", span));
    }
}
