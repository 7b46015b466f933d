//! The concrete syntax tree (CST) representation.
//!
//! Built on [`rowan`], the tree is lossless: every byte of source, including
//! whitespace, comments, and preprocessor directives, is a token somewhere
//! in the tree. The tree is immutable once built; producing a fixed-up
//! source means building a fresh tree (or, as `cfmt-check` does, collecting
//! text edits and applying them to the original source) rather than
//! mutating tokens in place.

use crate::SyntaxKind;
use crate::syntax_kind::Lang;

/// A node in the cfmt syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<Lang>;
/// A token in the cfmt syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<Lang>;
/// A node or token in the cfmt syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<Lang>;
/// An iterator over a node's direct children (nodes and tokens).
pub type SyntaxElementChildren = rowan::SyntaxElementChildren<Lang>;

/// Extension methods on [`SyntaxToken`] used throughout the checker.
pub trait SyntaxTokenExt {
    /// Walks backward over purely horizontal whitespace (space, tab) to
    /// determine if this token is the first non-whitespace token of its
    /// logical line.
    ///
    /// Comments count as content (not whitespace) for this question, per
    /// spec.md section 4.1's `is_line_begin` contract.
    fn is_line_begin(&self) -> bool;
}

impl SyntaxTokenExt for SyntaxToken {
    fn is_line_begin(&self) -> bool {
        let mut cur = self.prev_token();
        loop {
            match cur {
                None => return true,
                Some(tok) if tok.kind() == SyntaxKind::Newline => return true,
                Some(tok) if tok.kind().is_horizontal_wspace() => {
                    cur = tok.prev_token();
                }
                Some(_) => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rowan::GreenNodeBuilder;

    use super::*;
    use crate::SyntaxKind::*;

    fn build_simple() -> SyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(Module.into());
        builder.token(IntKw.into(), "int");
        builder.token(Space.into(), " ");
        builder.token(Ident.into(), "x");
        builder.token(Semicolon.into(), ";");
        builder.finish_node();
        SyntaxNode::new_root(builder.finish())
    }

    #[test]
    fn is_line_begin_true_at_start_of_file() {
        let root = build_simple();
        let first = root.first_token().unwrap();
        assert!(first.is_line_begin());
    }

    #[test]
    fn is_line_begin_false_after_identifier_with_space() {
        let root = build_simple();
        let ident = root
            .first_token()
            .unwrap()
            .siblings_with_tokens(rowan::Direction::Next)
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == Ident)
            .unwrap();
        assert!(!ident.is_line_begin());
    }
}
