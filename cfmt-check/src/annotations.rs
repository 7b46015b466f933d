//! Per-token state recorded during the AST walk.
//!
//! Every significant token carries an indentation level and a
//! line-begin flag, stamped as the walker visits it. rowan tokens are
//! leaves of an immutable, reference-counted green tree and carry no
//! user-data slot, so this crate tracks the same state out of band,
//! keyed by each token's starting byte offset (unique per token
//! instance within one parse). An `IndexMap`/`IndexSet` is used rather
//! than the hash-map equivalents so that iterating recorded annotations
//! (as the line pass and tests do) replays them in the order the walker
//! first visited them, mirroring the preference for `indexmap` wherever
//! insertion order is observable in `wdl-analysis`.

use cfmt_syntax::SyntaxToken;
use indexmap::IndexMap;
use indexmap::IndexSet;
use rowan::TextSize;

/// Records the indentation level and line-begin flag the walker stamps
/// onto significant tokens.
#[derive(Debug, Default)]
pub struct Annotations {
    indent_level: IndexMap<TextSize, u32>,
    line_begin: IndexSet<TextSize>,
}

impl Annotations {
    /// Creates an empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps `token` with the given indentation level. This runs for
    /// every significant token encountered during the walk, so a later
    /// stamp for the same token overwrites an earlier one.
    pub fn stamp_indent(&mut self, token: &SyntaxToken, level: u32) {
        self.indent_level.insert(token.text_range().start(), level);
    }

    /// Gets the indentation level stamped on `token`, or 0 if the walker
    /// never visited it.
    pub fn indent_level(&self, token: &SyntaxToken) -> u32 {
        self.indent_level
            .get(&token.text_range().start())
            .copied()
            .unwrap_or(0)
    }

    /// True if `token` was ever stamped (i.e. the walker visited it).
    pub fn was_visited(&self, token: &SyntaxToken) -> bool {
        self.indent_level.contains_key(&token.text_range().start())
    }

    /// Marks `token` as the first token of a non-continuation line,
    /// either because the `lbegin` primitive ran on it or because the
    /// line pass applied its preprocessor-directive override.
    pub fn mark_line_begin(&mut self, token: &SyntaxToken) {
        self.line_begin.insert(token.text_range().start());
    }

    /// True if `token` was marked as a line begin.
    pub fn is_line_begin(&self, token: &SyntaxToken) -> bool {
        self.line_begin.contains(&token.text_range().start())
    }
}

#[cfg(test)]
mod tests {
    use cfmt_syntax::parse;

    use super::*;

    #[test]
    fn stamps_and_reads_back_indent_level() {
        let parsed = parse("int x;\n");
        let token = parsed.syntax().first_token().unwrap();
        let mut annotations = Annotations::new();
        assert!(!annotations.was_visited(&token));
        annotations.stamp_indent(&token, 2);
        assert_eq!(annotations.indent_level(&token), 2);
        assert!(annotations.was_visited(&token));
    }

    #[test]
    fn line_begin_defaults_to_false() {
        let parsed = parse("int x;\n");
        let token = parsed.syntax().first_token().unwrap();
        let annotations = Annotations::new();
        assert!(!annotations.is_line_begin(&token));
    }
}
