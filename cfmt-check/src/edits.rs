//! Fix-mode edits collected while walking, applied once to the original
//! source text.
//!
//! rowan's green tree is immutable — updating it means replacing nodes,
//! not mutating tokens in place — so instead of rewriting the token
//! buffer directly, every repair is recorded as a [`TokenEdit`]: a byte
//! range to replace with new text. The whole list is applied to the
//! source in a single left-to-right pass once the walk and line pass
//! have both finished.

use cfmt_syntax::SyntaxKind;
use cfmt_syntax::SyntaxToken;
use rowan::TextRange;
use rowan::TextSize;

/// A single replacement of a byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEdit {
    /// The byte range being replaced (empty for a pure insertion).
    pub range: TextRange,
    /// The text to put in its place (empty for a pure deletion).
    pub replacement: String,
}

/// Accumulates [`TokenEdit`]s and applies them to source text in one
/// pass.
#[derive(Debug, Default)]
pub struct EditBuilder {
    edits: Vec<TokenEdit>,
}

impl EditBuilder {
    /// Creates an empty edit builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a replacement of `range` with `replacement`.
    pub fn replace(&mut self, range: TextRange, replacement: impl Into<String>) {
        self.edits.push(TokenEdit {
            range,
            replacement: replacement.into(),
        });
    }

    /// Records a pure insertion of `text` at `offset`.
    pub fn insert(&mut self, offset: TextSize, text: impl Into<String>) {
        self.replace(TextRange::empty(offset), text);
    }

    /// Records a pure deletion of `range`.
    pub fn delete(&mut self, range: TextRange) {
        self.replace(range, String::new());
    }

    /// True if no edits have been recorded.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies every recorded edit to `source`, returning the resulting
    /// text.
    ///
    /// Edits are sorted by position and applied left to right. An edit
    /// whose range starts before the end of one already applied is
    /// dropped rather than double-applied — this is what keeps
    /// overlapping repairs (e.g. the AST walker and the line pass both
    /// touching a line's leading whitespace) idempotent-safe.
    pub fn apply(mut self, source: &str) -> String {
        self.edits.sort_by_key(|e| (e.range.start(), e.range.end()));
        self.edits
            .dedup_by_key(|e| (e.range.start(), e.range.end()));

        let mut result = String::with_capacity(source.len());
        let mut cursor = TextSize::from(0);
        for edit in &self.edits {
            if edit.range.start() < cursor {
                continue;
            }
            result.push_str(&source[usize::from(cursor)..usize::from(edit.range.start())]);
            result.push_str(&edit.replacement);
            cursor = edit.range.end();
        }
        result.push_str(&source[usize::from(cursor)..]);
        result
    }
}

/// Finds the contiguous run of whitespace-kind tokens immediately
/// preceding `target`, if any.
pub fn ws_run_before(target: &SyntaxToken) -> Option<TextRange> {
    let mut start = target.text_range().start();
    let mut cursor = target.prev_token();
    let mut found = false;
    while let Some(tok) = cursor {
        if tok.kind().is_wspace() {
            start = tok.text_range().start();
            cursor = tok.prev_token();
            found = true;
        } else {
            break;
        }
    }
    found.then(|| TextRange::new(start, target.text_range().start()))
}

/// Finds the contiguous run of whitespace-kind tokens immediately
/// following `target`, if any.
pub fn ws_run_after(target: &SyntaxToken) -> Option<TextRange> {
    let mut end = target.text_range().end();
    let mut cursor = target.next_token();
    let mut found = false;
    while let Some(tok) = cursor {
        if tok.kind().is_wspace() {
            end = tok.text_range().end();
            cursor = tok.next_token();
            found = true;
        } else {
            break;
        }
    }
    found.then(|| TextRange::new(target.text_range().end(), end))
}

/// True if any token within the whitespace run following `target` is a
/// newline.
pub fn ws_run_after_has_newline(target: &SyntaxToken) -> bool {
    let mut cursor = target.next_token();
    while let Some(tok) = cursor {
        if tok.kind() == SyntaxKind::Newline {
            return true;
        }
        if !tok.kind().is_wspace() {
            break;
        }
        cursor = tok.next_token();
    }
    false
}

#[cfg(test)]
mod tests {
    use rowan::TextSize;

    use super::*;

    #[test]
    fn apply_handles_disjoint_edits_in_any_order() {
        let mut edits = EditBuilder::new();
        edits.insert(TextSize::from(5), "X");
        edits.delete(TextRange::new(TextSize::from(0), TextSize::from(2)));
        let result = edits.apply("ab cde");
        assert_eq!(result, " cdXe");
    }

    #[test]
    fn apply_drops_overlapping_duplicate_edit() {
        let mut edits = EditBuilder::new();
        let range = TextRange::new(TextSize::from(0), TextSize::from(2));
        edits.replace(range, "Z");
        edits.replace(range, "Z");
        let result = edits.apply("abcd");
        assert_eq!(result, "Zcd");
    }
}
