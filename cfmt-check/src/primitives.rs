//! The seven whitespace-adjacency primitives every rule is built from.
//!
//! Every primitive starts by stamping the target token's indentation
//! level, then either records a violation diagnostic (report mode) or
//! queues a repair (fix mode), never both. The signature mirrors
//! `wdl-lint`'s rule methods, `(diagnostics, token)`, generalized with
//! the `fix` flag carried on [`Scope`].

use cfmt_syntax::Diagnostic;
use cfmt_syntax::SyntaxKind;
use cfmt_syntax::SyntaxToken;
use cfmt_syntax::SyntaxTokenExt;

use crate::annotations::Annotations;
use crate::edits;
use crate::edits::EditBuilder;
use crate::scope::Scope;

/// Mutable context threaded through every primitive call: the fix-mode
/// edit accumulator, the report-mode diagnostic sink, and the per-token
/// annotation state the line pass reads afterward.
#[derive(Debug, Default)]
pub struct Checker {
    /// Collected fix-mode edits.
    pub edits: EditBuilder,
    /// Collected report-mode diagnostics, in the order primitives ran
    /// (source order).
    pub diagnostics: Vec<Diagnostic>,
    /// Per-token indent-level/line-begin state.
    pub annotations: Annotations,
}

impl Checker {
    /// Creates an empty checker context.
    pub fn new() -> Self {
        Self::default()
    }

    fn report(&mut self, message: impl Into<String>, token: &SyntaxToken) {
        self.diagnostics
            .push(Diagnostic::warning(message).with_highlight(token.text_range()));
    }
}

fn stamp(checker: &mut Checker, scope: &Scope, target: &SyntaxToken) {
    checker.annotations.stamp_indent(target, scope.indent_level);
}

/// `any`: stamps the token; never reports or fixes anything.
pub fn any(checker: &mut Checker, scope: &Scope, target: &SyntaxToken) {
    stamp(checker, scope, target);
}

/// `lbegin(msg)`: `target` must be the first non-whitespace token of its
/// line.
pub fn lbegin(checker: &mut Checker, scope: &Scope, target: &SyntaxToken, msg: &str) {
    stamp(checker, scope, target);
    checker.annotations.mark_line_begin(target);

    if target.is_line_begin() {
        return;
    }

    if scope.fix {
        if let Some(range) = edits::ws_run_before(target) {
            checker.edits.delete(range);
        }
        let mut text = String::from("\n");
        text.push_str(&"\t".repeat(scope.indent_level as usize));
        checker.edits.insert(target.text_range().start(), text);
    } else {
        checker.report(msg, target);
    }
}

/// `nows_before(msg)`: no whitespace may precede `target`.
pub fn nows_before(checker: &mut Checker, scope: &Scope, target: &SyntaxToken, msg: &str) {
    stamp(checker, scope, target);
    let violates = target
        .prev_token()
        .is_some_and(|p| p.kind().is_wspace());
    if !violates {
        return;
    }
    if scope.fix {
        if let Some(range) = edits::ws_run_before(target) {
            checker.edits.delete(range);
        }
    } else {
        checker.report(msg, target);
    }
}

/// `nows_after(msg)`: no whitespace may follow `target`.
pub fn nows_after(checker: &mut Checker, scope: &Scope, target: &SyntaxToken, msg: &str) {
    stamp(checker, scope, target);
    let violates = target
        .next_token()
        .is_some_and(|n| n.kind().is_wspace());
    if !violates {
        return;
    }
    if scope.fix {
        if let Some(range) = edits::ws_run_after(target) {
            checker.edits.delete(range);
        }
    } else {
        checker.report(msg, target);
    }
}

/// `nsbrk_after(msg)`: no non-newline whitespace may immediately follow
/// `target` (a single line break is allowed).
pub fn nsbrk_after(checker: &mut Checker, scope: &Scope, target: &SyntaxToken, msg: &str) {
    stamp(checker, scope, target);
    let violates = target
        .next_token()
        .is_some_and(|n| n.kind().is_wspace() && n.kind() != SyntaxKind::Newline);
    if !violates {
        return;
    }
    if scope.fix {
        if let Some(range) = edits::ws_run_after(target) {
            if edits::ws_run_after_has_newline(target) {
                checker.edits.replace(range, "\n");
            } else {
                checker.edits.delete(range);
            }
        }
    } else {
        checker.report(msg, target);
    }
}

/// `brkspace_before(msg)`: `target` must have some whitespace (possibly
/// a line break) before it.
pub fn brkspace_before(checker: &mut Checker, scope: &Scope, target: &SyntaxToken, msg: &str) {
    stamp(checker, scope, target);
    let violates = !target
        .prev_token()
        .is_some_and(|p| p.kind().is_wspace());
    if !violates {
        return;
    }
    if scope.fix {
        checker.edits.insert(target.text_range().start(), " ");
    } else {
        checker.report(msg, target);
    }
}

/// `brkspace_after(msg)`: `target` must have some whitespace (possibly a
/// line break) after it.
pub fn brkspace_after(checker: &mut Checker, scope: &Scope, target: &SyntaxToken, msg: &str) {
    stamp(checker, scope, target);
    let violates = !target
        .next_token()
        .is_some_and(|n| n.kind().is_wspace());
    if !violates {
        return;
    }
    if scope.fix {
        checker.edits.insert(target.text_range().end(), " ");
    } else {
        checker.report(msg, target);
    }
}

/// `nbspace_before(msg)`: `target` must have exactly a single space
/// before it, on the same line as whatever precedes it.
pub fn nbspace_before(checker: &mut Checker, scope: &Scope, target: &SyntaxToken, msg: &str) {
    stamp(checker, scope, target);
    let violates = !target
        .prev_token()
        .is_some_and(|p| p.kind().is_wspace())
        || target.is_line_begin();
    if !violates {
        return;
    }
    if scope.fix {
        if let Some(range) = edits::ws_run_before(target) {
            checker.edits.delete(range);
        }
        checker.edits.insert(target.text_range().start(), " ");
    } else {
        checker.report(msg, target);
    }
}

#[cfg(test)]
mod tests {
    use cfmt_syntax::parse;

    use super::*;

    fn tokens(source: &str) -> Vec<SyntaxToken> {
        let parsed = parse(source);
        parsed.syntax().descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .collect()
    }

    fn find(tokens: &[SyntaxToken], text: &str) -> SyntaxToken {
        tokens
            .iter()
            .find(|t| t.text() == text)
            .unwrap_or_else(|| panic!("no token with text {text:?}"))
            .clone()
    }

    #[test]
    fn nows_before_reports_in_report_mode() {
        let toks = tokens("int x ;\n");
        let semi = find(&toks, ";");
        let mut checker = Checker::new();
        let scope = Scope::top(false);
        nows_before(&mut checker, &scope, &semi, "no space before ';'");
        assert_eq!(checker.diagnostics.len(), 1);
        assert!(checker.edits.is_empty());
    }

    #[test]
    fn nows_before_fixes_in_fix_mode() {
        let source = "int x ;\n";
        let toks = tokens(source);
        let semi = find(&toks, ";");
        let mut checker = Checker::new();
        let scope = Scope::top(true);
        nows_before(&mut checker, &scope, &semi, "no space before ';'");
        assert!(checker.diagnostics.is_empty());
        let fixed = checker.edits.apply(source);
        assert_eq!(fixed, "int x;\n");
    }

    #[test]
    fn brkspace_before_inserts_missing_space() {
        let source = "1+2";
        let toks = tokens(source);
        let plus = find(&toks, "+");
        let mut checker = Checker::new();
        let scope = Scope::top(true);
        brkspace_before(&mut checker, &scope, &plus, "space expected before '+'");
        brkspace_after(&mut checker, &scope, &plus, "space expected after '+'");
        let fixed = checker.edits.apply(source);
        assert_eq!(fixed, "1 + 2");
    }

    #[test]
    fn lbegin_moves_token_to_its_own_line() {
        let source = "int main(void)\n{ return 0;\n}\n";
        let toks = tokens(source);
        let ret = find(&toks, "return");
        let mut checker = Checker::new();
        let scope = Scope::top(true).nested();
        lbegin(&mut checker, &scope, &ret, "return must begin its line");
        let fixed = checker.edits.apply(source);
        assert_eq!(fixed, "int main(void)\n{\n\treturn 0;\n}\n");
    }

    #[test]
    fn any_never_reports() {
        let toks = tokens("int x;\n");
        let token = toks.into_iter().find(|t| t.text() == "int").unwrap();
        let mut checker = Checker::new();
        let scope = Scope::top(false);
        any(&mut checker, &scope, &token);
        assert!(checker.diagnostics.is_empty());
        assert_eq!(checker.annotations.indent_level(&token), 0);
    }
}
