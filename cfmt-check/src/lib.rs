//! Whitespace-constraint checking and fixing for `cfmt`.
//!
//! This crate turns a parsed [`cfmt_ast::Module`] into either a list of
//! style violations or a repaired copy of the source text. It is split
//! into the following pieces:
//!
//! - [`scope`]: the indentation-level/fix-mode state threaded through
//!   the walk.
//! - [`annotations`]: out-of-band per-token state (indentation level,
//!   line-begin flag) the walker stamps and the line pass reads back.
//! - [`primitives`]: the seven whitespace-adjacency primitives every
//!   rule in [`walk`] is built from.
//! - [`edits`]: the fix-mode edit list and its idempotent application
//!   to source text.
//! - [`walk`]: one rule per AST node kind, descending the tree.
//! - [`line`]: the line-oriented pass (indentation character
//!   accounting, trailing whitespace, line length).

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod annotations;
pub mod edits;
pub mod line;
pub mod primitives;
pub mod scope;
pub mod walk;

use cfmt_ast::AstNode;
use cfmt_syntax::Diagnostic;
use tracing::debug;

pub use primitives::Checker;
pub use scope::Scope;

/// The outcome of checking (or fixing) one source file.
#[derive(Debug)]
pub struct CheckResult {
    /// Every diagnostic raised while parsing, walking, and running the
    /// line pass, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// The repaired source text, present only when `fix` was requested.
    pub fixed: Option<String>,
}

impl CheckResult {
    /// True if no diagnostics were raised.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parses `source`, walks its AST, and runs the line pass.
///
/// In report mode (`fix == false`) every violation becomes a
/// diagnostic and [`CheckResult::fixed`] is `None`. In fix mode every
/// violation is instead queued as an edit and applied once to
/// `source`, producing the repaired text.
pub fn check(source: &str, fix: bool) -> CheckResult {
    let (module, mut diagnostics) = cfmt_ast::parse(source);
    debug!(parse_errors = diagnostics.len(), "parsed module");

    let mut checker = Checker::new();
    walk::check_module(&module, &mut checker, fix);
    line::check_lines(&mut checker, module.syntax(), fix);

    let fixed = fix.then(|| checker.edits.apply(source));
    diagnostics.extend(checker.diagnostics);
    debug!(
        violations = diagnostics.len(),
        fix, "check complete"
    );

    CheckResult { diagnostics, fixed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_source_reports_nothing() {
        let result = check("int main(void)\n{\n\treturn 0;\n}\n", false);
        assert!(result.is_clean());
        assert!(result.fixed.is_none());
    }

    #[test]
    fn fix_mode_repairs_and_reports_nothing() {
        let source = "int main(void)\n{\n    return 0;\n}\n";
        let result = check(source, true);
        assert_eq!(
            result.fixed.as_deref(),
            Some("int main(void)\n{\n\treturn 0;\n}\n")
        );
    }

    #[test]
    fn report_mode_finds_the_same_violations_fix_mode_repairs() {
        let source = "int main(void)\n{\n    return 0;\n}\n";
        let reported = check(source, false);
        assert!(!reported.is_clean());

        let fixed = check(source, true).fixed.expect("fix mode produces text");
        let reconciled = check(&fixed, false);
        assert!(reconciled.is_clean(), "{:#?}", reconciled.diagnostics);
    }
}
