//! Per-recursion-level checking state.

/// State threaded through the AST walker as it descends: the
/// indentation level new tokens should be stamped with, and whether the
/// walker is operating in fix mode or report mode.
///
/// A scope is created by the walker upon entering a nested
/// block/record/enum body and destroyed on exit; scopes conceptually
/// form a stack, which in Rust is simply the walker's own call stack,
/// each recursive call holding its own `Scope` by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    /// The number of tabs that should precede a token starting a line at
    /// this nesting depth.
    pub indent_level: u32,
    /// True if violations should be repaired in place; false if they
    /// should only be reported.
    pub fix: bool,
}

impl Scope {
    /// Creates the top-level scope for a module: indent level 0.
    pub fn top(fix: bool) -> Self {
        Self {
            indent_level: 0,
            fix,
        }
    }

    /// The scope for a nested brace/record/enum body: one indentation
    /// level deeper than `self`.
    pub fn nested(self) -> Self {
        Self {
            indent_level: self.indent_level + 1,
            ..self
        }
    }

    /// The scope used for the single token of a case or goto label, one
    /// level shallower than `self`: case and goto labels are indented
    /// one tab less than the statements that follow them, then
    /// indentation restores to `self` for the rest of the line.
    pub fn outdented(self) -> Self {
        Self {
            indent_level: self.indent_level.saturating_sub(1),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_increments_and_outdented_decrements() {
        let top = Scope::top(true);
        assert_eq!(top.indent_level, 0);
        assert!(top.fix);

        let inner = top.nested();
        assert_eq!(inner.indent_level, 1);
        assert_eq!(inner.outdented().indent_level, 0);
    }

    #[test]
    fn outdented_saturates_at_zero() {
        let top = Scope::top(false);
        assert_eq!(top.outdented().indent_level, 0);
    }
}
