//! Statements.

use rowan::NodeOrToken;
use rowan::ast::support;

use crate::Ident;
use crate::ast_enum;
use crate::ast_node;
use crate::decl::GlobalDecl;
use crate::expr::Expr;
use crate::{AstNode, AstToken, SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(
    /// A `{ ... }` block, a sequence of statements (and, per the grammar,
    /// local declarations interleaved freely with them).
    Block => Block
);

impl Block {
    /// The opening `{`.
    pub fn lbrace(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::LBrace)
    }

    /// The block's statements, in source order. A local declaration is a
    /// [`Stmt::Decl`], not a bare [`GlobalDecl`].
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.syntax().children().filter_map(Stmt::cast)
    }

    /// The closing `}`.
    pub fn rbrace(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RBrace)
    }
}

ast_node!(
    /// A `return` statement, with an optional value.
    ReturnStmt => ReturnStmt
);

impl ReturnStmt {
    /// The returned value, absent for a bare `return;`.
    pub fn value(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }
}

ast_node!(
    /// A `break;` statement.
    BreakStmt => BreakStmt
);

ast_node!(
    /// A `continue;` statement.
    ContinueStmt => ContinueStmt
);

ast_node!(
    /// A `goto label;` statement.
    GotoStmt => GotoStmt
);

impl GotoStmt {
    /// The target label name.
    pub fn label(&self) -> Ident {
        crate::token(self.syntax()).expect("goto statement must name a label")
    }
}

ast_node!(
    /// A `label:` goto target.
    GotoLabel => GotoLabel
);

impl GotoLabel {
    /// The label's name.
    pub fn name(&self) -> Ident {
        crate::token(self.syntax()).expect("goto label must have a name")
    }

    /// The `:` token.
    pub fn colon(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Colon)
    }
}

ast_node!(
    /// An `if` statement, with an optional `else` branch.
    IfStmt => IfStmt
);

impl IfStmt {
    /// The condition expression.
    pub fn condition(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("if statement must have a condition")
    }

    /// The statement (or block) executed when the condition is true.
    pub fn then_branch(&self) -> Stmt {
        self.syntax()
            .children()
            .filter_map(Stmt::cast)
            .next()
            .expect("if statement must have a then-branch")
    }

    /// The `else` keyword, if present.
    pub fn else_kw(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::ElseKw)
    }

    /// The statement (or block) executed when the condition is false.
    pub fn else_branch(&self) -> Option<Stmt> {
        self.syntax().children().filter_map(Stmt::cast).nth(1)
    }
}

ast_node!(
    /// A `while` loop.
    WhileStmt => WhileStmt
);

impl WhileStmt {
    /// The loop condition.
    pub fn condition(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("while statement must have a condition")
    }

    /// The loop body.
    pub fn body(&self) -> Stmt {
        self.syntax()
            .children()
            .find_map(Stmt::cast)
            .expect("while statement must have a body")
    }
}

ast_node!(
    /// A `do { ... } while (...);` loop.
    DoWhileStmt => DoWhileStmt
);

impl DoWhileStmt {
    /// The loop body.
    pub fn body(&self) -> Stmt {
        self.syntax()
            .children()
            .find_map(Stmt::cast)
            .expect("do-while statement must have a body")
    }

    /// The loop condition.
    pub fn condition(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("do-while statement must have a condition")
    }
}

ast_node!(
    /// A C-style `for (init; cond; step) body` loop.
    ///
    /// The init, condition, and step clauses are each optional and, save
    /// for a declaration init, are bare expressions with no wrapping
    /// node, so accessors locate them positionally relative to the two
    /// separating `;` tokens.
    ForStmt => ForStmt
);

impl ForStmt {
    /// The loop's initializer, if it is a declaration (`for (int i = 0; ...)`).
    pub fn init_decl(&self) -> Option<GlobalDecl> {
        support::child(self.syntax())
    }

    /// The loop's initializer, if it is a bare expression.
    pub fn init_expr(&self) -> Option<Expr> {
        if self.init_decl().is_some() {
            return None;
        }
        self.expr_after_semicolons(0)
    }

    /// The loop's condition expression.
    pub fn condition(&self) -> Option<Expr> {
        let after = if self.init_decl().is_some() { 0 } else { 1 };
        self.expr_after_semicolons(after)
    }

    /// The loop's increment expression.
    pub fn increment(&self) -> Option<Expr> {
        let after = if self.init_decl().is_some() { 1 } else { 2 };
        self.expr_after_semicolons(after)
    }

    /// The loop body.
    pub fn body(&self) -> Stmt {
        self.syntax()
            .children()
            .filter_map(Stmt::cast)
            .last()
            .expect("for statement must have a body")
    }

    /// Finds the direct-child `Expr` node that appears after exactly
    /// `count` direct-child `;` tokens have been seen (a declaration
    /// init's own `;` is nested inside its `GlobalDecl` node and so
    /// never counts here).
    fn expr_after_semicolons(&self, count: usize) -> Option<Expr> {
        let mut semicolons = 0;
        for child in self.syntax().children_with_tokens() {
            match child {
                NodeOrToken::Token(t) if t.kind() == SyntaxKind::Semicolon => semicolons += 1,
                NodeOrToken::Node(n) if semicolons == count => {
                    if let Some(expr) = Expr::cast(n) {
                        return Some(expr);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

ast_node!(
    /// A `switch` statement.
    SwitchStmt => SwitchStmt
);

impl SwitchStmt {
    /// The switched-on expression.
    pub fn value(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("switch statement must have a value")
    }

    /// The switch body.
    pub fn body(&self) -> Block {
        support::child(self.syntax()).expect("switch statement must have a body")
    }
}

ast_node!(
    /// A `case value:` or `default:` label.
    CaseLabel => CaseLabel
);

impl CaseLabel {
    /// True for `default:`, false for `case ...:`.
    pub fn is_default(&self) -> bool {
        support::token(self.syntax(), SyntaxKind::DefaultKw).is_some()
    }

    /// The case value, absent for `default:`.
    pub fn value(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }

    /// The terminating `:`.
    pub fn colon(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Colon)
    }
}

ast_node!(
    /// A bare expression statement, including the degenerate empty
    /// statement `;`.
    ExprStmt => ExprStmt
);

impl ExprStmt {
    /// The statement's expression, absent for a bare `;`.
    pub fn expr(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }
}

ast_enum!(
    /// Any statement, including a local declaration (which reuses the
    /// `GlobalDecl` node kind; "global" here names the node shape, not
    /// where it may appear).
    Stmt => {
        Block(Block),
        Return(ReturnStmt),
        Break(BreakStmt),
        Continue(ContinueStmt),
        Goto(GotoStmt),
        Label(GotoLabel),
        If(IfStmt),
        While(WhileStmt),
        DoWhile(DoWhileStmt),
        For(ForStmt),
        Switch(SwitchStmt),
        Case(CaseLabel),
        Decl(GlobalDecl),
        Expr(ExprStmt),
    }
);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ModuleItem;

    fn first_function_body(source: &str) -> Block {
        let (module, diagnostics) = crate::parse(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let ModuleItem::FunctionDef(def) = module.items().next().unwrap() else {
            panic!("expected a function definition");
        };
        def.body()
    }

    #[test]
    fn if_else_branches() {
        let body = first_function_body(
            "void f(void)\n{\n\tif (1)\n\t\treturn;\n\telse\n\t\treturn;\n}\n",
        );
        let Stmt::If(stmt) = body.stmts().next().unwrap() else {
            panic!("expected an if statement");
        };
        assert!(matches!(stmt.then_branch(), Stmt::Return(_)));
        assert!(matches!(stmt.else_branch(), Some(Stmt::Return(_))));
    }

    #[test]
    fn for_loop_with_declaration_init() {
        let body = first_function_body(
            "void f(void)\n{\n\tfor (int i = 0; i < 10; i = i + 1)\n\t\tcontinue;\n}\n",
        );
        let Stmt::For(stmt) = body.stmts().next().unwrap() else {
            panic!("expected a for statement");
        };
        assert!(stmt.init_decl().is_some());
        assert!(stmt.init_expr().is_none());
        assert!(stmt.condition().is_some());
        assert!(stmt.increment().is_some());
        assert!(matches!(stmt.body(), Stmt::Continue(_)));
    }

    #[test]
    fn for_loop_with_expression_init_and_empty_clauses() {
        let body = first_function_body("void f(void)\n{\n\tfor (;;)\n\t\tbreak;\n}\n");
        let Stmt::For(stmt) = body.stmts().next().unwrap() else {
            panic!("expected a for statement");
        };
        assert!(stmt.init_decl().is_none());
        assert!(stmt.init_expr().is_none());
        assert!(stmt.condition().is_none());
        assert!(stmt.increment().is_none());
    }

    #[test]
    fn switch_case_and_default_labels() {
        let body = first_function_body(
            "void f(int x)\n{\n\tswitch (x)\n\t{\n\tcase 1:\n\t\tbreak;\n\tdefault:\n\t\tbreak;\n\t}\n}\n",
        );
        let Stmt::Switch(stmt) = body.stmts().next().unwrap() else {
            panic!("expected a switch statement");
        };
        let labels: Vec<_> = stmt
            .body()
            .syntax()
            .children()
            .filter_map(CaseLabel::cast)
            .collect();
        assert_eq!(labels.len(), 2);
        assert!(!labels[0].is_default());
        assert!(labels[0].value().is_some());
        assert!(labels[1].is_default());
        assert!(labels[1].value().is_none());
    }

    #[test]
    fn goto_and_label() {
        let body =
            first_function_body("void f(void)\n{\n\tgoto done;\ndone:\n\treturn;\n}\n");
        let mut stmts = body.stmts();
        let Stmt::Goto(goto) = stmts.next().unwrap() else {
            panic!("expected a goto statement");
        };
        assert_eq!(goto.label().text(), "done");
        let Stmt::Label(label) = stmts.next().unwrap() else {
            panic!("expected a label");
        };
        assert_eq!(label.name().text(), "done");
    }
}
