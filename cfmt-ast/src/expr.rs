//! Expressions.

use rowan::ast::support;

use crate::CharLiteral;
use crate::Ident;
use crate::IntLiteral;
use crate::StringLiteral;
use crate::ast_enum;
use crate::ast_node;
use crate::{AstNode, AstToken, SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(
    /// An integer literal expression.
    IntExpr => IntExpr
);

impl IntExpr {
    /// The literal token.
    pub fn literal(&self) -> IntLiteral {
        crate::token(self.syntax()).expect("int expression must have a literal")
    }
}

ast_node!(
    /// A character literal expression.
    CharExpr => CharExpr
);

impl CharExpr {
    /// The literal token.
    pub fn literal(&self) -> CharLiteral {
        crate::token(self.syntax()).expect("char expression must have a literal")
    }
}

ast_node!(
    /// A string literal expression.
    StringExpr => StringExpr
);

impl StringExpr {
    /// The literal token.
    pub fn literal(&self) -> StringLiteral {
        crate::token(self.syntax()).expect("string expression must have a literal")
    }
}

ast_node!(
    /// A bare identifier used as an expression.
    IdentExpr => IdentExpr
);

impl IdentExpr {
    /// The identifier token.
    pub fn name(&self) -> Ident {
        crate::token(self.syntax()).expect("ident expression must have a name")
    }
}

ast_node!(
    /// A parenthesized expression.
    ParenExpr => ParenExpr
);

impl ParenExpr {
    /// The opening `(`.
    pub fn lparen(&self) -> SyntaxToken {
        support::token(self.syntax(), SyntaxKind::LParen).expect("parenthesized expression must have '('")
    }

    /// The wrapped expression.
    pub fn inner(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("parenthesized expression must have an inner expression")
    }

    /// The closing `)`.
    pub fn rparen(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RParen)
    }
}

ast_node!(
    /// A binary expression: `lhs op rhs`, including plain assignment
    /// (`=`), which this grammar treats as an ordinary right-associative
    /// binary operator.
    BinaryExpr => BinaryExpr
);

impl BinaryExpr {
    /// The left-hand operand.
    pub fn lhs(&self) -> Expr {
        self.syntax()
            .children()
            .filter_map(Expr::cast)
            .next()
            .expect("binary expression must have a left-hand operand")
    }

    /// The operator token. Both operands are nodes, so the single
    /// non-trivia direct token child is the operator.
    pub fn op(&self) -> SyntaxToken {
        self.syntax()
            .children_with_tokens()
            .filter_map(|c| c.into_token())
            .find(|t| !t.kind().is_wspace() && t.kind() != SyntaxKind::Comment)
            .expect("binary expression must have an operator")
    }

    /// The right-hand operand.
    pub fn rhs(&self) -> Expr {
        self.syntax()
            .children()
            .filter_map(Expr::cast)
            .nth(1)
            .expect("binary expression must have a right-hand operand")
    }
}

ast_node!(
    /// A ternary conditional expression: `cond ? then : else`.
    TernaryExpr => TernaryExpr
);

impl TernaryExpr {
    /// The condition.
    pub fn condition(&self) -> Expr {
        self.syntax()
            .children()
            .filter_map(Expr::cast)
            .next()
            .expect("ternary expression must have a condition")
    }

    /// The `?` token.
    pub fn question(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Question)
    }

    /// The value when the condition is true.
    pub fn then_expr(&self) -> Expr {
        self.syntax()
            .children()
            .filter_map(Expr::cast)
            .nth(1)
            .expect("ternary expression must have a then-value")
    }

    /// The `:` token.
    pub fn colon(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Colon)
    }

    /// The value when the condition is false.
    pub fn else_expr(&self) -> Expr {
        self.syntax()
            .children()
            .filter_map(Expr::cast)
            .nth(2)
            .expect("ternary expression must have an else-value")
    }
}

ast_node!(
    /// A comma expression: `a, b, c`, evaluated left to right.
    CommaExpr => CommaExpr
);

impl CommaExpr {
    /// The comma-separated operands, in source order.
    pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax().children().filter_map(Expr::cast)
    }
}

ast_node!(
    /// A function call expression.
    CallExpr => CallExpr
);

impl CallExpr {
    /// The called expression (usually an [`IdentExpr`]).
    pub fn callee(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("call expression must have a callee")
    }

    /// The opening `(`.
    pub fn lparen(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::LParen)
    }

    /// The call's arguments, in source order.
    pub fn args(&self) -> impl Iterator<Item = CallArg> + '_ {
        self.syntax().children().filter_map(CallArg::cast)
    }

    /// The closing `)`.
    pub fn rparen(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RParen)
    }
}

ast_node!(
    /// A single call argument, with its optional trailing comma.
    CallArg => CallArg
);

impl CallArg {
    /// The argument's value.
    pub fn value(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("call argument must have a value")
    }

    /// The trailing comma, if this isn't the last argument.
    pub fn comma(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Comma)
    }
}

ast_node!(
    /// A subscript expression: `base[index]`.
    SubscriptExpr => SubscriptExpr
);

impl SubscriptExpr {
    /// The subscripted expression.
    pub fn base(&self) -> Expr {
        self.syntax()
            .children()
            .filter_map(Expr::cast)
            .next()
            .expect("subscript expression must have a base")
    }

    /// The opening `[`.
    pub fn lbracket(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::LBracket)
    }

    /// The index expression.
    pub fn index(&self) -> Expr {
        self.syntax()
            .children()
            .filter_map(Expr::cast)
            .nth(1)
            .expect("subscript expression must have an index")
    }

    /// The closing `]`.
    pub fn rbracket(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RBracket)
    }
}

ast_node!(
    /// A member access expression: `base.member`.
    MemberExpr => MemberExpr
);

impl MemberExpr {
    /// The accessed expression.
    pub fn base(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("member expression must have a base")
    }

    /// The `.` token.
    pub fn dot(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Dot)
    }

    /// The accessed member's name.
    pub fn member(&self) -> Ident {
        crate::token(self.syntax()).expect("member expression must name a member")
    }
}

ast_node!(
    /// An indirect member access expression: `base->member`.
    IndirectMemberExpr => IndirectMemberExpr
);

impl IndirectMemberExpr {
    /// The accessed expression.
    pub fn base(&self) -> Expr {
        self.syntax()
            .children()
            .find_map(Expr::cast)
            .expect("indirect member expression must have a base")
    }

    /// The `->` token.
    pub fn arrow(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Arrow)
    }

    /// The accessed member's name.
    pub fn member(&self) -> Ident {
        crate::token(self.syntax()).expect("indirect member expression must name a member")
    }
}

/// A macro implementing the common "one keyword/operator token, one
/// operand" shape shared by most unary expression kinds.
macro_rules! unary_expr {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        ast_node!($(#[$meta])* $name => $kind);

        impl $name {
            /// The operand.
            pub fn operand(&self) -> Expr {
                self.syntax()
                    .children()
                    .find_map(Expr::cast)
                    .expect("unary expression must have an operand")
            }
        }
    };
}

unary_expr!(
    /// A unary sign expression: `+expr` or `-expr`.
    SignExpr => SignExpr
);
unary_expr!(
    /// A logical negation: `!expr`.
    NotExpr => NotExpr
);
unary_expr!(
    /// A bitwise complement: `~expr`.
    BitNotExpr => BitNotExpr
);
unary_expr!(
    /// A dereference expression: `*expr`.
    DerefExpr => DerefExpr
);
unary_expr!(
    /// An address-of expression: `&expr`.
    AddrOfExpr => AddrOfExpr
);
unary_expr!(
    /// A `sizeof expr` expression.
    SizeofExpr => SizeofExpr
);
unary_expr!(
    /// A prefix `++`/`--` adjustment.
    PreAdjustExpr => PreAdjustExpr
);
unary_expr!(
    /// A postfix `++`/`--` adjustment.
    PostAdjustExpr => PostAdjustExpr
);

ast_enum!(
    /// Any expression.
    Expr => {
        Int(IntExpr),
        Char(CharExpr),
        String(StringExpr),
        Ident(IdentExpr),
        Paren(ParenExpr),
        Binary(BinaryExpr),
        Ternary(TernaryExpr),
        Comma(CommaExpr),
        Call(CallExpr),
        Subscript(SubscriptExpr),
        Member(MemberExpr),
        IndirectMember(IndirectMemberExpr),
        Sign(SignExpr),
        Not(NotExpr),
        BitNot(BitNotExpr),
        Deref(DerefExpr),
        AddrOf(AddrOfExpr),
        Sizeof(SizeofExpr),
        PreAdjust(PreAdjustExpr),
        PostAdjust(PostAdjustExpr),
    }
);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ModuleItem;
    use crate::stmt::Stmt;

    fn first_stmt_expr(source: &str) -> Expr {
        let (module, diagnostics) = crate::parse(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let ModuleItem::FunctionDef(def) = module.items().next().unwrap() else {
            panic!("expected a function definition");
        };
        let Stmt::Expr(stmt) = def.body().stmts().next().unwrap() else {
            panic!("expected an expression statement");
        };
        stmt.expr().expect("expression statement must have a value")
    }

    #[test]
    fn binary_expr_operator_and_operands() {
        let expr = first_stmt_expr("void f(void)\n{\n\ta + b * c;\n}\n");
        let Expr::Binary(add) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(add.op().kind(), SyntaxKind::Plus);
        assert!(matches!(add.lhs(), Expr::Ident(_)));
        assert!(matches!(add.rhs(), Expr::Binary(_)));
    }

    #[test]
    fn call_args_own_their_commas() {
        let expr = first_stmt_expr("void f(void)\n{\n\tfoo(1, 2, 3);\n}\n");
        let Expr::Call(call) = expr else {
            panic!("expected a call expression");
        };
        let args: Vec<_> = call.args().collect();
        assert_eq!(args.len(), 3);
        assert!(args[0].comma().is_some());
        assert!(args[1].comma().is_some());
        assert!(args[2].comma().is_none());
    }

    #[test]
    fn ternary_expr_has_three_operands() {
        let expr = first_stmt_expr("void f(void)\n{\n\ta ? b : c;\n}\n");
        let Expr::Ternary(t) = expr else {
            panic!("expected a ternary expression");
        };
        assert!(matches!(t.condition(), Expr::Ident(_)));
        assert!(matches!(t.then_expr(), Expr::Ident(_)));
        assert!(matches!(t.else_expr(), Expr::Ident(_)));
    }

    #[test]
    fn member_and_indirect_member() {
        let expr = first_stmt_expr("void f(void)\n{\n\tp->x.y;\n}\n");
        let Expr::Member(member) = expr else {
            panic!("expected a member expression");
        };
        assert_eq!(member.member().text(), "y");
        assert!(matches!(member.base(), Expr::IndirectMember(_)));
    }
}
