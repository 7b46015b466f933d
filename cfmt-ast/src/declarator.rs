//! Declarators: the part of a declaration that names (or, in an abstract
//! declarator, doesn't name) the thing being declared, built up from
//! pointer, array, function, and parenthesized wrappers around a core
//! identifier or empty base.

use rowan::ast::support;

use crate::Ident;
use crate::ast_enum;
use crate::ast_node;
use crate::decl::SpecifierQualifierList;
use crate::expr::Expr;
use crate::{AstNode, AstToken, SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(
    /// A declarator consisting of just an identifier: `foo`.
    IdentDeclarator => IdentDeclarator
);

impl IdentDeclarator {
    /// The declared name.
    pub fn name(&self) -> Ident {
        crate::token(self.syntax()).expect("ident declarator must have a name")
    }
}

ast_node!(
    /// An abstract declarator with no identifier at all, e.g. the `*` in
    /// a parameter declared as `int *`.
    NoIdentDeclarator => NoIdentDeclarator
);

ast_node!(
    /// A parenthesized declarator, used to override precedence (e.g.
    /// `int (*fp)(void)`).
    ParenDeclarator => ParenDeclarator
);

impl ParenDeclarator {
    /// The opening `(`.
    pub fn lparen(&self) -> SyntaxToken {
        support::token(self.syntax(), SyntaxKind::LParen)
            .expect("parenthesized declarator must have '('")
    }

    /// The wrapped declarator.
    pub fn inner(&self) -> Declarator {
        self.syntax()
            .children()
            .find_map(Declarator::cast)
            .expect("parenthesized declarator must have an inner declarator")
    }

    /// The closing `)`.
    pub fn rparen(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RParen)
    }
}

ast_node!(
    /// A pointer declarator: `* declarator`.
    PointerDeclarator => PointerDeclarator
);

impl PointerDeclarator {
    /// The `*` token.
    pub fn star(&self) -> SyntaxToken {
        support::token(self.syntax(), SyntaxKind::Star).expect("pointer declarator must have '*'")
    }

    /// The declarator the pointer applies to.
    pub fn inner(&self) -> Declarator {
        self.syntax()
            .children()
            .find_map(Declarator::cast)
            .expect("pointer declarator must have an inner declarator")
    }
}

ast_node!(
    /// A function declarator: a base declarator followed by a
    /// parenthesized parameter list.
    FunctionDeclarator => FunctionDeclarator
);

impl FunctionDeclarator {
    /// The declarator this parameter list is attached to (the function's
    /// name, or an enclosing pointer/paren declarator).
    pub fn base(&self) -> Declarator {
        self.syntax()
            .children()
            .find_map(Declarator::cast)
            .expect("function declarator must have a base declarator")
    }

    /// The opening `(`.
    pub fn lparen(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::LParen)
    }

    /// The declared parameters, in source order.
    pub fn args(&self) -> impl Iterator<Item = FunctionArg> + '_ {
        self.syntax().children().filter_map(FunctionArg::cast)
    }

    /// The closing `)`.
    pub fn rparen(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RParen)
    }
}

ast_node!(
    /// A single parameter in a function declarator's parameter list: a
    /// `void` marker, a `...` ellipsis, or a specifier list plus
    /// declarator, each with an optional trailing comma.
    FunctionArg => FunctionArg
);

impl FunctionArg {
    /// True for the sole `(void)` parameter marking an explicitly empty
    /// parameter list.
    pub fn is_void(&self) -> bool {
        support::token(self.syntax(), SyntaxKind::VoidKw).is_some()
    }

    /// True for a variadic `...` marker.
    pub fn is_ellipsis(&self) -> bool {
        support::token(self.syntax(), SyntaxKind::Ellipsis).is_some()
    }

    /// The parameter's specifier list, absent for `void`/`...` markers.
    pub fn dspecs(&self) -> Option<SpecifierQualifierList> {
        support::child(self.syntax())
    }

    /// The parameter's declarator, if any (parameters may be abstract,
    /// e.g. `void f(int)`).
    pub fn declarator(&self) -> Option<Declarator> {
        self.syntax().children().find_map(Declarator::cast)
    }

    /// The trailing comma, if this isn't the last parameter.
    pub fn comma(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Comma)
    }
}

ast_node!(
    /// An array declarator: a base declarator followed by a bracketed,
    /// optional size expression.
    ArrayDeclarator => ArrayDeclarator
);

impl ArrayDeclarator {
    /// The declarator the array dimension applies to.
    pub fn base(&self) -> Declarator {
        self.syntax()
            .children()
            .find_map(Declarator::cast)
            .expect("array declarator must have a base declarator")
    }

    /// The opening `[`.
    pub fn lbracket(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::LBracket)
    }

    /// The array's size expression, if given (`int a[]` has none).
    pub fn size(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }

    /// The closing `]`.
    pub fn rbracket(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RBracket)
    }
}

ast_node!(
    /// A comma-separated list of one or more declarators sharing a single
    /// specifier list, e.g. the `a, *b, c[3]` in `int a, *b, c[3];`.
    DeclaratorList => DeclaratorList
);

impl DeclaratorList {
    /// The list's entries, in source order.
    pub fn entries(&self) -> impl Iterator<Item = DeclaratorListEntry> + '_ {
        self.syntax().children().filter_map(DeclaratorListEntry::cast)
    }
}

ast_node!(
    /// A single declarator within a [`DeclaratorList`], with its optional
    /// trailing comma.
    DeclaratorListEntry => DeclaratorListEntry
);

impl DeclaratorListEntry {
    /// The entry's declarator.
    pub fn declarator(&self) -> Declarator {
        self.syntax()
            .children()
            .find_map(Declarator::cast)
            .expect("declarator list entry must have a declarator")
    }

    /// The trailing comma, if this isn't the last entry.
    pub fn comma(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Comma)
    }

    /// The `=` token introducing an initializer, if present.
    pub fn assign(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Assign)
    }

    /// The initializer expression, if this declarator has one.
    pub fn initializer(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }
}

ast_enum!(
    /// Any declarator form.
    Declarator => {
        Ident(IdentDeclarator),
        NoIdent(NoIdentDeclarator),
        Paren(ParenDeclarator),
        Pointer(PointerDeclarator),
        Function(FunctionDeclarator),
        Array(ArrayDeclarator),
    }
);

impl Declarator {
    /// Finds the identifier this declarator ultimately names, recursing
    /// through pointer/array/function/paren wrappers. Returns `None` for
    /// an abstract declarator.
    pub fn name_ident(&self) -> Option<Ident> {
        match self {
            Declarator::Ident(d) => Some(d.name()),
            Declarator::NoIdent(_) => None,
            Declarator::Paren(d) => d.inner().name_ident(),
            Declarator::Pointer(d) => d.inner().name_ident(),
            Declarator::Function(d) => d.base().name_ident(),
            Declarator::Array(d) => d.base().name_ident(),
        }
    }
}

/// True if `declarator` names nothing (recursively a
/// [`NoIdentDeclarator`] at its core) — an abstract declarator, as used
/// in a cast or a parameter with no name.
pub fn is_abstract(declarator: &Declarator) -> bool {
    match declarator {
        Declarator::Ident(_) => false,
        Declarator::NoIdent(_) => true,
        Declarator::Paren(d) => is_abstract(&d.inner()),
        Declarator::Pointer(d) => is_abstract(&d.inner()),
        Declarator::Function(d) => is_abstract(&d.base()),
        Declarator::Array(d) => is_abstract(&d.base()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ModuleItem;

    #[test]
    fn function_declarator_args_own_their_commas() {
        let (module, diagnostics) = crate::parse("int add(int a, int b);\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        let Declarator::Function(func) =
            decl.declarators().unwrap().entries().next().unwrap().declarator()
        else {
            panic!("expected a function declarator");
        };
        let args: Vec<_> = func.args().collect();
        assert_eq!(args.len(), 2);
        assert!(args[0].comma().is_some());
        assert!(args[1].comma().is_none());
        assert_eq!(func.base().name_ident().unwrap().text(), "add");
    }

    #[test]
    fn void_function_has_no_params() {
        let (module, diagnostics) = crate::parse("int main(void);\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        let Declarator::Function(func) =
            decl.declarators().unwrap().entries().next().unwrap().declarator()
        else {
            panic!("expected a function declarator");
        };
        let args: Vec<_> = func.args().collect();
        assert_eq!(args.len(), 1);
        assert!(args[0].is_void());
    }

    #[test]
    fn pointer_and_array_declarators_report_not_abstract() {
        let (module, diagnostics) = crate::parse("int *p, arr[10];\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        for entry in decl.declarators().unwrap().entries() {
            let d = entry.declarator();
            assert!(!is_abstract(&d));
            assert!(d.name_ident().is_some());
        }
    }

    #[test]
    fn abstract_declarator_in_parameter_list() {
        let (module, diagnostics) = crate::parse("void f(int);\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        let Declarator::Function(func) =
            decl.declarators().unwrap().entries().next().unwrap().declarator()
        else {
            panic!("expected a function declarator");
        };
        let arg = func.args().next().unwrap();
        let d = arg.declarator().unwrap();
        assert!(is_abstract(&d));
    }

    #[test]
    fn declarator_initializer_is_parsed() {
        let (module, diagnostics) = crate::parse("int a = sizeof(int) * 2;\n");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        let entry = decl.declarators().unwrap().entries().next().unwrap();
        assert!(entry.assign().is_some());
        assert!(entry.initializer().is_some());
    }

    #[test]
    fn declarator_list_entries_can_mix_initializers() {
        let (module, diagnostics) = crate::parse("int a = 1, b, c = 2;\n");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        let entries: Vec<_> = decl.declarators().unwrap().entries().collect();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].initializer().is_some());
        assert!(entries[1].initializer().is_none());
        assert!(entries[2].initializer().is_some());
    }
}
