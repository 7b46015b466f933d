//! Declaration-level nodes: the module root, global declarations, function
//! definitions, and the specifier lists shared by both.

use rowan::ast::support;

use crate::Ident;
use crate::ast_enum;
use crate::ast_node;
use crate::declarator::Declarator;
use crate::declarator::DeclaratorList;
use crate::stmt::Block;
use crate::types::TypeSpec;
use crate::{AstNode, AstToken, SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(
    /// The root node of a parsed translation unit: an ordered sequence of
    /// global declarations and function definitions.
    Module => Module
);

impl Module {
    /// Gets the module's top-level items in source order.
    pub fn items(&self) -> impl Iterator<Item = ModuleItem> + '_ {
        self.syntax().children().filter_map(ModuleItem::cast)
    }
}

ast_enum!(
    /// A top-level item: either a global declaration or a function
    /// definition.
    ModuleItem => {
        GlobalDecl(GlobalDecl),
        FunctionDef(FunctionDef),
    }
);

ast_node!(
    /// A global declaration: a declaration-specifier list, an optional
    /// declarator list, and a terminating `;` (or, for a bare
    /// `struct foo { ... };`, no declarator list at all).
    GlobalDecl => GlobalDecl
);

impl GlobalDecl {
    /// The declaration's specifier list.
    pub fn dspecs(&self) -> DeclSpecList {
        support::child(self.syntax()).expect("global declaration must have a specifier list")
    }

    /// The declared names, if any (absent for a bare record/enum
    /// declaration with no declarator).
    pub fn declarators(&self) -> Option<DeclaratorList> {
        support::child(self.syntax())
    }

    /// The terminating `;`.
    pub fn semicolon(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Semicolon)
    }
}

ast_node!(
    /// A function definition: specifiers, a function declarator, and a
    /// braced body.
    FunctionDef => FunctionDef
);

impl FunctionDef {
    /// The definition's specifier list.
    pub fn dspecs(&self) -> DeclSpecList {
        support::child(self.syntax()).expect("function definition must have a specifier list")
    }

    /// The function's declarator (its name and parameter list).
    pub fn declarator(&self) -> Declarator {
        Declarator::cast(
            self.syntax()
                .children()
                .find(|n| Declarator::can_cast(n.kind()))
                .expect("function definition must have a declarator"),
        )
        .expect("declarator should cast")
    }

    /// The function body.
    pub fn body(&self) -> Block {
        support::child(self.syntax()).expect("function definition must have a body")
    }
}

ast_node!(
    /// A storage-class specifier (`typedef`, `extern`, `static`, `auto`,
    /// `register`).
    StorageClassSpec => StorageClassSpec
);

impl StorageClassSpec {
    /// The specifier keyword.
    pub fn keyword(&self) -> SyntaxToken {
        self.syntax()
            .first_token()
            .expect("storage-class specifier must have a keyword")
    }
}

ast_node!(
    /// A function specifier (`inline`).
    FunctionSpec => FunctionSpec
);

impl FunctionSpec {
    /// The specifier keyword.
    pub fn keyword(&self) -> SyntaxToken {
        self.syntax()
            .first_token()
            .expect("function specifier must have a keyword")
    }
}

/// Shared accessors for the two specifier-list node kinds
/// (`DeclSpecList` for top-level items, `SpecifierQualifierList` for
/// record elements and function parameters).
macro_rules! spec_list_accessors {
    ($name:ident) => {
        impl $name {
            /// The storage-class specifier, if present.
            pub fn storage_class(&self) -> Option<StorageClassSpec> {
                support::child(self.syntax())
            }

            /// The function specifier (`inline`), if present.
            pub fn function_spec(&self) -> Option<FunctionSpec> {
                support::child(self.syntax())
            }

            /// The type specifier: the basic keyword, typedef name, or
            /// record/enum definition that anchors this specifier list.
            pub fn type_spec(&self) -> Option<TypeSpec> {
                self.syntax().children().find_map(TypeSpec::cast)
            }

            /// True if a `typedef` storage-class specifier is present.
            pub fn is_typedef(&self) -> bool {
                self.storage_class()
                    .is_some_and(|s| s.keyword().kind() == SyntaxKind::TypedefKw)
            }
        }
    };
}

ast_node!(
    /// The specifier list of a global declaration or function definition.
    DeclSpecList => DeclSpecList
);
spec_list_accessors!(DeclSpecList);

ast_node!(
    /// The specifier list of a record element or function parameter.
    SpecifierQualifierList => SpecifierQualifierList
);
spec_list_accessors!(SpecifierQualifierList);

/// Finds the typedef name declared by a module item, if it is a
/// `typedef` declaration with exactly one declared identifier.
///
/// A convenience the checker's tests rely on to assert tree shape,
/// rather than a node the grammar produces directly.
pub fn typedef_name(decl: &GlobalDecl) -> Option<Ident> {
    if !decl.dspecs().is_typedef() {
        return None;
    }
    decl.declarators()?
        .entries()
        .next()?
        .declarator()
        .name_ident()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ModuleItem;

    #[test]
    fn global_decl_has_specifiers_and_declarators() {
        let (module, diagnostics) = crate::parse("int x, y;\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        assert!(decl.dspecs().type_spec().is_some());
        assert_eq!(decl.declarators().unwrap().entries().count(), 2);
    }

    #[test]
    fn typedef_is_recognized() {
        let (module, diagnostics) = crate::parse("typedef unsigned int uint32;\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        assert!(decl.dspecs().is_typedef());
        assert_eq!(typedef_name(&decl).unwrap().text(), "uint32");
    }

    #[test]
    fn bare_record_decl_has_no_declarators() {
        let (module, diagnostics) = crate::parse("struct foo { int a; };\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        assert!(decl.declarators().is_none());
    }

    #[test]
    fn function_def_has_body() {
        let (module, diagnostics) = crate::parse("int main(void)\n{\n\treturn 0;\n}\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::FunctionDef(def) = module.items().next().unwrap() else {
            panic!("expected a function definition");
        };
        assert_eq!(def.body().stmts().count(), 1);
    }
}
