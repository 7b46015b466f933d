//! Type specifiers: basic keywords, typedef names, and record/enum
//! definitions.

use rowan::ast::support;

use crate::Ident;
use crate::ast_enum;
use crate::ast_node;
use crate::decl::SpecifierQualifierList;
use crate::declarator::DeclaratorList;
use crate::expr::Expr;
use crate::{AstNode, AstToken, SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(
    /// A basic type keyword (`int`, `char`, `void`, `float`, `double`,
    /// `short`, `long`, `unsigned`, `signed`, ...).
    BasicTypeSpec => BasicTypeSpec
);

impl BasicTypeSpec {
    /// The keyword token.
    pub fn keyword(&self) -> SyntaxToken {
        self.syntax()
            .first_token()
            .expect("basic type specifier must have a keyword")
    }
}

ast_node!(
    /// A typedef'd type name used as a type specifier.
    IdentTypeSpec => IdentTypeSpec
);

impl IdentTypeSpec {
    /// The type name.
    pub fn name(&self) -> Ident {
        crate::token(self.syntax()).expect("ident type specifier must have a name")
    }
}

ast_node!(
    /// A `struct`/`union` type specifier: a keyword, an optional tag, and
    /// an optional braced element list.
    RecordTypeSpec => RecordTypeSpec
);

impl RecordTypeSpec {
    /// The `struct` or `union` keyword.
    pub fn keyword(&self) -> SyntaxToken {
        self.syntax()
            .first_token()
            .expect("record type specifier must have a keyword")
    }

    /// True if this is a `union` (as opposed to a `struct`).
    pub fn is_union(&self) -> bool {
        self.keyword().kind() == SyntaxKind::UnionKw
    }

    /// The tag name, if present (`struct foo { ... }` vs. an anonymous
    /// `struct { ... }`).
    pub fn tag(&self) -> Option<Ident> {
        crate::token(self.syntax())
    }

    /// The opening brace, if this specifier defines (rather than merely
    /// references) the record.
    pub fn lbrace(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::LBrace)
    }

    /// The closing brace.
    pub fn rbrace(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RBrace)
    }

    /// True if this specifier carries a body (`{ ... }`), as opposed to a
    /// bare forward reference like `struct foo`.
    pub fn has_def(&self) -> bool {
        self.lbrace().is_some()
    }

    /// The record's elements, in source order.
    pub fn elements(&self) -> impl Iterator<Item = RecordElement> + '_ {
        self.syntax().children().filter_map(RecordElement::cast)
    }
}

ast_node!(
    /// A single member declaration inside a `struct`/`union` body.
    RecordElement => RecordElement
);

impl RecordElement {
    /// The element's specifier list.
    pub fn dspecs(&self) -> SpecifierQualifierList {
        support::child(self.syntax()).expect("record element must have a specifier list")
    }

    /// The element's declared names.
    pub fn declarators(&self) -> DeclaratorList {
        support::child(self.syntax()).expect("record element must have a declarator list")
    }

    /// The terminating `;`.
    pub fn semicolon(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Semicolon)
    }
}

ast_node!(
    /// An `enum` type specifier: a keyword, an optional tag, and an
    /// optional braced enumerator list.
    EnumTypeSpec => EnumTypeSpec
);

impl EnumTypeSpec {
    /// The `enum` keyword.
    pub fn keyword(&self) -> SyntaxToken {
        self.syntax()
            .first_token()
            .expect("enum type specifier must have a keyword")
    }

    /// The tag name, if present.
    pub fn tag(&self) -> Option<Ident> {
        crate::token(self.syntax())
    }

    /// The opening brace, if this specifier defines the enum.
    pub fn lbrace(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::LBrace)
    }

    /// The closing brace.
    pub fn rbrace(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::RBrace)
    }

    /// True if this specifier carries a body.
    pub fn has_def(&self) -> bool {
        self.lbrace().is_some()
    }

    /// The enum's enumerators, in source order.
    pub fn enumerators(&self) -> impl Iterator<Item = Enumerator> + '_ {
        self.syntax().children().filter_map(Enumerator::cast)
    }
}

ast_node!(
    /// A single `name` or `name = value` entry in an enum body.
    Enumerator => Enumerator
);

impl Enumerator {
    /// The enumerator's name.
    pub fn name(&self) -> Ident {
        crate::token(self.syntax()).expect("enumerator must have a name")
    }

    /// The enumerator's explicit value, if given.
    pub fn value(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }
}

ast_node!(
    /// A `const` type qualifier.
    ConstQual => ConstQual
);

ast_node!(
    /// A `restrict` type qualifier.
    RestrictQual => RestrictQual
);

ast_node!(
    /// A `volatile` type qualifier.
    VolatileQual => VolatileQual
);

ast_enum!(
    /// A type specifier: one of the forms that can anchor a specifier
    /// list.
    TypeSpec => {
        Basic(BasicTypeSpec),
        Ident(IdentTypeSpec),
        Record(RecordTypeSpec),
        Enum(EnumTypeSpec),
    }
);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ModuleItem;

    #[test]
    fn record_type_spec_has_tag_and_elements() {
        let (module, diagnostics) = crate::parse("struct point { int x; int y; };\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        let TypeSpec::Record(record) = decl.dspecs().type_spec().unwrap() else {
            panic!("expected a record type specifier");
        };
        assert!(!record.is_union());
        assert_eq!(record.tag().unwrap().text(), "point");
        assert!(record.has_def());
        assert_eq!(record.elements().count(), 2);
    }

    #[test]
    fn enum_type_spec_has_enumerators() {
        let (module, diagnostics) = crate::parse("enum color { RED, GREEN, BLUE = 5 };\n");
        assert!(diagnostics.is_empty());
        let ModuleItem::GlobalDecl(decl) = module.items().next().unwrap() else {
            panic!("expected a global declaration");
        };
        let TypeSpec::Enum(spec) = decl.dspecs().type_spec().unwrap() else {
            panic!("expected an enum type specifier");
        };
        let enumerators: Vec<_> = spec.enumerators().collect();
        assert_eq!(enumerators.len(), 3);
        assert_eq!(enumerators[0].name().text(), "RED");
        assert!(enumerators[0].value().is_none());
        assert!(enumerators[2].value().is_some());
    }
}
