//! Declaration, specifier, and declarator grammar.

use super::Parser;
use super::expr;
use super::stmt;
use crate::SyntaxKind;
use crate::SyntaxKind::*;

/// Parses the sequence of top-level items (global declarations and function
/// definitions) that make up a module.
pub(super) fn parse_module_items(p: &mut Parser<'_>) {
    while !p.at(Eof) {
        parse_item(p, true);
    }
}

/// Parses a declaration, or (only when `allow_function_def` is set, i.e. at
/// module scope) a function definition.
pub(super) fn parse_item(p: &mut Parser<'_>, allow_function_def: bool) {
    let m = p.start();
    let is_typedef = p.at(TypedefKw);
    parse_decl_specifiers(p, DeclSpecList);

    if p.at(Semicolon) {
        // A bare `struct foo { ... };` with no declarator.
        p.bump();
        m.complete(p, GlobalDecl);
        return;
    }

    let declarator_checkpoint = p.checkpoint();
    parse_declarator(p);

    if allow_function_def && !is_typedef && p.at(LBrace) {
        stmt::parse_block(p);
        m.complete(p, FunctionDef);
        return;
    }

    if is_typedef {
        register_typedef_name(p);
    }
    finish_declarator_list(p, declarator_checkpoint, is_typedef);
    m.complete(p, GlobalDecl);
}

/// Records the just-parsed declarator's identifier (if any) as a known type
/// name. This is the classic "lexer hack" needed to parse C's grammar
/// without semantic analysis: `foo bar;` parses differently depending on
/// whether `foo` was previously typedef'd, and that can't be decided from
/// syntax alone.
fn register_typedef_name(p: &mut Parser<'_>) {
    if let Some(name) = p.last_declarator_ident.take() {
        p.typedef_names.insert(name);
    }
}

/// Parses the remaining entries of a declarator list (the first declarator
/// has already been parsed), wrapping the whole thing (including the first
/// entry) in a `DeclaratorList` node, then consumes the terminating `;`.
fn finish_declarator_list(
    p: &mut Parser<'_>,
    first_entry_checkpoint: rowan::Checkpoint,
    is_typedef: bool,
) {
    // Each entry eats its own trailing comma (if any) before being wrapped,
    // so `DeclaratorListEntry` owns the comma that follows it rather
    // than the entry after it.
    if !is_typedef {
        parse_opt_initializer(p);
    }
    let mut has_more = p.eat(Comma);
    p.wrap_from(first_entry_checkpoint, DeclaratorListEntry);
    let list_checkpoint = first_entry_checkpoint;
    while has_more {
        let entry_checkpoint = p.checkpoint();
        parse_declarator(p);
        if is_typedef {
            register_typedef_name(p);
        }
        if !is_typedef {
            parse_opt_initializer(p);
        }
        has_more = p.eat(Comma);
        p.wrap_from(entry_checkpoint, DeclaratorListEntry);
    }
    p.wrap_from(list_checkpoint, DeclaratorList);
    p.expect(Semicolon, "';' after declaration");
}

/// Parses a declarator's optional `= initializer` expression, e.g. the
/// `= sizeof(int) * 2` in `int a = sizeof(int) * 2;`.
fn parse_opt_initializer(p: &mut Parser<'_>) {
    if p.eat(Assign) {
        expr::parse_assign(p);
    }
}

/// True if the current token could start a declaration-specifier sequence.
/// Used by the statement parser to distinguish a local declaration from an
/// expression statement.
pub(super) fn at_decl_specifier_start(p: &Parser<'_>) -> bool {
    match p.nth(0) {
        TypedefKw | ExternKw | StaticKw | AutoKw | RegisterKw | InlineKw => true,
        ConstKw | RestrictKw | VolatileKw => true,
        k if k.is_basic_type_keyword() => true,
        StructKw | UnionKw | EnumKw => true,
        Ident => p.at_typedef_name(),
        _ => false,
    }
}

/// Parses a run of declaration specifiers (storage class, function
/// specifier, qualifiers, and type specifiers), wrapping them in a node of
/// `list_kind` (either `DeclSpecList` for top-level items or
/// `SpecifierQualifierList` for record elements and parameters).
fn parse_decl_specifiers(p: &mut Parser<'_>, list_kind: SyntaxKind) {
    let m = p.start();
    let mut saw_type_spec = false;

    loop {
        match p.nth(0) {
            TypedefKw | ExternKw | StaticKw | AutoKw | RegisterKw => {
                let spec = p.start();
                p.bump();
                spec.complete(p, StorageClassSpec);
            }
            InlineKw => {
                let spec = p.start();
                p.bump();
                spec.complete(p, FunctionSpec);
            }
            ConstKw => {
                let spec = p.start();
                p.bump();
                spec.complete(p, ConstQual);
            }
            RestrictKw => {
                let spec = p.start();
                p.bump();
                spec.complete(p, RestrictQual);
            }
            VolatileKw => {
                let spec = p.start();
                p.bump();
                spec.complete(p, VolatileQual);
            }
            k if k.is_basic_type_keyword() => {
                let spec = p.start();
                p.bump();
                spec.complete(p, BasicTypeSpec);
                saw_type_spec = true;
            }
            StructKw | UnionKw => {
                parse_record_type_spec(p);
                saw_type_spec = true;
            }
            EnumKw => {
                parse_enum_type_spec(p);
                saw_type_spec = true;
            }
            Ident if !saw_type_spec && p.at_typedef_name() => {
                let spec = p.start();
                p.bump();
                spec.complete(p, IdentTypeSpec);
                saw_type_spec = true;
            }
            _ => break,
        }
    }

    m.complete(p, list_kind);
}

fn parse_record_type_spec(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // struct | union
    p.eat(Ident); // optional tag
    if p.eat(LBrace) {
        while !p.at(RBrace) && !p.at(Eof) {
            parse_record_element(p);
        }
        p.expect(RBrace, "'}' after record body");
    }
    m.complete(p, RecordTypeSpec);
}

fn parse_record_element(p: &mut Parser<'_>) {
    let m = p.start();
    parse_decl_specifiers(p, SpecifierQualifierList);
    let first = p.checkpoint();
    parse_declarator(p);
    let mut has_more = p.eat(Comma);
    p.wrap_from(first, DeclaratorListEntry);
    while has_more {
        let entry = p.checkpoint();
        parse_declarator(p);
        has_more = p.eat(Comma);
        p.wrap_from(entry, DeclaratorListEntry);
    }
    p.wrap_from(first, DeclaratorList);
    p.expect(Semicolon, "';' after record element");
    m.complete(p, RecordElement);
}

fn parse_enum_type_spec(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // enum
    p.eat(Ident); // optional tag
    if p.eat(LBrace) {
        while !p.at(RBrace) && !p.at(Eof) {
            let item = p.start();
            p.expect(Ident, "enumerator name");
            if p.eat(Assign) {
                expr::parse_assign(p);
            }
            item.complete(p, Enumerator);
            if !p.eat(Comma) {
                break;
            }
        }
        p.expect(RBrace, "'}' after enumerator list");
    }
    m.complete(p, EnumTypeSpec);
}

/// Parses a declarator: zero or more leading `*` pointer levels wrapping a
/// direct declarator (an identifier, a parenthesized declarator, or nothing
/// for an abstract declarator), followed by zero or more array or function
/// suffixes.
///
/// Stashes the declared identifier's text (if any) in
/// `p.last_declarator_ident` so callers parsing a `typedef` can register it.
fn parse_declarator(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    if p.at(Star) {
        p.bump();
        parse_declarator(p);
        p.wrap_from(checkpoint, PointerDeclarator);
        return;
    }
    parse_direct_declarator(p);
}

fn parse_direct_declarator(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();

    match p.nth(0) {
        Ident => {
            p.last_declarator_ident = Some(p.nth_text(0).to_string());
            p.bump();
            p.wrap_from(checkpoint, IdentDeclarator);
        }
        LParen => {
            p.bump();
            parse_declarator(p);
            p.expect(RParen, "')' after parenthesized declarator");
            p.wrap_from(checkpoint, ParenDeclarator);
        }
        _ => {
            p.wrap_from(checkpoint, NoIdentDeclarator);
        }
    }

    parse_declarator_suffixes(p, checkpoint);
}

fn parse_declarator_suffixes(p: &mut Parser<'_>, base: rowan::Checkpoint) {
    loop {
        match p.nth(0) {
            LBracket => {
                p.bump();
                if !p.at(RBracket) {
                    expr::parse_assign(p);
                }
                p.expect(RBracket, "']' after array declarator");
                p.wrap_from(base, ArrayDeclarator);
            }
            LParen => {
                p.bump();
                parse_function_args(p);
                p.expect(RParen, "')' after parameter list");
                p.wrap_from(base, FunctionDeclarator);
            }
            _ => break,
        }
    }
}

fn parse_function_args(p: &mut Parser<'_>) {
    if p.at(VoidKw) && matches!(p.nth(1), RParen) {
        let m = p.start();
        p.bump();
        m.complete(p, FunctionArg);
        return;
    }
    while !p.at(RParen) && !p.at(Eof) {
        if p.at(Ellipsis) {
            let m = p.start();
            p.bump();
            m.complete(p, FunctionArg);
            break;
        }
        let arg = p.start();
        parse_decl_specifiers(p, SpecifierQualifierList);
        parse_declarator(p);
        // Eat the trailing comma before closing the node so `FunctionArg`
        // owns it.
        let has_more = p.eat(Comma);
        arg.complete(p, FunctionArg);
        if !has_more {
            break;
        }
    }
}
