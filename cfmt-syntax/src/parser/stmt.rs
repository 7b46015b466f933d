//! Statement grammar.

use super::Parser;
use super::decl;
use super::expr;
use crate::SyntaxKind::*;

/// Parses a `{ ... }` block, including the braces.
pub(super) fn parse_block(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(LBrace, "'{' to start block");
    while !p.at(RBrace) && !p.at(Eof) {
        parse_stmt(p);
    }
    p.expect(RBrace, "'}' to end block");
    m.complete(p, Block);
}

fn parse_stmt(p: &mut Parser<'_>) {
    match p.nth(0) {
        LBrace => parse_block(p),
        ReturnKw => parse_return_stmt(p),
        BreakKw => parse_keyword_stmt(p, BreakStmt),
        ContinueKw => parse_keyword_stmt(p, ContinueStmt),
        GotoKw => parse_goto_stmt(p),
        IfKw => parse_if_stmt(p),
        WhileKw => parse_while_stmt(p),
        DoKw => parse_do_while_stmt(p),
        ForKw => parse_for_stmt(p),
        SwitchKw => parse_switch_stmt(p),
        CaseKw | DefaultKw => parse_case_label(p),
        Ident if p.nth(1) == Colon => parse_goto_label(p),
        _ if decl::at_decl_specifier_start(p) => decl::parse_item(p, false),
        _ => parse_expr_stmt(p),
    }
}

fn parse_return_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // return
    if !p.at(Semicolon) {
        expr::parse_expr(p);
    }
    p.expect(Semicolon, "';' after return statement");
    m.complete(p, ReturnStmt);
}

fn parse_keyword_stmt(p: &mut Parser<'_>, kind: crate::SyntaxKind) {
    let m = p.start();
    p.bump(); // break | continue
    p.expect(Semicolon, "';' after statement");
    m.complete(p, kind);
}

fn parse_goto_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // goto
    p.expect(Ident, "label name");
    p.expect(Semicolon, "';' after goto statement");
    m.complete(p, GotoStmt);
}

fn parse_goto_label(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // identifier
    p.bump(); // ':'
    m.complete(p, GotoLabel);
}

fn parse_if_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // if
    p.expect(LParen, "'(' after 'if'");
    expr::parse_expr(p);
    p.expect(RParen, "')' after if condition");
    parse_stmt(p);
    if p.at(ElseKw) {
        p.bump();
        parse_stmt(p);
    }
    m.complete(p, IfStmt);
}

fn parse_while_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // while
    p.expect(LParen, "'(' after 'while'");
    expr::parse_expr(p);
    p.expect(RParen, "')' after while condition");
    parse_stmt(p);
    m.complete(p, WhileStmt);
}

fn parse_do_while_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // do
    parse_stmt(p);
    p.expect(WhileKw, "'while' after do-while body");
    p.expect(LParen, "'(' after 'while'");
    expr::parse_expr(p);
    p.expect(RParen, "')' after do-while condition");
    p.expect(Semicolon, "';' after do-while statement");
    m.complete(p, DoWhileStmt);
}

fn parse_for_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // for
    p.expect(LParen, "'(' after 'for'");

    if decl::at_decl_specifier_start(p) {
        decl::parse_item(p, false);
    } else {
        if !p.at(Semicolon) {
            expr::parse_expr(p);
        }
        p.expect(Semicolon, "';' after for-loop initializer");
    }

    if !p.at(Semicolon) {
        expr::parse_expr(p);
    }
    p.expect(Semicolon, "';' after for-loop condition");

    if !p.at(RParen) {
        expr::parse_expr(p);
    }
    p.expect(RParen, "')' after for-loop clauses");

    parse_stmt(p);
    m.complete(p, ForStmt);
}

fn parse_switch_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump(); // switch
    p.expect(LParen, "'(' after 'switch'");
    expr::parse_expr(p);
    p.expect(RParen, "')' after switch expression");
    parse_block(p);
    m.complete(p, SwitchStmt);
}

fn parse_case_label(p: &mut Parser<'_>) {
    let m = p.start();
    let is_case = p.at(CaseKw);
    p.bump(); // case | default
    if is_case {
        expr::parse_assign(p);
    }
    p.expect(Colon, "':' after case label");
    m.complete(p, CaseLabel);
}

fn parse_expr_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.at(Semicolon) {
        expr::parse_expr(p);
    }
    p.expect(Semicolon, "';' after expression statement");
    m.complete(p, ExprStmt);
}
