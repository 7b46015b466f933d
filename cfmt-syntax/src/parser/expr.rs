//! Expression grammar.
//!
//! A hand-written precedence-climbing parser over the C-family
//! expression grammar: the comma operator, assignment (modeled as a
//! plain right-associative binary operator), the ternary conditional,
//! the usual binary operator ladder, and the unary/postfix/primary
//! chain.

use super::Parser;
use crate::SyntaxKind;
use crate::SyntaxKind::*;

/// Binding power of a binary operator below assignment precedence. Returns
/// `None` if `kind` is not one of these operators.
fn infix_binding_power(kind: SyntaxKind) -> Option<(u8, u8)> {
    Some(match kind {
        OrOr => (1, 2),
        AndAnd => (3, 4),
        Pipe => (5, 6),
        Caret => (7, 8),
        Amp => (9, 10),
        Eq | Neq => (11, 12),
        Lt | Gt | Le | Ge => (13, 14),
        Shl | Shr => (15, 16),
        Plus | Minus => (17, 18),
        Star | Slash | Percent => (19, 20),
        _ => return None,
    })
}

/// Parses a full expression, including the comma operator. This is the
/// entry point used for statement expressions and most grammar positions.
pub(super) fn parse_expr(p: &mut Parser<'_>) {
    parse_comma(p);
}

/// Parses an expression without consuming a top-level comma operator. Used
/// anywhere a bare `,` has another meaning in the surrounding grammar (call
/// arguments, declarator lists, the branches of a ternary).
pub(super) fn parse_assign(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    parse_ternary(p);
    if p.at(Assign) {
        p.bump();
        parse_assign(p); // right-associative
        p.wrap_from(checkpoint, BinaryExpr);
    }
}

fn parse_comma(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    parse_assign(p);
    while p.at(Comma) {
        p.bump();
        parse_assign(p);
        p.wrap_from(checkpoint, CommaExpr);
    }
}

fn parse_ternary(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    parse_binary(p, 0);
    if p.at(Question) {
        p.bump();
        parse_assign(p);
        p.expect(Colon, "':' in conditional expression");
        parse_assign(p);
        p.wrap_from(checkpoint, TernaryExpr);
    }
}

fn parse_binary(p: &mut Parser<'_>, min_bp: u8) {
    let checkpoint = p.checkpoint();
    parse_unary(p);

    loop {
        let Some((lbp, rbp)) = infix_binding_power(p.nth(0)) else {
            break;
        };
        if lbp < min_bp {
            break;
        }
        p.bump();
        parse_binary(p, rbp);
        p.wrap_from(checkpoint, BinaryExpr);
    }
}

fn parse_unary(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    match p.nth(0) {
        PlusPlus | MinusMinus => {
            p.bump();
            parse_unary(p);
            p.wrap_from(checkpoint, PreAdjustExpr);
        }
        Plus | Minus => {
            p.bump();
            parse_unary(p);
            p.wrap_from(checkpoint, SignExpr);
        }
        Bang => {
            p.bump();
            parse_unary(p);
            p.wrap_from(checkpoint, NotExpr);
        }
        Tilde => {
            p.bump();
            parse_unary(p);
            p.wrap_from(checkpoint, BitNotExpr);
        }
        Star => {
            p.bump();
            parse_unary(p);
            p.wrap_from(checkpoint, DerefExpr);
        }
        Amp => {
            p.bump();
            parse_unary(p);
            p.wrap_from(checkpoint, AddrOfExpr);
        }
        SizeofKw => {
            p.bump();
            // `sizeof (type-name)` would require a type-name production this
            // grammar has no node for; only `sizeof unary-expr` is supported,
            // which still covers `sizeof expr` and `sizeof (expr)` (the
            // parens then parse as an ordinary parenthesized expression).
            parse_unary(p);
            p.wrap_from(checkpoint, SizeofExpr);
        }
        _ => parse_postfix(p),
    }
}

fn parse_postfix(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    parse_primary(p);

    loop {
        match p.nth(0) {
            LParen => {
                p.bump();
                parse_call_args(p);
                p.expect(RParen, "')' after call arguments");
                p.wrap_from(checkpoint, CallExpr);
            }
            LBracket => {
                p.bump();
                parse_expr(p);
                p.expect(RBracket, "']' after subscript expression");
                p.wrap_from(checkpoint, SubscriptExpr);
            }
            Dot => {
                p.bump();
                p.expect(Ident, "member name");
                p.wrap_from(checkpoint, MemberExpr);
            }
            Arrow => {
                p.bump();
                p.expect(Ident, "member name");
                p.wrap_from(checkpoint, IndirectMemberExpr);
            }
            PlusPlus | MinusMinus => {
                p.bump();
                p.wrap_from(checkpoint, PostAdjustExpr);
            }
            _ => break,
        }
    }
}

fn parse_call_args(p: &mut Parser<'_>) {
    while !p.at(RParen) && !p.at(Eof) {
        let checkpoint = p.checkpoint();
        parse_assign(p);
        p.eat(Comma);
        p.wrap_from(checkpoint, CallArg);
    }
}

fn parse_primary(p: &mut Parser<'_>) {
    match p.nth(0) {
        IntLiteral => {
            let m = p.start();
            p.bump();
            m.complete(p, IntExpr);
        }
        CharLiteral => {
            let m = p.start();
            p.bump();
            m.complete(p, CharExpr);
        }
        StringLiteral => {
            let m = p.start();
            p.bump();
            m.complete(p, StringExpr);
        }
        Ident => {
            let m = p.start();
            p.bump();
            m.complete(p, IdentExpr);
        }
        LParen => {
            let m = p.start();
            p.bump();
            parse_expr(p);
            p.expect(RParen, "')' after parenthesized expression");
            m.complete(p, ParenExpr);
        }
        _ => {
            p.error("expected expression");
        }
    }
}
