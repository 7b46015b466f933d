//! The top-down AST walker.
//!
//! Grounded on `wdl-ast/src/visitor.rs`'s enter/exit `VisitReason`
//! pattern, adapted to a single top-down pass with an explicit `Scope`
//! threaded as a plain argument rather than a trait-object visitor: that
//! visitor is reason-based and stateless, while checking whitespace
//! here needs an indentation level carried down through the recursion,
//! so the walker is a direct recursive-descent dispatch on the AST
//! enums. One `check_<kind>` function per node kind mirrors that same
//! crate's `check_*` rule-method naming.

use cfmt_ast::AstNode;
use cfmt_ast::AstToken;
use cfmt_ast::Block;
use cfmt_ast::CaseLabel;
use cfmt_ast::Declarator;
use cfmt_ast::Enumerator;
use cfmt_ast::Expr;
use cfmt_ast::FunctionDef;
use cfmt_ast::GlobalDecl;
use cfmt_ast::Module;
use cfmt_ast::ModuleItem;
use cfmt_ast::RecordElement;
use cfmt_ast::Stmt;
use cfmt_ast::TypeSpec;
use cfmt_ast::support;
use cfmt_syntax::SyntaxKind;
use cfmt_syntax::SyntaxNode;
use cfmt_syntax::SyntaxToken;

use crate::primitives as p;
use crate::primitives::Checker;
use crate::scope::Scope;

/// Walks `module`, applying every whitespace primitive and leaving
/// `checker` holding either the collected diagnostics (report mode) or
/// the edits needed to fix them (fix mode).
pub fn check_module(module: &Module, checker: &mut Checker, fix: bool) {
    let top = Scope::top(fix);
    for item in module.items() {
        match item {
            ModuleItem::GlobalDecl(decl) => check_global_decl(&decl, checker, top),
            ModuleItem::FunctionDef(def) => check_function_def(&def, checker, top),
        }
    }
}

/// **Global declaration**: first token of the specifier list must
/// satisfy `lbegin`. Before the first declarator token, require
/// `brkspace_before`. An optional `= initializer` on a declarator is
/// spaced like any other binary operator. Before a trailing `;` (when
/// there is no body), require `nows_before`.
fn check_global_decl(decl: &GlobalDecl, checker: &mut Checker, scope: Scope) {
    let dspecs = decl.dspecs();
    if let Some(first) = dspecs.syntax().first_token() {
        p::lbegin(checker, &scope, &first, "Declaration must begin its own line.");
    }
    check_decl_specs_and_declarators(decl, checker, scope, false);
}

/// **for-loop declaration initializer** (`for (int i = 0; ...)`): the
/// same specifier/declarator/initializer checks as a global
/// declaration, but the declaration follows `for (` inline rather than
/// beginning its own line, and its terminating `;` is parsed as part of
/// this node rather than as a direct child of `ForStmt` — so it's one
/// of the for-loop's two inner semicolons (`nows_before` +
/// `brkspace_after`, spec.md §4.4) rather than a bare declaration
/// terminator (`nows_before` only).
fn check_for_init_decl(decl: &GlobalDecl, checker: &mut Checker, scope: Scope) {
    check_decl_specs_and_declarators(decl, checker, scope, true);
}

/// Shared specifier/declarator/initializer/trailing-`;` checks for
/// [`check_global_decl`] and [`check_for_init_decl`]; the two differ
/// only in whether the declaration begins its own line and in the
/// spacing required after the terminating `;`.
fn check_decl_specs_and_declarators(
    decl: &GlobalDecl,
    checker: &mut Checker,
    scope: Scope,
    semi_is_for_inner: bool,
) {
    let dspecs = decl.dspecs();
    check_dspecs_qualifiers(dspecs.syntax(), checker, scope);
    check_type_spec_body(dspecs.type_spec(), checker, scope);

    if let Some(declarators) = decl.declarators() {
        for (i, entry) in declarators.entries().enumerate() {
            let declarator = entry.declarator();
            if i == 0 {
                if let Some(first) = declarator.syntax().first_token() {
                    p::brkspace_before(
                        checker,
                        &scope,
                        &first,
                        "Single space expected before declarator.",
                    );
                }
            }
            check_declarator(&declarator, checker, scope);
            if let Some(assign) = entry.assign() {
                p::nbspace_before(checker, &scope, &assign, "Single space expected before '='.");
                p::brkspace_after(checker, &scope, &assign, "Single space expected after '='.");
            }
            if let Some(initializer) = entry.initializer() {
                check_expr(&initializer, checker, scope);
            }
            if let Some(comma) = entry.comma() {
                p::nows_before(checker, &scope, &comma, "No space expected before ','.");
            }
        }
    }

    if let Some(semi) = decl.semicolon() {
        p::nows_before(checker, &scope, &semi, "No space expected before ';'.");
        if semi_is_for_inner {
            p::brkspace_after(checker, &scope, &semi, "Single space expected after ';'.");
        }
    }
}

/// **Function definition / function body**: the function's declarator is
/// walked like any declarator; the opening and closing braces of the
/// body must each satisfy `lbegin`, and the body is walked in a nested
/// scope.
fn check_function_def(def: &FunctionDef, checker: &mut Checker, scope: Scope) {
    let dspecs = def.dspecs();
    if let Some(first) = dspecs.syntax().first_token() {
        p::lbegin(checker, &scope, &first, "Function definition must begin its own line.");
    }
    check_dspecs_qualifiers(dspecs.syntax(), checker, scope);
    check_type_spec_body(dspecs.type_spec(), checker, scope);

    let declarator = def.declarator();
    if let Some(first) = declarator.syntax().first_token() {
        p::brkspace_before(
            checker,
            &scope,
            &first,
            "Single space expected before function declarator.",
        );
    }
    check_declarator(&declarator, checker, scope);

    check_function_body(&def.body(), checker, scope);
}

fn check_function_body(body: &Block, checker: &mut Checker, scope: Scope) {
    if let Some(lbrace) = body.lbrace() {
        p::lbegin(checker, &scope, &lbrace, "Function body's '{' must begin its own line.");
    }
    let inner = scope.nested();
    for stmt in body.stmts() {
        check_stmt(&stmt, checker, inner);
    }
    if let Some(rbrace) = body.rbrace() {
        p::lbegin(checker, &scope, &rbrace, "Function body's '}' must begin its own line.");
    }
}

/// **Block with braces** (anywhere other than a function body): opening
/// brace requires `nbspace_before`; closing brace requires `lbegin`.
/// Statements inside use the nested scope.
fn check_block(block: &Block, checker: &mut Checker, scope: Scope) {
    if let Some(lbrace) = block.lbrace() {
        p::nbspace_before(checker, &scope, &lbrace, "Single space expected before '{'.");
    }
    let inner = scope.nested();
    for stmt in block.stmts() {
        check_stmt(&stmt, checker, inner);
    }
    if let Some(rbrace) = block.rbrace() {
        p::lbegin(checker, &scope, &rbrace, "'}' must begin its own line.");
    }
}

fn check_stmt(stmt: &Stmt, checker: &mut Checker, scope: Scope) {
    match stmt {
        Stmt::Block(block) => check_block(block, checker, scope),
        Stmt::Return(stmt) => {
            let first = stmt.syntax().first_token().expect("return statement has tokens");
            p::lbegin(checker, &scope, &first, "'return' must begin its own line.");
            if let Some(value) = stmt.value() {
                check_expr(&value, checker, scope);
            }
            if let Some(semi) = support::token(stmt.syntax(), SyntaxKind::Semicolon) {
                p::nows_before(checker, &scope, &semi, "No space expected before ';'.");
            }
        }
        Stmt::Break(stmt) => {
            check_keyword_stmt(stmt.syntax(), checker, scope, "'break' must begin its own line.")
        }
        Stmt::Continue(stmt) => check_keyword_stmt(
            stmt.syntax(),
            checker,
            scope,
            "'continue' must begin its own line.",
        ),
        Stmt::Goto(stmt) => {
            let first = stmt.syntax().first_token().expect("goto statement has tokens");
            p::lbegin(checker, &scope, &first, "'goto' must begin its own line.");
            p::any(checker, &scope, stmt.label().syntax());
            if let Some(semi) = support::token(stmt.syntax(), SyntaxKind::Semicolon) {
                p::nows_before(checker, &scope, &semi, "No space expected before ';'.");
            }
        }
        Stmt::Label(label) => {
            let outer = scope.outdented();
            p::lbegin(checker, &outer, label.name().syntax(), "Label must begin its own line.");
            if let Some(colon) = label.colon() {
                p::nows_before(checker, &scope, &colon, "No space expected before ':'.");
            }
        }
        Stmt::If(stmt) => check_if_stmt(stmt, checker, scope),
        Stmt::While(stmt) => check_while_stmt(stmt, checker, scope),
        Stmt::DoWhile(stmt) => check_do_while_stmt(stmt, checker, scope),
        Stmt::For(stmt) => check_for_stmt(stmt, checker, scope),
        Stmt::Switch(stmt) => check_switch_stmt(stmt, checker, scope),
        Stmt::Case(label) => check_case_label(label, checker, scope),
        Stmt::Decl(decl) => check_global_decl(decl, checker, scope),
        Stmt::Expr(stmt) => {
            if let Some(first) = stmt.syntax().first_token() {
                p::lbegin(checker, &scope, &first, "Statement must begin its own line.");
            }
            if let Some(expr) = stmt.expr() {
                check_expr(&expr, checker, scope);
            }
            if let Some(semi) = support::token(stmt.syntax(), SyntaxKind::Semicolon) {
                p::nows_before(checker, &scope, &semi, "No space expected before ';'.");
            }
        }
    }
}

fn check_keyword_stmt(syntax: &SyntaxNode, checker: &mut Checker, scope: Scope, msg: &str) {
    let first = syntax.first_token().expect("keyword statement has tokens");
    p::lbegin(checker, &scope, &first, msg);
    if let Some(semi) = support::token(syntax, SyntaxKind::Semicolon) {
        p::nows_before(checker, &scope, &semi, "No space expected before ';'.");
    }
}

/// **if/while/switch**: keyword requires `lbegin`; `(` requires
/// `nbspace_before` and `nsbrk_after`; condition walked; `)` requires
/// `nows_before`; body walked. For `if` with `else`: if the true branch
/// uses braces, `else` requires `nbspace_before`; otherwise `else`
/// requires `lbegin`.
fn check_if_stmt(stmt: &cfmt_ast::IfStmt, checker: &mut Checker, scope: Scope) {
    let kw = stmt.syntax().first_token().expect("if statement has tokens");
    p::lbegin(checker, &scope, &kw, "'if' must begin its own line.");

    if let Some(lparen) = support::token(stmt.syntax(), SyntaxKind::LParen) {
        p::nbspace_before(checker, &scope, &lparen, "Single space expected before '('.");
        p::nsbrk_after(checker, &scope, &lparen, "No space expected after '('.");
    }
    check_expr(&stmt.condition(), checker, scope);
    if let Some(rparen) = support::token(stmt.syntax(), SyntaxKind::RParen) {
        p::nows_before(checker, &scope, &rparen, "No space expected before ')'.");
    }

    let then_branch = stmt.then_branch();
    let then_is_block = matches!(then_branch, Stmt::Block(_));
    check_stmt(&then_branch, checker, scope);

    if let Some(else_kw) = stmt.else_kw() {
        if then_is_block {
            p::nbspace_before(
                checker,
                &scope,
                &else_kw,
                "There must be single space between '}' and 'else'.",
            );
        } else {
            p::lbegin(checker, &scope, &else_kw, "'else' must begin its own line.");
        }
        if let Some(else_branch) = stmt.else_branch() {
            check_stmt(&else_branch, checker, scope);
        }
    }
}

fn check_while_stmt(stmt: &cfmt_ast::WhileStmt, checker: &mut Checker, scope: Scope) {
    let kw = stmt.syntax().first_token().expect("while statement has tokens");
    p::lbegin(checker, &scope, &kw, "'while' must begin its own line.");
    if let Some(lparen) = support::token(stmt.syntax(), SyntaxKind::LParen) {
        p::nbspace_before(checker, &scope, &lparen, "Single space expected before '('.");
        p::nsbrk_after(checker, &scope, &lparen, "No space expected after '('.");
    }
    check_expr(&stmt.condition(), checker, scope);
    if let Some(rparen) = support::token(stmt.syntax(), SyntaxKind::RParen) {
        p::nows_before(checker, &scope, &rparen, "No space expected before ')'.");
    }
    check_stmt(&stmt.body(), checker, scope);
}

/// **do-while**: `do` requires `lbegin`; body walked; `while` requires
/// `nbspace_before` if the body is braced, else `lbegin`; `(` requires
/// `nbspace_before` and `nsbrk_after`; `)` requires `nows_before`; `;`
/// requires `nows_before`.
fn check_do_while_stmt(stmt: &cfmt_ast::DoWhileStmt, checker: &mut Checker, scope: Scope) {
    let do_kw = stmt.syntax().first_token().expect("do-while statement has tokens");
    p::lbegin(checker, &scope, &do_kw, "'do' must begin its own line.");

    let body = stmt.body();
    let body_is_block = matches!(body, Stmt::Block(_));
    check_stmt(&body, checker, scope);

    if let Some(while_kw) = support::token(stmt.syntax(), SyntaxKind::WhileKw) {
        if body_is_block {
            p::nbspace_before(
                checker,
                &scope,
                &while_kw,
                "There must be single space between '}' and 'while'.",
            );
        } else {
            p::lbegin(checker, &scope, &while_kw, "'while' must begin its own line.");
        }
    }
    if let Some(lparen) = support::token(stmt.syntax(), SyntaxKind::LParen) {
        p::nbspace_before(checker, &scope, &lparen, "Single space expected before '('.");
        p::nsbrk_after(checker, &scope, &lparen, "No space expected after '('.");
    }
    check_expr(&stmt.condition(), checker, scope);
    if let Some(rparen) = support::token(stmt.syntax(), SyntaxKind::RParen) {
        p::nows_before(checker, &scope, &rparen, "No space expected before ')'.");
    }
    if let Some(semi) = support::token(stmt.syntax(), SyntaxKind::Semicolon) {
        p::nows_before(checker, &scope, &semi, "No space expected before ';'.");
    }
}

/// **for**: `for` lbegin; `(` `nbspace_before`; inner `;` tokens require
/// `nows_before` and `brkspace_after`; `)` `nows_before`.
fn check_for_stmt(stmt: &cfmt_ast::ForStmt, checker: &mut Checker, scope: Scope) {
    let kw = stmt.syntax().first_token().expect("for statement has tokens");
    p::lbegin(checker, &scope, &kw, "'for' must begin its own line.");
    if let Some(lparen) = support::token(stmt.syntax(), SyntaxKind::LParen) {
        p::nbspace_before(checker, &scope, &lparen, "Single space expected before '('.");
    }

    if let Some(decl) = stmt.init_decl() {
        check_for_init_decl(&decl, checker, scope);
    } else if let Some(expr) = stmt.init_expr() {
        check_expr(&expr, checker, scope);
    }

    // When the initializer is a declaration, its own terminating `;` is
    // already checked by `check_for_init_decl` (it's consumed inside the
    // `GlobalDecl` node, not as a direct child of `ForStmt`), so only the
    // remaining direct-child semicolon(s) are walked here.
    for semi in semicolons(stmt.syntax()) {
        p::nows_before(checker, &scope, &semi, "No space expected before ';'.");
        p::brkspace_after(checker, &scope, &semi, "Single space expected after ';'.");
    }

    if let Some(cond) = stmt.condition() {
        check_expr(&cond, checker, scope);
    }
    if let Some(incr) = stmt.increment() {
        check_expr(&incr, checker, scope);
    }
    if let Some(rparen) = support::token(stmt.syntax(), SyntaxKind::RParen) {
        p::nows_before(checker, &scope, &rparen, "No space expected before ')'.");
    }
    check_stmt(&stmt.body(), checker, scope);
}

/// Collects the direct `;` token children of a node (used for `for`'s
/// two bare semicolons, which own no wrapping node of their own).
fn semicolons(syntax: &SyntaxNode) -> Vec<SyntaxToken> {
    syntax
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::Semicolon)
        .collect()
}

fn check_switch_stmt(stmt: &cfmt_ast::SwitchStmt, checker: &mut Checker, scope: Scope) {
    let kw = stmt.syntax().first_token().expect("switch statement has tokens");
    p::lbegin(checker, &scope, &kw, "'switch' must begin its own line.");
    if let Some(lparen) = support::token(stmt.syntax(), SyntaxKind::LParen) {
        p::nbspace_before(checker, &scope, &lparen, "Single space expected before '('.");
        p::nsbrk_after(checker, &scope, &lparen, "No space expected after '('.");
    }
    check_expr(&stmt.value(), checker, scope);
    if let Some(rparen) = support::token(stmt.syntax(), SyntaxKind::RParen) {
        p::nows_before(checker, &scope, &rparen, "No space expected before ')'.");
    }
    check_block(&stmt.body(), checker, scope);
}

/// **Case label**: `case` uses `lbegin` under `indent_level − 1`; the
/// case expression's first token requires `nbspace_before`; `:` requires
/// `nows_before`. `default:` has no expression.
fn check_case_label(label: &CaseLabel, checker: &mut Checker, scope: Scope) {
    let outer = scope.outdented();
    let kw = label.syntax().first_token().expect("case label has tokens");
    p::lbegin(checker, &outer, &kw, "Case label must begin its own line.");
    if let Some(value) = label.value() {
        if let Some(first) = value.syntax().first_token() {
            p::nbspace_before(checker, &scope, &first, "Single space expected before case value.");
        }
        check_expr(&value, checker, scope);
    }
    if let Some(colon) = label.colon() {
        p::nows_before(checker, &scope, &colon, "No space expected before ':'.");
    }
}

/// Walks a record or enum type specifier found while checking a
/// declaration-specifier list's type specifier: the tag keyword uses
/// `any`; optional tag identifier `any`; `{` requires `nbspace_before`;
/// each element's leading token requires `lbegin` in a nested scope;
/// element's `;`/`,` requires `nows_before`; `}` requires `lbegin`.
fn check_type_spec_body(type_spec: Option<TypeSpec>, checker: &mut Checker, scope: Scope) {
    match type_spec {
        Some(TypeSpec::Record(record)) => {
            p::any(checker, &scope, &record.keyword());
            if let Some(tag) = record.tag() {
                p::any(checker, &scope, tag.syntax());
            }
            if let Some(lbrace) = record.lbrace() {
                p::nbspace_before(checker, &scope, &lbrace, "Single space expected before '{'.");
                let inner = scope.nested();
                for element in record.elements() {
                    check_record_element(&element, checker, inner);
                }
            }
            if let Some(rbrace) = record.rbrace() {
                p::lbegin(checker, &scope, &rbrace, "'}' must begin its own line.");
            }
        }
        Some(TypeSpec::Enum(e)) => {
            p::any(checker, &scope, &e.keyword());
            if let Some(tag) = e.tag() {
                p::any(checker, &scope, tag.syntax());
            }
            if let Some(lbrace) = e.lbrace() {
                p::nbspace_before(checker, &scope, &lbrace, "Single space expected before '{'.");
                let inner = scope.nested();
                for enumerator in e.enumerators() {
                    check_enumerator(&enumerator, checker, inner);
                }
            }
            if let Some(rbrace) = e.rbrace() {
                p::lbegin(checker, &scope, &rbrace, "'}' must begin its own line.");
            }
        }
        Some(TypeSpec::Basic(basic)) => p::any(checker, &scope, &basic.keyword()),
        Some(TypeSpec::Ident(ident)) => p::any(checker, &scope, ident.name().syntax()),
        None => {}
    }
}

fn check_record_element(element: &RecordElement, checker: &mut Checker, scope: Scope) {
    let dspecs = element.dspecs();
    if let Some(first) = dspecs.syntax().first_token() {
        p::lbegin(checker, &scope, &first, "Record element must begin its own line.");
    }
    check_dspecs_qualifiers(dspecs.syntax(), checker, scope);
    check_type_spec_body(dspecs.type_spec(), checker, scope);

    let declarators = element.declarators();
    for (i, entry) in declarators.entries().enumerate() {
        let declarator = entry.declarator();
        if i == 0 {
            if let Some(first) = declarator.syntax().first_token() {
                p::brkspace_before(checker, &scope, &first, "Single space expected before declarator.");
            }
        }
        check_declarator(&declarator, checker, scope);
        if let Some(comma) = entry.comma() {
            p::nows_before(checker, &scope, &comma, "No space expected before ','.");
        }
    }
    if let Some(semi) = element.semicolon() {
        p::nows_before(checker, &scope, &semi, "No space expected before ';'.");
    }
}

fn check_enumerator(enumerator: &Enumerator, checker: &mut Checker, scope: Scope) {
    p::lbegin(checker, &scope, enumerator.name().syntax(), "Enumerator must begin its own line.");
    if let Some(value) = enumerator.value() {
        check_expr(&value, checker, scope);
    }
}

/// Stamps the keyword token of each storage-class/function/qualifier
/// specifier in a declaration-specifier list with `any`. Each of these is
/// its own wrapped node (not a bare token), so this walks the list's
/// direct child *nodes* rather than its direct child tokens; the type
/// specifier child, if any, is handled separately by
/// [`check_type_spec_body`] so record/enum bodies get dedicated rules.
fn check_dspecs_qualifiers(dspecs: &SyntaxNode, checker: &mut Checker, scope: Scope) {
    for child in dspecs.children() {
        match child.kind() {
            SyntaxKind::StorageClassSpec
            | SyntaxKind::FunctionSpec
            | SyntaxKind::ConstQual
            | SyntaxKind::RestrictQual
            | SyntaxKind::VolatileQual => {
                if let Some(token) = child.first_token() {
                    p::any(checker, &scope, &token);
                }
            }
            _ => {}
        }
    }
}

/// **Declarators**: parenthesized — `(` `nows_after`, `)` `nows_before`;
/// pointer — `*` `nows_after`; function declarator — `(` `nsbrk_after`,
/// each argument's declarator first token `brkspace_before`, arguments'
/// commas `nows_before` + `brkspace_after`, `)` `nows_before`; array —
/// `[` `nows_after`, `]` `nows_before`.
fn check_declarator(declarator: &Declarator, checker: &mut Checker, scope: Scope) {
    match declarator {
        Declarator::Ident(ident) => p::any(checker, &scope, ident.name().syntax()),
        Declarator::NoIdent(_) => {}
        Declarator::Paren(paren) => {
            p::nows_after(checker, &scope, &paren.lparen(), "No space expected after '('.");
            check_declarator(&paren.inner(), checker, scope);
            if let Some(rparen) = paren.rparen() {
                p::nows_before(checker, &scope, &rparen, "No space expected before ')'.");
            }
        }
        Declarator::Pointer(ptr) => {
            p::nows_after(checker, &scope, &ptr.star(), "No space expected after '*'.");
            check_declarator(&ptr.inner(), checker, scope);
        }
        Declarator::Function(func) => {
            check_declarator(&func.base(), checker, scope);
            if let Some(lparen) = func.lparen() {
                p::nsbrk_after(checker, &scope, &lparen, "No space expected after '('.");
            }
            for arg in func.args() {
                if arg.is_void() || arg.is_ellipsis() {
                    if let Some(tok) = arg.syntax().first_token() {
                        p::any(checker, &scope, &tok);
                    }
                } else {
                    if let Some(dspecs) = arg.dspecs() {
                        if let Some(first) = dspecs.syntax().first_token() {
                            p::brkspace_before(checker, &scope, &first, "Single space expected before parameter.");
                        }
                        check_dspecs_qualifiers(dspecs.syntax(), checker, scope);
                        check_type_spec_body(dspecs.type_spec(), checker, scope);
                    }
                    if let Some(decl) = arg.declarator() {
                        check_declarator(&decl, checker, scope);
                    }
                }
                if let Some(comma) = arg.comma() {
                    p::nows_before(checker, &scope, &comma, "No space expected before ','.");
                    p::brkspace_after(checker, &scope, &comma, "Single space expected after ','.");
                }
            }
            if let Some(rparen) = func.rparen() {
                p::nows_before(checker, &scope, &rparen, "No space expected before ')'.");
            }
        }
        Declarator::Array(arr) => {
            check_declarator(&arr.base(), checker, scope);
            if let Some(lbracket) = arr.lbracket() {
                p::nows_after(checker, &scope, &lbracket, "No space expected after '['.");
            }
            if let Some(size) = arr.size() {
                check_expr(&size, checker, scope);
            }
            if let Some(rbracket) = arr.rbracket() {
                p::nows_before(checker, &scope, &rbracket, "No space expected before ']'.");
            }
        }
    }
}

/// **Expressions**: binary — operator requires `nbspace_before` +
/// `brkspace_after`; ternary — both `?` and `:` the same; comma —
/// `nows_before` + `brkspace_after`; function call — `(` `nows_after`,
/// commas `nows_before` + `brkspace_after`, `)` `nows_before`; subscript
/// — `[` `nows_after`, `]` `nows_before`; dereference/address/sizeof/
/// logical-not/bitwise-not/unary-sign/pre-adjustment — operator
/// `nows_after`; member/indirect-member — `.`/`->` `nows_before` +
/// `nsbrk_after`; post-adjustment — `++/--` `nows_before`.
fn check_expr(expr: &Expr, checker: &mut Checker, scope: Scope) {
    match expr {
        Expr::Int(e) => p::any(checker, &scope, e.literal().syntax()),
        Expr::Char(e) => p::any(checker, &scope, e.literal().syntax()),
        Expr::String(e) => p::any(checker, &scope, e.literal().syntax()),
        Expr::Ident(e) => p::any(checker, &scope, e.name().syntax()),
        Expr::Paren(e) => {
            p::any(checker, &scope, &e.lparen());
            check_expr(&e.inner(), checker, scope);
            if let Some(rparen) = e.rparen() {
                p::any(checker, &scope, &rparen);
            }
        }
        Expr::Binary(e) => {
            check_expr(&e.lhs(), checker, scope);
            p::nbspace_before(checker, &scope, &e.op(), "Single space expected before binary operator");
            p::brkspace_after(checker, &scope, &e.op(), "Single space expected after binary operator");
            check_expr(&e.rhs(), checker, scope);
        }
        Expr::Ternary(e) => {
            check_expr(&e.condition(), checker, scope);
            if let Some(q) = e.question() {
                p::nbspace_before(checker, &scope, &q, "Single space expected before '?'.");
                p::brkspace_after(checker, &scope, &q, "Single space expected after '?'.");
            }
            check_expr(&e.then_expr(), checker, scope);
            if let Some(colon) = e.colon() {
                p::nbspace_before(checker, &scope, &colon, "Single space expected before ':'.");
                p::brkspace_after(checker, &scope, &colon, "Single space expected after ':'.");
            }
            check_expr(&e.else_expr(), checker, scope);
        }
        Expr::Comma(e) => {
            let comma = e
                .syntax()
                .children_with_tokens()
                .filter_map(|c| c.into_token())
                .find(|t| t.kind() == SyntaxKind::Comma);
            let operands: Vec<_> = e.operands().collect();
            if let Some(lhs) = operands.first() {
                check_expr(lhs, checker, scope);
            }
            if let Some(comma) = &comma {
                p::nows_before(checker, &scope, comma, "No space expected before ','.");
                p::brkspace_after(checker, &scope, comma, "Single space expected after ','.");
            }
            if let Some(rhs) = operands.get(1) {
                check_expr(rhs, checker, scope);
            }
        }
        Expr::Call(e) => {
            check_expr(&e.callee(), checker, scope);
            if let Some(lparen) = e.lparen() {
                p::nows_after(checker, &scope, &lparen, "No space expected after '('.");
            }
            for arg in e.args() {
                check_expr(&arg.value(), checker, scope);
                if let Some(comma) = arg.comma() {
                    p::nows_before(checker, &scope, &comma, "No space expected before ','.");
                    p::brkspace_after(checker, &scope, &comma, "Single space expected after ','.");
                }
            }
            if let Some(rparen) = e.rparen() {
                p::nows_before(checker, &scope, &rparen, "No space expected before ')'.");
            }
        }
        Expr::Subscript(e) => {
            check_expr(&e.base(), checker, scope);
            if let Some(lbracket) = e.lbracket() {
                p::nows_after(checker, &scope, &lbracket, "No space expected after '['.");
            }
            check_expr(&e.index(), checker, scope);
            if let Some(rbracket) = e.rbracket() {
                p::nows_before(checker, &scope, &rbracket, "No space expected before ']'.");
            }
        }
        Expr::Member(e) => {
            check_expr(&e.base(), checker, scope);
            if let Some(dot) = e.dot() {
                p::nows_before(checker, &scope, &dot, "No space expected before '.'.");
                p::nsbrk_after(checker, &scope, &dot, "No space expected after '.'.");
            }
            p::any(checker, &scope, e.member().syntax());
        }
        Expr::IndirectMember(e) => {
            check_expr(&e.base(), checker, scope);
            if let Some(arrow) = e.arrow() {
                p::nows_before(checker, &scope, &arrow, "No space expected before '->'.");
                p::nsbrk_after(checker, &scope, &arrow, "No space expected after '->'.");
            }
            p::any(checker, &scope, e.member().syntax());
        }
        Expr::Sign(e) => check_prefix_unary(e.syntax(), &e.operand(), checker, scope),
        Expr::Not(e) => check_prefix_unary(e.syntax(), &e.operand(), checker, scope),
        Expr::BitNot(e) => check_prefix_unary(e.syntax(), &e.operand(), checker, scope),
        Expr::Deref(e) => check_prefix_unary(e.syntax(), &e.operand(), checker, scope),
        Expr::AddrOf(e) => check_prefix_unary(e.syntax(), &e.operand(), checker, scope),
        Expr::Sizeof(e) => check_prefix_unary(e.syntax(), &e.operand(), checker, scope),
        Expr::PreAdjust(e) => check_prefix_unary(e.syntax(), &e.operand(), checker, scope),
        Expr::PostAdjust(e) => {
            check_expr(&e.operand(), checker, scope);
            let op = e
                .syntax()
                .last_token()
                .expect("post-adjustment expression must have an operator token");
            p::nows_before(checker, &scope, &op, "No space expected before '++'/'--'.");
        }
    }
}

fn check_prefix_unary(syntax: &SyntaxNode, operand: &Expr, checker: &mut Checker, scope: Scope) {
    let op = syntax
        .first_token()
        .expect("unary expression must have an operator token");
    p::nows_after(checker, &scope, &op, "No space expected after unary operator.");
    check_expr(operand, checker, scope);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, fix: bool) -> Checker {
        let (module, diagnostics) = cfmt_ast::parse(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let mut checker = Checker::new();
        check_module(&module, &mut checker, fix);
        checker
    }

    #[test]
    fn s1_clean_module_has_no_violations() {
        let checker = run("int main(void)\n{\n\treturn 0;\n}\n", false);
        assert!(checker.diagnostics.is_empty(), "{:?}", checker.diagnostics);
    }

    #[test]
    fn s2_space_indent_is_fixed_to_tabs() {
        let source = "int main(void)\n{\n    return 0;\n}\n";
        let checker = run(source, true);
        let fixed = checker.edits.apply(source);
        assert_eq!(fixed, "int main(void)\n{\n\treturn 0;\n}\n");
    }

    #[test]
    fn s3_binary_operator_spacing_is_fixed() {
        let source = "int x = 1+2;\n";
        let checker = run(source, true);
        let fixed = checker.edits.apply(source);
        assert_eq!(fixed, "int x = 1 + 2;\n");
    }

    #[test]
    fn s3_binary_operator_spacing_is_reported() {
        let checker = run("int x = 1+2;\n", false);
        assert!(
            checker
                .diagnostics
                .iter()
                .any(|d| d.message() == "Single space expected before binary operator")
        );
    }

    #[test]
    fn s4_else_after_brace_gets_single_space() {
        let source = "int main(void)\n{\n\tif (1)\n\t{\n\t\ta();\n\t}else {\n\t\tb();\n\t}\n}\n";
        let checker = run(source, false);
        assert!(
            checker
                .diagnostics
                .iter()
                .any(|d| d.message() == "There must be single space between '}' and 'else'.")
        );
    }

    #[test]
    fn every_non_whitespace_token_is_stamped() {
        let source = "int main(void)\n{\n\tint x;\n\treturn x;\n}\n";
        let (module, _) = cfmt_ast::parse(source);
        let mut checker = Checker::new();
        check_module(&module, &mut checker, false);
        for token in module
            .syntax()
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
        {
            if token.kind().is_wspace() || token.kind() == SyntaxKind::Eof {
                continue;
            }
            assert!(
                checker.annotations.was_visited(&token),
                "token {:?} ({:?}) was never stamped",
                token.text(),
                token.kind()
            );
        }
    }
}
