//! Lexer for the cfmt concrete syntax tree.
//!
//! This module provides a logos-based lexer that produces tokens suitable
//! for use with rowan's [`GreenNodeBuilder`](rowan::GreenNodeBuilder). All
//! tokens, including whitespace and comments (trivia), are explicitly
//! represented so that the resulting tree is lossless: concatenating every
//! token's text reproduces the source byte for byte.

use logos::Logos;

use crate::SyntaxKind;
use crate::SyntaxKind::*;

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// The exact source text of the token.
    pub text: &'src str,
    /// The byte offset of the start of the token.
    pub start: u32,
}

/// Skips to the end of a block comment, consuming up to and including the
/// closing `*/`. Block comments cannot be matched with a single regex
/// because of the need to find the closing delimiter.
fn comment_block(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    let rest = lex.remainder();
    if let Some(end) = rest.find("*/") {
        lex.bump(end + 2);
    } else {
        lex.bump(rest.len());
    }
    true
}

/// Internal logos token enum.
///
/// Mapped onto [`SyntaxKind`] by [`tokenize`]. Kept separate because logos
/// needs to own the discriminant type during lexing.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
enum LogosToken {
    #[regex(r"[ ]+")]
    Space,
    #[regex(r"\t+")]
    Tab,
    #[regex(r"\r?\n")]
    Newline,
    #[regex(r"//[^\n]*")]
    #[token("/*", comment_block)]
    Comment,
    #[regex(r"#[^\n]*")]
    Preproc,

    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*")]
    #[regex(r"[0-9]+[uUlL]*")]
    IntLiteral,
    #[regex(r"'([^'\\]|\\.)*'")]
    CharLiteral,
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("...")]
    Ellipsis,
    #[token("->")]
    Arrow,
    #[token("==")]
    Eq,
    #[token("!=")]
    Neq,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token("=")]
    Assign,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
}

impl From<LogosToken> for SyntaxKind {
    fn from(value: LogosToken) -> Self {
        match value {
            LogosToken::Space => Space,
            LogosToken::Tab => Tab,
            LogosToken::Newline => Newline,
            LogosToken::Comment => Comment,
            LogosToken::Preproc => Preproc,
            LogosToken::IntLiteral => IntLiteral,
            LogosToken::CharLiteral => CharLiteral,
            LogosToken::StringLiteral => StringLiteral,
            LogosToken::Ident => Ident,
            LogosToken::Ellipsis => Ellipsis,
            LogosToken::Arrow => Arrow,
            LogosToken::Eq => Eq,
            LogosToken::Neq => Neq,
            LogosToken::Le => Le,
            LogosToken::Ge => Ge,
            LogosToken::AndAnd => AndAnd,
            LogosToken::OrOr => OrOr,
            LogosToken::Shl => Shl,
            LogosToken::Shr => Shr,
            LogosToken::PlusPlus => PlusPlus,
            LogosToken::MinusMinus => MinusMinus,
            LogosToken::LBrace => LBrace,
            LogosToken::RBrace => RBrace,
            LogosToken::LParen => LParen,
            LogosToken::RParen => RParen,
            LogosToken::LBracket => LBracket,
            LogosToken::RBracket => RBracket,
            LogosToken::Semicolon => Semicolon,
            LogosToken::Comma => Comma,
            LogosToken::Colon => Colon,
            LogosToken::Question => Question,
            LogosToken::Dot => Dot,
            LogosToken::Assign => Assign,
            LogosToken::Lt => Lt,
            LogosToken::Gt => Gt,
            LogosToken::Bang => Bang,
            LogosToken::Amp => Amp,
            LogosToken::Pipe => Pipe,
            LogosToken::Caret => Caret,
            LogosToken::Tilde => Tilde,
            LogosToken::Plus => Plus,
            LogosToken::Minus => Minus,
            LogosToken::Star => Star,
            LogosToken::Slash => Slash,
            LogosToken::Percent => Percent,
        }
    }
}

/// Keywords recognized on top of the generic `Ident` token.
///
/// Checked by string comparison after lexing, the conventional approach for
/// keyword recognition with `logos` when keywords share the identifier
/// regex.
fn keyword(text: &str) -> Option<SyntaxKind> {
    Some(match text {
        "typedef" => TypedefKw,
        "extern" => ExternKw,
        "static" => StaticKw,
        "auto" => AutoKw,
        "register" => RegisterKw,
        "inline" => InlineKw,
        "const" => ConstKw,
        "restrict" => RestrictKw,
        "volatile" => VolatileKw,
        "void" => VoidKw,
        "char" => CharKw,
        "short" => ShortKw,
        "int" => IntKw,
        "long" => LongKw,
        "float" => FloatKw,
        "double" => DoubleKw,
        "signed" => SignedKw,
        "unsigned" => UnsignedKw,
        "struct" => StructKw,
        "union" => UnionKw,
        "enum" => EnumKw,
        "if" => IfKw,
        "else" => ElseKw,
        "while" => WhileKw,
        "do" => DoKw,
        "for" => ForKw,
        "switch" => SwitchKw,
        "case" => CaseKw,
        "default" => DefaultKw,
        "break" => BreakKw,
        "continue" => ContinueKw,
        "return" => ReturnKw,
        "goto" => GotoKw,
        "sizeof" => SizeofKw,
        _ => return None,
    })
}

/// Lexes `source` into a flat sequence of tokens, including trivia.
///
/// The concatenation of every returned token's `text` is exactly `source`.
/// Any byte sequence the lexer cannot classify is emitted as a one-byte
/// `Error` token so that lexing never fails outright; callers treat stray
/// `Error` tokens as a lex diagnostic.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = LogosToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = &source[span.clone()];
        let kind = match result {
            Ok(raw) => {
                if raw == LogosToken::Ident {
                    keyword(text).unwrap_or(Ident)
                } else {
                    raw.into()
                }
            }
            Err(()) => Error,
        };
        tokens.push(Token {
            kind,
            text,
            start: span.start as u32,
        });
    }

    tokens.push(Token {
        kind: Eof,
        text: "",
        start: source.len() as u32,
    });

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_source() {
        let source = "int main(void)\n{\n\treturn 0;\n}\n";
        let tokens = tokenize(source);
        let rebuilt: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn classifies_keywords_and_identifiers() {
        let tokens = tokenize("int xyz");
        assert_eq!(tokens[0].kind, IntKw);
        assert_eq!(tokens[2].kind, Ident);
    }

    #[test]
    fn splits_space_and_tab_runs() {
        let tokens = tokenize("\t\t  x");
        assert_eq!(tokens[0].kind, Tab);
        assert_eq!(tokens[0].text, "\t\t");
        assert_eq!(tokens[1].kind, Space);
        assert_eq!(tokens[1].text, "  ");
    }

    #[test]
    fn line_comment_stops_before_newline() {
        let tokens = tokenize("// hi\nx");
        assert_eq!(tokens[0].kind, Comment);
        assert_eq!(tokens[0].text, "// hi");
        assert_eq!(tokens[1].kind, Newline);
    }

    #[test]
    fn block_comment_spans_multiple_lines() {
        let tokens = tokenize("/* a\nb */x");
        assert_eq!(tokens[0].kind, Comment);
        assert_eq!(tokens[0].text, "/* a\nb */");
    }
}
