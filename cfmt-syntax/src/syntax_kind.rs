//! Syntax kind definitions for the cfmt concrete syntax tree.
//!
//! This module defines a flat `SyntaxKind` enum containing every token and
//! node kind used in the tree. The enum is intentionally flat (rather than
//! nested) to satisfy rowan's requirement for a `#[repr(u16)]` type; node vs.
//! token is distinguished only by where a kind is used in the tree, not by
//! the enum itself.

use SyntaxKind::*;

/// All syntax kinds for cfmt tokens and nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    // =========================================================================
    // Special
    // =========================================================================
    /// A node wrapping tokens the parser could not make sense of.
    Error,
    /// The end-of-file marker token.
    Eof,

    // =========================================================================
    // Trivia
    // =========================================================================
    /// A run of ` ` characters.
    Space,
    /// A run of `\t` characters.
    Tab,
    /// A single `\n` (or `\r\n`) line break.
    Newline,
    /// A `//...` or `/*...*/` comment.
    Comment,
    /// A `#...` preprocessor directive, up to (not including) its line break.
    Preproc,

    // =========================================================================
    // Literals and identifiers
    // =========================================================================
    /// An integer literal.
    IntLiteral,
    /// A character literal.
    CharLiteral,
    /// A string literal.
    StringLiteral,
    /// An identifier (may later be recognized as a typedef name).
    Ident,

    // =========================================================================
    // Keywords
    // =========================================================================
    TypedefKw,
    ExternKw,
    StaticKw,
    AutoKw,
    RegisterKw,
    InlineKw,
    ConstKw,
    RestrictKw,
    VolatileKw,
    VoidKw,
    CharKw,
    ShortKw,
    IntKw,
    LongKw,
    FloatKw,
    DoubleKw,
    SignedKw,
    UnsignedKw,
    StructKw,
    UnionKw,
    EnumKw,
    IfKw,
    ElseKw,
    WhileKw,
    DoKw,
    ForKw,
    SwitchKw,
    CaseKw,
    DefaultKw,
    BreakKw,
    ContinueKw,
    ReturnKw,
    GotoKw,
    SizeofKw,

    // =========================================================================
    // Punctuators
    // =========================================================================
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Colon,
    Question,
    Dot,
    Arrow,
    Ellipsis,

    Assign,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,

    // =========================================================================
    // Nodes: declarations
    // =========================================================================
    Module,
    GlobalDecl,
    FunctionDef,
    StorageClassSpec,
    FunctionSpec,
    DeclSpecList,
    SpecifierQualifierList,

    // =========================================================================
    // Nodes: type specifiers and qualifiers
    // =========================================================================
    BasicTypeSpec,
    IdentTypeSpec,
    RecordTypeSpec,
    RecordElement,
    EnumTypeSpec,
    Enumerator,
    ConstQual,
    RestrictQual,
    VolatileQual,

    // =========================================================================
    // Nodes: declarators
    // =========================================================================
    IdentDeclarator,
    NoIdentDeclarator,
    ParenDeclarator,
    PointerDeclarator,
    FunctionDeclarator,
    FunctionArg,
    ArrayDeclarator,
    DeclaratorList,
    DeclaratorListEntry,

    // =========================================================================
    // Nodes: statements
    // =========================================================================
    Block,
    ReturnStmt,
    BreakStmt,
    ContinueStmt,
    GotoStmt,
    IfStmt,
    WhileStmt,
    DoWhileStmt,
    ForStmt,
    SwitchStmt,
    CaseLabel,
    GotoLabel,
    ExprStmt,

    // =========================================================================
    // Nodes: expressions
    // =========================================================================
    IntExpr,
    CharExpr,
    StringExpr,
    IdentExpr,
    ParenExpr,
    BinaryExpr,
    TernaryExpr,
    CommaExpr,
    CallExpr,
    CallArg,
    SubscriptExpr,
    DerefExpr,
    AddrOfExpr,
    SizeofExpr,
    MemberExpr,
    IndirectMemberExpr,
    SignExpr,
    NotExpr,
    BitNotExpr,
    PreAdjustExpr,
    PostAdjustExpr,

    /// Sentinel marking the last variant; never produced by the lexer or
    /// parser. Used only to size the raw-kind lookup table.
    __Last,
}

impl SyntaxKind {
    /// True if this kind is trivia: whitespace, comments, or preprocessor
    /// directives. Trivia participates in adjacency checks the same way as
    /// whitespace (`is_wspace` in the style-checking vocabulary).
    pub fn is_wspace(self) -> bool {
        matches!(self, Space | Tab | Newline | Comment | Preproc)
    }

    /// True if this kind is horizontal whitespace only (space or tab).
    pub fn is_horizontal_wspace(self) -> bool {
        matches!(self, Space | Tab)
    }

    /// True if this kind is a keyword.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TypedefKw
                | ExternKw
                | StaticKw
                | AutoKw
                | RegisterKw
                | InlineKw
                | ConstKw
                | RestrictKw
                | VolatileKw
                | VoidKw
                | CharKw
                | ShortKw
                | IntKw
                | LongKw
                | FloatKw
                | DoubleKw
                | SignedKw
                | UnsignedKw
                | StructKw
                | UnionKw
                | EnumKw
                | IfKw
                | ElseKw
                | WhileKw
                | DoKw
                | ForKw
                | SwitchKw
                | CaseKw
                | DefaultKw
                | BreakKw
                | ContinueKw
                | ReturnKw
                | GotoKw
                | SizeofKw
        )
    }

    /// True if this kind is a basic (built-in) type specifier keyword.
    pub fn is_basic_type_keyword(self) -> bool {
        matches!(
            self,
            VoidKw | CharKw | ShortKw | IntKw | LongKw | FloatKw | DoubleKw | SignedKw | UnsignedKw
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Lookup table for converting raw `u16` values back into `SyntaxKind`.
///
/// Kept as an explicit table (rather than an `unsafe` transmute) so that a
/// malformed green tree fails a bounds check instead of producing undefined
/// behavior.
const KIND_TABLE: &[SyntaxKind] = &[
    Error,
    Eof,
    Space,
    Tab,
    Newline,
    Comment,
    Preproc,
    IntLiteral,
    CharLiteral,
    StringLiteral,
    Ident,
    TypedefKw,
    ExternKw,
    StaticKw,
    AutoKw,
    RegisterKw,
    InlineKw,
    ConstKw,
    RestrictKw,
    VolatileKw,
    VoidKw,
    CharKw,
    ShortKw,
    IntKw,
    LongKw,
    FloatKw,
    DoubleKw,
    SignedKw,
    UnsignedKw,
    StructKw,
    UnionKw,
    EnumKw,
    IfKw,
    ElseKw,
    WhileKw,
    DoKw,
    ForKw,
    SwitchKw,
    CaseKw,
    DefaultKw,
    BreakKw,
    ContinueKw,
    ReturnKw,
    GotoKw,
    SizeofKw,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Colon,
    Question,
    Dot,
    Arrow,
    Ellipsis,
    Assign,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Module,
    GlobalDecl,
    FunctionDef,
    StorageClassSpec,
    FunctionSpec,
    DeclSpecList,
    SpecifierQualifierList,
    BasicTypeSpec,
    IdentTypeSpec,
    RecordTypeSpec,
    RecordElement,
    EnumTypeSpec,
    Enumerator,
    ConstQual,
    RestrictQual,
    VolatileQual,
    IdentDeclarator,
    NoIdentDeclarator,
    ParenDeclarator,
    PointerDeclarator,
    FunctionDeclarator,
    FunctionArg,
    ArrayDeclarator,
    DeclaratorList,
    DeclaratorListEntry,
    Block,
    ReturnStmt,
    BreakStmt,
    ContinueStmt,
    GotoStmt,
    IfStmt,
    WhileStmt,
    DoWhileStmt,
    ForStmt,
    SwitchStmt,
    CaseLabel,
    GotoLabel,
    ExprStmt,
    IntExpr,
    CharExpr,
    StringExpr,
    IdentExpr,
    ParenExpr,
    BinaryExpr,
    TernaryExpr,
    CommaExpr,
    CallExpr,
    CallArg,
    SubscriptExpr,
    DerefExpr,
    AddrOfExpr,
    SizeofExpr,
    MemberExpr,
    IndirectMemberExpr,
    SignExpr,
    NotExpr,
    BitNotExpr,
    PreAdjustExpr,
    PostAdjustExpr,
    __Last,
];

/// The cfmt rowan [`Language`](rowan::Language).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {}

impl rowan::Language for Lang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        let index = raw.0 as usize;
        assert!(index < KIND_TABLE.len(), "invalid raw syntax kind {index}");
        KIND_TABLE[index]
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_kind_round_trips() {
        for (index, &kind) in KIND_TABLE.iter().enumerate() {
            assert_eq!(kind as u16, index as u16);
            let raw: rowan::SyntaxKind = kind.into();
            assert_eq!(Lang::kind_from_raw(raw), kind);
        }
    }

    #[test]
    fn trivia_classification() {
        assert!(Space.is_wspace());
        assert!(Space.is_horizontal_wspace());
        assert!(Comment.is_wspace());
        assert!(!Comment.is_horizontal_wspace());
        assert!(!Ident.is_wspace());
    }
}
