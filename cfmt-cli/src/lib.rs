//! A style checker and auto-formatter for a C-family language.
//!
//! If you're here looking for the actual checking logic, it lives in
//! [`check`] (the whitespace primitives, the AST walker, and the line
//! pass); this crate only re-exports the `cfmt-*` family of crates
//! under shorter names for the `cfmt` binary to use, the same way the
//! teacher's own top-level crate re-exports its `wdl-*` family.
//!
//! * `syntax` - lexing, the lossless concrete syntax tree, and
//!   diagnostics. A re-export of `cfmt-syntax`.
//! * `ast` - the typed abstract syntax tree facade over the CST. A
//!   re-export of `cfmt-ast`.
//! * `check` - the whitespace-constraint checker and fixer. A
//!   re-export of `cfmt-check`.
//!
//! # Examples
//!
//! ```rust
//! use cfmt::check;
//!
//! let result = check::check("int main(void)\n{\n\treturn 0;\n}\n", false);
//! assert!(result.is_clean());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

#[doc(inline)]
pub use cfmt_ast as ast;
#[doc(inline)]
pub use cfmt_check as check;
#[doc(inline)]
pub use cfmt_syntax as syntax;
