//! mane IR - syntax model and resolved interface types.
//!
//! This crate holds the data shared by every mane stage:
//! - Spans for source locations
//! - Tokens and `TokenList` for lexer output
//! - The declaration-level Go AST (`SourceUnit`, `TypeSpec`, `TypeExpr`, ...)
//! - `Package` and the cached `PackageHandle`
//! - Flattened `Interface` / `Method` values produced by the resolver
//!
//! Type expressions render back to Go syntax through `Display`.

pub mod ast;
mod interface;
mod package;
mod span;
mod token;

pub use ast::{
    ChanDir, Decl, Field, FieldList, FuncDecl, FuncType, Ident, ImportSpec, InterfaceElem,
    InterfaceType, MethodSpec, NamedType, SourceUnit, TypeExpr, TypeSpec, ValueDecl,
    ValueKeyword,
};
pub use interface::{Interface, Method};
pub use package::{Package, PackageHandle};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
