//! Declaration-level Go syntax tree.
//!
//! Only what interface flattening needs is modelled in full: the package
//! clause, imports and type declarations with complete type expressions.
//! Function declarations keep their signature; var/const declarations keep
//! only their names. Bodies and initializers are never represented.

use smallvec::SmallVec;

use crate::Span;

mod display;

/// Identifier with its source location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }

    /// `_`
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }

    /// Exported per Go's rule: first character is an uppercase letter.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// One parsed `.go` file.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceUnit {
    /// Path the file was read from (or a synthetic name for in-memory input).
    pub path: String,
    /// Name from the `package` clause.
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
}

impl SourceUnit {
    /// All type specs of this file, in source order.
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> + '_ {
        self.decls.iter().flat_map(|decl| match decl {
            Decl::Type(specs) => specs.iter(),
            Decl::Func(_) | Decl::Value(_) => [].iter(),
        })
    }

    /// Import whose local name is `name`.
    ///
    /// Blank and dot imports never match.
    pub fn import_named(&self, name: &str) -> Option<&ImportSpec> {
        self.imports
            .iter()
            .find(|import| import.local_name() == Some(name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit local name (`alias "path"`), including `_` and `.`.
    pub name: Option<Ident>,
    /// Unquoted import path.
    pub path: String,
    pub span: Span,
}

impl ImportSpec {
    /// Name this import binds in the importing file.
    ///
    /// Without an explicit name this is the last path segment, which is the
    /// usual (but not guaranteed) package name.
    pub fn local_name(&self) -> Option<&str> {
        match &self.name {
            Some(ident) if ident.name == "_" || ident.name == "." => None,
            Some(ident) => Some(&ident.name),
            None => self.path.rsplit('/').next().filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    /// `type X ...` or a grouped `type ( ... )` block.
    Type(Vec<TypeSpec>),
    Func(FuncDecl),
    Value(ValueDecl),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: Option<FieldList>,
    /// `type A = B`
    pub alias: bool,
    pub ty: TypeExpr,
    pub span: Span,
}

impl TypeSpec {
    /// The interface body, if this spec declares an interface type.
    pub fn as_interface(&self) -> Option<&InterfaceType> {
        match &self.ty {
            TypeExpr::Interface(iface) => Some(iface),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKeyword {
    Var,
    Const,
}

/// `var`/`const` declaration, reduced to the names it binds.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueDecl {
    pub keyword: ValueKeyword,
    pub names: Vec<Ident>,
    pub span: Span,
}

/// Parenthesized list of fields: parameters, results, type parameters or
/// struct fields.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FieldList {
    pub fields: Vec<Field>,
    pub span: Span,
}

impl FieldList {
    pub fn new(fields: Vec<Field>, span: Span) -> Self {
        FieldList { fields, span }
    }

    /// Number of entries as written (`a, b int` is one entry).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of declared values (`a, b int` counts twice; unnamed once).
    pub fn num_fields(&self) -> usize {
        self.fields.iter().map(|f| f.names.len().max(1)).sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Empty for anonymous parameters and embedded struct fields.
    pub names: SmallVec<[Ident; 2]>,
    pub ty: TypeExpr,
    /// Raw struct tag literal, quotes included.
    pub tag: Option<String>,
}

impl Field {
    pub fn unnamed(ty: TypeExpr) -> Self {
        Field {
            names: SmallVec::new(),
            ty,
            tag: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncType {
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    pub results: Option<FieldList>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType {
    pub elems: Vec<InterfaceElem>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InterfaceElem {
    Method(MethodSpec),
    /// Embedded type or type-set term, exactly as written.
    Embed(TypeExpr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodSpec {
    pub name: Ident,
    pub ty: FuncType,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Possibly qualified, possibly instantiated type name.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    pub package: Option<Ident>,
    pub name: Ident,
    pub args: Vec<TypeExpr>,
}

/// A type expression as written.
///
/// `Clone` is implemented by hand so that copying a deeply nested type grows
/// the stack like the parser that built it.
#[derive(Debug, PartialEq)]
pub enum TypeExpr {
    Named(NamedType),
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// `[len]T`; `len` is the raw length expression (`...` for `[...]T`).
    Array {
        len: String,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(Box<FuncType>),
    Struct(FieldList),
    Interface(InterfaceType),
    /// `A | B` in a constraint.
    Union(Vec<TypeExpr>),
    /// `~T`
    Tilde(Box<TypeExpr>),
    Paren(Box<TypeExpr>),
    /// `...T`, only valid as the final parameter type.
    Variadic(Box<TypeExpr>),
}

impl Clone for TypeExpr {
    fn clone(&self) -> Self {
        mane_stack::with_stack(|| match self {
            TypeExpr::Named(named) => TypeExpr::Named(named.clone()),
            TypeExpr::Pointer(inner) => TypeExpr::Pointer(inner.clone()),
            TypeExpr::Slice(elem) => TypeExpr::Slice(elem.clone()),
            TypeExpr::Array { len, elem } => TypeExpr::Array {
                len: len.clone(),
                elem: elem.clone(),
            },
            TypeExpr::Map { key, value } => TypeExpr::Map {
                key: key.clone(),
                value: value.clone(),
            },
            TypeExpr::Chan { dir, elem } => TypeExpr::Chan {
                dir: *dir,
                elem: elem.clone(),
            },
            TypeExpr::Func(func) => TypeExpr::Func(func.clone()),
            TypeExpr::Struct(fields) => TypeExpr::Struct(fields.clone()),
            TypeExpr::Interface(iface) => TypeExpr::Interface(iface.clone()),
            TypeExpr::Union(terms) => TypeExpr::Union(terms.clone()),
            TypeExpr::Tilde(inner) => TypeExpr::Tilde(inner.clone()),
            TypeExpr::Paren(inner) => TypeExpr::Paren(inner.clone()),
            TypeExpr::Variadic(inner) => TypeExpr::Variadic(inner.clone()),
        })
    }
}

impl TypeExpr {
    /// Unqualified, uninstantiated name.
    pub fn simple(name: &str) -> TypeExpr {
        TypeExpr::Named(NamedType {
            package: None,
            name: Ident::new(name, Span::DUMMY),
            args: Vec::new(),
        })
    }

    /// `package.name`
    pub fn qualified(package: &str, name: &str) -> TypeExpr {
        TypeExpr::Named(NamedType {
            package: Some(Ident::new(package, Span::DUMMY)),
            name: Ident::new(name, Span::DUMMY),
            args: Vec::new(),
        })
    }

    /// Short word for the kind of type, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeExpr::Named(_) => "named type",
            TypeExpr::Pointer(_) => "pointer",
            TypeExpr::Slice(_) => "slice",
            TypeExpr::Array { .. } => "array",
            TypeExpr::Map { .. } => "map",
            TypeExpr::Chan { .. } => "channel",
            TypeExpr::Func(_) => "func",
            TypeExpr::Struct(_) => "struct",
            TypeExpr::Interface(_) => "interface",
            TypeExpr::Union(_) => "union",
            TypeExpr::Tilde(_) => "approximation",
            TypeExpr::Paren(inner) => inner.kind_name(),
            TypeExpr::Variadic(_) => "variadic",
        }
    }
}
