//! Classification of interface members.

use mane_ir::{InterfaceElem, MethodSpec, NamedType, TypeExpr};

/// What one interface element contributes to the flattened method set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Member<'a> {
    /// `Name(params) results`
    DirectMethod(&'a MethodSpec),
    /// `Name` or `Name[Args]`: an interface of the same package.
    LocalEmbed { name: &'a str },
    /// `alias.Name` or `alias.Name[Args]`: an interface of another package.
    ForeignEmbed { alias: &'a str, name: &'a str },
    /// Unions, `~T`, pointers and every other element shape.
    Unsupported(&'a TypeExpr),
}

impl<'a> Member<'a> {
    /// Type arguments on embeds are dropped; they are never instantiated.
    pub fn classify(elem: &'a InterfaceElem) -> Self {
        match elem {
            InterfaceElem::Method(method) => Member::DirectMethod(method),
            InterfaceElem::Embed(ty) => Member::embed(ty),
        }
    }

    fn embed(ty: &'a TypeExpr) -> Self {
        match ty {
            TypeExpr::Named(NamedType {
                package: None,
                name,
                ..
            }) => Member::LocalEmbed { name: &name.name },
            TypeExpr::Named(NamedType {
                package: Some(alias),
                name,
                ..
            }) => Member::ForeignEmbed {
                alias: &alias.name,
                name: &name.name,
            },
            TypeExpr::Paren(inner) => Member::embed(inner),
            TypeExpr::Pointer(_)
            | TypeExpr::Slice(_)
            | TypeExpr::Array { .. }
            | TypeExpr::Map { .. }
            | TypeExpr::Chan { .. }
            | TypeExpr::Func(_)
            | TypeExpr::Struct(_)
            | TypeExpr::Interface(_)
            | TypeExpr::Union(_)
            | TypeExpr::Tilde(_)
            | TypeExpr::Variadic(_) => Member::Unsupported(ty),
        }
    }
}

#[cfg(test)]
mod tests;
