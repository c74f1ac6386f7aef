//! Go-syntax rendering of type expressions and field lists.

use std::fmt::{self, Display, Formatter};

use super::{
    ChanDir, Field, FieldList, FuncType, InterfaceElem, InterfaceType, NamedType, TypeExpr,
};

fn join<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for NamedType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(package) = &self.package {
            write!(f, "{}.", package.name)?;
        }
        f.write_str(&self.name.name)?;
        if !self.args.is_empty() {
            f.write_str("[")?;
            join(f, &self.args, ", ")?;
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        mane_stack::with_stack(|| self.fmt_inner(f))
    }
}

impl TypeExpr {
    fn fmt_inner(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(named) => write!(f, "{named}"),
            TypeExpr::Pointer(inner) => write!(f, "*{inner}"),
            TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeExpr::Func(func) => write!(f, "func{func}"),
            TypeExpr::Struct(fields) => {
                if fields.is_empty() {
                    return f.write_str("struct{}");
                }
                f.write_str("struct{ ")?;
                join(f, &fields.fields, "; ")?;
                f.write_str(" }")
            }
            TypeExpr::Interface(iface) => write!(f, "{iface}"),
            TypeExpr::Union(terms) => join(f, terms, " | "),
            TypeExpr::Tilde(inner) => write!(f, "~{inner}"),
            TypeExpr::Paren(inner) => write!(f, "({inner})"),
            TypeExpr::Variadic(inner) => write!(f, "...{inner}"),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&name.name)?;
        }
        if !self.names.is_empty() {
            f.write_str(" ")?;
        }
        write!(f, "{}", self.ty)?;
        if let Some(tag) = &self.tag {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

/// Entries only, without delimiters: `a, b int, c string`.
impl Display for FieldList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        join(f, &self.fields, ", ")
    }
}

impl FieldList {
    /// `[T any, U comparable]`
    pub fn render_type_params(&self) -> String {
        format!("[{self}]")
    }

    /// `(a int, b string)`
    pub fn render_params(&self) -> String {
        format!("({self})")
    }

    /// Result list as it follows a signature: `T` when there is a single
    /// unnamed result, `(…)` otherwise.
    pub fn render_results(&self) -> String {
        match self.fields.as_slice() {
            [only] if only.names.is_empty() => only.ty.to_string(),
            _ => format!("({self})"),
        }
    }
}

/// `[TP](params) results`, i.e. everything after `func` or a method name.
impl Display for FuncType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(type_params) = &self.type_params {
            f.write_str(&type_params.render_type_params())?;
        }
        f.write_str(&self.params.render_params())?;
        if let Some(results) = &self.results {
            write!(f, " {}", results.render_results())?;
        }
        Ok(())
    }
}

impl Display for InterfaceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.elems.is_empty() {
            return f.write_str("interface{}");
        }
        f.write_str("interface{ ")?;
        for (i, elem) in self.elems.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match elem {
                InterfaceElem::Method(method) => write!(f, "{}{}", method.name.name, method.ty)?,
                InterfaceElem::Embed(ty) => write!(f, "{ty}")?,
            }
        }
        f.write_str(" }")
    }
}
