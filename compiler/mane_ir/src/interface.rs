//! Flattened interfaces: the resolver's output.

use std::fmt;

use crate::ast::{FieldList, FuncType};
use crate::PackageHandle;

/// One method of a flattened interface.
#[derive(Clone, Debug, PartialEq)]
pub struct Method {
    pub name: String,
    /// Package the method was declared in. For inherited methods this is the
    /// embedded interface's package, not the embedding one.
    pub package: PackageHandle,
    pub type_params: Option<FieldList>,
    /// Always present, possibly empty.
    pub params: FieldList,
    pub results: Option<FieldList>,
}

impl Method {
    /// Build a method from its declared signature, copying every list verbatim.
    pub fn from_signature(name: &str, package: &PackageHandle, ty: &FuncType) -> Self {
        Method {
            name: name.to_owned(),
            package: package.clone(),
            type_params: ty.type_params.clone(),
            params: ty.params.clone(),
            results: ty.results.clone(),
        }
    }

    /// Number of results, `0` when the method returns nothing.
    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, FieldList::len)
    }

    /// `Name[TP](params) results`
    pub fn signature(&self) -> String {
        let mut out = self.name.clone();
        if let Some(type_params) = &self.type_params {
            out.push_str(&type_params.render_type_params());
        }
        out.push_str(&self.params.render_params());
        if let Some(results) = &self.results {
            out.push(' ');
            out.push_str(&results.render_results());
        }
        out
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

/// An interface declaration with every embed expanded in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Interface {
    pub name: String,
    pub package: PackageHandle,
    /// Type parameters exactly as declared; never instantiated.
    pub type_params: Option<FieldList>,
    /// Declaration order, embeds expanded depth-first. Duplicates are kept.
    pub methods: Vec<Method>,
}

impl Interface {
    pub fn is_generic(&self) -> bool {
        self.type_params.as_ref().is_some_and(|tp| !tp.is_empty())
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}
