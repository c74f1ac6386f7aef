//! Rendering resolved interfaces as Go-like text or JSON.

use std::fmt::Write as _;

use mane_ir::{FieldList, Interface, Method};
use serde::Serialize;

use crate::resolve::ResolveError;

/// One flattened method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodReport {
    pub name: String,
    /// Name of the declaring package.
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_params: Option<String>,
    pub params: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    pub signature: String,
}

impl From<&Method> for MethodReport {
    fn from(method: &Method) -> Self {
        MethodReport {
            name: method.name.clone(),
            package: method.package.name.clone(),
            type_params: method.type_params.as_ref().map(FieldList::render_type_params),
            params: method.params.render_params(),
            results: method.results.as_ref().map(FieldList::render_results),
            signature: method.signature(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InterfaceReport {
    pub name: String,
    pub package: String,
    pub package_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_params: Option<String>,
    pub methods: Vec<MethodReport>,
}

impl From<&Interface> for InterfaceReport {
    fn from(iface: &Interface) -> Self {
        InterfaceReport {
            name: iface.name.clone(),
            package: iface.package.name.clone(),
            package_id: iface.package.id.clone(),
            type_params: iface.type_params.as_ref().map(FieldList::render_type_params),
            methods: iface.methods.iter().map(MethodReport::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub kind: &'static str,
    pub message: String,
    /// Interfaces being flattened when the error occurred, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interface_path: Vec<String>,
}

impl From<&ResolveError> for ErrorReport {
    fn from(error: &ResolveError) -> Self {
        let kind = error.kind();
        ErrorReport {
            code: kind.code(),
            kind: kind.name(),
            message: error.to_string(),
            interface_path: error
                .interface_path()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Outcome of one command-line target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub target: String,
    pub interfaces: Vec<InterfaceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl TargetReport {
    pub fn new(target: &str, result: &Result<Vec<Interface>, ResolveError>) -> Self {
        match result {
            Ok(interfaces) => TargetReport {
                target: target.to_owned(),
                interfaces: interfaces.iter().map(InterfaceReport::from).collect(),
                error: None,
            },
            Err(error) => TargetReport {
                target: target.to_owned(),
                interfaces: Vec::new(),
                error: Some(ErrorReport::from(error)),
            },
        }
    }
}

/// Go-like declaration of a flattened interface, one method per line, each
/// annotated with its declaring package:
///
/// ```text
/// type ReadCloser interface {
/// 	Read(p []byte) (n int, err error) // io
/// 	Close() error // io
/// }
/// ```
pub fn render_text(iface: &Interface) -> String {
    let mut out = format!("type {}", iface.name);
    if let Some(type_params) = &iface.type_params {
        out.push_str(&type_params.render_type_params());
    }
    if iface.methods.is_empty() {
        out.push_str(" interface {}");
        return out;
    }
    out.push_str(" interface {\n");
    for method in &iface.methods {
        let _ = writeln!(out, "\t{} // {}", method.signature(), method.package.name);
    }
    out.push('}');
    out
}

/// `error[E3002]: message`
pub fn render_error(error: &ResolveError) -> String {
    format!("error[{}]: {error}", error.kind().code())
}

pub fn render_json(reports: &[TargetReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}
