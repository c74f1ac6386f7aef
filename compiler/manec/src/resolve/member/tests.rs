use mane_ir::{InterfaceType, TypeSpec};
use pretty_assertions::assert_eq;

use super::*;

fn interface(body: &str) -> InterfaceType {
    let source = format!("package p\ntype X interface {{\n{body}\n}}\n");
    let output = mane_parse::parse(&source, "x.go");
    assert!(!output.has_errors(), "{:?}", output.errors);
    let spec: Option<TypeSpec> = output.unit.type_specs().next().cloned();
    match spec.as_ref().and_then(TypeSpec::as_interface) {
        Some(iface) => iface.clone(),
        None => panic!("no interface"),
    }
}

fn describe(member: Member<'_>) -> String {
    match member {
        Member::DirectMethod(method) => format!("method {}", method.name.name),
        Member::LocalEmbed { name } => format!("local {name}"),
        Member::ForeignEmbed { alias, name } => format!("foreign {alias}.{name}"),
        Member::Unsupported(ty) => format!("unsupported {ty}"),
    }
}

#[test]
fn test_classifies_every_shape() {
    let iface = interface(
        "\tRead(p []byte) (int, error)\n\tCloser\n\tio.Writer\n\tBase[T]\n\tfmt.Stringer\n\t(Sized)\n\t~int | ~string\n\t*Node\n\tint\n",
    );
    let members: Vec<_> = iface
        .elems
        .iter()
        .map(|elem| describe(Member::classify(elem)))
        .collect();
    assert_eq!(
        members,
        [
            "method Read",
            "local Closer",
            "foreign io.Writer",
            "local Base",
            "foreign fmt.Stringer",
            "local Sized",
            "unsupported ~int | ~string",
            "unsupported *Node",
            "local int",
        ]
    );
}
