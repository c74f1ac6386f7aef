use mane_ir::{InterfaceElem, TypeExpr};
use pretty_assertions::assert_eq;

use crate::{parse, ParseErrorKind, MAX_TYPE_DEPTH};

/// Parse `type X <source>` and return the declared type.
fn ty(source: &str) -> TypeExpr {
    let file = format!("package p\ntype X {source}\n");
    let output = parse(&file, "ty.go");
    assert!(!output.has_errors(), "errors: {:?}", output.errors);
    let ty = match output.unit.type_specs().next() {
        Some(spec) => spec.ty.clone(),
        None => panic!("no type spec in {file:?}"),
    };
    ty
}

fn round_trip(source: &str) {
    assert_eq!(ty(source).to_string(), source);
}

#[test]
fn test_composite_types() {
    for source in [
        "*string",
        "[]byte",
        "[...]int",
        "[4][]string",
        "map[string][]int",
        "map[K]map[V]struct{}",
        "chan int",
        "chan<- error",
        "<-chan struct{}",
        "chan<- chan int",
        "func()",
        "func(int, string) error",
        "io.Reader",
        "maps.Map[K, V]",
        "(int)",
    ] {
        round_trip(source);
    }
}

#[test]
fn test_parameter_grouping() {
    round_trip("func(a, b int, c string) (n int, err error)");
    round_trip("func(ctx context.Context, args ...string)");
    round_trip("func(...interface{})");
    round_trip("func(p []byte) (int, error)");
    round_trip("func(f func(int) bool) func() int");
}

#[test]
fn test_name_followed_by_array_parameter() {
    round_trip("func(buf [4]byte)");
    round_trip("func(buf [N]byte)");
    round_trip("func(x T[int])");
    round_trip("func(T[int])");
}

#[test]
fn test_mixed_named_and_unnamed_parameters_fail() {
    let output = parse("package p\ntype X func(a int, []byte)\n", "ty.go");
    assert!(output.has_errors());
}

#[test]
fn test_struct_fields() {
    round_trip("struct{}");
    round_trip("struct{ Name string `json:\"name\"`; io.Reader; *Base; List[T]; Buf [4]byte }");
    round_trip("struct{ A, B int; inner struct{ C bool } }");
}

#[test]
fn test_interface_elements() {
    let iface = ty(
        "interface {\n\tio.Reader\n\tBase[T]\n\t~int | ~string\n\tGet[K comparable](key K) (T, bool)\n\tClose() error\n}",
    );
    let TypeExpr::Interface(iface) = iface else {
        panic!("expected interface");
    };
    let kinds: Vec<_> = iface
        .elems
        .iter()
        .map(|elem| match elem {
            InterfaceElem::Method(m) => format!("method {}{}", m.name.name, m.ty),
            InterfaceElem::Embed(ty) => format!("embed {ty}"),
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "embed io.Reader",
            "embed Base[T]",
            "embed ~int | ~string",
            "method Get[K comparable](key K) (T, bool)",
            "method Close() error",
        ]
    );
}

#[test]
fn test_empty_interface() {
    round_trip("interface{}");
    round_trip("interface{ String() string }");
}

#[test]
fn test_missing_type_reports_expected_type() {
    let output = parse("package p\ntype X map[string]\n", "ty.go");
    assert!(output.has_errors());
    assert_eq!(output.errors[0].kind.code(), "E1002");
}

#[test]
fn test_deeply_nested_pointer() {
    let depth = MAX_TYPE_DEPTH - 1;
    let source = format!("{}int", "*".repeat(depth));
    let mut current = ty(&source);
    let mut seen = 0;
    while let TypeExpr::Pointer(inner) = current {
        current = *inner;
        seen += 1;
    }
    assert_eq!(seen, depth);
}

#[test]
fn test_nesting_limit_is_an_error() {
    let source = format!(
        "package p\ntype Deep interface {{\n\tM(p {}int)\n}}\ntype Ok interface{{ N() }}\n",
        "*".repeat(20_000)
    );
    let output = parse(&source, "deep.go");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, ParseErrorKind::TypeTooDeep(MAX_TYPE_DEPTH));
    assert_eq!(output.errors[0].kind.code(), "E1006");
    // Recovery resumes at the next declaration.
    let names: Vec<_> = output.unit.type_specs().map(|s| s.name.name.as_str()).collect();
    assert_eq!(names, ["Ok"]);
}
