use mane_ir::{Decl, FieldList, ValueKeyword};
use pretty_assertions::assert_eq;

use super::*;

const SIMPLE: &str = r#"package greet

import (
	"context"
	"fmt"
)

// Greeter says hello.
type Greeter interface {
	Greet(ctx context.Context, name string) (string, error)
}

type LoudGreeter interface {
	Greeter
	Shout(name string) string
}

type greeter struct{ prefix string }

func (g *greeter) Greet(ctx context.Context, name string) (string, error) {
	if name == "" {
		return "", fmt.Errorf("empty name")
	}
	return g.prefix + name, nil
}

var Default = &greeter{prefix: "hi "}

const (
	A = iota
	B
)
"#;

fn parse_clean(source: &str) -> SourceUnit {
    let output = parse(source, "test.go");
    assert!(
        !output.has_errors(),
        "unexpected errors: {:?}",
        output.errors
    );
    output.unit
}

#[test]
fn test_parse_whole_file() {
    let unit = parse_clean(SIMPLE);
    assert_eq!(unit.path, "test.go");
    assert_eq!(unit.package.name, "greet");

    let imports: Vec<_> = unit.imports.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(imports, ["context", "fmt"]);

    let types: Vec<_> = unit.type_specs().map(|s| s.name.name.as_str()).collect();
    assert_eq!(types, ["Greeter", "LoudGreeter", "greeter"]);
    assert_eq!(unit.decls.len(), 6);
}

#[test]
fn test_func_bodies_are_skipped() {
    let unit = parse_clean(SIMPLE);
    let func = unit
        .decls
        .iter()
        .find_map(|d| match d {
            Decl::Func(func) => Some(func),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no func decl"));
    assert_eq!(func.name.name, "Greet");
    assert_eq!(
        func.recv.as_ref().map(FieldList::render_params).as_deref(),
        Some("(g *greeter)")
    );
    assert_eq!(
        func.ty.to_string(),
        "(ctx context.Context, name string) (string, error)"
    );
}

#[test]
fn test_value_decls_keep_names() {
    let unit = parse_clean(SIMPLE);
    let values: Vec<_> = unit
        .decls
        .iter()
        .filter_map(|d| match d {
            Decl::Value(value) => Some(value),
            _ => None,
        })
        .collect();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].keyword, ValueKeyword::Var);
    assert_eq!(values[0].names[0].name, "Default");
    assert_eq!(values[1].keyword, ValueKeyword::Const);
    let consts: Vec<_> = values[1].names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(consts, ["A", "B"]);
}

#[test]
fn test_missing_package_clause() {
    let output = parse("type A int\n", "a.go");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, ParseErrorKind::MissingPackageClause);
    // The rest of the file is still parsed.
    assert_eq!(output.unit.type_specs().count(), 1);
}

#[test]
fn test_recovers_at_next_declaration() {
    let source = "package p\n\ntype Broken interface {\n\tRead(p []byte\n}\n\ntype Ok interface {\n\tClose() error\n}\n";
    let output = parse(source, "p.go");
    assert!(output.has_errors());
    let types: Vec<_> = output
        .unit
        .type_specs()
        .map(|s| s.name.name.as_str())
        .collect();
    assert_eq!(types, ["Ok"]);
}

#[test]
fn test_unclosed_function_body() {
    let output = parse("package p\nfunc f() {\n\treturn\n", "p.go");
    assert_eq!(
        output.errors.first().map(|e| &e.kind),
        Some(&ParseErrorKind::UnclosedDelimiter("function body"))
    );
}

#[test]
fn test_error_render_uses_line_and_column() {
    let source = "package p\n\ntype A interface {\n\t42\n}\n";
    let output = parse(source, "p.go");
    let error = output
        .errors
        .first()
        .unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(error.line_col(source), (4, 2));
    assert_eq!(
        error.render("p.go", source),
        "p.go:4:2: expected type, found number [E1002]"
    );
}

#[test]
fn test_import_forms() {
    let unit = parse_clean(
        "package p\nimport \"io\"\nimport (\n\tstdctx \"context\"\n\t_ \"embed\"\n\t. `strings`\n)\n",
    );
    let imports: Vec<_> = unit
        .imports
        .iter()
        .map(|i| (i.path.as_str(), i.local_name()))
        .collect();
    assert_eq!(
        imports,
        [
            ("io", Some("io")),
            ("context", Some("stdctx")),
            ("embed", None),
            ("strings", None),
        ]
    );
}

#[test]
fn test_empty_source() {
    let output = parse("", "empty.go");
    assert_eq!(output.errors.len(), 1);
    assert!(output.unit.decls.is_empty());
}
