use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::config::ForeignKeyMode;
use crate::testing::MemorySource;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn source() -> MemorySource {
    MemorySource::new()
        .with_package(
            "io",
            &[(
                "io.go",
                "package io\ntype Reader interface{ Read(p []byte) (int, error) }\ntype Closer interface{ Close() error }\n",
            )],
        )
        .with_package(
            "file=a.go",
            &[("a.go", "package a\ntype A interface {\n\tio.Reader\n\tA()\n}\n")],
        )
        .with_package(
            "b",
            &[("b.go", "package b\ntype B interface {\n\tio.Reader\n\tio.Closer\n}\n")],
        )
        .with_package("broken", &[("c.go", "package broken\ntype C interface{ Missing }\n")])
        .with_package("none", &[("n.go", "package none\nfunc F() {}\n")])
}

#[test]
fn test_parse_args() {
    let options = parse_resolve_args(&args(&["--root=/src", "a.go", "--json", "io", "-v"]))
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(options.targets, ["a.go", "io"]);
    assert_eq!(options.config.roots[0], PathBuf::from("/src"));
    assert_eq!(options.config.output, OutputFormat::Json);
    assert!(options.config.verbose);
}

#[test]
fn test_parse_args_errors() {
    assert_eq!(
        parse_resolve_args(&args(&["--frobnicate", "io"])),
        Err("unknown option '--frobnicate'".to_owned())
    );
    assert_eq!(
        parse_resolve_args(&args(&["--json"])),
        Err("missing target".to_owned())
    );
}

#[test]
fn test_target_kinds() {
    assert_eq!(Target::parse("x/y.go"), Target::File(PathBuf::from("x/y.go")));
    assert_eq!(Target::parse("MAIN.GO"), Target::File(PathBuf::from("MAIN.GO")));
    assert_eq!(Target::parse("io"), Target::Package("io".to_owned()));
    assert_eq!(
        Target::parse("example.com/go"),
        Target::Package("example.com/go".to_owned())
    );
}

#[test]
fn test_parallel_targets_keep_order_and_share_loads() {
    let loader = PackageLoader::new(source().with_delay(Duration::from_millis(5)));
    let targets = args(&["b", "a.go", "broken", "io", "b"]);
    let outcomes = resolve_targets(&loader, &Config::default(), &targets);

    let labels: Vec<_> = outcomes.iter().map(|o| o.target.as_str()).collect();
    assert_eq!(labels, ["b", "a.go", "broken", "io", "b"]);
    let ok: Vec<_> = outcomes.iter().map(|o| o.result.is_ok()).collect();
    assert_eq!(ok, [true, true, false, true, true]);

    let source = loader.source();
    assert_eq!(source.loads("io"), 1);
    assert_eq!(source.loads("b"), 1);
    assert_eq!(source.loads("file=a.go"), 1);
}

#[test]
fn test_sequential_matches_parallel() {
    let targets = args(&["b", "a.go", "io"]);
    let render = |config: &Config| {
        let loader = PackageLoader::new(source());
        render_outcomes(&resolve_targets(&loader, config, &targets), OutputFormat::Text)
    };
    assert_eq!(
        render(&Config::default()),
        render(&Config::default().with_parallel(false))
    );
}

#[test]
fn test_render_text_outcomes() {
    let loader = PackageLoader::new(source());
    let outcomes = resolve_targets(
        &loader,
        &Config::default(),
        &args(&["a.go", "none", "broken"]),
    );
    assert_eq!(
        render_outcomes(&outcomes, OutputFormat::Text),
        "// a.go\n\
         type A interface {\n\
         \tRead(p []byte) (int, error) // io\n\
         \tA() // a\n\
         }\n\
         \n\
         // none\n\
         // no interfaces\n\
         \n\
         // broken\n\
         error[E3002]: in interface `C`: interface `Missing` not found in package `broken`\n"
    );
}

#[test]
fn test_render_json_outcomes() {
    let loader = PackageLoader::new(source());
    let outcomes = resolve_targets(&loader, &Config::default(), &args(&["b", "broken"]));
    let json = render_outcomes(&outcomes, OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_else(|e| panic!("{e}"));

    let names: Vec<_> = value[0]["interfaces"][0]["methods"]
        .as_array()
        .map(|methods| methods.iter().map(|m| m["name"].clone()).collect())
        .unwrap_or_default();
    assert_eq!(names, ["Read", "Close"]);
    assert_eq!(value[1]["error"]["code"], "E3002");
    assert_eq!(value[1]["error"]["interface_path"][0], "C");
}

#[test]
fn test_import_table_mode_from_config() {
    let loader = PackageLoader::new(MemorySource::new().with_package(
        "app",
        &[(
            "app.go",
            "package app\nimport x \"example.com/x\"\ntype T interface{ x.U }\n",
        )],
    ));
    let config = Config::default().with_foreign_keys(ForeignKeyMode::ImportTable);
    let outcomes = resolve_targets(&loader, &config, &args(&["app"]));
    assert!(outcomes[0].result.is_err());
    assert_eq!(loader.source().loads("example.com/x"), 1);
    assert_eq!(loader.source().loads("x"), 0);
}
