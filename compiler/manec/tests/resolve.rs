//! End-to-end resolution over the Go tree in `tests/fixtures/src`.

use std::path::{Path, PathBuf};

use manec::commands::{render_outcomes, resolve_targets};
use manec::{Config, ErrorKind, ForeignKeyMode, FsSource, OutputFormat, PackageLoader, Resolver};
use mane_ir::Interface;
use pretty_assertions::assert_eq;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/src")
}

fn loader() -> PackageLoader<FsSource> {
    PackageLoader::new(FsSource::new(vec![fixtures()]))
}

fn names(interfaces: &[Interface]) -> Vec<(&str, Vec<&str>)> {
    interfaces
        .iter()
        .map(|iface| (iface.name.as_str(), iface.method_names()))
        .collect()
}

#[test]
fn greet_file_flattens_foreign_embeds() {
    let loader = loader();
    let greet = fixtures().join("greet/greet.go");
    let interfaces = Resolver::new(&loader)
        .resolve_file(&greet)
        .unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(
        names(&interfaces),
        [
            ("Reader", vec!["Next"]),
            ("Greeter", vec!["Read", "Close", "SayHi", "SayBye"]),
            ("Namer", vec!["Name"]),
        ]
    );

    let greeter = &interfaces[1];
    let packages: Vec<_> = greeter.methods.iter().map(|m| m.package.name.as_str()).collect();
    assert_eq!(packages, ["io", "io", "greet", "greet"]);
    let greet_dir = fixtures()
        .join("greet")
        .canonicalize()
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(greeter.package.id, greet_dir.display().to_string());

    let hi = greeter.method("SayHi").unwrap_or_else(|| panic!("no SayHi"));
    assert_eq!((hi.params.num_fields(), hi.result_count()), (1, 2));
    let bye = greeter.method("SayBye").unwrap_or_else(|| panic!("no SayBye"));
    assert_eq!((bye.params.num_fields(), bye.result_count()), (1, 1));
    // The local Reader, not io.Reader.
    assert_eq!(bye.signature(), "SayBye(name *string) Reader");
}

#[test]
fn go_test_files_only_with_tests_enabled() {
    let greet = fixtures().join("greet/greet.go");

    let without = loader();
    let interfaces = Resolver::new(&without)
        .resolve_file(&greet)
        .unwrap_or_else(|e| panic!("{e}"));
    assert!(interfaces.iter().all(|i| i.name != "fakeGreeter"));

    let with = PackageLoader::new(Config::default().with_root(fixtures()).with_tests(true).source());
    let interfaces = Resolver::new(&with)
        .resolve_file(&greet)
        .unwrap_or_else(|e| panic!("{e}"));
    let fake = interfaces
        .iter()
        .find(|i| i.name == "fakeGreeter")
        .unwrap_or_else(|| panic!("fakeGreeter missing"));
    assert_eq!(fake.method_names(), ["Read", "Close", "SayHi", "SayBye", "Calls"]);
}

#[test]
fn each_package_loads_once_across_targets() {
    let loader = loader();
    let greet = fixtures().join("greet/greet.go").display().to_string();
    let targets = vec![greet.clone(), "io".to_owned(), greet, "io".to_owned()];
    let outcomes = resolve_targets(&loader, &Config::default(), &targets);

    assert!(outcomes.iter().all(|o| o.result.is_ok()));
    // greet (by file) and io, nothing else.
    assert_eq!(loader.cached(), 2);
    let first = outcomes[0].result.as_ref().unwrap_or_else(|e| panic!("{e}"));
    let io = outcomes[1].result.as_ref().unwrap_or_else(|e| panic!("{e}"));
    assert!(first[1].methods[0].package.ptr_eq(&io[0].package));
}

#[test]
fn generic_interfaces_keep_type_params() {
    let loader = loader();
    let interfaces = Resolver::new(&loader)
        .resolve_package("collections")
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        names(&interfaces),
        [
            ("Iterator", vec!["Next"]),
            ("Collection", vec!["Next", "Len", "Contains", "Map"]),
        ]
    );

    let collection = &interfaces[1];
    assert!(collection.is_generic());
    assert_eq!(
        collection
            .type_params
            .as_ref()
            .map(|tp| tp.render_type_params())
            .as_deref(),
        Some("[T comparable]")
    );
    let signatures: Vec<_> = collection.methods.iter().map(|m| m.signature()).collect();
    assert_eq!(
        signatures,
        [
            "Next() (T, bool)",
            "Len() int",
            "Contains(v T) bool",
            "Map[U any](f func(T) U) []U",
        ]
    );
}

#[test]
fn type_set_interface_fails_its_package() {
    let loader = loader();
    let error = Resolver::new(&loader)
        .resolve_package("constraints")
        .err()
        .unwrap_or_else(|| panic!("Number should not flatten"));
    assert_eq!(error.kind(), ErrorKind::UnsupportedEmbedding);
    assert_eq!(error.interface_path(), ["Number"]);
}

#[test]
fn embedding_cycle_is_reported() {
    let loader = loader();
    let error = Resolver::new(&loader)
        .resolve_package("cyclic")
        .err()
        .unwrap_or_else(|| panic!("expected a cycle"));
    assert_eq!(error.kind(), ErrorKind::Cycle);
    assert_eq!(
        error.root_cause().to_string(),
        "embedding cycle: cyclic.Ping -> cyclic.Pong -> cyclic.Ping"
    );
}

#[test]
fn import_table_reaches_dotted_import_paths() {
    let loader = loader();
    let by_alias = Resolver::new(&loader).resolve_package("app");
    assert!(matches!(by_alias, Err(ref e) if e.kind() == ErrorKind::Load));

    let interfaces = Resolver::new(&loader)
        .with_foreign_keys(ForeignKeyMode::ImportTable)
        .resolve_package("app")
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(names(&interfaces), [("Feed", vec!["Next", "Close", "Topic"])]);
    let next = &interfaces[0].methods[0];
    assert_eq!(next.package.id, "example.com/stream");
    // Type arguments of the embed are not substituted.
    assert_eq!(next.signature(), "Next() (T, error)");
}

#[test]
fn unknown_package_is_a_load_error() {
    let loader = loader();
    let error = Resolver::new(&loader)
        .resolve_package("does/not/exist")
        .err()
        .unwrap_or_else(|| panic!("expected failure"));
    assert_eq!(error.kind(), ErrorKind::Load);
    assert_eq!(error.to_string(), "no packages found for `does/not/exist`");
}

#[test]
fn text_rendering_of_a_target() {
    let loader = loader();
    let outcomes = resolve_targets(&loader, &Config::default(), &["io".to_owned()]);
    let text = render_outcomes(&outcomes, OutputFormat::Text);
    assert!(text.starts_with("// io\ntype Reader interface {\n"), "{text}");
    assert!(text.contains(
        "type ReadWriteCloser interface {\n\
         \tRead(p []byte) (n int, err error) // io\n\
         \tWrite(p []byte) (n int, err error) // io\n\
         \tClose() error // io\n\
         }\n"
    ));
}
