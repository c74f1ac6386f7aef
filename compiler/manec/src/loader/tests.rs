use std::path::Path;
use std::sync::Barrier;
use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::testing::MemorySource;

const IO: &str = "package io\n\ntype Reader interface{ Read(p []byte) (n int, err error) }\n";

fn loader() -> PackageLoader<MemorySource> {
    PackageLoader::new(
        MemorySource::new()
            .with_package("io", &[("io.go", IO)])
            .with_package("file=main.go", &[("main.go", "package main\n")])
            .with_failure("broken", "disk on fire"),
    )
}

#[test]
fn test_file_key_format() {
    assert_eq!(file_key(Path::new("pkg/a.go")), "file=pkg/a.go");
}

#[test]
fn test_file_key_is_canonical() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let pkg = dir.path().join("greet");
    std::fs::create_dir(&pkg).unwrap_or_else(|e| panic!("{e}"));
    let file = pkg.join("greet.go");
    std::fs::write(&file, "package greet\ntype G interface{ Hi() }\n")
        .unwrap_or_else(|e| panic!("{e}"));

    let dotted = dir.path().join("greet/./greet.go");
    let roundabout = dir.path().join("greet/../greet/greet.go");
    assert_eq!(file_key(&dotted), file_key(&file));
    assert_eq!(file_key(&roundabout), file_key(&file));

    let loader = PackageLoader::new(FsSource::new(Vec::new()));
    let first = loader.load_by_file(&dotted).unwrap_or_else(|e| panic!("{e}"));
    let second = loader.load_by_file(&roundabout).unwrap_or_else(|e| panic!("{e}"));
    assert!(first.ptr_eq(&second));
    assert_eq!(loader.cached(), 1);
}

#[test]
fn test_load_caches_by_key() {
    let loader = loader();
    let first = loader.load("io").unwrap_or_else(|e| panic!("{e}"));
    let second = loader.load("io").unwrap_or_else(|e| panic!("{e}"));
    assert!(first.ptr_eq(&second));
    assert_eq!(first.name, "io");
    assert_eq!(loader.source().loads("io"), 1);
    assert_eq!(loader.cached(), 1);
}

#[test]
fn test_load_by_file_uses_file_key() {
    let loader = loader();
    let handle = loader
        .load_by_file(Path::new("main.go"))
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(handle.name, "main");
    assert_eq!(loader.source().loads("file=main.go"), 1);
}

#[test]
fn test_zero_packages_is_an_error() {
    let loader = loader();
    let err = loader.load("missing").err();
    assert!(matches!(err, Some(LoadError::NoPackages { ref key }) if key == "missing"));
    assert_eq!(loader.cached(), 0);
}

#[test]
fn test_source_error_surfaces_and_is_not_cached() {
    let loader = loader();
    for attempt in 1..=2 {
        match loader.load("broken") {
            Err(LoadError::Source { key, source }) => {
                assert_eq!(key, "broken");
                assert!(source.to_string().contains("disk on fire"));
            }
            other => panic!("expected a source error, got {other:?}"),
        }
        assert_eq!(loader.source().loads("broken"), attempt);
    }
}

#[test]
fn test_get_never_loads() {
    let loader = loader();
    assert!(matches!(
        loader.get("io"),
        Err(LoadError::NotLoaded { ref key }) if key == "io"
    ));
    assert_eq!(loader.source().total_loads(), 0);

    let loaded = loader.load("io").unwrap_or_else(|e| panic!("{e}"));
    let got = loader.get("io").unwrap_or_else(|e| panic!("{e}"));
    assert!(loaded.ptr_eq(&got));
    assert_eq!(loader.source().loads("io"), 1);
}

#[test]
fn test_concurrent_loads_of_one_key_load_once() {
    const THREADS: usize = 16;
    let loader = PackageLoader::new(
        MemorySource::new()
            .with_package("io", &[("io.go", IO)])
            .with_delay(Duration::from_millis(20)),
    );
    let barrier = Barrier::new(THREADS);

    let handles: Vec<PackageHandle> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    loader.load("io")
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|w| match w.join() {
                Ok(Ok(handle)) => handle,
                Ok(Err(e)) => panic!("load failed: {e}"),
                Err(_) => panic!("worker panicked"),
            })
            .collect()
    });

    assert_eq!(loader.source().loads("io"), 1);
    assert!(handles.iter().all(|h| h.ptr_eq(&handles[0])));
}

#[test]
fn test_distinct_keys_load_independently() {
    let loader = PackageLoader::new(
        MemorySource::new()
            .with_package("a", &[("a.go", "package a\n")])
            .with_package("b", &[("b.go", "package b\n")]),
    );
    std::thread::scope(|scope| {
        for key in ["a", "b", "a", "b"] {
            let loader = &loader;
            scope.spawn(move || loader.load(key).map(|_| ()));
        }
    });
    assert_eq!(loader.source().loads("a"), 1);
    assert_eq!(loader.source().loads("b"), 1);
    assert_eq!(loader.cached(), 2);
}
