use super::*;

fn empty(id: &str) -> Package {
    Package::new(id, "demo", Vec::new())
}

#[test]
fn test_handle_equality_is_identity() {
    let a = PackageHandle::new(empty("example.com/demo"));
    let b = a.clone();
    let c = PackageHandle::new(empty("example.com/demo"));

    assert_eq!(a, b);
    assert!(a.ptr_eq(&b));
    // Same contents, different load
    assert_ne!(a, c);
}

#[test]
fn test_handle_derefs_to_package() {
    let handle = PackageHandle::new(empty("example.com/demo").with_dir("/src/demo"));
    assert_eq!(handle.name, "demo");
    assert_eq!(handle.dir.as_deref(), Some(std::path::Path::new("/src/demo")));
    assert_eq!(
        format!("{handle:?}"),
        "PackageHandle(demo @ example.com/demo)"
    );
}
