//! Package sources: where the loader gets packages from.

use std::path::{Path, PathBuf};

use mane_ir::{Package, SourceUnit};
use tracing::{debug, trace};

use super::FILE_KEY_PREFIX;

/// Loads packages for a key. Called at most once per key by the loader.
///
/// Returning an empty list means nothing matched the key.
pub trait PackageSource: Send + Sync {
    fn load(&self, key: &str) -> Result<Vec<Package>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Every diagnostic of one file, rendered as `path:line:col: message`.
    #[error("syntax errors in {path}:\n  {}", .diagnostics.join("\n  "))]
    Parse {
        path: String,
        diagnostics: Vec<String>,
    },
}

impl SourceError {
    #[cold]
    fn io(path: &Path, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// Reads packages from Go source trees on disk.
///
/// `file=<path>` keys load the directory of that file, restricted to files of
/// the same package. Other keys are import paths looked up under each root
/// in order; keys starting with `./`, `../` or `/` are directories.
#[derive(Clone, Debug, Default)]
pub struct FsSource {
    roots: Vec<PathBuf>,
    include_tests: bool,
}

impl FsSource {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        FsSource {
            roots,
            include_tests: false,
        }
    }

    /// Also read `_test.go` files.
    #[must_use]
    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Directory an import path refers to, if any.
    fn find_import(&self, import_path: &str) -> Option<PathBuf> {
        let direct = Path::new(import_path);
        if import_path.starts_with("./")
            || import_path.starts_with("../")
            || direct.is_absolute()
        {
            return direct.is_dir().then(|| direct.to_owned());
        }
        self.roots
            .iter()
            .map(|root| root.join(import_path))
            .find(|dir| dir.is_dir())
    }

    /// `.go` files of `dir` in file-name order, honoring `include_tests`.
    fn go_files(&self, dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
        let entries = std::fs::read_dir(dir).map_err(|e| SourceError::io(dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SourceError::io(dir, e))?;
            let path = entry.path();
            let is_go = path.extension().is_some_and(|ext| ext == "go");
            if !is_go || !path.is_file() {
                continue;
            }
            if !self.include_tests && is_test_file(&path) {
                continue;
            }
            files.push(path);
        }
        files.sort();
        Ok(files)
    }

    fn load_file_package(&self, file: &Path) -> Result<Vec<Package>, SourceError> {
        let named = parse_file(file)?;
        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
            _ => PathBuf::from("."),
        };
        let mut files = self.go_files(&dir)?;
        // The named file is always part of its package, even a `_test.go`.
        files.retain(|path| !same_file(path, file));
        files.push(file.to_owned());
        let id = dir.display().to_string();
        read_package(&id, &dir, files, Some(named.package.name))
    }
}

impl PackageSource for FsSource {
    fn load(&self, key: &str) -> Result<Vec<Package>, SourceError> {
        if let Some(path) = key.strip_prefix(FILE_KEY_PREFIX) {
            return self.load_file_package(Path::new(path));
        }
        let Some(dir) = self.find_import(key) else {
            debug!(key, roots = self.roots.len(), "import path not found under any root");
            return Ok(Vec::new());
        };
        let files = self.go_files(&dir)?;
        read_package(key, &dir, files, None)
    }
}

/// Parse every file, keeping those whose package clause is `package`.
/// `None` takes the package of the first file.
fn read_package(
    id: &str,
    dir: &Path,
    mut files: Vec<PathBuf>,
    package: Option<String>,
) -> Result<Vec<Package>, SourceError> {
    files.sort();
    files.dedup();

    let mut name = package;
    let mut units = Vec::new();
    for path in &files {
        let unit = parse_file(path)?;
        let wanted = name.get_or_insert_with(|| unit.package.name.clone());
        if unit.package.name == *wanted {
            units.push(unit);
        } else {
            trace!(file = %path.display(), package = %unit.package.name, "skipping file of another package");
        }
    }

    match name {
        Some(name) if !units.is_empty() => {
            debug!(id, %name, files = units.len(), "package read");
            Ok(vec![Package::new(id, name, units).with_dir(dir)])
        }
        _ => Ok(Vec::new()),
    }
}

fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("_test.go"))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn parse_file(path: &Path) -> Result<SourceUnit, SourceError> {
    let source = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    let display = path.display().to_string();
    let output = mane_parse::parse(&source, &display);
    if output.has_errors() {
        return Err(SourceError::Parse {
            diagnostics: output
                .errors
                .iter()
                .map(|error| error.render(&display, &source))
                .collect(),
            path: display,
        });
    }
    Ok(output.unit)
}
