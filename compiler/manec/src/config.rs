//! Run configuration.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::loader::FsSource;

/// Environment variable holding extra import roots, in the platform's
/// path-list syntax.
pub const PATH_ENV: &str = "MANE_PATH";

/// How a qualified embed `alias.Name` is turned into a load key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ForeignKeyMode {
    /// Use `alias` itself. Correct whenever the alias is the import path,
    /// as for single-segment standard packages.
    #[default]
    Alias,
    /// Look `alias` up in the declaring file's imports and use that import
    /// path, falling back to the alias.
    ImportTable,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for a resolve run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Import-path search roots, in lookup order.
    pub roots: Vec<PathBuf>,
    /// Read `_test.go` files.
    pub include_tests: bool,
    pub foreign_keys: ForeignKeyMode,
    pub output: OutputFormat,
    /// Resolve targets in parallel.
    pub parallel: bool,
    /// Report per-target progress on stderr.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            roots: Vec::new(),
            include_tests: false,
            foreign_keys: ForeignKeyMode::Alias,
            output: OutputFormat::Text,
            parallel: true,
            verbose: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    #[must_use]
    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }

    #[must_use]
    pub fn with_foreign_keys(mut self, mode: ForeignKeyMode) -> Self {
        self.foreign_keys = mode;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Filesystem source for these roots.
    pub fn source(&self) -> FsSource {
        FsSource::new(self.roots.clone()).with_tests(self.include_tests)
    }

    /// Apply one command-line flag. Returns `false` for an unknown flag.
    pub fn apply_flag(&mut self, flag: &str) -> bool {
        if let Some(dir) = flag.strip_prefix("--root=") {
            self.roots.push(PathBuf::from(dir));
            return true;
        }
        match flag {
            "--tests" => self.include_tests = true,
            "--resolve-imports" => self.foreign_keys = ForeignKeyMode::ImportTable,
            "--json" => self.output = OutputFormat::Json,
            "--no-parallel" => self.parallel = false,
            "-v" | "--verbose" => self.verbose = true,
            _ => return false,
        }
        true
    }
}

/// `MANE_PATH` entries (empty ones skipped), then `cwd`.
pub fn default_roots(mane_path: Option<OsString>, cwd: Option<PathBuf>) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = mane_path
        .map(|paths| {
            std::env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default();
    roots.extend(cwd);
    roots
}
