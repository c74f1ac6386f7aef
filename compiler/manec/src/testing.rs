//! Test support: an in-memory [`PackageSource`] that counts its loads.
//!
//! ```ignore
//! let source = MemorySource::new()
//!     .with_package("io", &[("io.go", "package io\ntype Closer interface{ Close() error }\n")]);
//! let loader = PackageLoader::new(source);
//! loader.load("io")?;
//! assert_eq!(loader.source().loads("io"), 1);
//! ```

use std::time::Duration;

use mane_ir::Package;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::loader::{PackageSource, SourceError};

/// Packages held as Go source text, parsed on every load.
#[derive(Default)]
pub struct MemorySource {
    packages: FxHashMap<String, Vec<(String, String)>>,
    failures: FxHashMap<String, String>,
    loads: Mutex<FxHashMap<String, usize>>,
    delay: Option<Duration>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `files` (path, source) under `key`.
    #[must_use]
    pub fn with_package(mut self, key: &str, files: &[(&str, &str)]) -> Self {
        let files = files
            .iter()
            .map(|(path, source)| ((*path).to_owned(), (*source).to_owned()))
            .collect();
        self.packages.insert(key.to_owned(), files);
        self
    }

    /// Make every load of `key` fail with an I/O error carrying `message`.
    #[must_use]
    pub fn with_failure(mut self, key: &str, message: &str) -> Self {
        self.failures.insert(key.to_owned(), message.to_owned());
        self
    }

    /// Sleep this long inside every load, to widen race windows.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `key` reached this source.
    pub fn loads(&self, key: &str) -> usize {
        self.loads.lock().get(key).copied().unwrap_or(0)
    }

    pub fn total_loads(&self) -> usize {
        self.loads.lock().values().sum()
    }
}

impl PackageSource for MemorySource {
    fn load(&self, key: &str) -> Result<Vec<Package>, SourceError> {
        *self.loads.lock().entry(key.to_owned()).or_insert(0) += 1;
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if let Some(message) = self.failures.get(key) {
            return Err(SourceError::Io {
                path: key.into(),
                source: std::io::Error::other(message.clone()),
            });
        }
        let Some(files) = self.packages.get(key) else {
            return Ok(Vec::new());
        };

        let mut units = Vec::with_capacity(files.len());
        for (path, source) in files {
            let output = mane_parse::parse(source, path);
            if output.has_errors() {
                return Err(SourceError::Parse {
                    path: path.clone(),
                    diagnostics: output
                        .errors
                        .iter()
                        .map(|error| error.render(path, source))
                        .collect(),
                });
            }
            units.push(output.unit);
        }
        let name = units
            .first()
            .map(|unit| unit.package.name.clone())
            .unwrap_or_default();
        Ok(vec![Package::new(key, name, units)])
    }
}
