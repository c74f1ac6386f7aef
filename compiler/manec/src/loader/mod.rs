//! At-most-once package loading.
//!
//! [`PackageLoader`] sits between the resolver and a [`PackageSource`]. Every
//! load goes through a per-key lock, so concurrent requests for the same key
//! wait for the first one and then hit the cache: each distinct key reaches
//! the source at most once per successful load. Failures are not cached.

mod error;
pub mod source;

use std::path::Path;

use mane_ir::PackageHandle;
use tracing::debug;

use crate::sync::{ConcurrentMap, KeyLockTable};

pub use error::LoadError;
pub use source::{FsSource, PackageSource, SourceError};

/// Prefix marking a load key that names a file rather than an import path.
pub const FILE_KEY_PREFIX: &str = "file=";

/// Load key for the package containing `path`.
///
/// The path is canonicalized so that every spelling of one file shares a
/// key. Paths that cannot be canonicalized (missing files) are used as given.
pub fn file_key(path: &Path) -> String {
    match path.canonicalize() {
        Ok(canonical) => format!("{FILE_KEY_PREFIX}{}", canonical.display()),
        Err(_) => format!("{FILE_KEY_PREFIX}{}", path.display()),
    }
}

/// Package cache in front of a [`PackageSource`].
///
/// One loader is shared by every resolution in a run; handles are never
/// evicted.
pub struct PackageLoader<S> {
    source: S,
    cache: ConcurrentMap<String, PackageHandle>,
    locks: KeyLockTable,
}

impl<S: PackageSource> PackageLoader<S> {
    pub fn new(source: S) -> Self {
        PackageLoader {
            source,
            cache: ConcurrentMap::new(),
            locks: KeyLockTable::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the package that contains the file at `path`.
    pub fn load_by_file(&self, path: &Path) -> Result<PackageHandle, LoadError> {
        self.load(&file_key(path))
    }

    /// Load the package for `key`, from the cache when possible.
    ///
    /// Only the first package the source returns is kept.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load(&self, key: &str) -> Result<PackageHandle, LoadError> {
        let _guard = self.locks.lock(key);
        if let Some(handle) = self.cache.get(key) {
            debug!("cache hit");
            return Ok(handle);
        }

        debug!("cache miss, loading from source");
        let packages = self.source.load(key).map_err(|source| LoadError::Source {
            key: key.to_owned(),
            source,
        })?;
        let Some(package) = packages.into_iter().next() else {
            return Err(LoadError::NoPackages {
                key: key.to_owned(),
            });
        };
        debug!(package = %package.name, id = %package.id, "loaded");

        let handle = PackageHandle::new(package);
        self.cache.set(key.to_owned(), handle.clone());
        Ok(handle)
    }

    /// Cached package for `key`. Never loads.
    pub fn get(&self, key: &str) -> Result<PackageHandle, LoadError> {
        let _guard = self.locks.lock(key);
        self.cache.get(key).ok_or_else(|| LoadError::NotLoaded {
            key: key.to_owned(),
        })
    }

    /// Number of cached packages.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests;
