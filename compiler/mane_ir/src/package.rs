//! Loaded packages and the shared handle the loader cache hands out.

// Arc is the implementation of PackageHandle - all usage goes through the newtype
#![expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of PackageHandle"
)]

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::ast::SourceUnit;

/// One package as produced by a load collaborator.
///
/// Immutable once built; the loader wraps it in a [`PackageHandle`].
#[derive(Clone, Debug, PartialEq)]
pub struct Package {
    /// Identity of the package: its import path, or its directory when it
    /// was loaded through a file key.
    pub id: String,
    /// Name from the package clause.
    pub name: String,
    /// Directory the files were read from, if any.
    pub dir: Option<PathBuf>,
    /// Syntax units in stable file order.
    pub units: Vec<SourceUnit>,
}

impl Package {
    pub fn new(id: impl Into<String>, name: impl Into<String>, units: Vec<SourceUnit>) -> Self {
        Package {
            id: id.into(),
            name: name.into(),
            dir: None,
            units,
        }
    }

    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }
}

/// Shared, immutable handle to a loaded [`Package`].
///
/// Equality is identity: two handles are equal only when they point at the
/// same cached package.
pub struct PackageHandle(Arc<Package>);

impl PackageHandle {
    pub fn new(package: Package) -> Self {
        PackageHandle(Arc::new(package))
    }

    /// Whether both handles refer to the same loaded package.
    pub fn ptr_eq(&self, other: &PackageHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Clone for PackageHandle {
    fn clone(&self) -> Self {
        PackageHandle(Arc::clone(&self.0))
    }
}

impl std::ops::Deref for PackageHandle {
    type Target = Package;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for PackageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for PackageHandle {}

impl fmt::Debug for PackageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackageHandle({} @ {})", self.0.name, self.0.id)
    }
}

#[cfg(test)]
mod tests;
