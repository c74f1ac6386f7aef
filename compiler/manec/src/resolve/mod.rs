//! Interface flattening.
//!
//! For every interface declared in a package, [`Resolver`] expands each
//! embedded interface in place, depth-first, producing one ordered method
//! list:
//!
//! ```text
//! type B interface { M1(); M2() }
//! type A interface { B; M3() }      =>  A: M1, M2, M3
//! ```
//!
//! Local embeds are looked up in the same package. Qualified embeds load the
//! other package through the shared [`PackageLoader`], so a package embedded
//! from many places is still loaded once. Methods keep the package that
//! declared them.
//!
//! Type parameters are copied as written. Embeds with type arguments
//! (`Base[T]`) expand to the generic methods of `Base`, unsubstituted.

mod error;
mod member;

use std::path::Path;

use mane_ir::{Interface, Method, PackageHandle, SourceUnit, TypeSpec};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::config::ForeignKeyMode;
use crate::loader::{PackageLoader, PackageSource};
use crate::locator::{find_type_spec, Located};

pub use error::{ErrorKind, ResolveError};
pub use member::Member;

/// Flattens the interfaces of loaded packages.
pub struct Resolver<'l, S> {
    loader: &'l PackageLoader<S>,
    foreign_keys: ForeignKeyMode,
}

impl<'l, S: PackageSource> Resolver<'l, S> {
    pub fn new(loader: &'l PackageLoader<S>) -> Self {
        Resolver {
            loader,
            foreign_keys: ForeignKeyMode::default(),
        }
    }

    /// How qualified embeds turn into load keys.
    #[must_use]
    pub fn with_foreign_keys(mut self, mode: ForeignKeyMode) -> Self {
        self.foreign_keys = mode;
        self
    }

    /// Interfaces of the package that contains `path`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_file(&self, path: &Path) -> Result<Vec<Interface>, ResolveError> {
        let package = self.loader.load_by_file(path)?;
        self.resolve_loaded(&package)
    }

    /// Interfaces of the package at `import_path`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_package(&self, import_path: &str) -> Result<Vec<Interface>, ResolveError> {
        let package = self.loader.load(import_path)?;
        self.resolve_loaded(&package)
    }

    /// Every interface declaration of `package`, flattened, in source order.
    ///
    /// Fails as a whole on the first interface that cannot be flattened.
    pub fn resolve_loaded(&self, package: &PackageHandle) -> Result<Vec<Interface>, ResolveError> {
        let mut interfaces = Vec::new();
        for unit in &package.units {
            for spec in unit.type_specs() {
                if spec.as_interface().is_none() {
                    continue;
                }
                let mut active = ActivePath::default();
                let located = Located { unit, spec };
                let methods = self.flatten(package, located, &mut active)?;
                interfaces.push(Interface {
                    name: spec.name.name.clone(),
                    package: package.clone(),
                    type_params: spec.type_params.clone(),
                    methods,
                });
            }
        }
        tracing::debug!(package = %package.id, interfaces = interfaces.len(), "resolved");
        Ok(interfaces)
    }

    /// Method set of one interface declaration. Errors are wrapped with the
    /// interface's name.
    fn flatten(
        &self,
        package: &PackageHandle,
        located: Located<'_>,
        active: &mut ActivePath,
    ) -> Result<Vec<Method>, ResolveError> {
        let name = &located.spec.name.name;
        active.enter(&package.id, &package.name, name)?;
        let result = mane_stack::with_stack(|| self.flatten_members(package, located, active));
        active.leave(&package.id, name);
        result.map_err(|error| error.in_interface(name))
    }

    fn flatten_members(
        &self,
        package: &PackageHandle,
        Located { unit, spec }: Located<'_>,
        active: &mut ActivePath,
    ) -> Result<Vec<Method>, ResolveError> {
        let Some(iface) = spec.as_interface() else {
            return Err(kind_mismatch(package, spec));
        };

        let mut methods = Vec::new();
        for elem in &iface.elems {
            match Member::classify(elem) {
                Member::DirectMethod(method) => {
                    trace!(interface = %spec.name.name, method = %method.name.name, "direct method");
                    methods.push(Method::from_signature(&method.name.name, package, &method.ty));
                }
                Member::LocalEmbed { name } => {
                    trace!(interface = %spec.name.name, embed = name, "local embed");
                    let target = locate_interface(package, name)?;
                    methods.extend(self.flatten(package, target, active)?);
                }
                Member::ForeignEmbed { alias, name } => {
                    let key = self.foreign_key(unit, alias);
                    trace!(interface = %spec.name.name, alias, %key, embed = name, "foreign embed");
                    let foreign =
                        self.loader
                            .load(&key)
                            .map_err(|source| ResolveError::ForeignPackage {
                                alias: alias.to_owned(),
                                key: key.clone(),
                                source,
                            })?;
                    let target = locate_interface(&foreign, name)?;
                    methods.extend(self.flatten(&foreign, target, active)?);
                }
                Member::Unsupported(ty) => {
                    return Err(ResolveError::UnsupportedEmbedding {
                        interface: spec.name.name.clone(),
                        member: ty.to_string(),
                    });
                }
            }
        }
        Ok(methods)
    }

    /// Load key for the package a qualified embed refers to.
    fn foreign_key(&self, unit: &SourceUnit, alias: &str) -> String {
        match self.foreign_keys {
            ForeignKeyMode::Alias => alias.to_owned(),
            ForeignKeyMode::ImportTable => unit
                .import_named(alias)
                .map_or_else(|| alias.to_owned(), |import| import.path.clone()),
        }
    }
}

/// Find `name` in `package` and require it to be an interface.
fn locate_interface<'p>(
    package: &'p PackageHandle,
    name: &str,
) -> Result<Located<'p>, ResolveError> {
    let Some(located) = find_type_spec(package, name) else {
        return Err(ResolveError::NotFound {
            name: name.to_owned(),
            package: package.id.clone(),
        });
    };
    if located.spec.as_interface().is_none() {
        return Err(kind_mismatch(package, located.spec));
    }
    Ok(located)
}

#[cold]
fn kind_mismatch(package: &PackageHandle, spec: &TypeSpec) -> ResolveError {
    let found = if spec.alias {
        "type alias"
    } else {
        spec.ty.kind_name()
    };
    ResolveError::KindMismatch {
        name: spec.name.name.clone(),
        package: package.id.clone(),
        found,
    }
}

/// Interfaces currently being flattened, keyed by (package id, name).
#[derive(Default)]
struct ActivePath {
    members: FxHashSet<(String, String)>,
    /// `package.Name` in entry order, for cycle messages.
    order: Vec<String>,
}

impl ActivePath {
    fn enter(&mut self, id: &str, package: &str, name: &str) -> Result<(), ResolveError> {
        let display = format!("{package}.{name}");
        if !self.members.insert((id.to_owned(), name.to_owned())) {
            let mut path = self.order.clone();
            path.push(display);
            return Err(ResolveError::Cycle { path });
        }
        self.order.push(display);
        Ok(())
    }

    fn leave(&mut self, id: &str, name: &str) {
        self.members.remove(&(id.to_owned(), name.to_owned()));
        self.order.pop();
    }
}
