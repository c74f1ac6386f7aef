//! Type declaration lookup within a loaded package.

use mane_ir::{Package, SourceUnit, TypeSpec};

/// A type declaration and the file that declares it.
#[derive(Copy, Clone, Debug)]
pub struct Located<'p> {
    pub unit: &'p SourceUnit,
    pub spec: &'p TypeSpec,
}

/// First top-level type declaration named `name`, scanning files in load
/// order and declarations in source order.
///
/// Any kind of type matches; callers check for an interface themselves.
pub fn find_type_spec<'p>(package: &'p Package, name: &str) -> Option<Located<'p>> {
    package.units.iter().find_map(|unit| {
        unit.type_specs()
            .find(|spec| spec.name.name == name)
            .map(|spec| Located { unit, spec })
    })
}
