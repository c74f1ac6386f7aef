//! Resolution errors.

use crate::loader::LoadError;

/// Flat classification of a [`ResolveError`], for matching and error codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The package source failed or produced no package.
    Load,
    /// A package key or an interface name does not exist.
    NotFound,
    /// An embedded name is declared, but not as an interface.
    KindMismatch,
    /// An embedded element the resolver cannot expand.
    UnsupportedEmbedding,
    /// An interface embeds itself, directly or through others.
    Cycle,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Load => "E3001",
            ErrorKind::NotFound => "E3002",
            ErrorKind::KindMismatch => "E3003",
            ErrorKind::UnsupportedEmbedding => "E3004",
            ErrorKind::Cycle => "E3005",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Load => "load",
            ErrorKind::NotFound => "not found",
            ErrorKind::KindMismatch => "kind mismatch",
            ErrorKind::UnsupportedEmbedding => "unsupported embedding",
            ErrorKind::Cycle => "cycle",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Loading the package being resolved.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Loading the package behind a qualified embed.
    #[error("cannot load package `{alias}` (key `{key}`): {source}")]
    ForeignPackage {
        alias: String,
        key: String,
        #[source]
        source: LoadError,
    },

    #[error("interface `{name}` not found in package `{package}`")]
    NotFound { name: String, package: String },

    #[error("`{name}` in package `{package}` is a {found}, not an interface")]
    KindMismatch {
        name: String,
        package: String,
        found: &'static str,
    },

    #[error("interface `{interface}` embeds `{member}`, which cannot be flattened")]
    UnsupportedEmbedding { interface: String, member: String },

    #[error("embedding cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },

    /// Context: the failure happened while flattening `interface`.
    #[error("in interface `{interface}`: {source}")]
    InInterface {
        interface: String,
        #[source]
        source: Box<ResolveError>,
    },
}

impl ResolveError {
    #[cold]
    pub(crate) fn in_interface(self, interface: &str) -> Self {
        ResolveError::InInterface {
            interface: interface.to_owned(),
            source: Box::new(self),
        }
    }

    /// The innermost error, below every interface context.
    pub fn root_cause(&self) -> &ResolveError {
        let mut current = self;
        while let ResolveError::InInterface { source, .. } = current {
            current = source;
        }
        current
    }

    /// Interfaces being flattened when the error occurred, outermost first.
    pub fn interface_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let ResolveError::InInterface { interface, source } = current {
            path.push(interface.as_str());
            current = source;
        }
        path
    }

    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            ResolveError::Load(error) | ResolveError::ForeignPackage { source: error, .. } => {
                match error {
                    LoadError::NotLoaded { .. } => ErrorKind::NotFound,
                    LoadError::Source { .. } | LoadError::NoPackages { .. } => ErrorKind::Load,
                }
            }
            ResolveError::NotFound { .. } => ErrorKind::NotFound,
            ResolveError::KindMismatch { .. } => ErrorKind::KindMismatch,
            ResolveError::UnsupportedEmbedding { .. } => ErrorKind::UnsupportedEmbedding,
            ResolveError::Cycle { .. } => ErrorKind::Cycle,
            // root_cause never stops on a context layer
            ResolveError::InInterface { source, .. } => source.kind(),
        }
    }
}
