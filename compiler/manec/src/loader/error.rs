use super::SourceError;

/// Failure to produce a package handle.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load `{key}`: {source}")]
    Source {
        key: String,
        #[source]
        source: SourceError,
    },
    #[error("no packages found for `{key}`")]
    NoPackages { key: String },
    /// `get` on a key that was never loaded.
    #[error("package `{key}` has not been loaded")]
    NotLoaded { key: String },
}

impl LoadError {
    pub fn key(&self) -> &str {
        match self {
            LoadError::Source { key, .. }
            | LoadError::NoPackages { key }
            | LoadError::NotLoaded { key } => key,
        }
    }
}
